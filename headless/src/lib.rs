extern crate env_logger;
extern crate log;
extern crate warbler_frontend;

pub mod actions;
pub mod config;
pub mod http_api;
pub mod terminal;

use std::io::Write;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}
