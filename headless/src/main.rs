extern crate warbler_headless;

use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use url::Url;

use warbler_frontend::form::FormPayload;
use warbler_frontend::view_model::{LikeState, MessageId, UserId};
use warbler_headless::actions::{perform, Action};
use warbler_headless::config::{ClientConfig, DEFAULT_BASE_URL};
use warbler_headless::http_api::HttpApi;
use warbler_headless::terminal::{TerminalNotifier, TerminalRenderer};

/// Like, unlike and post Warbler messages from a terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server base URL
    #[arg(long, env = "WARBLER_URL", default_value = DEFAULT_BASE_URL)]
    url: Url,

    /// Session cookie of the logged-in user
    #[arg(long, env = "WARBLER_SESSION")]
    session: Option<String>,

    /// CSRF token sent with every form
    #[arg(long, env = "WARBLER_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "WARBLER_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    /// Print the resulting page model as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Like a message
    Like { message_id: MessageId },
    /// Remove a like from a message
    Unlike { message_id: MessageId },
    /// Post a new message
    Post {
        text: String,
        /// Your own user id, to also fill your own timeline
        #[arg(long)]
        user: Option<UserId>,
    },
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Like { message_id } => Action::ToggleLike {
                message_id,
                state: LikeState::NotLiked,
            },
            Command::Unlike { message_id } => Action::ToggleLike {
                message_id,
                state: LikeState::Liked,
            },
            Command::Post { text, user } => Action::Post { text, viewer: user },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    warbler_headless::init_logger();
    let args = Args::parse();

    let config = ClientConfig {
        base_url: args.url,
        session: args.session,
        timeout: Duration::from_secs(args.timeout),
    };
    info!("talking to {}", config.base_url);
    let api = Rc::new(HttpApi::new(&config)?);

    let mut form = FormPayload::new();
    if let Some(token) = args.csrf_token {
        form.push("csrf_token", token);
    }

    let model = perform(
        args.command.into(),
        form,
        api,
        Rc::new(TerminalNotifier),
        Box::new(TerminalRenderer),
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    }

    Ok(())
}
