use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";
pub const SESSION_COOKIE: &'static str = "session";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Value of the server's session cookie for the logged-in user.
    pub session: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        ClientConfig {
            base_url,
            session: None,
            timeout: Duration::from_secs(30),
        }
    }
}
