use async_trait::async_trait;
use thiserror::Error;

use crate::form::FormPayload;
use crate::view_model::{MessageId, RenderedFragment};

pub const CREATE_MESSAGE_PATH: &'static str = "/messages/new";
pub const FORM_CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded; charset=UTF-8";
pub const REQUESTED_WITH: (&'static str, &'static str) = ("X-Requested-With", "XMLHttpRequest");

pub fn like_path(message_id: MessageId) -> String {
    format!("/messages/{}/like", message_id)
}

pub fn unlike_path(message_id: MessageId) -> String {
    format!("/messages/{}/unlike", message_id)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Malformed(String),
}

/// The web server as seen by the controllers. Futures are not `Send`: both
/// the browser and the headless client drive them from a single thread.
#[async_trait(?Send)]
pub trait ServerApi {
    async fn like(&self, message_id: MessageId, payload: &FormPayload) -> Result<(), ApiError>;

    async fn unlike(&self, message_id: MessageId, payload: &FormPayload) -> Result<(), ApiError>;

    /// Returns the server-rendered markup of the created message.
    async fn create_message(&self, payload: &FormPayload) -> Result<RenderedFragment, ApiError>;
}

/// A completed HTTP exchange as the transports report it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
    /// The transport followed at least one redirect to get here.
    pub redirected: bool,
}

impl Reply {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Reply {
            status,
            status_text: status_text.into(),
            body: body.into(),
            redirected: false,
        }
    }

    pub fn redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn rejection(&self) -> ApiError {
        let body = self.body.trim();
        let message = if body.is_empty() {
            self.status_text.trim().to_owned()
        } else {
            body.to_owned()
        };

        ApiError::Rejected {
            status: self.status,
            message,
        }
    }
}

/// Interprets the response to a like or unlike request. The body is ignored
/// on success, and so is a redirect: the server answers a handled form post
/// by redirecting to a page.
pub fn acknowledgment(reply: &Reply) -> Result<(), ApiError> {
    if reply.is_success() {
        Ok(())
    } else {
        Err(reply.rejection())
    }
}

/// Interprets the response to a create request. Only a direct answer carries
/// the fragment; a redirect lands on a whole page, never on a single message.
pub fn created_fragment(reply: &Reply) -> Result<RenderedFragment, ApiError> {
    if !reply.is_success() {
        return Err(reply.rejection());
    }

    if reply.redirected {
        return Err(ApiError::Malformed(format!(
            "create was redirected (final status {}) instead of returning a fragment",
            reply.status
        )));
    }

    RenderedFragment::new(reply.body.as_str()).map_err(|err| {
        ApiError::Malformed(format!("create returned status {}: {}", reply.status, err))
    })
}
