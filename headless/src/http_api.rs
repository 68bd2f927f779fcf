use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use url::Url;

use warbler_frontend::api::{
    acknowledgment, created_fragment, like_path, unlike_path, ApiError, Reply, ServerApi,
    CREATE_MESSAGE_PATH, FORM_CONTENT_TYPE, REQUESTED_WITH,
};
use warbler_frontend::form::FormPayload;
use warbler_frontend::view_model::{MessageId, RenderedFragment};

use crate::config::{ClientConfig, SESSION_COOKIE};

fn transport(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let requested_with = HeaderName::from_bytes(REQUESTED_WITH.0.as_bytes())
            .context("invalid header name")?;
        headers.insert(requested_with, HeaderValue::from_static(REQUESTED_WITH.1));

        if let Some(session) = &config.session {
            let cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, session))
                .context("session cookie is not a valid header value")?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("could not build http client")?;

        Ok(HttpApi {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn post(&self, path: &str, payload: &FormPayload) -> Result<Reply, ApiError> {
        let url = self.base_url.join(path).map_err(transport)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(payload.encode())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let redirected = response.url() != &url;
        if redirected {
            debug!("{} redirected to {}", url, response.url());
        }
        let body = response.text().await.map_err(transport)?;

        Ok(Reply::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        )
        .redirected(redirected))
    }
}

#[async_trait(?Send)]
impl ServerApi for HttpApi {
    async fn like(&self, message_id: MessageId, payload: &FormPayload) -> Result<(), ApiError> {
        let reply = self.post(&like_path(message_id), payload).await?;
        acknowledgment(&reply)
    }

    async fn unlike(&self, message_id: MessageId, payload: &FormPayload) -> Result<(), ApiError> {
        let reply = self.post(&unlike_path(message_id), payload).await?;
        acknowledgment(&reply)
    }

    async fn create_message(&self, payload: &FormPayload) -> Result<RenderedFragment, ApiError> {
        let reply = self.post(CREATE_MESSAGE_PATH, payload).await?;
        created_fragment(&reply)
    }
}
