use async_trait::async_trait;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::api::{
    acknowledgment, created_fragment, like_path, unlike_path, ApiError, Reply, ServerApi,
    CREATE_MESSAGE_PATH, FORM_CONTENT_TYPE, REQUESTED_WITH,
};
use crate::form::FormPayload;
use crate::view_model::{MessageId, RenderedFragment};

fn transport(err: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", err))
}

/// Talks to the page's own origin with `window.fetch`. Session cookies go
/// along because requests are same-origin.
#[derive(Debug, Default)]
pub struct FetchApi;

impl FetchApi {
    pub fn new() -> Self {
        FetchApi
    }

    async fn post(&self, path: &str, payload: &FormPayload) -> Result<Reply, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".into()))?;

        let headers = Headers::new().map_err(transport)?;
        headers
            .set("Content-Type", FORM_CONTENT_TYPE)
            .map_err(transport)?;
        headers
            .set(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .map_err(transport)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&payload.encode()));

        let request = Request::new_with_str_and_init(path, &init).map_err(transport)?;
        debug!("POST {}", path);

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();

        Ok(Reply::new(response.status(), response.status_text(), body)
            .redirected(response.redirected()))
    }
}

#[async_trait(?Send)]
impl ServerApi for FetchApi {
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
