use std::rc::Rc;

use log::{debug, info};

use crate::api::{ApiError, ServerApi};
use crate::form::FormPayload;
use crate::notice::{report, Notifier};
use crate::page::SharedPage;
use crate::view_model::ListContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposeOutcome {
    /// Lists the new message was prepended to; empty when none of them is on
    /// the current page.
    Inserted(Vec<ListContext>),
    Failed(ApiError),
}

pub struct ComposeController {
    page: SharedPage,
    api: Rc<dyn ServerApi>,
    notifier: Rc<dyn Notifier>,
}

impl ComposeController {
    pub fn new(page: SharedPage, api: Rc<dyn ServerApi>, notifier: Rc<dyn Notifier>) -> Self {
        ComposeController {
            page,
            api,
            notifier,
        }
    }

    /// Creates the message and inserts the server's rendering of it. Nothing
    /// on the page changes unless the server returned a fragment.
    pub async fn submit(&self, payload: FormPayload) -> ComposeOutcome {
        debug!("creating message with {} field(s)", payload.fields().len());

        match self.api.create_message(&payload).await {
            Ok(fragment) => {
                let contexts = self.page.borrow_mut().prepend_new_message(fragment);
                if contexts.is_empty() {
                    info!("new message created, no timeline for it on this page");
                }
                ComposeOutcome::Inserted(contexts)
            }
            Err(err) => {
                report(&*self.notifier, "compose", &err);
                ComposeOutcome::Failed(err)
            }
        }
    }
}
