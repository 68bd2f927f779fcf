use std::rc::Rc;

use anyhow::bail;

use warbler_frontend::api::ServerApi;
use warbler_frontend::compose::{ComposeController, ComposeOutcome};
use warbler_frontend::form::FormPayload;
use warbler_frontend::like_toggle::{LikeSubmission, LikeToggleController, ToggleOutcome};
use warbler_frontend::notice::Notifier;
use warbler_frontend::page::{Page, Renderer};
use warbler_frontend::view_model::{
    LikeControl, LikeState, ListContext, MessageId, PageModel, UserId, ViewList,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Submit the like form of a message currently shown in `state`.
    ToggleLike {
        message_id: MessageId,
        state: LikeState,
    },
    /// Submit the compose form as `viewer`, with the home timeline and,
    /// when the viewer is known, their own timeline on the page.
    Post {
        text: String,
        viewer: Option<UserId>,
    },
}

impl Action {
    fn page_model(&self) -> PageModel {
        match self {
            Action::ToggleLike { message_id, state } => {
                let mut model = PageModel::new(None);
                model.register_like_control(LikeControl {
                    message_id: *message_id,
                    state: *state,
                });
                model
            }
            Action::Post { viewer, .. } => {
                let mut model = PageModel::new(*viewer);
                model.register_list(ViewList::new(ListContext::Home));
                if let Some(viewer) = viewer {
                    model.register_list(ViewList::new(ListContext::User(*viewer)));
                }
                model
            }
        }
    }
}

/// Runs one action through the same controllers the browser uses and returns
/// the resulting page model. Fails when the server did not confirm it.
pub async fn perform(
    action: Action,
    form: FormPayload,
    api: Rc<dyn ServerApi>,
    notifier: Rc<dyn Notifier>,
    renderer: Box<dyn Renderer>,
) -> anyhow::Result<PageModel> {
    let page = Page::shared(action.page_model(), renderer);

    match action {
        Action::ToggleLike { message_id, .. } => {
            let controller = LikeToggleController::new(page.clone(), api, notifier);
            let submission = LikeSubmission {
                message_id,
                payload: form,
            };
            match controller.submit(submission).await {
                ToggleOutcome::Applied(_) => {}
                ToggleOutcome::Failed(err) => bail!(err),
                other => bail!("like was not applied: {:?}", other),
            }
        }
        Action::Post { text, .. } => {
            let controller = ComposeController::new(page.clone(), api, notifier);
            if let ComposeOutcome::Failed(err) = controller.submit(form.with("text", text)).await {
                bail!(err);
            }
        }
    }

    let model = page.borrow().model().clone();
    Ok(model)
}
