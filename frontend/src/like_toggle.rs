use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::api::{ApiError, ServerApi};
use crate::form::FormPayload;
use crate::notice::{report, Notifier};
use crate::page::SharedPage;
use crate::sequencer::RequestSequencer;
use crate::view_model::{LikeState, MessageId};

/// A submitted like or unlike form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LikeSubmission {
    pub message_id: MessageId,
    pub payload: FormPayload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server confirmed the change and the control now shows this state.
    Applied(LikeState),
    /// A newer submission for the same message was issued meanwhile; this
    /// response was dropped.
    Superseded,
    /// No like control for that message is registered; nothing was sent.
    UnknownControl,
    Failed(ApiError),
}

pub struct LikeToggleController {
    page: SharedPage,
    api: Rc<dyn ServerApi>,
    notifier: Rc<dyn Notifier>,
    sequencer: RefCell<RequestSequencer<MessageId>>,
}

impl LikeToggleController {
    pub fn new(page: SharedPage, api: Rc<dyn ServerApi>, notifier: Rc<dyn Notifier>) -> Self {
        LikeToggleController {
            page,
            api,
            notifier,
            sequencer: RefCell::new(RequestSequencer::new()),
        }
    }

    /// Sends one like or unlike request, depending on the control's current
    /// state, and flips the control once the server has confirmed it.
    pub async fn submit(&self, submission: LikeSubmission) -> ToggleOutcome {
        let LikeSubmission {
            message_id,
            payload,
        } = submission;

        let current = self.page.borrow().model().confirmed_like_state(message_id);
        let current = match current {
            Some(state) => state,
            None => {
                warn!("like submitted for unknown message {}", message_id);
                return ToggleOutcome::UnknownControl;
            }
        };

        let ticket = self.sequencer.borrow_mut().issue(message_id);
        debug!(
            "message {} is {:?}, sending request #{}",
            message_id, current, ticket.number
        );

        let result = match current {
            LikeState::Liked => self.api.unlike(message_id, &payload).await,
            LikeState::NotLiked => self.api.like(message_id, &payload).await,
        };

        let target = current.toggled();

        if !self.sequencer.borrow_mut().finish(ticket) {
            match &result {
                // the server holds this state now; show it only if the newer
                // request cannot settle things itself
                Ok(()) if self.sequencer.borrow().is_pending(&message_id) => {
                    debug!("request #{} confirmed {:?}, not shown yet", ticket.number, target);
                    self.page.borrow_mut().confirm_like_state(message_id, target);
                }
                Ok(()) => debug!("dropping superseded response #{}", ticket.number),
                Err(err) => debug!("superseded request #{} failed: {}", ticket.number, err),
            }
            return ToggleOutcome::Superseded;
        }

        match result {
            Ok(()) => {
                self.page.borrow_mut().set_like_state(message_id, target);
                ToggleOutcome::Applied(target)
            }
            Err(err) => {
                if self.page.borrow_mut().settle_like_state(message_id) {
                    debug!("message {} reverted to its last confirmed state", message_id);
                }
                report(&*self.notifier, "like toggle", &err);
                ToggleOutcome::Failed(err)
            }
        }
    }
}
