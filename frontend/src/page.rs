use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::view_model::{LikeState, ListContext, MessageId, PageModel, RenderedFragment, ViewChange};

/// Reflects view-model changes onto whatever displays the page.
pub trait Renderer {
    fn render(&mut self, change: &ViewChange);
}

/// The view-model together with its renderer. Every mutation goes through
/// here so the two never drift apart.
pub struct Page {
    model: PageModel,
    renderer: Box<dyn Renderer>,
}

pub type SharedPage = Rc<RefCell<Page>>;

impl Page {
    pub fn new(model: PageModel, renderer: Box<dyn Renderer>) -> Self {
        Page { model, renderer }
    }

    pub fn shared(model: PageModel, renderer: Box<dyn Renderer>) -> SharedPage {
        Rc::new(RefCell::new(Page::new(model, renderer)))
    }

    pub fn model(&self) -> &PageModel {
        &self.model
    }

    /// Returns whether anything had to be re-rendered.
    pub fn set_like_state(&mut self, message_id: MessageId, state: LikeState) -> bool {
        match self.model.set_like_state(message_id, state) {
            Some(change) => {
                self.renderer.render(&change);
                true
            }
            None => {
                debug!("like control {} already {:?}", message_id, state);
                false
            }
        }
    }

    pub fn confirm_like_state(&mut self, message_id: MessageId, state: LikeState) {
        self.model.confirm_like_state(message_id, state);
    }

    /// Shows the last state the server confirmed, if it was never displayed.
    pub fn settle_like_state(&mut self, message_id: MessageId) -> bool {
        match self.model.settle_like_state(message_id) {
            Some(change) => {
                self.renderer.render(&change);
                true
            }
            None => false,
        }
    }

    /// Prepends a freshly created message to every list it belongs in and
    /// returns those lists.
    pub fn prepend_new_message(&mut self, fragment: RenderedFragment) -> Vec<ListContext> {
        let changes = self.model.prepend_fragment(fragment);
        let mut contexts = Vec::with_capacity(changes.len());

        for change in &changes {
            self.renderer.render(change);
            if let ViewChange::FragmentPrepended { context, .. } = change {
                contexts.push(*context);
            }
        }

        contexts
    }
}
