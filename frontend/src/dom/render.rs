use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use crate::notice::{Notice, Notifier};
use crate::page::Renderer;
use crate::view_model::{LikeState, ListContext, MessageId, RenderedFragment, ViewChange};
use crate::{NOTICE_CONTAINER_ID, NOTICE_TIMEOUT_MS};

fn elements(nodes: &NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub struct DomRenderer {
    document: Document,
}

impl DomRenderer {
    pub fn new(document: Document) -> Self {
        DomRenderer { document }
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", id)))
    }

    fn render_like_state(&self, message_id: MessageId, state: LikeState) -> Result<(), JsValue> {
        let previous = state.toggled();
        // the same message can be listed more than once on a page
        let forms = self
            .document
            .query_selector_all(&format!("form[id=\"{}\"]", message_id))?;
        if forms.length() == 0 {
            return Err(JsValue::from_str(&format!("no like form for message {}", message_id)));
        }

        for form in elements(&forms) {
            let classes = form.class_list();
            classes.remove_1(previous.form_class())?;
            classes.add_1(state.form_class())?;

            // the icon sits inside the form's button
            for icon in elements(&form.query_selector_all(":scope > * > i")?) {
                let classes = icon.class_list();
                classes.remove_1(previous.icon().class())?;
                classes.add_1(state.icon().class())?;
            }
        }

        Ok(())
    }

    fn prepend(&self, context: ListContext, fragment: &RenderedFragment) -> Result<(), JsValue> {
        self.element(&context.container_id())?
            .insert_adjacent_html("afterbegin", fragment.markup())
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, change: &ViewChange) {
        let result = match change {
            ViewChange::LikeStateChanged { message_id, state } => {
                self.render_like_state(*message_id, *state)
            }
            ViewChange::FragmentPrepended { context, fragment } => self.prepend(*context, fragment),
        };

        if let Err(err) = result {
            error!("could not render {:?}: {:?}", change, err);
        }
    }
}

/// Shows notices as elements that remove themselves after a while.
pub struct DomNotifier {
    document: Document,
    timeout_ms: i32,
}

impl DomNotifier {
    pub fn new(document: Document) -> Self {
        DomNotifier::with_timeout(document, NOTICE_TIMEOUT_MS)
    }

    pub fn with_timeout(document: Document, timeout_ms: i32) -> Self {
        DomNotifier {
            document,
            timeout_ms,
        }
    }

    fn show(&self, notice: &Notice) -> Result<(), JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(&format!("notice {}", notice.level.class()));
        element.set_attribute("role", "status")?;
        element.set_text_content(Some(&notice.text));

        match self.document.get_element_by_id(NOTICE_CONTAINER_ID) {
            Some(container) => container.append_child(&element)?,
            None => self
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&element)?,
        };

        let dismiss = Closure::<dyn FnMut()>::new(move || {
            element.remove();
        });
        web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                dismiss.as_ref().unchecked_ref(),
                self.timeout_ms,
            )?;
        dismiss.forget();

        Ok(())
    }
}

impl Notifier for DomNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(err) = self.show(&notice) {
            error!("could not show notice {:?}: {:?}", notice.text, err);
        }
    }
}
