// Browser entry point: reads the server-rendered page into a view-model and
// binds both controllers to its forms.
pub mod fetch;
pub mod forms;
pub mod render;

use std::rc::Rc;

use log::{debug, error, info, warn, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement};

use crate::api::ServerApi;
use crate::compose::{ComposeController, ComposeOutcome};
use crate::like_toggle::{LikeSubmission, LikeToggleController};
use crate::notice::Notifier;
use crate::page::Page;
use crate::view_model::{LikeControl, LikeState, ListContext, MessageId, PageModel, UserId, ViewList};
use crate::{COMPOSE_FORM_ID, CURRENT_USER_ATTR, LIKE_FORM_SELECTOR};

use self::fetch::FetchApi;
use self::forms::serialize_form;
use self::render::{DomNotifier, DomRenderer};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(contents: &str);
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            console_log(&format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[wasm_bindgen]
pub fn bootstrap() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    init_logger();

    if let Err(err) = bind_page() {
        error!("could not bind page controllers: {:?}", err);
    }
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn bind_page() -> Result<(), JsValue> {
    let document = document()?;
    let model = scan_page(&document)?;
    info!(
        "page bound: viewer {:?}, lists {:?}",
        model.viewer(),
        model.lists().iter().map(|l| l.context).collect::<Vec<_>>()
    );

    let page = Page::shared(model, Box::new(DomRenderer::new(document.clone())));
    let api: Rc<dyn ServerApi> = Rc::new(FetchApi::new());
    let notifier: Rc<dyn Notifier> = Rc::new(DomNotifier::new(document.clone()));

    let like = Rc::new(LikeToggleController::new(
        page.clone(),
        api.clone(),
        notifier.clone(),
    ));
    bind_like_forms(&document, like)?;

    let compose = Rc::new(ComposeController::new(page, api, notifier));
    bind_compose_form(&document, compose)?;

    Ok(())
}

/// Builds the view-model from what the server rendered.
pub fn scan_page(document: &Document) -> Result<PageModel, JsValue> {
    let viewer = document
        .query_selector(&format!("[{}]", CURRENT_USER_ATTR))?
        .and_then(|el| el.get_attribute(CURRENT_USER_ATTR))
        .and_then(|raw| {
            raw.parse::<UserId>()
                .map_err(|err| warn!("ignoring viewer: {}", err))
                .ok()
        });

    let mut model = PageModel::new(viewer);

    for form in like_forms(document)? {
        match like_control(&form) {
            Some(control) => model.register_like_control(control),
            None => warn!("like form without a message id: {:?}", form.id()),
        }
    }

    let mut contexts = vec![ListContext::Home];
    if let Some(viewer) = viewer {
        contexts.push(ListContext::User(viewer));
    }
    for context in contexts {
        if document.get_element_by_id(&context.container_id()).is_some() {
            model.register_list(ViewList::new(context));
        }
    }

    Ok(model)
}

fn like_forms(document: &Document) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(LIKE_FORM_SELECTOR)?;
    let mut forms = Vec::with_capacity(nodes.length() as usize);

    for index in 0..nodes.length() {
        if let Some(form) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
            forms.push(form);
        }
    }

    Ok(forms)
}

pub fn like_control(form: &Element) -> Option<LikeControl> {
    let message_id = form.id().parse::<MessageId>().ok()?;
    let class_name = form.class_name();
    let state = LikeState::from_form_classes(class_name.split_whitespace())?;

    Some(LikeControl { message_id, state })
}

fn submitted_form(event: &Event) -> Option<HtmlFormElement> {
    event
        .current_target()
        .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
}

fn bind_like_forms(document: &Document, controller: Rc<LikeToggleController>) -> Result<(), JsValue> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let Some(form) = submitted_form(&event) else {
            return;
        };
        let message_id = match form.id().parse::<MessageId>() {
            Ok(message_id) => message_id,
            Err(err) => {
                warn!("like form: {}", err);
                return;
            }
        };
        let submission = LikeSubmission {
            message_id,
            payload: serialize_form(&form),
        };

        let controller = controller.clone();
        spawn_local(async move {
            let outcome = controller.submit(submission).await;
            debug!("like {}: {:?}", message_id, outcome);
        });
    });

    let forms = like_forms(document)?;
    for form in &forms {
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    }
    debug!("bound {} like form(s)", forms.len());

    on_submit.forget();
    Ok(())
}

/// Sends the compose form through `controller` and clears it once the new
/// message is on the page.
pub fn bind_compose_form(document: &Document, controller: Rc<ComposeController>) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(COMPOSE_FORM_ID) else {
        debug!("no compose form on this page");
        return Ok(());
    };

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let Some(form) = submitted_form(&event) else {
            return;
        };
        let payload = serialize_form(&form);

        let controller = controller.clone();
        spawn_local(async move {
            if let ComposeOutcome::Inserted(contexts) = controller.submit(payload).await {
                debug!("new message inserted into {:?}", contexts);
                form.reset();
            }
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}
