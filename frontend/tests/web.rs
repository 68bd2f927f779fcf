#![cfg(target_arch = "wasm32")]
extern crate wasm_bindgen_test;
extern crate warbler_frontend;

use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlFormElement, HtmlTextAreaElement};

use warbler_frontend::api::{ApiError, ServerApi};
use warbler_frontend::compose::ComposeController;
use warbler_frontend::dom::forms::serialize_form;
use warbler_frontend::dom::render::{DomNotifier, DomRenderer};
use warbler_frontend::dom::{bind_compose_form, document, scan_page};
use warbler_frontend::form::FormPayload;
use warbler_frontend::notice::{Notice, NoticeLevel, Notifier};
use warbler_frontend::page::{Page, Renderer};
use warbler_frontend::view_model::{
    LikeState, ListContext, MessageId, RenderedFragment, UserId, ViewChange,
};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
<div id="viewer" data-current-user="3"></div>
<form id="5" class="messages-like not-liked">
  <button><i class="far fa-star"></i></button>
  <input type="hidden" name="csrf_token" value="abc">
</form>
<form id="6" class="liked"><button><i class="fas fa-star"></i></button></form>
<form id="new-warble-form">
  <textarea name="text">Hello
world</textarea>
  <input type="checkbox" name="unchecked" value="x">
  <input type="submit" name="go" value="Post">
</form>
<ul id="home"><li>older</li></ul>
<ul id="user-3"></ul>
<ul id="user-8"></ul>
<div id="notices"></div>
"#;

const COMPOSE_PAGE: &str = r#"
<div data-current-user="3"></div>
<form id="new-warble-form"><textarea name="text"></textarea></form>
<ul id="home"><li>older</li></ul>
<ul id="user-3"></ul>
"#;

const REPEATED_MESSAGE_PAGE: &str = r#"
<form id="5" class="not-liked"><button><i class="far fa-star"></i></button></form>
<form id="5" class="not-liked"><button><i class="far fa-star"></i></button></form>
"#;

fn load(markup: &str) -> web_sys::Document {
    let document = document().unwrap();
    document.body().unwrap().set_inner_html(markup);
    document
}

fn load_page() -> web_sys::Document {
    load(PAGE)
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Creates every message as the same fragment.
struct FixedServer;

#[async_trait(?Send)]
impl ServerApi for FixedServer {
    async fn like(&self, _message_id: MessageId, _payload: &FormPayload) -> Result<(), ApiError> {
        Ok(())
    }

    async fn unlike(&self, _message_id: MessageId, _payload: &FormPayload) -> Result<(), ApiError> {
        Ok(())
    }

    async fn create_message(&self, payload: &FormPayload) -> Result<RenderedFragment, ApiError> {
        let text = payload.field("text").unwrap_or_default();
        RenderedFragment::new(format!("<li>{}</li>", text))
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

#[wasm_bindgen_test]
fn scan_reads_controls_lists_and_viewer() {
    let document = load_page();

    let model = scan_page(&document).unwrap();

    assert_eq!(model.viewer(), Some(UserId(3)));
    assert_eq!(model.like_state(MessageId(5)), Some(LikeState::NotLiked));
    assert_eq!(model.like_state(MessageId(6)), Some(LikeState::Liked));
    assert_eq!(
        model.compose_targets(),
        vec![ListContext::Home, ListContext::User(UserId(3))]
    );
    assert!(model.list(ListContext::User(UserId(8))).is_none());
}

#[wasm_bindgen_test]
fn renderer_swaps_form_and_icon_classes() {
    let document = load_page();
    let mut renderer = DomRenderer::new(document.clone());

    renderer.render(&ViewChange::LikeStateChanged {
        message_id: MessageId(5),
        state: LikeState::Liked,
    });

    let form = document.get_element_by_id("5").unwrap();
    assert!(form.class_list().contains("liked"));
    assert!(!form.class_list().contains("not-liked"));
    let icon = form.query_selector("i").unwrap().unwrap();
    assert!(icon.class_list().contains("fas"));
    assert!(!icon.class_list().contains("far"));
}

#[wasm_bindgen_test]
fn renderer_prepends_fragment() {
    let document = load_page();
    let mut renderer = DomRenderer::new(document.clone());

    renderer.render(&ViewChange::FragmentPrepended {
        context: ListContext::Home,
        fragment: RenderedFragment::new("<li>newest</li>").unwrap(),
    });

    let home = document.get_element_by_id("home").unwrap();
    assert_eq!(home.inner_html(), "<li>newest</li><li>older</li>");
}

#[wasm_bindgen_test]
fn serialize_skips_unsuccessful_controls() {
    let document = load_page();
    let form: HtmlFormElement = document
        .get_element_by_id("new-warble-form")
        .unwrap()
        .dyn_into()
        .unwrap();

    let payload = serialize_form(&form);

    assert_eq!(payload.fields().len(), 1);
    assert_eq!(payload.field("text"), Some("Hello\r\nworld"));
    assert_eq!(payload.encode(), "text=Hello%0D%0Aworld");
}

#[wasm_bindgen_test]
fn renderer_updates_every_form_of_a_repeated_message() {
    let document = load(REPEATED_MESSAGE_PAGE);
    let mut renderer = DomRenderer::new(document.clone());

    renderer.render(&ViewChange::LikeStateChanged {
        message_id: MessageId(5),
        state: LikeState::Liked,
    });

    let forms = document.query_selector_all("form").unwrap();
    assert_eq!(forms.length(), 2);
    for index in 0..forms.length() {
        let form: web_sys::Element = forms.item(index).unwrap().dyn_into().unwrap();
        assert_eq!(form.class_name(), "liked");
        let icon = form.query_selector("i").unwrap().unwrap();
        assert!(icon.class_list().contains("fas"));
    }
}

#[wasm_bindgen_test]
async fn notice_goes_to_container_and_expires() {
    let document = load_page();
    let notifier = DomNotifier::with_timeout(document.clone(), 10);

    notifier.notify(Notice {
        level: NoticeLevel::Error,
        text: "Access unauthorized.".into(),
    });

    let container = document.get_element_by_id("notices").unwrap();
    let notice = container.first_element_child().unwrap();
    assert_eq!(notice.class_name(), "notice notice-error");
    assert_eq!(notice.text_content().as_deref(), Some("Access unauthorized."));

    sleep(50).await;
    assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn notice_falls_back_to_body() {
    let document = load(COMPOSE_PAGE);
    let notifier = DomNotifier::with_timeout(document.clone(), 1000);

    notifier.notify(Notice {
        level: NoticeLevel::Warning,
        text: "Could not reach the server. Please try again.".into(),
    });

    let last = document.body().unwrap().last_element_child().unwrap();
    assert_eq!(last.class_name(), "notice notice-warning");
}

#[wasm_bindgen_test]
async fn bound_compose_form_inserts_and_resets() {
    let document = load(COMPOSE_PAGE);
    let page = Page::shared(
        scan_page(&document).unwrap(),
        Box::new(DomRenderer::new(document.clone())),
    );
    let controller = Rc::new(ComposeController::new(
        page,
        Rc::new(FixedServer),
        Rc::new(DomNotifier::new(document.clone())),
    ));
    bind_compose_form(&document, controller).unwrap();

    let text: HtmlTextAreaElement = document
        .query_selector("#new-warble-form textarea")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    text.set_value("fresh");
    let form = document.get_element_by_id("new-warble-form").unwrap();
    form.dispatch_event(&Event::new("submit").unwrap()).unwrap();

    sleep(20).await;

    assert_eq!(text.value(), "");
    assert_eq!(
        document.get_element_by_id("home").unwrap().inner_html(),
        "<li>fresh</li><li>older</li>"
    );
    assert_eq!(
        document.get_element_by_id("user-3").unwrap().inner_html(),
        "<li>fresh</li>"
    );
}
