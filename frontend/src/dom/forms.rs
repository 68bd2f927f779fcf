use wasm_bindgen::JsCast;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::form::FormPayload;

/// Collects the successful controls of a form, in document order, the same
/// set a native submission would send.
pub fn serialize_form(form: &HtmlFormElement) -> FormPayload {
    let elements = form.elements();
    let mut payload = FormPayload::new();

    for index in 0..elements.length() {
        let Some(element) = elements.item(index) else {
            continue;
        };

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            if input.disabled() || input.name().is_empty() {
                continue;
            }
            match input.type_().as_str() {
                "submit" | "button" | "reset" | "image" | "file" => continue,
                "checkbox" | "radio" if !input.checked() => continue,
                _ => payload.push(input.name(), input.value()),
            }
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            if area.disabled() || area.name().is_empty() {
                continue;
            }
            payload.push(area.name(), normalize_newlines(&area.value()));
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            if select.disabled() || select.name().is_empty() {
                continue;
            }
            payload.push(select.name(), select.value());
        }
    }

    payload
}

// textarea values are submitted with CRLF line breaks
fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}
