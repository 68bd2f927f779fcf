// Client-side controllers for the Warbler timeline: liking messages and
// composing new ones against the server's form endpoints.
extern crate async_trait;
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate thiserror;
extern crate url;

pub mod api;
pub mod compose;
pub mod form;
pub mod like_toggle;
pub mod notice;
pub mod page;
pub mod sequencer;
pub mod view_model;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub const COMPOSE_FORM_ID: &'static str = "new-warble-form";
pub const LIKE_FORM_SELECTOR: &'static str = "form.liked, form.not-liked";
pub const CURRENT_USER_ATTR: &'static str = "data-current-user";
pub const NOTICE_CONTAINER_ID: &'static str = "notices";
pub const NOTICE_TIMEOUT_MS: i32 = 4000;
