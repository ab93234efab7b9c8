use crate::{
    controller::{ControllerSnapshot, PlaybackController},
    engine::JsEngineFactory,
    media_element::MediaElementReference,
    wasm_bindgen,
};

mod api;
mod core;
mod event_listeners;

/// The `Dispatcher` is the player Interface exported to the JavaScript-side,
/// providing an API to load contents and influence playback.
///
/// It wraps a `PlaybackController` bound to the JavaScript streaming engine and media element,
/// and announces to the JavaScript-side every observable change the last call led to.
#[wasm_bindgen]
pub struct Dispatcher {
    controller: PlaybackController<JsEngineFactory, MediaElementReference>,

    /// Observable state as last announced to the JavaScript-side.
    ///
    /// `None` if nothing has been announced yet.
    last_announced: Option<ControllerSnapshot>,
}
