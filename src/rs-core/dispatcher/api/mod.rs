use crate::{
    bindings::formatters::{format_level_label, format_levels_for_js},
    controller::{ErrorKind, PlaybackController, PlaybackState, PlayerConfiguration},
    engine::JsEngineFactory,
    media_element::MediaElementReference,
    quality::QualitySelection,
    utils::{
        logger::{Logger, LoggerLevel},
        url::Url,
    },
    wasm_bindgen,
};

use super::Dispatcher;

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which as its name point at, should be called when particular
/// events happen. Such "event_listeners" are defined in its own file.
#[wasm_bindgen]
impl Dispatcher {
    /// Create a new `Dispatcher` allowing to load a content on the HTMLMediaElement that should be
    /// linked to it on the JavaScript-side.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Dispatcher {
            controller: PlaybackController::new(
                JsEngineFactory::default(),
                MediaElementReference::new(),
                PlayerConfiguration::default(),
            ),
            last_announced: None,
        }
    }

    pub fn set_log_level(&mut self, level: LoggerLevel) {
        Logger::set_logger_level(level);
    }

    /// Set the domain from which processed videos are served, needed by `load_video`.
    pub fn set_delivery_base_domain(&mut self, domain: Option<String>) {
        self.controller.config_mut().delivery_base_domain = domain;
    }

    pub fn set_manifest_extension(&mut self, extension: String) {
        self.controller.config_mut().manifest_extension = extension;
    }

    pub fn set_native_mime_type(&mut self, mime_type: String) {
        self.controller.config_mut().native_mime_type = mime_type;
    }

    pub fn set_default_scheme(&mut self, scheme: String) {
        self.controller.config_mut().default_scheme = scheme;
    }

    /// Start loading a new content by communicating its manifest's URL.
    ///
    /// Returns the `SessionId` linked to that content, `None` if it could not be loaded, in
    /// which case an error has been sent through `jsSendError`.
    pub fn load_content(&mut self, content_url: String) -> Option<u32> {
        Logger::info("API: load_content called");
        let res = self.controller.start(Url::new(content_url));
        self.announce_changes();
        res.ok()
    }

    /// Start loading a processed video from its record, as serialized in JSON.
    ///
    /// Returns the `SessionId` linked to that content, `None` if it could not be loaded, in
    /// which case an error has been sent through `jsSendError`.
    pub fn load_video(&mut self, record_json: &str) -> Option<u32> {
        Logger::info("API: load_video called");
        let res = self.controller.load_video_json(record_json);
        self.announce_changes();
        res.ok()
    }

    /// Stop the currently loaded content.
    pub fn stop(&mut self) {
        self.controller.stop();
        self.announce_changes();
    }

    /// Free every resource, to call before dropping the `Dispatcher`.
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.announce_changes();
    }

    pub fn toggle_play(&mut self) {
        self.controller.toggle_play();
        self.announce_changes();
    }

    pub fn toggle_mute(&mut self) {
        self.controller.toggle_mute();
        self.announce_changes();
    }

    /// Select the quality level at the given index, or go back to automatic selection with any
    /// negative value.
    ///
    /// Returns `false` if that selection could not be applied.
    pub fn select_level(&mut self, level: i32) -> bool {
        let res = self
            .controller
            .select_level(QualitySelection::from_engine_level(level));
        if let Err(err) = &res {
            Logger::lazy_warn(&|| format!("API: Cannot select level {level}: {err}"));
        }
        self.announce_changes();
        res.is_ok()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.playback_state()
    }

    pub fn is_muted(&self) -> bool {
        self.controller.is_muted()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn current_bitrate(&self) -> f64 {
        self.controller.current_bitrate()
    }

    /// `-1` for automatic selection, the selected level's index otherwise.
    pub fn quality_selection(&self) -> i32 {
        self.controller.quality_selection().as_engine_level()
    }

    /// Quality levels of the current content, formatted as described by
    /// `format_levels_for_js`.
    pub fn levels_info(&self) -> Vec<f64> {
        format_levels_for_js(self.controller.levels())
    }

    /// Label to display for the level at the given index, e.g. `720p (2.00 Mbps)`.
    pub fn level_label(&self, index: usize) -> Option<String> {
        self.controller.levels().get(index).map(format_level_label)
    }

    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.controller.last_error().map(|e| e.kind)
    }

    pub fn last_error_details(&self) -> Option<String> {
        self.controller.last_error().map(|e| e.details.clone())
    }

    /// Message of the error currently replacing the content, if any.
    pub fn error_message(&self) -> Option<String> {
        self.controller.visible_error().map(|e| e.message.clone())
    }

    pub fn manifest_url(&self) -> Option<String> {
        self.controller.manifest_url().map(str::to_owned)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
