use crate::{
    bindings::SessionId,
    dispatcher::Dispatcher,
    engine::EngineEvent,
    error_policy::{EngineErrorData, EngineErrorType},
    wasm_bindgen, Logger,
};

/// Methods triggered on JavaScript events by the JavaScript code.
///
/// Every engine-related method takes the `SessionId` given to `jsCreateEngine` when the
/// engine emitting that event was created, so events of a destroyed engine can be ignored.
#[wasm_bindgen]
impl Dispatcher {
    /// The JS code should call this method once the engine parsed the manifest.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The `SessionId` linked to the engine emitting this event.
    ///
    /// * `levels` - Flat list of the manifest's levels, in the engine's index order.
    ///   Each level takes two consecutive elements: its bitrate in bits per second then its
    ///   height in pixels.
    pub fn on_manifest_parsed(&mut self, session_id: SessionId, levels: &[f64]) {
        if levels.len() % 2 != 0 {
            Logger::warn("JS: Odd number of elements in parsed levels, ignoring the last one");
        }
        let levels = levels
            .chunks_exact(2)
            .map(|l| (l[0], height_from_js(l[1])))
            .collect();
        self.on_engine_event(session_id, EngineEvent::ManifestParsed(levels));
    }

    /// The JS code should call this method when the engine switched to another level.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The `SessionId` linked to the engine emitting this event.
    ///
    /// * `level` - Index of the level now played.
    pub fn on_level_switched(&mut self, session_id: SessionId, level: u32) {
        self.on_engine_event(session_id, EngineEvent::LevelSwitched(level as usize));
    }

    /// The JS code should call this method when the engine began loading a level.
    pub fn on_level_loading(&mut self, session_id: SessionId) {
        self.on_engine_event(session_id, EngineEvent::LoadingBegin);
    }

    /// The JS code should call this method when the level which began loading is loaded.
    pub fn on_level_loaded(&mut self, session_id: SessionId) {
        self.on_engine_event(session_id, EngineEvent::LoadingEnd);
    }

    /// The JS code should call this method each time the engine emits an error.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The `SessionId` linked to the engine emitting this event.
    ///
    /// * `fatal` - If `true`, the engine cannot continue without a recovery action.
    ///
    /// * `error_type` - Category of the error, as tagged by the engine.
    ///
    /// * `details` - Engine-specific description (e.g. `"manifestLoadError"`).
    pub fn on_engine_error(
        &mut self,
        session_id: SessionId,
        fatal: bool,
        error_type: EngineErrorType,
        details: String,
    ) {
        self.on_engine_event(
            session_id,
            EngineEvent::Error(EngineErrorData {
                fatal,
                error_type,
                details,
            }),
        );
    }

    /// The JS code should call this method when the Promise returned by a `jsPlay` call
    /// rejected.
    pub fn on_play_rejected(&mut self, message: Option<String>) {
        self.controller
            .on_play_rejected(message.as_deref().unwrap_or("Unknown Error."));
        self.announce_changes();
    }
}

impl Dispatcher {
    fn on_engine_event(&mut self, session_id: SessionId, event: EngineEvent) {
        self.controller.on_engine_event(session_id, event);
        self.announce_changes();
    }
}

/// Heights are communicated as JavaScript numbers, anything not representable is brought
/// back to `0`.
fn height_from_js(height: f64) -> u32 {
    if height.is_finite() && height >= 0. && height <= f64::from(u32::MAX) {
        height as u32
    } else {
        0
    }
}
