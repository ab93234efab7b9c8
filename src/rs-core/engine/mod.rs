use crate::{
    bindings::SessionId, error_policy::EngineErrorData, quality::QualitySelection, utils::url::Url,
};

mod js_engine;
mod session;

pub use js_engine::{JsEngine, JsEngineFactory};
pub(crate) use session::Session;

/// Commands that can be sent to an external streaming engine instance (the component in
/// charge of parsing manifests, fetching segments and estimating bandwidth).
///
/// All commands are fire-and-forget: their outcome is only ever known through later
/// `EngineEvent`s.
pub trait StreamingEngine {
    /// Begin loading the manifest at the given URL.
    fn load_source(&mut self, url: &Url);

    /// Bind the engine's output to the playback surface.
    fn attach_media(&mut self);

    /// Restart loading from the engine's current manifest state.
    fn start_load(&mut self);

    /// Try to repair the media pipeline in place.
    fn recover_media_error(&mut self);

    /// Force a quality level, or let the engine adapt by itself with `QualitySelection::Auto`.
    fn set_level(&mut self, selection: QualitySelection);

    /// Release the engine instance. No event should be expected from it afterwards, though
    /// some may still be delivered if they were already in flight.
    fn destroy(&mut self);
}

/// Builds one `StreamingEngine` per session.
pub trait EngineFactory {
    type Engine: StreamingEngine;

    /// Create a new engine instance for the session identified by `session_id`.
    ///
    /// Returns `None` if no engine can be constructed in the current environment.
    fn create(&mut self, session_id: SessionId) -> Option<Self::Engine>;
}

/// Events emitted by a streaming engine instance.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// The manifest has been parsed, with the `(bitrate, height)` of each level, in the
    /// engine's index order.
    ManifestParsed(Vec<(f64, u32)>),

    /// The engine now plays the level at the given index.
    LevelSwitched(usize),

    /// A level began loading.
    LoadingBegin,

    /// The level which began loading is now loaded.
    LoadingEnd,

    /// The engine encountered an error.
    Error(EngineErrorData),
}

impl EngineEvent {
    /// Short name used when logging.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            EngineEvent::ManifestParsed(_) => "ManifestParsed",
            EngineEvent::LevelSwitched(_) => "LevelSwitched",
            EngineEvent::LoadingBegin => "LoadingBegin",
            EngineEvent::LoadingEnd => "LoadingEnd",
            EngineEvent::Error(_) => "Error",
        }
    }
}
