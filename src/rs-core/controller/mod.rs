use crate::{
    bindings::SessionId,
    engine::{EngineFactory, Session},
    error_policy::ErrorRecord,
    media_element::PlaybackSurface,
    position_tracker::PositionTracker,
    quality::{InvalidLevelError, LevelManager, QualityLevel, QualitySelection},
    video::VideoRecordError,
    wasm_bindgen,
};
use thiserror::Error;

mod commands;
mod configuration;
mod events;

pub use crate::error_policy::ErrorKind;
pub use configuration::PlayerConfiguration;

/// Drives one streaming engine instance per loaded content, binds it to a playback surface
/// and keeps all the state the presentation layer observes.
///
/// User commands (play/pause, mute, quality selection) and engine events are both handled
/// here, one at a time. Engine events are tagged with the `SessionId` of the session that
/// emitted them, events of a session that has since been destroyed being ignored.
pub struct PlaybackController<F: EngineFactory, S: PlaybackSurface> {
    /// Creates the engine instance of each new session.
    factory: F,

    /// The surface on which the content is played. Exclusively used by the current session.
    surface: S,

    config: PlayerConfiguration,

    /// The current session. `None` if no content is loaded or if the last one failed.
    session: Option<Session<F::Engine>>,

    /// `SessionId` that will be given to the next session.
    next_session_id: SessionId,

    ready_state: PlayerReadyState,

    playback_state: PlaybackState,

    /// Playback state wanted by the user while a level was loading, applied once it ends.
    deferred_state: Option<PlaybackState>,

    is_muted: bool,

    levels: LevelManager,

    position_tracker: PositionTracker,

    /// Last error encountered, fatal or not.
    last_error: Option<ErrorRecord>,

    /// Error which should be displayed to the user, if any.
    visible_error: Option<VisibleError>,
}

/// Identify the lifecycle state the `PlaybackController` is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerReadyState {
    /// No content is currently loaded.
    Stopped,

    /// A session is live.
    Active,

    /// The last content could not be loaded or failed unrecoverably. Its session has been
    /// destroyed.
    Failed,
}

/// Playback state as wanted by the user.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Playback has never been started for this content.
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    /// State reached when the user toggles playback from this one.
    pub(crate) fn toggled(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Idle | PlaybackState::Paused => PlaybackState::Playing,
        }
    }
}

/// Category of an error shown to the user.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibleErrorKind {
    /// The engine emitted a fatal error which could not be recovered from.
    OtherFatal,
    /// No engine could be created and the surface cannot play the stream natively.
    EngineUnsupported,
    /// The video record given could not be turned into a manifest URL.
    InvalidVideoRecord,
}

/// Error shown to the user, replacing the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleError {
    pub kind: VisibleErrorKind,
    pub message: String,
}

/// Copy of every value the presentation layer observes, allowing to detect changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSnapshot {
    pub session_id: Option<SessionId>,
    pub playback_state: PlaybackState,
    pub is_muted: bool,
    pub is_loading: bool,
    pub current_bitrate: f64,
    pub quality_selection: QualitySelection,
    pub level_count: usize,
    pub visible_error: Option<VisibleError>,
}

/// Error synchronously returned by `PlaybackController` commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("Unsupported video format: no streaming engine is available and `{url}` cannot be played natively")]
    EngineUnsupported { url: String },
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevelError),
    #[error("No content is currently loaded")]
    NoActiveSession,
    #[error(transparent)]
    InvalidVideoRecord(#[from] VideoRecordError),
}

impl<F: EngineFactory, S: PlaybackSurface> PlaybackController<F, S> {
    /// Create a new `PlaybackController`. No content is loaded until `start` is called.
    pub fn new(factory: F, surface: S, config: PlayerConfiguration) -> Self {
        Self {
            factory,
            surface,
            config,
            session: None,
            next_session_id: 0,
            ready_state: PlayerReadyState::Stopped,
            playback_state: PlaybackState::Idle,
            deferred_state: None,
            is_muted: false,
            levels: LevelManager::new(),
            position_tracker: PositionTracker::new(),
            last_error: None,
            visible_error: None,
        }
    }

    pub fn config(&self) -> &PlayerConfiguration {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PlayerConfiguration {
        &mut self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn ready_state(&self) -> PlayerReadyState {
        self.ready_state
    }

    /// `SessionId` of the live session, if one.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id())
    }

    /// Manifest URL of the live session, if one.
    pub fn manifest_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.manifest_url().get_ref())
    }

    pub fn is_native_playback(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_native())
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// `true` strictly between a level's loading-begin and loading-end events.
    pub fn is_loading(&self) -> bool {
        self.position_tracker.is_transitioning()
    }

    /// Bitrate of the level the engine last switched to, `0.` if unknown.
    pub fn current_bitrate(&self) -> f64 {
        self.levels.current_bitrate()
    }

    pub fn quality_selection(&self) -> QualitySelection {
        self.levels.selection()
    }

    pub fn levels(&self) -> &[QualityLevel] {
        self.levels.levels()
    }

    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.last_error.as_ref()
    }

    pub fn visible_error(&self) -> Option<&VisibleError> {
        self.visible_error.as_ref()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            session_id: self.session_id(),
            playback_state: self.playback_state,
            is_muted: self.is_muted,
            is_loading: self.is_loading(),
            current_bitrate: self.current_bitrate(),
            quality_selection: self.quality_selection(),
            level_count: self.levels().len(),
            visible_error: self.visible_error.clone(),
        }
    }
}

impl<F: EngineFactory, S: PlaybackSurface> Drop for PlaybackController<F, S> {
    fn drop(&mut self) {
        self.destroy_session();
    }
}
