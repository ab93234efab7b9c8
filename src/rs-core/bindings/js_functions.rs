use crate::{
    controller::{PlaybackState, VisibleErrorKind},
    wasm_bindgen,
};

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Construct a new streaming engine instance (e.g. an hls.js `Hls` object) on the
    // JavaScript-side, identified from now on by the given `SessionId`.
    //
    // Returns `false` if no engine can be constructed in the current environment (for
    // example because MediaSource Extensions are not available).
    //
    // Every engine event of that instance has to be communicated to the `Dispatcher`
    // alongside the same `SessionId`, through its `on_engine_*` methods.
    pub fn jsCreateEngine(session_id: SessionId) -> bool;

    // Begin loading the manifest at the given URL on the engine linked to `session_id`.
    pub fn jsEngineLoadSource(session_id: SessionId, url: &str);

    // Attach the engine linked to `session_id` to the media element associated to this
    // `Dispatcher`.
    pub fn jsEngineAttachMedia(session_id: SessionId);

    // Ask the engine linked to `session_id` to restart loading from its current manifest
    // state.
    pub fn jsEngineStartLoad(session_id: SessionId);

    // Ask the engine linked to `session_id` to try to recover its media pipeline in place.
    pub fn jsEngineRecoverMediaError(session_id: SessionId);

    // Force the quality level of the engine linked to `session_id`, both for the level
    // currently played and the one loaded next.
    //
    // `-1` gives the control back to the engine's adaptive algorithm.
    pub fn jsEngineSetLevel(session_id: SessionId, level: i32);

    // Destroy the engine linked to `session_id`, detaching it from the media element and
    // removing all of its event listeners.
    //
    // Destroying an unknown `SessionId` does nothing.
    pub fn jsEngineDestroy(session_id: SessionId);

    // Returns `true` if the media element can play the given mime-type without any engine.
    pub fn jsCanPlayTypeNatively(mime_type: &str) -> bool;

    // Directly set the `src` attribute of the media element to the given URL.
    pub fn jsSetNativeSource(url: &str);

    // Remove the `src` attribute previously set through `jsSetNativeSource`.
    pub fn jsRemoveNativeSource();

    // Call the `HTMLMediaElement.prototype.play` API.
    //
    // Synchronous failures are reported through the returned `PlayResult`. As that API
    // returns a Promise, a later rejection is instead communicated through the
    // `on_play_rejected` method of the `Dispatcher`.
    pub fn jsPlay() -> PlayResult;

    // Call the `HTMLMediaElement.prototype.pause` API.
    pub fn jsPause();

    // Set the `currentTime` attribute of the media element to the given position in seconds.
    pub fn jsSeek(position: f64);

    // Set the `muted` attribute of the media element.
    pub fn jsSetMuted(muted: bool);

    // Returns the `currentTime` attribute of the media element.
    pub fn jsGetCurrentTime() -> f64;

    pub fn jsAnnouncePlaybackState(state: PlaybackState);

    pub fn jsAnnounceMuted(muted: bool);

    pub fn jsAnnounceLoading(is_loading: bool);

    pub fn jsAnnounceBitrate(bitrate: f64);

    // `-1` for automatic quality selection.
    pub fn jsAnnounceQualitySelection(level: i32);

    // `levels_info` is formatted as described by `format_levels_for_js`.
    pub fn jsAnnounceLevels(levels_info: Vec<f64>);

    // Announce an error which should be displayed to the user instead of the content.
    pub fn jsSendError(kind: VisibleErrorKind, message: &str);

    // Announce that the error previously sent through `jsSendError` does not apply anymore.
    pub fn jsClearError();
}

/// Errors that can arise when calling the `jsPlay` JavaScript function.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayErrorCode {
    /// No media element is linked to this `Dispatcher`.
    NoMediaElement,

    /// The media element refused to play (autoplay policy, no source...).
    NotAllowed,
}

/// Result of calling the `jsPlay` JavaScript function.
///
/// Creation of a `PlayResult` should only be performed by the JavaScript side
/// through the exposed static constructors.
#[wasm_bindgen]
pub struct PlayResult {
    error: Option<(PlayErrorCode, Option<String>)>,
}

#[wasm_bindgen]
impl PlayResult {
    /// Creates a `PlayResult` indicating success.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn success() -> Self {
        Self { error: None }
    }

    /// Creates a `PlayResult` indicating failure, with the corresponding error.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn error(err: PlayErrorCode, desc: Option<String>) -> Self {
        Self {
            error: Some((err, desc)),
        }
    }
}

impl JsResult<(), PlayErrorCode> for PlayResult {
    /// Basically unwrap and consume the `PlayResult`, converting it into a
    /// Result enum.
    fn result(self) -> Result<(), (PlayErrorCode, Option<String>)> {
        if let Some(err) = self.error {
            Err(err)
        } else {
            Ok(())
        }
    }
}

/// Trait allowing to convert "JavaScript Results" as exposed by the JavaScript functions into
/// `Result` structs more idiomatic to Rust.
pub(crate) trait JsResult<T, E> {
    fn result(self) -> Result<T, (E, Option<String>)>;
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Identify a playback session, and thus the engine instance created for it on the
/// JavaScript-side.
///
/// A new `SessionId` is generated each time a content is loaded, which allows to recognize
/// and ignore events still emitted by an engine that has since been destroyed.
pub type SessionId = u32;
