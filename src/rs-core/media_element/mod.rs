use crate::bindings::{
    jsCanPlayTypeNatively, jsGetCurrentTime, jsPause, jsPlay, jsRemoveNativeSource, jsSeek,
    jsSetMuted, jsSetNativeSource, JsResult, PlayErrorCode,
};
use crate::utils::url::Url;
use thiserror::Error;

/// Commands the controller can issue to the surface on which the content is played
/// (an `HTMLMediaElement` on the web).
///
/// Like engine commands, they are fire-and-forget: their effects are observed later.
pub trait PlaybackSurface {
    /// Ask the surface to play. Only synchronous rejections are reported here.
    fn play(&mut self) -> Result<(), SurfaceError>;

    fn pause(&mut self);

    /// Move the playhead to the given position, in seconds.
    fn seek(&mut self, position: f64);

    fn set_muted(&mut self, muted: bool);

    /// Current playhead position, in seconds.
    fn current_time(&self) -> f64;

    /// Returns `true` if the surface can resolve a stream of the given mime-type by itself.
    fn can_play_natively(&self, mime_type: &str) -> bool;

    /// Let the surface play the given URL natively, without any engine.
    fn set_native_source(&mut self, url: &Url);

    /// Undo `set_native_source`.
    fn remove_native_source(&mut self);
}

/// Structure linked to the HTMLMediaElement on the JavaScript-side, allowing to perform
/// media-related actions on it, such as pausing, resuming, seeking or muting.
#[derive(Default)]
pub struct MediaElementReference {}

impl MediaElementReference {
    pub fn new() -> Self {
        Self {}
    }
}

impl PlaybackSurface for MediaElementReference {
    fn play(&mut self) -> Result<(), SurfaceError> {
        Ok(jsPlay().result()?)
    }

    fn pause(&mut self) {
        jsPause();
    }

    fn seek(&mut self, position: f64) {
        jsSeek(position);
    }

    fn set_muted(&mut self, muted: bool) {
        jsSetMuted(muted);
    }

    fn current_time(&self) -> f64 {
        jsGetCurrentTime()
    }

    fn can_play_natively(&self, mime_type: &str) -> bool {
        jsCanPlayTypeNatively(mime_type)
    }

    fn set_native_source(&mut self, url: &Url) {
        jsSetNativeSource(url.get_ref());
    }

    fn remove_native_source(&mut self) {
        jsRemoveNativeSource();
    }
}

/// Error that may be returned by a `PlaybackSurface::play` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Playback was rejected by the media element: {message}")]
    PlaybackRejected { message: String },
    #[error("No media element is attached")]
    NoMediaElement,
}

impl From<(PlayErrorCode, Option<String>)> for SurfaceError {
    fn from(x: (PlayErrorCode, Option<String>)) -> Self {
        match x.0 {
            PlayErrorCode::NoMediaElement => SurfaceError::NoMediaElement,
            PlayErrorCode::NotAllowed => SurfaceError::PlaybackRejected {
                message: x.1.unwrap_or_else(|| "Unknown Error.".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::PlayResult;

    #[test]
    fn test_surface_error_from_js_result() {
        assert_eq!(
            SurfaceError::from((PlayErrorCode::NoMediaElement, Some("x".to_owned()))),
            SurfaceError::NoMediaElement
        );
        let err = SurfaceError::from((PlayErrorCode::NotAllowed, None));
        assert_eq!(
            err.to_string(),
            "Playback was rejected by the media element: Unknown Error."
        );
        let err = PlayResult::error(PlayErrorCode::NotAllowed, Some("NotAllowedError".into()))
            .result()
            .map_err(SurfaceError::from);
        assert_eq!(
            err,
            Err(SurfaceError::PlaybackRejected {
                message: "NotAllowedError".to_owned()
            })
        );
        assert!(PlayResult::success().result().is_ok());
    }
}
