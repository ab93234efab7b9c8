use super::{
    ControllerError, PlaybackController, PlaybackState, PlayerReadyState, VisibleError,
    VisibleErrorKind,
};
use crate::{
    bindings::SessionId,
    engine::{EngineFactory, Session, StreamingEngine},
    error_policy::{ErrorKind, ErrorRecord},
    media_element::PlaybackSurface,
    quality::QualitySelection,
    utils::url::Url,
    video::{VideoRecord, VideoRecordError},
    Logger,
};

/// User commands, as called by the presentation layer.
impl<F: EngineFactory, S: PlaybackSurface> PlaybackController<F, S> {
    /// Start a new session for the given manifest URL.
    ///
    /// The previous session, if one, is completely torn down before the new engine instance
    /// is attached to the surface.
    pub fn start(&mut self, manifest_url: Url) -> Result<SessionId, ControllerError> {
        Logger::lazy_info(&|| format!("Core: Loading {manifest_url}"));
        self.stop();
        self.last_error = None;
        self.visible_error = None;

        let id = self.next_session_id;
        self.next_session_id = self.next_session_id.wrapping_add(1);
        match Session::start(
            id,
            manifest_url,
            &mut self.factory,
            &mut self.surface,
            &self.config.native_mime_type,
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.ready_state = PlayerReadyState::Active;
                Ok(id)
            }
            Err(err) => {
                self.ready_state = PlayerReadyState::Failed;
                self.visible_error = Some(VisibleError {
                    kind: VisibleErrorKind::EngineUnsupported,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Derive the manifest URL of the given video and start a session for it.
    pub fn load_video(&mut self, record: &VideoRecord) -> Result<SessionId, ControllerError> {
        match record.manifest_url(&self.config) {
            Ok(url) => self.start(url),
            Err(err) => Err(self.reject_video_record(err)),
        }
    }

    /// Same as `load_video`, from the JSON representation of the record.
    pub fn load_video_json(&mut self, record_json: &str) -> Result<SessionId, ControllerError> {
        match VideoRecord::from_json(record_json) {
            Ok(record) => self.load_video(&record),
            Err(err) => Err(self.reject_video_record(err)),
        }
    }

    /// Stop the current content and display why the wanted video cannot be loaded.
    fn reject_video_record(&mut self, err: VideoRecordError) -> ControllerError {
        Logger::lazy_warn(&|| format!("Core: Cannot load video: {err}"));
        self.stop();
        self.ready_state = PlayerReadyState::Failed;
        self.visible_error = Some(VisibleError {
            kind: VisibleErrorKind::InvalidVideoRecord,
            message: err.to_string(),
        });
        err.into()
    }

    /// Stop the current content if one and free all its associated resources.
    ///
    /// Calling it when no content is loaded has no effect beyond resetting the playback state.
    pub fn stop(&mut self) {
        self.destroy_session();
        self.reset_session_state();
        self.playback_state = PlaybackState::Idle;
        self.ready_state = PlayerReadyState::Stopped;
    }

    /// Release everything, to call when the controller is not needed anymore.
    pub fn dispose(&mut self) {
        Logger::info("Core: Disposing");
        self.stop();
    }

    /// Play if paused or idle, pause if playing.
    ///
    /// While a level is loading, no command is sent to the surface: the wanted state is
    /// only applied once loading ends.
    pub fn toggle_play(&mut self) {
        if self.position_tracker.is_transitioning() {
            let target = self
                .deferred_state
                .unwrap_or(self.playback_state)
                .toggled();
            Logger::lazy_debug(&|| format!("Core: Loading, deferring {target:?}"));
            self.deferred_state = if target == self.playback_state {
                None
            } else {
                Some(target)
            };
            return;
        }

        self.playback_state = self.playback_state.toggled();
        match self.playback_state {
            PlaybackState::Playing => {
                if let Err(err) = self.surface.play() {
                    self.on_play_failed(format!("Failed to start playback: {err}"));
                }
            }
            _ => self.surface.pause(),
        }
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
        self.surface.set_muted(self.is_muted);
    }

    /// Select a quality level, or go back to automatic selection.
    ///
    /// A manual index out of the current level list is rejected without any other effect.
    pub fn select_level(&mut self, selection: QualitySelection) -> Result<(), ControllerError> {
        self.levels.validate(selection)?;
        let Some(session) = self.session.as_mut() else {
            Logger::warn("Core: Cannot select a level, no content loaded");
            return Err(ControllerError::NoActiveSession);
        };

        self.position_tracker.capture(self.surface.current_time());
        self.levels.select(selection)?;
        Logger::lazy_info(&|| format!("Core: Selecting level {selection:?}"));
        if let Some(engine) = session.engine_mut() {
            engine.set_level(selection);
        }
        Ok(())
    }

    /// Destroy the current session if one. Calling it multiple times is harmless.
    pub(super) fn destroy_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.destroy(&mut self.surface);
        }
    }

    /// Reset everything linked to a single session.
    pub(super) fn reset_session_state(&mut self) {
        self.levels.reset();
        self.position_tracker.reset();
        self.deferred_state = None;
    }

    pub(super) fn record_non_fatal(&mut self, details: String) {
        Logger::lazy_warn(&|| format!("Core: {details}"));
        self.last_error = Some(ErrorRecord::new(ErrorKind::NonFatal, details));
    }

    /// The surface refused to play: it stays paused, and so does the observable state.
    pub(super) fn on_play_failed(&mut self, details: String) {
        self.record_non_fatal(details);
        if self.playback_state == PlaybackState::Playing {
            self.playback_state = PlaybackState::Paused;
        }
    }
}
