use super::{PlaybackController, PlaybackState, PlayerReadyState, VisibleError, VisibleErrorKind};
use crate::{
    bindings::SessionId,
    engine::{EngineEvent, EngineFactory, StreamingEngine},
    error_policy::{classify, EngineErrorData, RecoveryAction},
    media_element::PlaybackSurface,
    Logger,
};

/// Reactions to events coming from the engine and the playback surface.
impl<F: EngineFactory, S: PlaybackSurface> PlaybackController<F, S> {
    /// Handle an event emitted by the engine of the session `session_id`.
    ///
    /// Events of any session other than the live one are dropped without any effect.
    pub fn on_engine_event(&mut self, session_id: SessionId, event: EngineEvent) {
        if self.session_id() != Some(session_id) {
            Logger::lazy_debug(&|| {
                format!(
                    "Core: Dropping {} event of stale session {session_id}",
                    event.name()
                )
            });
            return;
        }
        match event {
            EngineEvent::ManifestParsed(levels) => {
                self.levels.on_manifest_parsed(levels);
            }
            EngineEvent::LevelSwitched(active_index) => {
                if let Some(bitrate) = self.levels.on_level_switched(active_index) {
                    Logger::lazy_info(&|| {
                        format!("Core: Level switched to {active_index} ({bitrate} bps)")
                    });
                }
            }
            EngineEvent::LoadingBegin => self.on_loading_begin(),
            EngineEvent::LoadingEnd => self.on_loading_end(),
            EngineEvent::Error(error) => self.on_engine_error(error),
        }
    }

    /// The surface asynchronously refused to play after a play command.
    ///
    /// Playback is not retried, the next `toggle_play` call will try to play again.
    pub fn on_play_rejected(&mut self, message: &str) {
        self.on_play_failed(format!("Failed to resume playback: {message}"));
    }

    fn on_loading_begin(&mut self) {
        let position = self.surface.current_time();
        Logger::lazy_debug(&|| format!("Core: Level loading at {position}"));
        self.position_tracker.on_loading_begin(position);
    }

    fn on_loading_end(&mut self) {
        let Some(position) = self.position_tracker.on_loading_end() else {
            return;
        };
        Logger::lazy_debug(&|| format!("Core: Level loaded, restoring {position}"));
        self.surface.seek(position);

        if let Some(wanted) = self.deferred_state.take() {
            let previous = self.playback_state;
            self.playback_state = wanted;
            if wanted != PlaybackState::Playing && previous == PlaybackState::Playing {
                self.surface.pause();
            }
        }

        if self.playback_state == PlaybackState::Playing {
            if let Err(err) = self.surface.play() {
                self.on_play_failed(format!("Failed to resume playback: {err}"));
            }
        }
    }

    fn on_engine_error(&mut self, error: EngineErrorData) {
        let (record, action) = classify(&error);
        if record.kind.is_fatal() {
            Logger::lazy_warn(&|| {
                format!("Errors: Fatal {:?} error: {}", record.kind, record.details)
            });
        } else {
            Logger::lazy_debug(&|| format!("Errors: Non-fatal error: {}", record.details));
        }
        let details = record.details.clone();
        self.last_error = Some(record);

        match action {
            RecoveryAction::None => {}
            RecoveryAction::RestartLoad => match self.live_engine() {
                Some(engine) => engine.start_load(),
                None => Logger::warn("Errors: No engine to restart loading on"),
            },
            RecoveryAction::RecoverMedia => match self.live_engine() {
                Some(engine) => engine.recover_media_error(),
                None => Logger::warn("Errors: No engine to recover media on"),
            },
            RecoveryAction::DestroySession => {
                Logger::error("Errors: Unrecoverable error, destroying session");
                self.destroy_session();
                self.reset_session_state();
                self.ready_state = PlayerReadyState::Failed;
                self.visible_error = Some(VisibleError {
                    kind: VisibleErrorKind::OtherFatal,
                    message: format!("Fatal error: {details}"),
                });
            }
        }
    }

    fn live_engine(&mut self) -> Option<&mut F::Engine> {
        self.session.as_mut().and_then(|s| s.engine_mut())
    }
}
