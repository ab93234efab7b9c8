use crate::wasm_bindgen;

/// Category of an error emitted by the streaming engine, as tagged by the engine itself.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineErrorType {
    /// Issue while loading the manifest, a playlist or a segment.
    Network,
    /// Issue in the media pipeline (decoding, buffering).
    Media,
    /// Anything else.
    Other,
}

/// Payload of an engine error event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineErrorData {
    pub fatal: bool,
    pub error_type: EngineErrorType,
    pub details: String,
}

/// Classification of an error once handled by the controller.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Observational only, no consequence on playback.
    NonFatal,
    /// Fatal network error, loading is restarted.
    NetworkFatal,
    /// Fatal media error, the media pipeline is recovered in place.
    MediaFatal,
    /// Fatal error of any other type: the session is destroyed.
    OtherFatal,
}

impl ErrorKind {
    pub fn is_fatal(self) -> bool {
        self != ErrorKind::NonFatal
    }
}

/// The last error encountered, kept for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub details: String,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            details: details.into(),
        }
    }
}

/// What should be done in reaction to an engine error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecoveryAction {
    /// Nothing, the error is only recorded.
    None,
    /// Ask the engine to restart loading from its current manifest state.
    RestartLoad,
    /// Ask the engine to repair its media pipeline in place.
    RecoverMedia,
    /// Destroy the session and enter the terminal failed state.
    DestroySession,
}

/// Classify an engine error and decide on the corresponding recovery action.
///
/// There is no retry counter here: each recovery is only triggered by a new fatal error event,
/// so retries happen at most at the engine's own event cadence.
pub(crate) fn classify(error: &EngineErrorData) -> (ErrorRecord, RecoveryAction) {
    let (kind, action) = match (error.fatal, error.error_type) {
        (false, _) => (ErrorKind::NonFatal, RecoveryAction::None),
        (true, EngineErrorType::Network) => (ErrorKind::NetworkFatal, RecoveryAction::RestartLoad),
        (true, EngineErrorType::Media) => (ErrorKind::MediaFatal, RecoveryAction::RecoverMedia),
        (true, EngineErrorType::Other) => (ErrorKind::OtherFatal, RecoveryAction::DestroySession),
    };
    (ErrorRecord::new(kind, error.details.clone()), action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, EngineErrorType::Network, ErrorKind::NonFatal, RecoveryAction::None)]
    #[case(false, EngineErrorType::Media, ErrorKind::NonFatal, RecoveryAction::None)]
    #[case(false, EngineErrorType::Other, ErrorKind::NonFatal, RecoveryAction::None)]
    #[case(true, EngineErrorType::Network, ErrorKind::NetworkFatal, RecoveryAction::RestartLoad)]
    #[case(true, EngineErrorType::Media, ErrorKind::MediaFatal, RecoveryAction::RecoverMedia)]
    #[case(true, EngineErrorType::Other, ErrorKind::OtherFatal, RecoveryAction::DestroySession)]
    fn test_classify(
        #[case] fatal: bool,
        #[case] error_type: EngineErrorType,
        #[case] expected_kind: ErrorKind,
        #[case] expected_action: RecoveryAction,
    ) {
        let (record, action) = classify(&EngineErrorData {
            fatal,
            error_type,
            details: "manifestLoadError".to_owned(),
        });
        assert_eq!(record.kind, expected_kind);
        assert_eq!(record.details, "manifestLoadError");
        assert_eq!(action, expected_action);
        assert_eq!(record.kind.is_fatal(), fatal);
    }
}
