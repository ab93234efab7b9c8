use crate::Logger;

/// Whether a level transition is currently happening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TrackerState {
    /// No level is being loaded.
    Stable,

    /// A level began loading and its end has not been announced yet.
    Transitioning,
}

/// Remembers the playback position right before a level transition begins so it can be
/// restored once that transition ends.
#[derive(Debug)]
pub(crate) struct PositionTracker {
    state: TrackerState,

    /// Position, in seconds, to restore once the current transition ends.
    ///
    /// Always overwritten by the most recent capture.
    captured_position: Option<f64>,
}

impl PositionTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: TrackerState::Stable,
            captured_position: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.state = TrackerState::Stable;
        self.captured_position = None;
    }

    pub(crate) fn state(&self) -> TrackerState {
        self.state
    }

    /// Returns `true` strictly between a loading-begin and its loading-end.
    pub(crate) fn is_transitioning(&self) -> bool {
        self.state == TrackerState::Transitioning
    }

    pub(crate) fn captured_position(&self) -> Option<f64> {
        self.captured_position
    }

    /// Snapshot the given position without changing state, e.g. before a manual quality
    /// change which will later lead to a loading cycle.
    pub(crate) fn capture(&mut self, position: f64) {
        let position = sanitize_position(position);
        Logger::lazy_debug(&|| format!("Position: Captured {position}"));
        self.captured_position = Some(position);
    }

    /// A level began loading: snapshot the current position and enter `Transitioning`.
    ///
    /// If a transition was already ongoing, the newer position replaces the previous one.
    pub(crate) fn on_loading_begin(&mut self, position: f64) {
        if self.is_transitioning() {
            Logger::debug("Position: Loading began while already transitioning");
        }
        self.capture(position);
        self.state = TrackerState::Transitioning;
    }

    /// A level finished loading: leave `Transitioning` and hand back the position to restore.
    ///
    /// Returns `None` if no transition was ongoing, in which case nothing should be restored.
    pub(crate) fn on_loading_end(&mut self) -> Option<f64> {
        if !self.is_transitioning() {
            Logger::warn("Position: Loading ended without having begun, ignoring");
            return None;
        }
        self.state = TrackerState::Stable;
        self.captured_position.take()
    }
}

/// Positions are non-negative seconds, anything else (including NaN) is brought back to `0`.
fn sanitize_position(position: f64) -> f64 {
    if position.is_finite() && position > 0. {
        position
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_cycle_restores_captured_position() {
        let mut tracker = PositionTracker::new();
        assert_eq!(tracker.state(), TrackerState::Stable);
        tracker.on_loading_begin(12.4);
        assert!(tracker.is_transitioning());
        assert_eq!(tracker.captured_position(), Some(12.4));
        assert_eq!(tracker.on_loading_end(), Some(12.4));
        assert_eq!(tracker.state(), TrackerState::Stable);
        assert_eq!(tracker.captured_position(), None);
    }

    #[test]
    fn test_last_loading_begin_wins() {
        let mut tracker = PositionTracker::new();
        tracker.on_loading_begin(3.);
        tracker.on_loading_begin(7.5);
        assert_eq!(tracker.on_loading_end(), Some(7.5));
    }

    #[test]
    fn test_loading_begin_overwrites_manual_capture() {
        let mut tracker = PositionTracker::new();
        tracker.capture(40.);
        assert_eq!(tracker.state(), TrackerState::Stable);
        tracker.on_loading_begin(41.);
        assert_eq!(tracker.on_loading_end(), Some(41.));
    }

    #[test]
    fn test_unmatched_loading_end_is_ignored() {
        let mut tracker = PositionTracker::new();
        tracker.capture(5.);
        assert_eq!(tracker.on_loading_end(), None);
        assert_eq!(tracker.captured_position(), Some(5.));
        tracker.reset();
        assert_eq!(tracker.captured_position(), None);
    }

    #[test]
    fn test_invalid_positions_are_sanitized() {
        let mut tracker = PositionTracker::new();
        tracker.on_loading_begin(f64::NAN);
        assert_eq!(tracker.on_loading_end(), Some(0.));
        tracker.on_loading_begin(-2.);
        assert_eq!(tracker.on_loading_end(), Some(0.));
    }
}
