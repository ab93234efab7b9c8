use super::Dispatcher;
use crate::{
    bindings::{
        formatters::format_levels_for_js, jsAnnounceBitrate, jsAnnounceLevels, jsAnnounceLoading,
        jsAnnounceMuted, jsAnnouncePlaybackState, jsAnnounceQualitySelection, jsClearError,
        jsSendError,
    },
    controller::{ControllerSnapshot, PlaybackState, VisibleError},
    quality::QualitySelection,
    Logger,
};

/// A change in the observable state which has to be communicated to the JavaScript-side.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Announcement {
    PlaybackState(PlaybackState),
    Muted(bool),
    Loading(bool),
    Bitrate(f64),
    QualitySelection(QualitySelection),
    /// The list of levels changed, its new content has to be fetched from the controller.
    Levels,
    Error(VisibleError),
    ErrorCleared,
}

impl Dispatcher {
    /// Announce to the JavaScript-side everything that changed since the last announcement.
    pub(super) fn announce_changes(&mut self) {
        let snapshot = self.controller.snapshot();
        let announcements = diff_snapshots(self.last_announced.as_ref(), &snapshot);
        for announcement in announcements {
            Logger::lazy_debug(&|| format!("Core: Announcing {announcement:?}"));
            match announcement {
                Announcement::PlaybackState(state) => jsAnnouncePlaybackState(state),
                Announcement::Muted(muted) => jsAnnounceMuted(muted),
                Announcement::Loading(is_loading) => jsAnnounceLoading(is_loading),
                Announcement::Bitrate(bitrate) => jsAnnounceBitrate(bitrate),
                Announcement::QualitySelection(selection) => {
                    jsAnnounceQualitySelection(selection.as_engine_level())
                }
                Announcement::Levels => {
                    jsAnnounceLevels(format_levels_for_js(self.controller.levels()))
                }
                Announcement::Error(err) => jsSendError(err.kind, &err.message),
                Announcement::ErrorCleared => jsClearError(),
            }
        }
        self.last_announced = Some(snapshot);
    }
}

/// List what changed between the `previous` announced snapshot (`None` if none was) and the
/// `current` one.
pub(crate) fn diff_snapshots(
    previous: Option<&ControllerSnapshot>,
    current: &ControllerSnapshot,
) -> Vec<Announcement> {
    let mut ret = vec![];
    let Some(prev) = previous else {
        ret.push(Announcement::PlaybackState(current.playback_state));
        ret.push(Announcement::Muted(current.is_muted));
        ret.push(Announcement::Loading(current.is_loading));
        ret.push(Announcement::Bitrate(current.current_bitrate));
        ret.push(Announcement::QualitySelection(current.quality_selection));
        ret.push(Announcement::Levels);
        if let Some(err) = &current.visible_error {
            ret.push(Announcement::Error(err.clone()));
        }
        return ret;
    };

    if prev.playback_state != current.playback_state {
        ret.push(Announcement::PlaybackState(current.playback_state));
    }
    if prev.is_muted != current.is_muted {
        ret.push(Announcement::Muted(current.is_muted));
    }
    if prev.is_loading != current.is_loading {
        ret.push(Announcement::Loading(current.is_loading));
    }
    if prev.current_bitrate != current.current_bitrate {
        ret.push(Announcement::Bitrate(current.current_bitrate));
    }
    if prev.quality_selection != current.quality_selection {
        ret.push(Announcement::QualitySelection(current.quality_selection));
    }
    if prev.session_id != current.session_id || prev.level_count != current.level_count {
        ret.push(Announcement::Levels);
    }
    match (&prev.visible_error, &current.visible_error) {
        (old, Some(err)) if old.as_ref() != Some(err) => {
            ret.push(Announcement::Error(err.clone()))
        }
        (Some(_), None) => ret.push(Announcement::ErrorCleared),
        _ => {}
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::VisibleErrorKind;

    fn snapshot() -> ControllerSnapshot {
        ControllerSnapshot {
            session_id: Some(0),
            playback_state: PlaybackState::Idle,
            is_muted: false,
            is_loading: false,
            current_bitrate: 0.,
            quality_selection: QualitySelection::Auto,
            level_count: 0,
            visible_error: None,
        }
    }

    #[test]
    fn test_everything_announced_first() {
        let announcements = diff_snapshots(None, &snapshot());
        assert_eq!(announcements.len(), 6);
        assert_eq!(
            announcements[0],
            Announcement::PlaybackState(PlaybackState::Idle)
        );
        assert!(announcements.contains(&Announcement::Levels));
    }

    #[test]
    fn test_nothing_announced_without_change() {
        let prev = snapshot();
        assert!(diff_snapshots(Some(&prev), &prev.clone()).is_empty());
    }

    #[test]
    fn test_only_changes_announced() {
        let prev = snapshot();
        let mut current = prev.clone();
        current.playback_state = PlaybackState::Playing;
        current.current_bitrate = 2_000_000.;
        current.level_count = 2;
        assert_eq!(
            diff_snapshots(Some(&prev), &current),
            vec![
                Announcement::PlaybackState(PlaybackState::Playing),
                Announcement::Bitrate(2_000_000.),
                Announcement::Levels,
            ]
        );
    }

    #[test]
    fn test_new_session_announces_levels() {
        let prev = snapshot();
        let mut current = prev.clone();
        current.session_id = Some(1);
        assert_eq!(
            diff_snapshots(Some(&prev), &current),
            vec![Announcement::Levels]
        );
    }

    #[test]
    fn test_error_announced_once() {
        let prev = snapshot();
        let err = VisibleError {
            kind: VisibleErrorKind::OtherFatal,
            message: "Fatal error: x".to_owned(),
        };
        let mut current = prev.clone();
        current.session_id = None;
        current.visible_error = Some(err.clone());
        let announcements = diff_snapshots(Some(&prev), &current);
        assert!(announcements.contains(&Announcement::Error(err)));
        assert!(diff_snapshots(Some(&current), &current.clone()).is_empty());
    }

    #[test]
    fn test_error_cleared_on_new_session() {
        let mut prev = snapshot();
        prev.session_id = None;
        prev.visible_error = Some(VisibleError {
            kind: VisibleErrorKind::EngineUnsupported,
            message: "Unsupported video format".to_owned(),
        });
        let mut current = snapshot();
        current.session_id = Some(1);
        let announcements = diff_snapshots(Some(&prev), &current);
        assert_eq!(
            announcements,
            vec![Announcement::Levels, Announcement::ErrorCleared]
        );
        assert!(diff_snapshots(Some(&current), &current.clone()).is_empty());
    }
}
