use crate::Logger;
use thiserror::Error;

/// One rendition of the content, as announced by the streaming engine once the manifest has
/// been parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityLevel {
    /// Position of that level in the engine's own level list.
    index: usize,

    /// Bitrate of that level, in bits per second.
    bitrate: f64,

    /// Vertical resolution of that level, in pixels.
    height: u32,
}

impl QualityLevel {
    pub fn new(index: usize, bitrate: f64, height: u32) -> Self {
        Self {
            index,
            bitrate,
            height,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bitrate(&self) -> f64 {
        self.bitrate
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn is_well_formed(&self) -> bool {
        self.bitrate.is_finite() && self.bitrate > 0. && self.height > 0
    }
}

/// Which quality level should be played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QualitySelection {
    /// Let the streaming engine's adaptive algorithm choose.
    #[default]
    Auto,

    /// Force the level at the given index.
    Manual(usize),
}

impl QualitySelection {
    /// Convert to the convention used by JavaScript streaming engines, where `-1` means
    /// automatic selection.
    pub fn as_engine_level(self) -> i32 {
        match self {
            QualitySelection::Auto => -1,
            QualitySelection::Manual(idx) => i32::try_from(idx).unwrap_or(i32::MAX),
        }
    }

    /// Inverse of `as_engine_level`: any negative value is considered as `Auto`.
    pub fn from_engine_level(level: i32) -> Self {
        match usize::try_from(level) {
            Ok(idx) => QualitySelection::Manual(idx),
            Err(_) => QualitySelection::Auto,
        }
    }
}

/// Error returned when a manual selection does not reference an existing level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No quality level at index {index} (only {level_count} available)")]
pub struct InvalidLevelError {
    pub index: usize,
    pub level_count: usize,
}

/// Keeps track of the quality levels of the current session, of the selected one and of the
/// bitrate the engine actually plays.
#[derive(Debug, Default)]
pub(crate) struct LevelManager {
    /// Levels announced when the manifest was parsed. Empty until then.
    levels: Vec<QualityLevel>,

    /// `true` once `levels` has been set for the current session.
    has_manifest: bool,

    /// Currently wanted selection. A `Manual` index always references an element of `levels`.
    selection: QualitySelection,

    /// Bitrate of the last level the engine switched to, `0.` if none yet.
    current_bitrate: f64,
}

impl LevelManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Go back to the initial state, for example when a new session begins.
    pub(crate) fn reset(&mut self) {
        self.levels.clear();
        self.has_manifest = false;
        self.selection = QualitySelection::Auto;
        self.current_bitrate = 0.;
    }

    pub(crate) fn levels(&self) -> &[QualityLevel] {
        &self.levels
    }

    pub(crate) fn selection(&self) -> QualitySelection {
        self.selection
    }

    pub(crate) fn current_bitrate(&self) -> f64 {
        self.current_bitrate
    }

    /// Store the levels announced by the engine's manifest. Only the first announcement of a
    /// session is considered, later ones are ignored.
    ///
    /// Returns `true` if the levels have been updated.
    pub(crate) fn on_manifest_parsed(&mut self, levels: Vec<(f64, u32)>) -> bool {
        if self.has_manifest {
            Logger::warn("Quality: Manifest already parsed for this session, ignoring");
            return false;
        }
        let levels: Vec<QualityLevel> = levels
            .into_iter()
            .enumerate()
            .map(|(index, (bitrate, height))| QualityLevel::new(index, bitrate, height))
            .collect();
        levels.iter().filter(|l| !l.is_well_formed()).for_each(|l| {
            Logger::lazy_warn(&|| {
                format!(
                    "Quality: Level {} has an unexpected bitrate ({}) or height ({})",
                    l.index, l.bitrate, l.height
                )
            })
        });
        Logger::lazy_info(&|| format!("Quality: {} level(s) available", levels.len()));
        self.levels = levels;
        self.has_manifest = true;
        true
    }

    /// Check that `selection` can be applied to the current levels.
    pub(crate) fn validate(&self, selection: QualitySelection) -> Result<(), InvalidLevelError> {
        match selection {
            QualitySelection::Auto => Ok(()),
            QualitySelection::Manual(index) if index < self.levels.len() => Ok(()),
            QualitySelection::Manual(index) => Err(InvalidLevelError {
                index,
                level_count: self.levels.len(),
            }),
        }
    }

    /// Update the wanted selection, after checking it with `validate`.
    ///
    /// On error, the current selection is left untouched.
    pub(crate) fn select(&mut self, selection: QualitySelection) -> Result<(), InvalidLevelError> {
        self.validate(selection)?;
        self.selection = selection;
        Ok(())
    }

    /// The engine announced that it now plays the level at `active_index`.
    ///
    /// This only updates the current bitrate, the wanted selection is unaffected.
    /// Returns the new bitrate or `None` if that index is unknown.
    pub(crate) fn on_level_switched(&mut self, active_index: usize) -> Option<f64> {
        match self.levels.get(active_index) {
            Some(level) => {
                self.current_bitrate = level.bitrate;
                Some(level.bitrate)
            }
            None => {
                Logger::lazy_warn(&|| {
                    format!("Quality: Switched to unknown level {}", active_index)
                });
                None
            }
        }
    }
}
