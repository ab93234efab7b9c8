use crate::quality::QualityLevel;

/// Format the given quality levels into a flat vector that can be easily communicated to
/// JavaScript.
///
/// Each level takes two consecutive elements, in index order: first its bitrate in bits per
/// second, then its height in pixels.
pub(crate) fn format_levels_for_js(levels: &[QualityLevel]) -> Vec<f64> {
    let mut ret = Vec::with_capacity(levels.len() * 2);
    levels.iter().for_each(|l| {
        ret.push(l.bitrate());
        ret.push(f64::from(l.height()));
    });
    ret
}

/// Format a bitrate in bits per second into megabits per second with two decimals.
pub(crate) fn format_mbps(bitrate: f64) -> String {
    format!("{:.2} Mbps", bitrate / 1_000_000.)
}

/// Human-readable label of a quality level, as displayed in a quality menu.
pub(crate) fn format_level_label(level: &QualityLevel) -> String {
    format!("{}p ({})", level.height(), format_mbps(level.bitrate()))
}
