//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use crate::core::types::PlaybackStatus;

/// Whole seconds, floored. Ex: 1999 ms -> 1.
pub(crate) fn whole_secs(ms: u64) -> u64 {
    ms / 1000
}

/// Elapsed/duration readout ("12s / 596s"), once the media reports both a
/// position and a duration.
pub(crate) fn format_readout(status: &PlaybackStatus) -> Option<String> {
    if !status.is_loaded {
        return None;
    }

    let duration_ms = status.duration_ms?;
    Some(format!(
        "{}s / {}s",
        whole_secs(status.position_ms),
        whole_secs(duration_ms)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_secs_floors() {
        assert_eq!(whole_secs(0), 0);
        assert_eq!(whole_secs(999), 0);
        assert_eq!(whole_secs(1_000), 1);
        assert_eq!(whole_secs(1_999), 1);
    }

    #[test]
    fn readout_hidden_until_media_reports_itself() {
        assert_eq!(format_readout(&PlaybackStatus::unloaded()), None);

        let loaded_no_duration = PlaybackStatus {
            is_loaded: true,
            is_playing: Some(false),
            position_ms: 12_400,
            duration_ms: None,
        };
        assert_eq!(format_readout(&loaded_no_duration), None);

        let loaded = PlaybackStatus {
            duration_ms: Some(596_500),
            ..loaded_no_duration
        };
        assert_eq!(format_readout(&loaded).as_deref(), Some("12s / 596s"));
    }
}
