//! Core data types shared between the facade, the engine, and the UI.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No GUI code
//! - No audio code

/// One snapshot of the player's state, produced only by the engine.
///
/// `is_playing` is `None` when the notification did not carry the field — an
/// unloaded player reports nothing about playing-ness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_loaded: bool,
    pub is_playing: Option<bool>,
    pub position_ms: u64,
    /// Unknown until the demuxer reports it (and possibly never).
    pub duration_ms: Option<u64>,
}

impl PlaybackStatus {
    /// The "nothing known yet" snapshot: what the UI sees before a freshly
    /// bound player has reported anything.
    pub fn unloaded() -> Self {
        Self::default()
    }
}

/// Options for the ambient audio-output configuration, applied before every
/// play/pause toggle. Applying the same mode twice is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    /// Keep producing audio even when the platform output is muted/silenced.
    pub play_when_muted: bool,
    /// Keep the output alive when the app is backgrounded.
    pub keep_alive_in_background: bool,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            play_when_muted: true,
            keep_alive_in_background: false,
        }
    }
}
