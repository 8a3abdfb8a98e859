//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::cell::RefCell;
use std::sync::mpsc::Receiver;

use crate::core::facade::PlaybackFacade;
use crate::core::playback::PlayerEvent;

/// Transport seek step (seconds).
pub(crate) const SEEK_STEP_SECS: i64 = 10;

/// App state
pub(crate) struct Mirador {
    /// Status text shown under the title (source changes, engine errors).
    pub status_line: String,

    /// The playback control facade; all transport intent goes through it.
    pub facade: PlaybackFacade,

    /// Engine notifications, drained on each playback tick.
    pub playback_events: Option<RefCell<Receiver<PlayerEvent>>>,
}

impl Default for Mirador {
    fn default() -> Self {
        Self {
            status_line: "Source: Local".to_string(),
            facade: PlaybackFacade::new(),
            playback_events: None,
        }
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // Transport
    TogglePlayPause,
    Stop,
    SeekBy(i64), // seconds, signed

    // Source
    ToggleSource,
}
