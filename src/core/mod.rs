//! core/mod.rs
//!
//! Everything below here is GUI-free:
//! - source selection ('source')
//! - shared data types ('types')
//! - the playback control facade ('facade')
//! - the engine implementing its player capability ('playback')
//!
//! The GUI owns a `PlaybackFacade`, forwards every user intent to it, and
//! feeds engine notifications back into it; nothing else crosses the line.

pub mod facade;
pub mod playback;
pub mod source;
pub mod types;
