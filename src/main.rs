//! Mirador
//!
//! # What this program is
//! A single-window media player (built with the `iced` GUI library) that
//! plays one of two sources — a bundled asset or a remote sample URL — with
//! play/pause, stop, ±10s seek, a source toggle, and a whole-seconds
//! position readout.
//!
//! # How it fits together
//! - `gui` is a standard Iced loop: Message happens -> update changes state
//!   -> view redraws.
//! - `core::facade::PlaybackFacade` owns all playback state; every button is
//!   a thin forward to one of its commands.
//! - `core::playback` is the engine: a thread owning the rodio output,
//!   bound to one source, fed commands over a channel and pushing status
//!   snapshots back. The GUI polls those on a 200 ms tick and feeds them
//!   into the facade, which treats them as the source of truth.
//!
//! Toggling the source spawns a fresh engine and drops the old handle; the
//! old engine shuts itself down when its channel disconnects.

mod core;
mod gui;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(gui::boot, gui::update, gui::view)
        .subscription(gui::subscription)
        .title("Mirador")
        .run()
}
