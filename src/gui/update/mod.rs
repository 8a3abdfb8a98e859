//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Mirador};

pub(crate) mod playback;

pub(crate) fn update(state: &mut Mirador, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Transport
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::SeekBy(delta) => playback::seek_by(state, delta),

        // Source
        Message::ToggleSource => playback::toggle_source(state),
    }
}
