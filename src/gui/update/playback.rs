//! gui/update/playback.rs
//! GUI-facade bridge
//!
//! Design goals:
//! - The GUI never touches rodio/symphonia directly.
//! - All IO / timing is driven by the engine + TickPlayback polling.
//! - The facade owns playback state; handlers here only forward intent and
//!   rebind engines.

use std::cell::RefCell;

use iced::Task;

use super::super::state::{Message, Mirador};
use crate::core::playback::{PlayerEvent, start_playback};

/// Spawn an engine for the facade's active source and bind it.
///
/// Called at boot and after every source toggle. Binding replaces the
/// previous handle; dropping that handle shuts the old engine down.
pub(crate) fn bind_active_source(state: &mut Mirador) {
    let source = state.facade.active_source().clone();
    log::info!("binding player: {source:?}");

    let (handle, events) = start_playback(source);
    state.facade.bind(Box::new(handle));
    state.playback_events = Some(RefCell::new(events));
}

pub(crate) fn drain_events(state: &mut Mirador) -> Task<Message> {
    let Some(rx_cell) = state.playback_events.as_ref() else {
        return Task::none();
    };

    let mut drained: Vec<PlayerEvent> = Vec::new();
    {
        // Receiver::try_recv only needs &self, so borrow() is enough.
        let rx = rx_cell.borrow();
        while let Ok(ev) = rx.try_recv() {
            drained.push(ev);
        }
    }

    for ev in drained {
        handle_event(state, ev);
    }

    Task::none()
}

fn handle_event(state: &mut Mirador, event: PlayerEvent) {
    match event {
        PlayerEvent::Status(status) => state.facade.on_status(status),
        PlayerEvent::Error(err) => state.status_line = format!("Playback error: {err}"),
    }
}

pub(crate) fn toggle_play_pause(state: &mut Mirador) -> Task<Message> {
    state.facade.toggle_play_pause();
    Task::none()
}

pub(crate) fn stop(state: &mut Mirador) -> Task<Message> {
    state.facade.stop();
    Task::none()
}

pub(crate) fn seek_by(state: &mut Mirador, delta_seconds: i64) -> Task<Message> {
    state.facade.seek_by(delta_seconds);
    Task::none()
}

pub(crate) fn toggle_source(state: &mut Mirador) -> Task<Message> {
    state.facade.toggle_source();
    state.status_line = format!("Source: {}", state.facade.active_source().label());

    bind_active_source(state);

    Task::none()
}
