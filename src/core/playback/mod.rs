//! core/playback/mod.rs
//! Playback engine wiring: commands in, status snapshots out.
//!
//! `start_playback(source)` spawns an engine thread bound to that one source
//! and hands back an [`EngineHandle`] — the production [`PlayerHandle`] — plus
//! the event stream the GUI drains on its tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

mod engine;
mod fetch;
mod media;

pub use engine::PlaybackEngine;

use crate::core::facade::PlayerHandle;
use crate::core::source::PlaybackSource;
use crate::core::types::{AudioMode, PlaybackStatus};

#[derive(Debug)]
pub enum PlayerCommand {
    ConfigureAudio(AudioMode),
    Play,
    Pause,
    /// Pause and rewind to the start; the media stays loaded.
    Stop,
    SetPosition(u64), // ms
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// Full snapshot; sent on every tick and after every command.
    Status(PlaybackStatus),
    /// Human-readable failure for the status line.
    Error(String),
}

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }
}

/// A live engine bound to one source.
///
/// Commands are forwarded over the command channel; `status()` answers from
/// the slot the engine publishes into on every tick. Dropping the handle
/// shuts the engine down.
pub struct EngineHandle {
    controller: PlaybackController,
    status: Arc<Mutex<PlaybackStatus>>,
}

impl PlayerHandle for EngineHandle {
    fn configure_audio(&self, mode: AudioMode) {
        self.controller.send(PlayerCommand::ConfigureAudio(mode));
    }

    fn play(&self) {
        self.controller.send(PlayerCommand::Play);
    }

    fn pause(&self) {
        self.controller.send(PlayerCommand::Pause);
    }

    fn stop(&self) {
        self.controller.send(PlayerCommand::Stop);
    }

    fn set_position(&self, position_ms: u64) {
        self.controller.send(PlayerCommand::SetPosition(position_ms));
    }

    fn status(&self) -> PlaybackStatus {
        self.status
            .lock()
            .map(|status| status.clone())
            .unwrap_or_default()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // The disconnect alone would stop the engine; the explicit shutdown
        // just skips the current tick wait.
        self.controller.send(PlayerCommand::Shutdown);
    }
}

/// Spawns the engine thread for `source` and returns:
/// - EngineHandle (bind into the facade)
/// - Receiver<PlayerEvent> (drained from the GUI playback tick)
pub fn start_playback(source: PlaybackSource) -> (EngineHandle, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let status = Arc::new(Mutex::new(PlaybackStatus::unloaded()));

    let engine_status = Arc::clone(&status);
    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(source, engine_status, event_tx.clone()) {
            Ok(engine) => engine,
            Err(msg) => {
                let _ = event_tx.send(PlayerEvent::Error(msg));
                return;
            }
        };

        engine.run(command_rx);
    });

    (
        EngineHandle {
            controller: PlaybackController { command_tx },
            status,
        },
        event_rx,
    )
}
