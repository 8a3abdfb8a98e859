//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink + decoded media for the one source this engine is bound to
//! - command loop + periodic status snapshots
//!
//! Publishes full PlaybackStatus snapshots after every command and on every
//! tick: into the shared slot served by `EngineHandle::status()`, and as
//! PlayerEvent notifications over the event channel.
//! No Iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tempfile::NamedTempFile;

use super::{PlayerCommand, PlayerEvent, fetch, media};
use crate::core::source::{self, PlaybackSource};
use crate::core::types::{AudioMode, PlaybackStatus};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    // The one source this engine is bound to, for its whole lifetime.
    source: PlaybackSource,
    // Keeps a fetched remote file on disk while we play from it.
    staged: Option<NamedTempFile>,

    // Current playback
    sink: Option<Sink>,
    duration_ms: Option<u64>,

    audio_mode: AudioMode,

    // Published state
    shared_status: Arc<Mutex<PlaybackStatus>>,
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(
        source: PlaybackSource,
        shared_status: Arc<Mutex<PlaybackStatus>>,
        event_tx: Sender<PlayerEvent>,
    ) -> Result<Self, String> {
        // rodio 0.21.x: build/open the default output stream via OutputStreamBuilder
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("failed to init default audio output: {e}"))?;

        Ok(Self {
            stream,
            source,
            staged: None,
            sink: None,
            duration_ms: None,
            audio_mode: AudioMode::default(),
            shared_status,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        // Load up front, paused: the media is seekable and reports its
        // duration before the first play command.
        if let Err(msg) = self.load() {
            log::warn!("load failed: {msg}");
            let _ = self.event_tx.send(PlayerEvent::Error(msg));
        }
        self.publish();

        let tick = Duration::from_millis(TICK_MS);

        'run: loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break 'run;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            break 'run;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break 'run,
            }

            self.tick();
        }

        self.unload();
        self.publish();
    }

    /// Returns true when the engine should shut down.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::ConfigureAudio(mode) => {
                // The output stream itself is opened once at engine start, so
                // reconfiguring is only bookkeeping.
                if self.audio_mode != mode {
                    log::debug!(
                        "audio mode: play_when_muted={} keep_alive_in_background={}",
                        mode.play_when_muted,
                        mode.keep_alive_in_background
                    );
                    self.audio_mode = mode;
                }
            }
            PlayerCommand::Play => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
                self.publish();
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                self.publish();
            }
            PlayerCommand::Stop => {
                // Pause + rewind; the media stays loaded and replayable.
                let mut rewind_failed = false;
                if let Some(sink) = &self.sink {
                    sink.pause();
                    rewind_failed = sink.try_seek(Duration::ZERO).is_err();
                }
                if rewind_failed {
                    self.reload_paused();
                }
                self.publish();
            }
            PlayerCommand::SetPosition(ms) => {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.try_seek(Duration::from_millis(ms)) {
                        let _ = self
                            .event_tx
                            .send(PlayerEvent::Error(format!("seek failed: {e}")));
                    }
                }
                self.publish();
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let ended = self.sink.as_ref().is_some_and(|s| s.empty());
        if ended {
            // End of media: stay loaded, paused back at the start.
            log::debug!("media ended; reloading paused");
            self.reload_paused();
        }

        self.publish();
    }

    fn load(&mut self) -> Result<(), String> {
        let path = self.resolve_media()?;

        let (audio, duration_ms) = media::open_media(&path).map_err(|e| e.to_string())?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(audio);

        self.duration_ms = duration_ms;
        self.sink = Some(sink);

        log::info!("loaded {} (duration {duration_ms:?} ms)", path.display());
        Ok(())
    }

    fn reload_paused(&mut self) {
        self.unload();
        if let Err(msg) = self.load() {
            log::warn!("reload failed: {msg}");
            let _ = self.event_tx.send(PlayerEvent::Error(msg));
        }
    }

    /// Where the bound source actually lives on disk. Remote sources are
    /// fetched once and staged in a temp file for the engine's lifetime.
    fn resolve_media(&mut self) -> Result<PathBuf, String> {
        let url = match &self.source {
            PlaybackSource::Local => return Ok(PathBuf::from(source::LOCAL_ASSET)),
            PlaybackSource::Remote(url) => url.clone(),
        };

        if let Some(staged) = &self.staged {
            return Ok(staged.path().to_path_buf());
        }

        let staged = fetch::fetch_to_temp(&url).map_err(|e| e.to_string())?;
        let path = staged.path().to_path_buf();
        self.staged = Some(staged);
        Ok(path)
    }

    fn current_status(&self) -> PlaybackStatus {
        match &self.sink {
            Some(sink) => PlaybackStatus {
                is_loaded: true,
                is_playing: Some(!sink.is_paused() && !sink.empty()),
                position_ms: sink.get_pos().as_millis() as u64,
                duration_ms: self.duration_ms,
            },
            None => PlaybackStatus::unloaded(),
        }
    }

    fn publish(&self) {
        let status = self.current_status();

        if let Ok(mut shared) = self.shared_status.lock() {
            *shared = status.clone();
        }
        let _ = self.event_tx.send(PlayerEvent::Status(status));
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.duration_ms = None;
    }
}
