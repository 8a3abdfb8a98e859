//! core/facade.rs
//! Playback control facade.
//!
//! Owns the UI-visible playback state (active source, playing flag, latest
//! status snapshot) and mediates between three parties:
//! - user intent (the transport and source-toggle handlers),
//! - an opaque, rebindable [`PlayerHandle`],
//! - the player's asynchronous status notifications.
//!
//! The facade is single-threaded and optimistic: commands set the playing
//! flag locally before the player confirms, and every inbound notification
//! overwrites state last-write-wins. It never raises errors to the caller;
//! failures surface through later notifications (`is_loaded = false`).

use crate::core::source::PlaybackSource;
use crate::core::types::{AudioMode, PlaybackStatus};

/// Capability surface of a live player bound to one source.
///
/// Commands are best-effort and fire-and-forget; the player answers through
/// its notification stream, not through return values. `status()` reports the
/// latest snapshot the player has published — it may already be stale by the
/// time a command lands, which is the accepted race.
pub trait PlayerHandle {
    /// Configure the ambient audio output. Idempotent.
    fn configure_audio(&self, mode: AudioMode);
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn set_position(&self, position_ms: u64);
    fn status(&self) -> PlaybackStatus;
}

pub struct PlaybackFacade {
    /// The bound player, if any. Unbound means every transport command is a
    /// silent no-op.
    handle: Option<Box<dyn PlayerHandle>>,
    active_source: PlaybackSource,
    is_playing: bool,
    last_status: PlaybackStatus,
    audio_mode: AudioMode,
}

impl PlaybackFacade {
    pub fn new() -> Self {
        Self {
            handle: None,
            active_source: PlaybackSource::Local,
            is_playing: false,
            last_status: PlaybackStatus::unloaded(),
            audio_mode: AudioMode::default(),
        }
    }

    /// Attach a player bound to the current source. Any previously bound
    /// handle is dropped here; disposal is the handle's own business.
    pub fn bind(&mut self, handle: Box<dyn PlayerHandle>) {
        self.handle = Some(handle);
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub fn active_source(&self) -> &PlaybackSource {
        &self.active_source
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn last_status(&self) -> &PlaybackStatus {
        &self.last_status
    }

    /// Play if paused, pause if playing, based on the player's current
    /// status. Configures the ambient audio mode first (idempotent), then
    /// issues exactly one transport command.
    pub fn toggle_play_pause(&mut self) {
        let Some(handle) = &self.handle else { return };

        handle.configure_audio(self.audio_mode);

        if handle.status().is_playing.unwrap_or(false) {
            handle.pause();
            self.is_playing = false;
        } else {
            handle.play();
            self.is_playing = true;
        }
    }

    /// Stop unconditionally. Calling it while already stopped just issues
    /// another stop; the player treats that as a no-op.
    pub fn stop(&mut self) {
        let Some(handle) = &self.handle else { return };

        handle.stop();
        self.is_playing = false;
    }

    /// Jump `delta_seconds` relative to the current position, saturating at 0
    /// and at the known duration. No-op while the player reports unloaded.
    pub fn seek_by(&mut self, delta_seconds: i64) {
        let Some(handle) = &self.handle else { return };

        let status = handle.status();
        if !status.is_loaded {
            return;
        }

        handle.set_position(seek_target_ms(
            status.position_ms,
            delta_seconds,
            status.duration_ms,
        ));
    }

    /// Flip between the local asset and the remote URL.
    ///
    /// Only local state changes here: the playing flag drops and the last
    /// snapshot resets to unknown. Tearing down the old player and binding a
    /// new one is the presentation layer's job.
    pub fn toggle_source(&mut self) {
        self.active_source = self.active_source.toggled();
        self.is_playing = false;
        self.last_status = PlaybackStatus::unloaded();
    }

    /// Fold one player notification into facade state. The snapshot always
    /// wins; if it carries a playing flag, that overrides any optimistic
    /// local set.
    pub fn on_status(&mut self, status: PlaybackStatus) {
        if let Some(playing) = status.is_playing {
            self.is_playing = playing;
        }
        self.last_status = status;
    }
}

impl Default for PlaybackFacade {
    fn default() -> Self {
        Self::new()
    }
}

/// Saturating seek arithmetic: clamp to `[0, duration]`, or `[0, ∞)` while
/// the duration is unknown. Never wraps, never errors.
fn seek_target_ms(position_ms: u64, delta_seconds: i64, duration_ms: Option<u64>) -> u64 {
    let delta_ms = delta_seconds.saturating_mul(1000);
    let position = i64::try_from(position_ms).unwrap_or(i64::MAX);
    let target = position.saturating_add(delta_ms).max(0) as u64;

    match duration_ms {
        Some(duration) => target.min(duration),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        ConfigureAudio,
        Play,
        Pause,
        Stop,
        SetPosition(u64),
    }

    /// Records every command and applies transport commands to its own
    /// status, like a well-behaved player would (eventually).
    struct ScriptedPlayer {
        sent: Rc<RefCell<Vec<Sent>>>,
        status: Rc<RefCell<PlaybackStatus>>,
    }

    impl PlayerHandle for ScriptedPlayer {
        fn configure_audio(&self, _mode: AudioMode) {
            self.sent.borrow_mut().push(Sent::ConfigureAudio);
        }

        fn play(&self) {
            self.sent.borrow_mut().push(Sent::Play);
            self.status.borrow_mut().is_playing = Some(true);
        }

        fn pause(&self) {
            self.sent.borrow_mut().push(Sent::Pause);
            self.status.borrow_mut().is_playing = Some(false);
        }

        fn stop(&self) {
            self.sent.borrow_mut().push(Sent::Stop);
            let mut status = self.status.borrow_mut();
            status.is_playing = Some(false);
            status.position_ms = 0;
        }

        fn set_position(&self, position_ms: u64) {
            self.sent.borrow_mut().push(Sent::SetPosition(position_ms));
            self.status.borrow_mut().position_ms = position_ms;
        }

        fn status(&self) -> PlaybackStatus {
            self.status.borrow().clone()
        }
    }

    type Script = (Rc<RefCell<Vec<Sent>>>, Rc<RefCell<PlaybackStatus>>);

    fn bound_facade(initial: PlaybackStatus) -> (PlaybackFacade, Script) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let status = Rc::new(RefCell::new(initial));

        let mut facade = PlaybackFacade::new();
        facade.bind(Box::new(ScriptedPlayer {
            sent: Rc::clone(&sent),
            status: Rc::clone(&status),
        }));

        (facade, (sent, status))
    }

    fn loaded_at(position_ms: u64, duration_ms: Option<u64>) -> PlaybackStatus {
        PlaybackStatus {
            is_loaded: true,
            is_playing: Some(false),
            position_ms,
            duration_ms,
        }
    }

    #[test]
    fn seek_back_clamps_to_zero() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(5_000, Some(20_000)));

        facade.seek_by(-10);

        assert_eq!(*sent.borrow(), vec![Sent::SetPosition(0)]);
    }

    #[test]
    fn seek_forward_clamps_to_duration() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(15_000, Some(20_000)));

        facade.seek_by(10);

        assert_eq!(*sent.borrow(), vec![Sent::SetPosition(20_000)]);
    }

    #[test]
    fn seek_is_unbounded_above_without_a_duration() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(5_000, None));

        facade.seek_by(3_600);

        assert_eq!(*sent.borrow(), vec![Sent::SetPosition(3_605_000)]);
    }

    #[test]
    fn seek_is_a_noop_while_unloaded() {
        let (mut facade, (sent, _)) = bound_facade(PlaybackStatus::unloaded());

        facade.seek_by(10);
        facade.seek_by(-10);

        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn seek_arithmetic_saturates_on_extreme_deltas() {
        assert_eq!(seek_target_ms(5_000, i64::MIN, Some(20_000)), 0);
        assert_eq!(seek_target_ms(5_000, i64::MAX, Some(20_000)), 20_000);
        assert_eq!(seek_target_ms(u64::MAX, 10, None), i64::MAX as u64);
    }

    #[test]
    fn toggle_play_pause_alternates() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(0, Some(20_000)));
        assert!(!facade.is_playing());

        facade.toggle_play_pause();
        assert!(facade.is_playing());

        facade.toggle_play_pause();
        assert!(!facade.is_playing());

        assert_eq!(
            *sent.borrow(),
            vec![
                Sent::ConfigureAudio,
                Sent::Play,
                Sent::ConfigureAudio,
                Sent::Pause,
            ]
        );
    }

    #[test]
    fn audio_mode_is_configured_before_every_transport_toggle() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(0, None));

        facade.toggle_play_pause();

        let sent = sent.borrow();
        assert_eq!(sent[0], Sent::ConfigureAudio);
        assert_eq!(sent[1], Sent::Play);
    }

    #[test]
    fn stop_is_idempotent_but_always_dispatches() {
        let (mut facade, (sent, _)) = bound_facade(loaded_at(9_000, Some(20_000)));

        facade.stop();
        facade.stop();

        assert!(!facade.is_playing());
        assert_eq!(*sent.borrow(), vec![Sent::Stop, Sent::Stop]);
    }

    #[test]
    fn toggle_source_flips_and_resets_local_state() {
        let (mut facade, _script) = bound_facade(loaded_at(0, Some(20_000)));
        facade.toggle_play_pause();
        facade.on_status(loaded_at(3_000, Some(20_000)));

        facade.toggle_source();
        assert_eq!(facade.active_source(), &PlaybackSource::remote_sample());
        assert!(!facade.is_playing());
        assert_eq!(facade.last_status(), &PlaybackStatus::unloaded());

        facade.toggle_source();
        assert_eq!(facade.active_source(), &PlaybackSource::Local);
    }

    #[test]
    fn notification_overrides_a_local_pause() {
        let (mut facade, _script) = bound_facade(loaded_at(0, Some(20_000)));
        facade.toggle_play_pause();
        facade.toggle_play_pause();
        assert!(!facade.is_playing());

        // A stale "still playing" snapshot arrives after the local pause.
        facade.on_status(PlaybackStatus {
            is_loaded: true,
            is_playing: Some(true),
            position_ms: 1_200,
            duration_ms: Some(20_000),
        });

        assert!(facade.is_playing());
    }

    #[test]
    fn notification_without_playing_field_leaves_the_flag_alone() {
        let (mut facade, _script) = bound_facade(loaded_at(0, Some(20_000)));
        facade.toggle_play_pause();

        facade.on_status(PlaybackStatus {
            is_loaded: false,
            is_playing: None,
            position_ms: 0,
            duration_ms: None,
        });

        assert!(facade.is_playing());
        assert!(!facade.last_status().is_loaded);
    }

    #[test]
    fn unbound_facade_ignores_transport_commands() {
        let mut facade = PlaybackFacade::new();

        facade.toggle_play_pause();
        facade.stop();
        facade.seek_by(10);

        assert!(!facade.is_bound());
        assert!(!facade.is_playing());
        assert_eq!(facade.last_status(), &PlaybackStatus::unloaded());

        // Source toggling only touches local state, so it works unbound.
        facade.toggle_source();
        assert_eq!(facade.active_source(), &PlaybackSource::remote_sample());
    }
}
