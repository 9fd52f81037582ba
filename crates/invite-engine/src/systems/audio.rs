//! Background music toggle.
//!
//! The controller never touches the media element. It hands the host an
//! [`AudioCommand`] and waits for the outcome of each play request, because
//! browsers resolve `play()` asynchronously and may reject it under autoplay
//! policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioPlaybackState {
    pub is_playing: bool,
    pub autoplay_blocked: bool,
}

/// What the host should do to the audio element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
}

/// Outcome of a play request, reported back by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayOrigin {
    Autoplay,
    User,
}

#[derive(Debug, Default)]
pub struct AudioController {
    state: AudioPlaybackState,
    /// A play request the host has not answered yet.
    pending: Option<PlayOrigin>,
    autoplay_attempted: bool,
    hint_dismissed: bool,
}

impl AudioController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AudioPlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Whether the "tap to play music" hint should be shown.
    pub fn hint_visible(&self) -> bool {
        self.state.autoplay_blocked && !self.hint_dismissed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Try to start music once the reveal hands over. Only the first call
    /// issues a request; a rejection is never retried automatically.
    pub fn on_reveal_complete(&mut self) -> Option<AudioCommand> {
        if self.autoplay_attempted || self.state.is_playing {
            return None;
        }
        self.autoplay_attempted = true;
        self.pending = Some(PlayOrigin::Autoplay);
        log::debug!("audio: autoplay attempt");
        Some(AudioCommand::Play)
    }

    /// User pressed the music button.
    pub fn toggle(&mut self) -> AudioCommand {
        if self.state.is_playing {
            // Any request still in flight is abandoned; its late outcome is ignored.
            self.pending = None;
            self.state.is_playing = false;
            log::debug!("audio: paused");
            AudioCommand::Pause
        } else {
            // Paused, even with an unanswered autoplay request: the user's
            // request supersedes it and the next outcome is attributed to it.
            self.pending = Some(PlayOrigin::User);
            log::debug!("audio: play requested");
            AudioCommand::Play
        }
    }

    /// Host reports how the last play request ended.
    pub fn resolve(&mut self, outcome: PlayOutcome) {
        let Some(origin) = self.pending.take() else {
            log::trace!("audio: ignoring stale play outcome {:?}", outcome);
            return;
        };

        match outcome {
            PlayOutcome::Started => {
                self.state.is_playing = true;
                self.state.autoplay_blocked = false;
                self.hint_dismissed = false;
                log::info!("audio: playing");
            }
            PlayOutcome::Rejected => {
                self.state.is_playing = false;
                self.state.autoplay_blocked = true;
                // A rejected manual attempt brings the hint back.
                self.hint_dismissed = false;
                match origin {
                    PlayOrigin::Autoplay => log::info!("audio: autoplay blocked, showing hint"),
                    PlayOrigin::User => log::warn!("audio: play rejected"),
                }
            }
        }
    }

    pub fn dismiss_hint(&mut self) {
        self.hint_dismissed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_success() {
        let mut audio = AudioController::new();
        assert_eq!(audio.on_reveal_complete(), Some(AudioCommand::Play));
        audio.resolve(PlayOutcome::Started);
        assert!(audio.is_playing());
        assert!(!audio.hint_visible());
    }

    #[test]
    fn autoplay_rejected_shows_hint_without_retry() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        audio.resolve(PlayOutcome::Rejected);

        assert_eq!(
            audio.state(),
            AudioPlaybackState { is_playing: false, autoplay_blocked: true }
        );
        assert!(audio.hint_visible());
        assert_eq!(audio.on_reveal_complete(), None);
    }

    #[test]
    fn toggle_round_trip_clears_blocked_hint() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        audio.resolve(PlayOutcome::Rejected);
        let before = audio.is_playing();

        assert_eq!(audio.toggle(), AudioCommand::Play);
        audio.resolve(PlayOutcome::Started);
        assert!(audio.is_playing());
        assert!(!audio.state().autoplay_blocked);

        assert_eq!(audio.toggle(), AudioCommand::Pause);
        assert_eq!(audio.is_playing(), before);
        assert!(!audio.hint_visible());
    }

    #[test]
    fn rejected_toggle_stays_paused_and_resurfaces_hint() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        audio.resolve(PlayOutcome::Rejected);
        audio.dismiss_hint();
        assert!(!audio.hint_visible());

        audio.toggle();
        audio.resolve(PlayOutcome::Rejected);
        assert!(!audio.is_playing());
        assert!(audio.hint_visible());
    }

    #[test]
    fn toggle_while_autoplay_pending_requests_play() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        assert!(audio.is_pending());
        assert!(!audio.is_playing());

        assert_eq!(audio.toggle(), AudioCommand::Play);
        assert!(audio.is_pending());

        audio.resolve(PlayOutcome::Started);
        assert!(audio.is_playing());
        assert!(!audio.is_pending());

        // The superseded autoplay promise settles late; nothing changes.
        audio.resolve(PlayOutcome::Rejected);
        assert!(audio.is_playing());
        assert!(!audio.hint_visible());
    }

    #[test]
    fn pause_abandons_request_in_flight() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        audio.resolve(PlayOutcome::Started);

        assert_eq!(audio.toggle(), AudioCommand::Pause);
        assert!(!audio.is_pending());
        audio.resolve(PlayOutcome::Started);
        assert!(!audio.is_playing());
    }

    #[test]
    fn dismiss_keeps_playback_state() {
        let mut audio = AudioController::new();
        audio.on_reveal_complete();
        audio.resolve(PlayOutcome::Rejected);
        audio.dismiss_hint();
        assert!(audio.state().autoplay_blocked);
        assert!(!audio.hint_visible());
    }
}
