use std::cell::Cell;
use std::rc::Rc;

use crate::api::config::InviteConfig;
use crate::api::types::{InviteEvent, MotionPreference, RevealPhase};
use crate::bridge::protocol::{
    EventBuffer, EVENT_AUDIO_PAUSE, EVENT_AUDIO_PLAY, EVENT_CONTENT_READY, EVENT_HINT_CHANGED,
    EVENT_PHASE_CHANGED, EVENT_REVEAL_COMPLETE, EVENT_SEAL_BURST, HEADER_AUTOPLAY_BLOCKED,
    HEADER_CONTENT_READY, HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_HINT_VISIBLE,
    HEADER_IS_PLAYING, HEADER_PHASE, HEADER_PROTOCOL_VERSION, HEADER_SEATS, PROTOCOL_VERSION,
};
use crate::content::{render_html, InvitationContent};
use crate::core::guest::GuestIdentity;
use crate::core::time::{Scheduler, TimerId};
use crate::input::queue::InputEvent;
use crate::systems::audio::{AudioCommand, AudioController, AudioPlaybackState, PlayOutcome};
use crate::systems::reveal::{EnvelopeReveal, RevealOptions, RevealView};

/// One page load: the guest, the intro, then the content and the music.
///
/// The reveal reports completion through its callback; the invitation picks
/// that up, discards the reveal, mounts the content and makes the single
/// autoplay attempt.
pub struct Invitation {
    guest: GuestIdentity,
    config: InviteConfig,
    reveal: Option<EnvelopeReveal>,
    /// Set by the reveal's completion callback.
    revealed: Rc<Cell<bool>>,
    handed_over: bool,
    /// Phase the reveal was in when the page was left mid-intro.
    stopped_at: Option<RevealPhase>,
    content: Option<InvitationContent>,
    audio: AudioController,
    events: EventBuffer,
}

impl Invitation {
    pub fn mount(
        query: &str,
        motion: MotionPreference,
        config: InviteConfig,
        scheduler: &Scheduler,
    ) -> Self {
        let guest = GuestIdentity::from_query(query);

        let options = RevealOptions::for_skin(config.skin)
            .with_timing(config.reveal_timing())
            .with_motion(motion)
            .with_burst_seed(config.burst_seed);

        let revealed = Rc::new(Cell::new(false));
        let flag = revealed.clone();
        let reveal = EnvelopeReveal::mount(guest.name.clone(), options, scheduler, move || {
            flag.set(true)
        });

        let mut invitation = Self {
            guest,
            events: EventBuffer::with_capacity(config.max_events),
            config,
            reveal: Some(reveal),
            revealed,
            handed_over: false,
            stopped_at: None,
            content: None,
            audio: AudioController::new(),
        };
        // Reduced motion completes inside mount.
        invitation.poll_handover();
        log::info!("invitation mounted for {:?}", invitation.guest.name);
        invitation
    }

    /// Clear the previous frame's events. Called by the runner before a tick.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Route fired timers to the reveal, then react to completion.
    pub fn on_timers(&mut self, fired: &[TimerId]) {
        if fired.is_empty() {
            return;
        }
        if let Some(reveal) = &mut self.reveal {
            for phase in reveal.handle_timers(fired) {
                self.events
                    .push(InviteEvent::new(EVENT_PHASE_CHANGED).with_a(phase.index() as f32));
                if phase == RevealPhase::SealBroken && reveal.burst().is_some() {
                    self.events.push(InviteEvent::new(EVENT_SEAL_BURST));
                }
            }
        }
        self.poll_handover();
    }

    fn poll_handover(&mut self) {
        if self.handed_over || !self.revealed.get() {
            return;
        }
        self.handed_over = true;
        self.reveal = None;
        self.events.push(InviteEvent::new(EVENT_REVEAL_COMPLETE));

        self.content = Some(InvitationContent::build(
            &self.guest,
            &self.config.content,
            &self.config.rsvp_contact,
        ));
        self.events.push(InviteEvent::new(EVENT_CONTENT_READY));

        if let Some(cmd) = self.audio.on_reveal_complete() {
            self.push_audio(cmd);
        }
    }

    pub fn handle_input(&mut self, events: &[InputEvent]) {
        for event in events {
            let hint_before = self.audio.hint_visible();
            match event {
                InputEvent::ToggleAudio => {
                    let cmd = self.audio.toggle();
                    self.push_audio(cmd);
                }
                InputEvent::PlayResolved => self.audio.resolve(PlayOutcome::Started),
                InputEvent::PlayRejected => self.audio.resolve(PlayOutcome::Rejected),
                InputEvent::DismissHint => self.audio.dismiss_hint(),
            }
            let hint_after = self.audio.hint_visible();
            if hint_before != hint_after {
                let a = if hint_after { 1.0 } else { 0.0 };
                self.events.push(InviteEvent::new(EVENT_HINT_CHANGED).with_a(a));
            }
        }
    }

    fn push_audio(&mut self, cmd: AudioCommand) {
        let kind = match cmd {
            AudioCommand::Play => EVENT_AUDIO_PLAY,
            AudioCommand::Pause => EVENT_AUDIO_PAUSE,
        };
        self.events.push(InviteEvent::new(kind));
    }

    /// Leave the page. A reveal still running is torn down with its timers.
    pub fn unmount(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            self.stopped_at = Some(reveal.phase());
            reveal.unmount();
        }
    }

    pub fn phase(&self) -> RevealPhase {
        match &self.reveal {
            Some(reveal) => reveal.phase(),
            None if self.handed_over => RevealPhase::Complete,
            None => self.stopped_at.unwrap_or(RevealPhase::Sealed),
        }
    }

    pub fn guest(&self) -> &GuestIdentity {
        &self.guest
    }

    pub fn config(&self) -> &InviteConfig {
        &self.config
    }

    pub fn reveal_view(&self) -> Option<RevealView<'_>> {
        self.reveal.as_ref().and_then(EnvelopeReveal::view)
    }

    pub fn burst_json(&self) -> Option<String> {
        self.reveal
            .as_ref()
            .and_then(EnvelopeReveal::burst)
            .map(|b| b.to_json())
    }

    pub fn content(&self) -> Option<&InvitationContent> {
        self.content.as_ref()
    }

    pub fn content_html(&self) -> Option<String> {
        self.content.as_ref().map(render_html)
    }

    pub fn audio_state(&self) -> AudioPlaybackState {
        self.audio.state()
    }

    pub fn hint_visible(&self) -> bool {
        self.audio.hint_visible()
    }

    pub fn events(&self) -> &EventBuffer {
        &self.events
    }

    pub fn write_header(&self, out: &mut [f32; HEADER_FLOATS]) {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let audio = self.audio.state();
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_PHASE] = self.phase().index() as f32;
        out[HEADER_IS_PLAYING] = flag(audio.is_playing);
        out[HEADER_AUTOPLAY_BLOCKED] = flag(audio.autoplay_blocked);
        out[HEADER_HINT_VISIBLE] = flag(self.audio.hint_visible());
        out[HEADER_SEATS] = self.guest.seats as f32;
        out[HEADER_CONTENT_READY] = flag(self.content.is_some());
        out[HEADER_EVENT_COUNT] = self.events.len() as f32;
    }
}
