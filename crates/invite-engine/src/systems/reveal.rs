// systems/reveal.rs
//
// Envelope reveal: the timed intro that gates the invitation content.
//
// Every variant of the intro is the same machine: an intact envelope, some
// time-triggered intermediate phases, and a terminal phase that hands control
// to the caller. Skins only pick timing and which optional phases exist.
//
// Usage:
//   let reveal = EnvelopeReveal::mount("Ana", RevealOptions::default(), &scheduler, || done());
//   let fired = scheduler.advance(dt);
//   reveal.handle_timers(&fired);

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::types::{MotionPreference, RevealPhase};
use crate::core::time::{Scheduler, TimerGuard, TimerId};
use crate::error::{InviteError, InviteResult};
use super::burst::SealBurst;

pub const CAPTION_SEALED: &str = "Rompiendo el sello...";
pub const CAPTION_OPENING: &str = "Abriendo tu invitación...";

/// Visual variant of the intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealSkin {
    /// Wax seal shatters, then the two envelope halves swing open.
    #[default]
    WaxSeal,
    /// Wax seal, flap, then a letter card slides out before the fade.
    LetterPullout,
    /// No seal; the flap simply opens.
    PlainFlap,
}

impl RevealSkin {
    /// Default timing for this skin.
    pub fn timing(self) -> RevealTiming {
        match self {
            RevealSkin::WaxSeal => RevealTiming {
                seal_break_ms: Some(2000),
                open_ms: 2800,
                letter_ms: None,
                complete_ms: 5000,
            },
            RevealSkin::LetterPullout => RevealTiming {
                seal_break_ms: Some(3000),
                open_ms: 4000,
                letter_ms: Some(5000),
                complete_ms: 6500,
            },
            RevealSkin::PlainFlap => RevealTiming {
                seal_break_ms: None,
                open_ms: 2500,
                letter_ms: None,
                complete_ms: 4000,
            },
        }
    }

    pub fn has_seal(self) -> bool {
        !matches!(self, RevealSkin::PlainFlap)
    }

    /// CSS class the host puts on the overlay root.
    pub fn css_class(self) -> &'static str {
        match self {
            RevealSkin::WaxSeal => "reveal--wax-seal",
            RevealSkin::LetterPullout => "reveal--letter",
            RevealSkin::PlainFlap => "reveal--plain",
        }
    }
}

/// Phase offsets in milliseconds from mount. Present entries must be strictly
/// increasing in phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    #[serde(default)]
    pub seal_break_ms: Option<u64>,
    pub open_ms: u64,
    #[serde(default)]
    pub letter_ms: Option<u64>,
    pub complete_ms: u64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        RevealSkin::default().timing()
    }
}

impl RevealTiming {
    /// (offset, phase) pairs in phase order.
    pub fn steps(&self) -> Vec<(u64, RevealPhase)> {
        let mut steps = Vec::with_capacity(4);
        if let Some(ms) = self.seal_break_ms {
            steps.push((ms, RevealPhase::SealBroken));
        }
        steps.push((self.open_ms, RevealPhase::Opening));
        if let Some(ms) = self.letter_ms {
            steps.push((ms, RevealPhase::LetterExtracted));
        }
        steps.push((self.complete_ms, RevealPhase::Complete));
        steps
    }

    pub fn validate(&self) -> InviteResult<()> {
        let steps = self.steps();
        for pair in steps.windows(2) {
            let (a, pa) = pair[0];
            let (b, pb) = pair[1];
            if b <= a {
                return Err(InviteError::timing(format!(
                    "{:?} at {}ms must come after {:?} at {}ms",
                    pb, b, pa, a
                )));
            }
        }
        Ok(())
    }
}

/// Everything the reveal needs besides the guest name and the callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub skin: RevealSkin,
    pub timing: RevealTiming,
    pub motion: MotionPreference,
    /// Seed for the seal burst layout.
    pub burst_seed: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::for_skin(RevealSkin::default())
    }
}

impl RevealOptions {
    pub fn for_skin(skin: RevealSkin) -> Self {
        Self {
            skin,
            timing: skin.timing(),
            motion: MotionPreference::NoPreference,
            burst_seed: 42,
        }
    }

    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_burst_seed(mut self, seed: u64) -> Self {
        self.burst_seed = seed;
        self
    }
}

/// What the host draws for the current phase.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealView<'a> {
    pub phase: RevealPhase,
    pub skin: RevealSkin,
    pub guest_name: &'a str,
    pub caption: &'static str,
    pub seal_intact: bool,
    pub name_visible: bool,
    pub light_burst: bool,
    pub letter_out: bool,
}

struct PhaseTimer {
    guard: TimerGuard,
    target: RevealPhase,
}

/// The running intro. Owns its timers: dropping the reveal cancels whatever
/// has not fired, so nothing reaches the callback after unmount.
pub struct EnvelopeReveal {
    guest_name: String,
    options: RevealOptions,
    phase: RevealPhase,
    timers: Vec<PhaseTimer>,
    on_complete: Option<Box<dyn FnOnce()>>,
    burst: Option<SealBurst>,
}

impl EnvelopeReveal {
    /// Start the intro. With [`MotionPreference::Reduce`] the callback runs
    /// before this returns and no timer is scheduled.
    pub fn mount<F>(
        guest_name: impl Into<String>,
        options: RevealOptions,
        scheduler: &Scheduler,
        on_complete: F,
    ) -> Self
    where
        F: FnOnce() + 'static,
    {
        let mut reveal = Self {
            guest_name: guest_name.into(),
            options,
            phase: RevealPhase::Sealed,
            timers: Vec::new(),
            on_complete: Some(Box::new(on_complete)),
            burst: None,
        };

        if options.motion == MotionPreference::Reduce {
            log::info!("reveal: reduced motion, skipping intro");
            reveal.enter(RevealPhase::Complete);
            return reveal;
        }

        reveal.timers = options
            .timing
            .steps()
            .into_iter()
            .map(|(ms, target)| PhaseTimer {
                guard: scheduler.schedule(Duration::from_millis(ms)),
                target,
            })
            .collect();

        log::debug!(
            "reveal: mounted {:?} with {} timers, completes in {}ms",
            options.skin,
            reveal.timers.len(),
            options.timing.complete_ms
        );
        reveal
    }

    /// Apply fired timers in order. Returns the phases entered, in order.
    /// Ids that do not belong to this reveal are ignored.
    pub fn handle_timers(&mut self, fired: &[TimerId]) -> Vec<RevealPhase> {
        let mut entered = Vec::new();
        for &id in fired {
            let Some(idx) = self.timers.iter().position(|t| t.guard.id() == id) else {
                continue;
            };
            let timer = self.timers.remove(idx);
            if timer.target > self.phase {
                self.enter(timer.target);
                entered.push(timer.target);
            } else {
                log::trace!("reveal: ignoring stale timer for {:?}", timer.target);
            }
        }
        entered
    }

    fn enter(&mut self, phase: RevealPhase) {
        log::debug!("reveal: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;

        match phase {
            RevealPhase::SealBroken => {
                self.burst = Some(SealBurst::generate(self.options.burst_seed));
            }
            RevealPhase::Complete => {
                self.timers.clear();
                self.burst = None;
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
            }
            _ => {}
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn skin(&self) -> RevealSkin {
        self.options.skin
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    /// Timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Seal burst, present from the moment the seal breaks until completion.
    pub fn burst(&self) -> Option<&SealBurst> {
        self.burst.as_ref()
    }

    /// Current visuals, or `None` once complete (the overlay renders nothing).
    pub fn view(&self) -> Option<RevealView<'_>> {
        if self.is_complete() {
            return None;
        }
        let skin = self.options.skin;
        let sealed = self.phase == RevealPhase::Sealed;
        Some(RevealView {
            phase: self.phase,
            skin,
            guest_name: &self.guest_name,
            caption: if sealed && skin.has_seal() {
                CAPTION_SEALED
            } else {
                CAPTION_OPENING
            },
            seal_intact: sealed && skin.has_seal(),
            name_visible: self.phase < RevealPhase::Opening,
            light_burst: self.phase == RevealPhase::Opening,
            letter_out: self.phase == RevealPhase::LetterExtracted,
        })
    }

    /// Tear the reveal down early. Pending timers are cancelled.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for EnvelopeReveal {
    fn drop(&mut self) {
        if !self.timers.is_empty() {
            log::debug!(
                "reveal: unmounted in {:?}, cancelling {} timers",
                self.phase,
                self.timers.len()
            );
        }
    }
}
