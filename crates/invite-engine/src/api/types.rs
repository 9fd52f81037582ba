use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Visual phase of the envelope reveal. Ordered: a reveal only ever moves
/// to a later variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Closed envelope, seal intact, guest name on the front.
    Sealed,
    /// Seal shattered, fragments flying.
    SealBroken,
    /// Flaps folding open with a light burst.
    Opening,
    /// Letter slid out of the envelope, overlay fading.
    LetterExtracted,
    /// Overlay gone; the invitation content takes over.
    Complete,
}

impl RevealPhase {
    /// Stable numeric index for the wire protocol.
    pub fn index(self) -> u32 {
        match self {
            RevealPhase::Sealed => 0,
            RevealPhase::SealBroken => 1,
            RevealPhase::Opening => 2,
            RevealPhase::LetterExtracted => 3,
            RevealPhase::Complete => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RevealPhase::Complete
    }
}

/// The user's motion preference, read by the host at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPreference {
    #[default]
    NoPreference,
    Reduce,
}

impl MotionPreference {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduce
        } else {
            MotionPreference::NoPreference
        }
    }
}

/// An event communicated from Rust to the JS host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct InviteEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl InviteEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32) -> Self {
        Self {
            kind: kind as f32,
            ..Self::default()
        }
    }

    pub fn with_a(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn kind(&self) -> u32 {
        self.kind as u32
    }
}
