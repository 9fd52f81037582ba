pub mod api;
pub mod core;
pub mod systems;
pub mod content;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::InviteConfig;
pub use api::invitation::Invitation;
pub use api::types::{InviteEvent, MotionPreference, RevealPhase};
pub use crate::core::guest::{GuestIdentity, DEFAULT_GUEST_NAME, DEFAULT_SEATS};
pub use crate::core::time::{Scheduler, TimerGuard, TimerId};
pub use systems::reveal::{EnvelopeReveal, RevealOptions, RevealSkin, RevealTiming, RevealView};
pub use systems::audio::{AudioCommand, AudioController, AudioPlaybackState, PlayOutcome};
pub use systems::burst::{BurstParticle, SealBurst};
pub use content::{render_html, InvitationContent, Section};
pub use content::rsvp::{RsvpAnswer, RsvpLink, DEFAULT_RSVP_CONTACT};
pub use assets::manifest::ContentManifest;
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{EventBuffer, ProtocolLayout, HEADER_FLOATS};
pub use error::{InviteError, InviteResult};
