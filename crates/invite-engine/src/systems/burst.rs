//! Seal burst layout: the shards and sparkles thrown out when the wax seal
//! breaks. Only the layout lives here; the host animates each particle from
//! the envelope center to `offset` with a CSS transition.

use glam::Vec2;
use serde::Serialize;

use crate::core::rng::Rng;

pub const FRAGMENT_COUNT: usize = 8;
pub const SPARKLE_COUNT: usize = 20;

/// Seconds for a shard to reach its offset.
pub const FRAGMENT_DURATION: f32 = 0.8;
/// Seconds for a sparkle to reach its offset.
pub const SPARKLE_DURATION: f32 = 1.2;

/// Number of gold tones sparkles cycle through.
pub const SPARKLE_TONES: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstParticle {
    /// Final offset from the envelope center, in CSS pixels.
    pub offset: Vec2,
    /// Final rotation in degrees.
    pub rotation: f32,
    /// Start delay in seconds.
    pub delay: f32,
    /// Travel time in seconds.
    pub duration: f32,
    /// Palette slot, `0..SPARKLE_TONES`. Shards always use 0.
    pub tone: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SealBurst {
    pub fragments: Vec<BurstParticle>,
    pub sparkles: Vec<BurstParticle>,
}

impl SealBurst {
    pub fn generate(seed: u64) -> Self {
        let mut rng = Rng::new(seed);

        // Shards leave at even 45° spacing so the seal visibly splits apart.
        let fragments = (0..FRAGMENT_COUNT)
            .map(|i| {
                let angle = (i as f32 * 360.0 / FRAGMENT_COUNT as f32).to_radians();
                let distance = rng.range(60.0, 100.0);
                BurstParticle {
                    offset: Vec2::from_angle(angle) * distance,
                    rotation: rng.range(0.0, 360.0),
                    delay: 0.0,
                    duration: FRAGMENT_DURATION,
                    tone: 0,
                }
            })
            .collect();

        let sparkles = (0..SPARKLE_COUNT)
            .map(|i| {
                let angle = rng.range(-180.0, 180.0).to_radians();
                let distance = rng.range(80.0, 200.0);
                BurstParticle {
                    offset: Vec2::from_angle(angle) * distance,
                    rotation: rng.range(0.0, 720.0),
                    delay: rng.range(0.0, 0.2),
                    duration: SPARKLE_DURATION,
                    tone: (i % SPARKLE_TONES as usize) as u8,
                }
            })
            .collect();

        Self { fragments, sparkles }
    }

    pub fn len(&self) -> usize {
        self.fragments.len() + self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
