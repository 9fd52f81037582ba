use serde::{Deserialize, Serialize};

use crate::assets::manifest::ContentManifest;
use crate::bridge::protocol::MIN_EVENT_CAPACITY;
use crate::content::rsvp::{sanitize_contact, DEFAULT_RSVP_CONTACT};
use crate::error::{InviteError, InviteResult};
use crate::systems::reveal::{RevealSkin, RevealTiming};

/// Configuration for an invitation, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Intro variant.
    pub skin: RevealSkin,
    /// Overrides the skin's default timing when set.
    pub timing: Option<RevealTiming>,
    /// Messaging handle RSVP links are addressed to.
    pub rsvp_contact: String,
    /// Seed for the seal burst layout.
    pub burst_seed: u64,
    /// Maximum events buffered per frame (default: 32).
    pub max_events: usize,
    pub content: ContentManifest,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            skin: RevealSkin::default(),
            timing: None,
            rsvp_contact: DEFAULT_RSVP_CONTACT.to_string(),
            burst_seed: 42,
            max_events: 32,
            content: ContentManifest::default(),
        }
    }
}

impl InviteConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> InviteResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.reveal_timing().validate()?;
        if config.max_events < MIN_EVENT_CAPACITY {
            return Err(InviteError::invalid(format!(
                "max_events is {}, at least {} are needed per frame",
                config.max_events, MIN_EVENT_CAPACITY
            )));
        }
        if sanitize_contact(&config.rsvp_contact).is_empty() {
            return Err(InviteError::invalid(format!(
                "rsvp_contact {:?} has no digits",
                config.rsvp_contact
            )));
        }
        Ok(config)
    }

    /// Apply the environment-provided RSVP contact. Values without a single
    /// digit (empty, blank, or not a phone handle) are ignored.
    pub fn with_rsvp_override(mut self, contact: Option<&str>) -> Self {
        let usable = |c: &&str| !sanitize_contact(c).is_empty();
        if let Some(contact) = contact.map(str::trim).filter(usable) {
            log::info!("config: rsvp contact overridden");
            self.rsvp_contact = contact.to_string();
        }
        self
    }

    /// Effective timing: explicit override or the skin's preset.
    pub fn reveal_timing(&self) -> RevealTiming {
        self.timing.unwrap_or_else(|| self.skin.timing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(InviteConfig::from_json("{}").unwrap(), InviteConfig::default());
    }

    #[test]
    fn skin_and_timing_override() {
        let json = r#"{
            "skin": "letter_pullout",
            "timing": { "seal_break_ms": 2500, "open_ms": 3200, "complete_ms": 4500 }
        }"#;
        let config = InviteConfig::from_json(json).unwrap();
        assert_eq!(config.skin, RevealSkin::LetterPullout);
        let t = config.reveal_timing();
        assert_eq!(t.letter_ms, None);
        assert_eq!(t.complete_ms, 4500);
    }

    #[test]
    fn invalid_timing_rejected() {
        let json = r#"{ "timing": { "open_ms": 3000, "complete_ms": 1000 } }"#;
        assert!(matches!(InviteConfig::from_json(json), Err(InviteError::Timing(_))));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(InviteConfig::from_json("{"), Err(InviteError::Config(_))));
    }

    #[test]
    fn rsvp_override() {
        let config = InviteConfig::default().with_rsvp_override(Some("50370001111"));
        assert_eq!(config.rsvp_contact, "50370001111");

        let config = InviteConfig::default().with_rsvp_override(Some("  "));
        assert_eq!(config.rsvp_contact, DEFAULT_RSVP_CONTACT);

        let config = InviteConfig::default().with_rsvp_override(None);
        assert_eq!(config.rsvp_contact, DEFAULT_RSVP_CONTACT);
    }

    #[test]
    fn rsvp_override_without_digits_ignored() {
        let config = InviteConfig::default().with_rsvp_override(Some("abc"));
        assert_eq!(config.rsvp_contact, DEFAULT_RSVP_CONTACT);

        let config = InviteConfig::default().with_rsvp_override(Some("+503 7000-1111"));
        assert_eq!(config.rsvp_contact, "+503 7000-1111");
    }

    #[test]
    fn contact_without_digits_rejected() {
        let json = r#"{ "rsvp_contact": "abc" }"#;
        assert!(matches!(InviteConfig::from_json(json), Err(InviteError::Invalid(_))));
    }

    #[test]
    fn event_capacity_too_small_rejected() {
        let json = r#"{ "max_events": 0 }"#;
        assert!(matches!(InviteConfig::from_json(json), Err(InviteError::Invalid(_))));

        let json = format!(r#"{{ "max_events": {} }}"#, MIN_EVENT_CAPACITY);
        assert_eq!(InviteConfig::from_json(&json).unwrap().max_events, MIN_EVENT_CAPACITY);
    }
}
