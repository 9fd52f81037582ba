//! Invitation body, shown once the reveal hands over.
//!
//! A pure function of the guest and the static manifest: no state, no timers.

pub mod html;
pub mod rsvp;

use crate::assets::manifest::{
    Closing, ContentManifest, Couple, DressCode, EventDate, GalleryImage, GiftDescriptor,
    ItineraryItem, Venue,
};
use crate::core::guest::GuestIdentity;
use rsvp::{build_link, RsvpAnswer, RsvpLink};

pub use html::render_html;

/// Sections in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Hero {
        couple: Couple,
        date: EventDate,
        photo: Option<String>,
    },
    Ceremony(Venue),
    Reception(Venue),
    DressCode(DressCode),
    Itinerary(Vec<ItineraryItem>),
    Gallery(Vec<GalleryImage>),
    Rsvp {
        deadline: String,
        seat_label: String,
        attending: RsvpLink,
        declining: RsvpLink,
    },
    GiftRegistry(Vec<GiftDescriptor>),
    Closing(Closing),
}

impl Section {
    /// Anchor id used in the rendered page.
    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Hero { .. } => "inicio",
            Section::Ceremony(_) => "ceremonia",
            Section::Reception(_) => "recepcion",
            Section::DressCode(_) => "vestimenta",
            Section::Itinerary(_) => "itinerario",
            Section::Gallery(_) => "galeria",
            Section::Rsvp { .. } => "confirmacion",
            Section::GiftRegistry(_) => "regalos",
            Section::Closing(_) => "despedida",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvitationContent {
    pub guest: GuestIdentity,
    pub sections: Vec<Section>,
    pub audio_url: String,
}

impl InvitationContent {
    pub fn build(guest: &GuestIdentity, manifest: &ContentManifest, rsvp_contact: &str) -> Self {
        let m = manifest;
        let link = |answer| build_link(answer, rsvp_contact, &m.rsvp, guest, &m.couple);

        let mut sections = vec![
            Section::Hero {
                couple: m.couple.clone(),
                date: m.date.clone(),
                photo: m.hero_photo.clone(),
            },
            Section::Ceremony(m.ceremony.clone()),
            Section::Reception(m.reception.clone()),
            Section::DressCode(m.dress_code.clone()),
        ];
        if !m.itinerary.is_empty() {
            sections.push(Section::Itinerary(m.itinerary.clone()));
        }
        if !m.gallery.is_empty() {
            sections.push(Section::Gallery(m.gallery.clone()));
        }
        sections.push(Section::Rsvp {
            deadline: m.rsvp.deadline.clone(),
            seat_label: guest.seat_label(),
            attending: link(RsvpAnswer::Attending),
            declining: link(RsvpAnswer::Declining),
        });
        if !m.gifts.is_empty() {
            sections.push(Section::GiftRegistry(m.gifts.clone()));
        }
        sections.push(Section::Closing(m.closing.clone()));

        Self {
            guest: guest.clone(),
            sections,
            audio_url: m.audio_url.clone(),
        }
    }

    pub fn rsvp_links(&self) -> Option<(&RsvpLink, &RsvpLink)> {
        self.sections.iter().find_map(|s| match s {
            Section::Rsvp { attending, declining, .. } => Some((attending, declining)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvp::DEFAULT_RSVP_CONTACT;

    #[test]
    fn default_sections_in_order() {
        let guest = GuestIdentity::default();
        let content =
            InvitationContent::build(&guest, &ContentManifest::default(), DEFAULT_RSVP_CONTACT);
        let anchors: Vec<_> = content.sections.iter().map(Section::anchor).collect();
        assert_eq!(
            anchors,
            vec![
                "inicio",
                "ceremonia",
                "recepcion",
                "vestimenta",
                "itinerario",
                "galeria",
                "confirmacion",
                "regalos",
                "despedida",
            ]
        );
    }

    #[test]
    fn empty_lists_drop_sections() {
        let manifest = ContentManifest {
            itinerary: vec![],
            gallery: vec![],
            gifts: vec![],
            ..ContentManifest::default()
        };
        let content =
            InvitationContent::build(&GuestIdentity::default(), &manifest, DEFAULT_RSVP_CONTACT);
        assert_eq!(content.sections.len(), 6);
    }

    #[test]
    fn rsvp_is_personalized() {
        let guest = GuestIdentity { name: "Ana".into(), seats: 3 };
        let content = InvitationContent::build(&guest, &ContentManifest::default(), "123");
        let (yes, no) = content.rsvp_links().unwrap();
        assert_eq!(yes.answer, RsvpAnswer::Attending);
        assert_eq!(no.answer, RsvpAnswer::Declining);
        assert!(yes.href.starts_with("https://wa.me/123?text="));
        assert!(yes.message.contains("3 puestos"));
    }
}
