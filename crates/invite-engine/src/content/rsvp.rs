//! RSVP deep links: a messaging URL pre-filled with a per-guest message.

use crate::assets::manifest::{Couple, RsvpDescriptor};
use crate::core::guest::GuestIdentity;

/// Contact handle used when no override is configured.
pub const DEFAULT_RSVP_CONTACT: &str = "50312345678";

const MESSAGING_BASE: &str = "https://wa.me/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAnswer {
    Attending,
    Declining,
}

impl RsvpAnswer {
    pub fn label(self) -> &'static str {
        match self {
            RsvpAnswer::Attending => "SÍ ASISTIRÉ",
            RsvpAnswer::Declining => "NO PODRÉ ASISTIR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpLink {
    pub answer: RsvpAnswer,
    pub label: &'static str,
    pub message: String,
    pub href: String,
}

/// Substitute the guest into a template in one left-to-right pass. Inserted
/// values are never rescanned, so a name containing `{pareja}` stays literal.
/// Unknown or unterminated placeholders are copied through.
pub fn fill_template(template: &str, guest: &GuestIdentity, couple: &Couple) -> String {
    let mut out = String::with_capacity(template.len() + guest.name.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            rest = tail;
            break;
        };
        match &tail[1..end] {
            "nombres" => out.push_str(&guest.name),
            "puestos" => out.push_str(&guest.seat_label()),
            "pareja" => out.push_str(&couple.display()),
            _ => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

pub fn build_link(
    answer: RsvpAnswer,
    contact: &str,
    rsvp: &RsvpDescriptor,
    guest: &GuestIdentity,
    couple: &Couple,
) -> RsvpLink {
    let template = match answer {
        RsvpAnswer::Attending => &rsvp.attending_template,
        RsvpAnswer::Declining => &rsvp.declining_template,
    };
    let message = fill_template(template, guest, couple);
    let href = format!(
        "{}{}?text={}",
        MESSAGING_BASE,
        sanitize_contact(contact),
        encode_uri_component(&message)
    );
    RsvpLink {
        answer,
        label: answer.label(),
        message,
        href,
    }
}

/// Keep only the digits of a phone handle ("+503 1234-5678" → "50312345678").
pub fn sanitize_contact(contact: &str) -> String {
    contact.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode like JavaScript's `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped as UTF-8 bytes.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for &b in input.as_bytes() {
        let keep = b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if keep {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX_UPPER[(b >> 4) as usize] as char);
            out.push(HEX_UPPER[(b & 0xF) as usize] as char);
        }
    }
    out
}

const HEX_UPPER: [u8; 16] = *b"0123456789ABCDEF";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::ContentManifest;
    use crate::core::guest::percent_decode;

    fn guest(name: &str, seats: u32) -> GuestIdentity {
        GuestIdentity { name: name.into(), seats }
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("¡Hola!"), "%C2%A1Hola!");
        assert_eq!(encode_uri_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_uri_component("(ok)*~'"), "(ok)*~'");
    }

    #[test]
    fn attending_message_has_guest_and_seats() {
        let m = ContentManifest::default();
        let link = build_link(
            RsvpAnswer::Attending,
            DEFAULT_RSVP_CONTACT,
            &m.rsvp,
            &guest("Juan Pérez", 2),
            &m.couple,
        );
        assert!(link.href.starts_with("https://wa.me/50312345678?text="));
        assert!(link.message.contains("Juan Pérez"));
        assert!(link.message.contains("2 puestos"));
        assert!(link.message.contains("Adriana & Saúl"));

        let encoded = link.href.split_once("?text=").unwrap().1;
        assert!(!encoded.contains(' '));
        assert_eq!(percent_decode(encoded), link.message);
    }

    #[test]
    fn declining_message() {
        let m = ContentManifest::default();
        let link = build_link(
            RsvpAnswer::Declining,
            "+503 7777-0000",
            &m.rsvp,
            &guest("Ana", 1),
            &m.couple,
        );
        assert!(link.href.starts_with("https://wa.me/50377770000?text="));
        assert!(link.message.contains("no podré asistir"));
        assert_eq!(link.label, "NO PODRÉ ASISTIR");
    }

    #[test]
    fn inserted_name_is_not_substituted_again() {
        let couple = Couple { first: "Adriana".into(), second: "Saúl".into() };
        let g = GuestIdentity::from_query("nombres=%7Bpareja%7D+%7Bpuestos%7D");
        let text = fill_template("Hola {nombres}, {puestos}", &g, &couple);
        assert_eq!(text, "Hola {pareja} {puestos}, 1 puesto");
    }

    #[test]
    fn unknown_and_unterminated_placeholders_kept() {
        let couple = Couple { first: "A".into(), second: "B".into() };
        let text = fill_template("{otro} {pareja} {nombres", &guest("Ana", 2), &couple);
        assert_eq!(text, "{otro} A & B {nombres");
    }

    #[test]
    fn singular_seat_in_template() {
        let couple = Couple { first: "A".into(), second: "B".into() };
        let text = fill_template("{nombres}: {puestos}", &guest("Ana", 1), &couple);
        assert_eq!(text, "Ana: 1 puesto");
    }
}
