//! Guest lookup from the page's query string.
//!
//! Invitations are shared as links of the form
//! `?nombres=Juan+P%C3%A9rez&puestos=2`. Every malformed or missing value
//! degrades to a default; resolution never fails.

use serde::{Deserialize, Serialize};

/// Name shown when the link carries no usable `nombres`.
pub const DEFAULT_GUEST_NAME: &str = "Estimado Invitado";

/// Seats granted when `puestos` is missing or not a positive integer.
pub const DEFAULT_SEATS: u32 = 1;

pub const NAME_PARAM: &str = "nombres";
pub const SEATS_PARAM: &str = "puestos";

/// Who the invitation is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestIdentity {
    pub name: String,
    pub seats: u32,
}

impl Default for GuestIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_GUEST_NAME.to_string(),
            seats: DEFAULT_SEATS,
        }
    }
}

impl GuestIdentity {
    /// Resolve a guest from a raw query string (with or without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let name = query_param(query, NAME_PARAM);
        let seats = query_param(query, SEATS_PARAM);

        let identity = Self {
            name: resolve_name(name.as_deref()),
            seats: resolve_seats(seats.as_deref()),
        };
        log::debug!("guest resolved: {:?} ({} seats)", identity.name, identity.seats);
        identity
    }

    /// "1 puesto" or "N puestos".
    pub fn seat_label(&self) -> String {
        seat_label(self.seats)
    }
}

pub fn seat_label(seats: u32) -> String {
    if seats == 1 {
        "1 puesto".to_string()
    } else {
        format!("{} puestos", seats)
    }
}

fn resolve_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            log::debug!("no guest name in query, using fallback");
            DEFAULT_GUEST_NAME.to_string()
        }
    }
}

/// Lenient integer parse in the manner of a browser's `parseInt(s, 10)`:
/// leading whitespace, optional sign, then the leading run of digits.
fn resolve_seats(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_SEATS;
    };
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 || negative {
        return DEFAULT_SEATS;
    }

    let mut value: u32 = 0;
    for b in digits[..run].bytes() {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if value == 0 {
        DEFAULT_SEATS
    } else {
        value
    }
}

/// Look up the first value for `key`, form-decoded.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(k) == key).then(|| form_decode(v))
        })
}

/// `application/x-www-form-urlencoded` decoding: `+` becomes a space first,
/// then percent escapes are decoded.
pub fn form_decode(input: &str) -> String {
    percent_decode(&input.replace('+', " "))
}

/// Decode `%XX` escapes. Malformed escapes are kept as-is, invalid UTF-8 is
/// replaced lossily.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_uses_fallback() {
        assert_eq!(GuestIdentity::from_query("").name, DEFAULT_GUEST_NAME);
        assert_eq!(GuestIdentity::from_query("?puestos=3").name, DEFAULT_GUEST_NAME);
        assert_eq!(GuestIdentity::from_query("nombres=").name, DEFAULT_GUEST_NAME);
        assert_eq!(GuestIdentity::from_query("nombres=+++").name, DEFAULT_GUEST_NAME);
    }

    #[test]
    fn plus_is_space_before_decoding() {
        let g = GuestIdentity::from_query("?nombres=Juan+P%C3%A9rez");
        assert_eq!(g.name, "Juan Pérez");

        let g = GuestIdentity::from_query("nombres=Juan+Pérez");
        assert_eq!(g.name, "Juan Pérez");
    }

    #[test]
    fn encoded_plus_stays_literal() {
        let g = GuestIdentity::from_query("nombres=Ana%2BLuis");
        assert_eq!(g.name, "Ana+Luis");
    }

    #[test]
    fn seats_parsing() {
        assert_eq!(GuestIdentity::from_query("puestos=4").seats, 4);
        assert_eq!(GuestIdentity::from_query("puestos=-2").seats, 1);
        assert_eq!(GuestIdentity::from_query("puestos=abc").seats, 1);
        assert_eq!(GuestIdentity::from_query("puestos=0").seats, 1);
        assert_eq!(GuestIdentity::from_query("puestos=").seats, 1);
        assert_eq!(GuestIdentity::from_query("nombres=Ana").seats, 1);
    }

    #[test]
    fn seats_lenient_prefix() {
        assert_eq!(GuestIdentity::from_query("puestos=3+personas").seats, 3);
        assert_eq!(GuestIdentity::from_query("puestos=+5").seats, 5);
        assert_eq!(GuestIdentity::from_query("puestos=99999999999").seats, u32::MAX);
    }

    #[test]
    fn first_occurrence_wins() {
        let g = GuestIdentity::from_query("nombres=Ana&nombres=Luis&puestos=2&puestos=9");
        assert_eq!(g.name, "Ana");
        assert_eq!(g.seats, 2);
    }

    #[test]
    fn malformed_escapes_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%4"), "%4");
        assert_eq!(percent_decode("%41"), "A");
    }

    #[test]
    fn seat_label_singular_plural() {
        assert_eq!(seat_label(1), "1 puesto");
        assert_eq!(seat_label(2), "2 puestos");
        let g = GuestIdentity::from_query("puestos=4");
        assert_eq!(g.seat_label(), "4 puestos");
    }
}
