use serde::{Deserialize, Serialize};

/// Static invitation content. Loaded from JSON by the host, or the built-in
/// default for Adriana & Saúl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentManifest {
    pub couple: Couple,
    pub date: EventDate,
    /// Vertical portrait shown in the hero. `None` renders the placeholder frame.
    pub hero_photo: Option<String>,
    pub ceremony: Venue,
    pub reception: Venue,
    pub dress_code: DressCode,
    pub itinerary: Vec<ItineraryItem>,
    pub gallery: Vec<GalleryImage>,
    pub rsvp: RsvpDescriptor,
    pub gifts: Vec<GiftDescriptor>,
    pub closing: Closing,
    /// Background music, looped.
    pub audio_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Couple {
    pub first: String,
    pub second: String,
}

impl Couple {
    /// "Adriana & Saúl"
    pub fn display(&self) -> String {
        format!("{} & {}", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDate {
    pub weekday: String,
    pub day_month: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub time: String,
    /// Directions deep link, opened in a new tab.
    pub maps_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DressCode {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub time: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// RSVP wording. Templates accept `{nombres}`, `{puestos}` and `{pareja}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpDescriptor {
    pub deadline: String,
    pub attending_template: String,
    pub declining_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftDescriptor {
    pub title: String,
    pub detail: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closing {
    pub title: String,
    pub message: String,
}

impl ContentManifest {
    /// Parse a manifest from a JSON string. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ContentManifest {
    fn default() -> Self {
        Self {
            couple: Couple {
                first: "Adriana".into(),
                second: "Saúl".into(),
            },
            date: EventDate {
                weekday: "SÁBADO".into(),
                day_month: "6 ENERO".into(),
                year: "2024".into(),
            },
            hero_photo: None,
            ceremony: Venue {
                name: "PARROQUIA CORAZÓN DE MARÍA".into(),
                address: "79 Av Sur # 200, San Salvador".into(),
                time: "4:00 P.M.".into(),
                maps_url: "https://maps.app.goo.gl/TjFLAWayQ4TDF7sU7".into(),
            },
            reception: Venue {
                name: "HACIENDA DE LOS MIRANDA".into(),
                address: "Final Calle las Rosas y, C. Antigua Ferrocarril".into(),
                time: "6:00 P.M.".into(),
                maps_url: "https://maps.app.goo.gl/fZefZ9VSBrvuArdu5".into(),
            },
            dress_code: DressCode {
                title: "FORMAL".into(),
                note: Some("Reservamos el color blanco para la novia".into()),
            },
            itinerary: vec![
                ItineraryItem { time: "4:00 P.M.".into(), label: "Ceremonia religiosa".into() },
                ItineraryItem { time: "6:00 P.M.".into(), label: "Recepción".into() },
                ItineraryItem { time: "7:30 P.M.".into(), label: "Cena".into() },
                ItineraryItem { time: "9:00 P.M.".into(), label: "Baile".into() },
            ],
            gallery: (1..=6)
                .map(|i| GalleryImage {
                    src: format!("/images/galeria-{}.jpg", i),
                    alt: format!("Foto {} de los novios", i),
                })
                .collect(),
            rsvp: RsvpDescriptor {
                deadline: "31 DE DICIEMBRE".into(),
                attending_template:
                    "¡Hola! Soy {nombres} y confirmo mi asistencia ({puestos}) a la boda de {pareja}."
                        .into(),
                declining_template:
                    "¡Hola! Soy {nombres}. Lamentablemente no podré asistir a la boda de {pareja}."
                        .into(),
            },
            gifts: vec![GiftDescriptor {
                title: "Lluvia de sobres".into(),
                detail: "Tu presencia es nuestro mejor regalo; si deseas obsequiarnos algo, habrá un buzón en la recepción.".into(),
                url: None,
            }],
            closing: Closing {
                title: "Con amor".into(),
                message: "Esperamos celebrar este día especial contigo".into(),
            },
            audio_url: "/audio/cancion.mp3".into(),
        }
    }
}
