use std::fmt::Write;

use super::{InvitationContent, Section};
use crate::assets::manifest::Venue;
use super::rsvp::RsvpLink;

/// Render the invitation body as an HTML fragment for the host to mount.
/// Every text and attribute value is escaped.
pub fn render_html(content: &InvitationContent) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<main class=\"invitation\">");
    for section in &content.sections {
        render_section(&mut out, &content.guest.name, section);
    }
    out.push_str("</main>");
    out
}

fn render_section(out: &mut String, guest_name: &str, section: &Section) {
    let anchor = section.anchor();
    match section {
        Section::Hero { couple, date, photo } => {
            open(out, anchor, "hero");
            match photo {
                Some(src) => {
                    let _ = write!(
                        out,
                        "<img class=\"hero__photo\" src=\"{}\" alt=\"Foto de los novios\">",
                        escape(src)
                    );
                }
                None => out.push_str("<div class=\"hero__photo hero__photo--placeholder\"></div>"),
            }
            let _ = write!(
                out,
                "<h1 class=\"hero__names\"><span>{}</span> <span class=\"amp\">&amp;</span> <span>{}</span></h1>",
                escape(&couple.first),
                escape(&couple.second)
            );
            let _ = write!(
                out,
                "<div class=\"hero__date\"><p>{}</p><p class=\"hero__day\">{}</p><p>{}</p></div>",
                escape(&date.weekday),
                escape(&date.day_month),
                escape(&date.year)
            );
        }
        Section::Ceremony(venue) => {
            open(out, anchor, "venue");
            render_venue(out, "Ceremonia", venue);
        }
        Section::Reception(venue) => {
            open(out, anchor, "venue");
            render_venue(out, "Recepción", venue);
        }
        Section::DressCode(code) => {
            open(out, anchor, "dress-code");
            out.push_str("<h2>Código de vestimenta</h2>");
            let _ = write!(out, "<h3>{}</h3>", escape(&code.title));
            if let Some(note) = &code.note {
                let _ = write!(out, "<p>{}</p>", escape(note));
            }
        }
        Section::Itinerary(items) => {
            open(out, anchor, "itinerary");
            out.push_str("<h2>Itinerario</h2><ol>");
            for item in items {
                let _ = write!(
                    out,
                    "<li><span class=\"itinerary__time\">{}</span> {}</li>",
                    escape(&item.time),
                    escape(&item.label)
                );
            }
            out.push_str("</ol>");
        }
        Section::Gallery(images) => {
            open(out, anchor, "gallery");
            out.push_str("<h2>Galería</h2><div class=\"gallery__grid\">");
            for img in images {
                let _ = write!(
                    out,
                    "<img loading=\"lazy\" src=\"{}\" alt=\"{}\">",
                    escape(&img.src),
                    escape(&img.alt)
                );
            }
            out.push_str("</div>");
        }
        Section::Rsvp { deadline, seat_label, attending, declining } => {
            open(out, anchor, "rsvp");
            out.push_str("<h2>Confirmación</h2>");
            let _ = write!(out, "<p class=\"rsvp__guest\">{}</p>", escape(guest_name));
            let _ = write!(
                out,
                "<p class=\"rsvp__seats\">Hemos reservado <strong>{}</strong> en tu honor</p>",
                escape(seat_label)
            );
            let _ = write!(
                out,
                "<p>APRECIAREMOS NOS DEJES SABER TU ASISTENCIA A MÁS TARDAR EL DÍA <strong>{}</strong></p>",
                escape(deadline)
            );
            render_rsvp_button(out, attending, "rsvp__yes");
            render_rsvp_button(out, declining, "rsvp__no");
        }
        Section::GiftRegistry(gifts) => {
            open(out, anchor, "gifts");
            out.push_str("<h2>Mesa de regalos</h2>");
            for gift in gifts {
                let _ = write!(
                    out,
                    "<div class=\"gift\"><h3>{}</h3><p>{}</p>",
                    escape(&gift.title),
                    escape(&gift.detail)
                );
                if let Some(url) = &gift.url {
                    external_link(out, url, "gift__link", "VER MESA");
                }
                out.push_str("</div>");
            }
        }
        Section::Closing(closing) => {
            let _ = write!(out, "<footer id=\"{}\" class=\"closing\">", anchor);
            let _ = write!(
                out,
                "<p class=\"closing__title\">{}</p><p>{}</p></footer>",
                escape(&closing.title),
                escape(&closing.message)
            );
            return;
        }
    }
    out.push_str("</section>");
}

fn open(out: &mut String, anchor: &str, class: &str) {
    let _ = write!(out, "<section id=\"{}\" class=\"{}\">", anchor, class);
}

fn render_venue(out: &mut String, title: &str, venue: &Venue) {
    let _ = write!(
        out,
        "<h2>{}</h2><h3>{}</h3><p>{}</p><p class=\"venue__time\">{}</p>",
        escape(title),
        escape(&venue.name),
        escape(&venue.address),
        escape(&venue.time)
    );
    external_link(out, &venue.maps_url, "venue__directions", "CÓMO LLEGAR");
}

fn render_rsvp_button(out: &mut String, link: &RsvpLink, class: &str) {
    external_link(out, &link.href, class, link.label);
}

fn external_link(out: &mut String, href: &str, class: &str, label: &str) {
    let _ = write!(
        out,
        "<a class=\"{}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        class,
        escape(href),
        escape(label)
    );
}

/// Escape text for both element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::manifest::ContentManifest;
    use crate::content::rsvp::DEFAULT_RSVP_CONTACT;
    use crate::core::guest::GuestIdentity;

    fn render_for(query: &str) -> String {
        let guest = GuestIdentity::from_query(query);
        let content =
            InvitationContent::build(&guest, &ContentManifest::default(), DEFAULT_RSVP_CONTACT);
        render_html(&content)
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn guest_name_cannot_inject_markup() {
        let html = render_for("nombres=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn guest_greeted_in_rsvp() {
        let html = render_for("nombres=Familia+L%C3%B3pez");
        assert!(html.contains("<p class=\"rsvp__guest\">Familia López</p>"));
    }

    #[test]
    fn seat_label_forms() {
        assert!(render_for("puestos=1").contains("<strong>1 puesto</strong>"));
        assert!(render_for("puestos=5").contains("<strong>5 puestos</strong>"));
    }

    #[test]
    fn links_open_in_new_tab() {
        let html = render_for("");
        assert!(html.contains("href=\"https://maps.app.goo.gl/TjFLAWayQ4TDF7sU7\""));
        assert!(html.contains("href=\"https://wa.me/50312345678?text="));
        assert_eq!(
            html.matches("target=\"_blank\"").count(),
            html.matches("rel=\"noopener noreferrer\"").count()
        );
    }

    #[test]
    fn every_section_rendered() {
        let html = render_for("");
        for id in ["inicio", "ceremonia", "recepcion", "galeria", "confirmacion", "despedida"] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
        assert!(html.starts_with("<main"));
        assert!(html.ends_with("</main>"));
    }
}
