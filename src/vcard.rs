//! vCard Generation
//!
//! Contact cards for QR codes, scanned from the contacts page.

use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::QrCode;

use crate::models::Contact;

/// Escape text values (RFC 6350 §3.4)
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn field(name: &str, value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("{}:{}", name, escape(v)))
}

/// Contact as vCard 3.0 text; empty fields are left out
pub fn to_vcard(contact: &Contact) -> String {
    let note = match (contact.role.as_deref(), contact.notes.as_deref()) {
        (Some(role), Some(notes)) if !role.trim().is_empty() && !notes.trim().is_empty() => {
            Some(format!("{} - {}", role.trim(), notes.trim()))
        }
        (Some(role), _) if !role.trim().is_empty() => Some(role.to_string()),
        (_, notes) => notes.map(str::to_string),
    };

    let lines: Vec<String> = ["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()]
        .into_iter()
        .chain(field("FN", Some(&contact.name)))
        .chain(field("TEL", contact.phone.as_deref()))
        .chain(field("EMAIL", contact.email.as_deref()))
        .chain(field("NOTE", note.as_deref()))
        .chain(std::iter::once("END:VCARD".to_string()))
        .collect();
    lines.join("\n")
}

/// Render text as an SVG QR code
pub fn qr_svg(text: &str) -> Result<String, QrError> {
    let code = QrCode::new(text.as_bytes())?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_contact() -> Contact {
        Contact {
            id: 1,
            name: "Lucía Gómez".to_string(),
            role: Some("Fotógrafa".to_string()),
            phone: Some("+34 600 000 000".to_string()),
            email: Some("lucia@example.com".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_full_card() {
        let card = to_vcard(&make_contact());
        assert_eq!(
            card,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Lucía Gómez\nTEL:+34 600 000 000\nEMAIL:lucia@example.com\nNOTE:Fotógrafa\nEND:VCARD"
        );
    }

    #[test]
    fn test_empty_fields_omitted() {
        let contact = Contact { id: 2, name: "Catering".to_string(), phone: Some("  ".to_string()), ..Default::default() };
        assert_eq!(to_vcard(&contact), "BEGIN:VCARD\nVERSION:3.0\nFN:Catering\nEND:VCARD");
    }

    #[test]
    fn test_note_combines_role_and_notes_with_escaping() {
        let mut contact = make_contact();
        contact.notes = Some("Llegar 9:00; traer flash,\nbaterías".to_string());
        let card = to_vcard(&contact);
        assert!(card.contains("NOTE:Fotógrafa - Llegar 9:00\\; traer flash\\,\\nbaterías"));
    }

    #[test]
    fn test_qr_svg() {
        let svg = qr_svg(&to_vcard(&make_contact())).unwrap();
        assert!(svg.contains("<svg"));
    }
}
