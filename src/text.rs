//! Text Helpers
//!
//! Name formatting and accent-insensitive search normalization.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const YES: &str = "Sí";
pub const NO: &str = "No";

/// Strip accents and lower-case, for search comparisons
pub fn normalize_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn capitalize_words(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// "Nombre Apellido" with per-word capitalization
pub fn full_name(first_name: &str, last_name: &str) -> String {
    let joined = format!("{} {}", first_name.trim(), last_name.trim());
    capitalize_words(joined.trim())
}

pub fn yes_no(value: bool) -> &'static str {
    if value { YES } else { NO }
}

/// Treat blank optional text as absent
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize_text("José María"), "jose maria");
        assert_eq!(normalize_text("ÑANDÚ"), "nandu");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("ana  maría de LA torre"), "Ana María De La Torre");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_full_name_without_last_name() {
        assert_eq!(full_name("bob", ""), "Bob");
        assert_eq!(full_name(" ana ", "pérez"), "Ana Pérez");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
