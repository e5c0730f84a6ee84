//! Validation helpers and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Validate a font family name (non-blank)
pub fn validate_font_family(family: &str) -> Result<(), ValidationError> {
    if family.trim().is_empty() {
        return Err(ValidationError::new("empty_font_family"));
    }
    Ok(())
}

/// Split a `#RRGGBB` string into its channels.
///
/// Returns `None` for anything [`HEX_COLOR_REGEX`] would reject.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#bfbf00"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex_color("#00ff7f"), Some((0, 255, 127)));

        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#ZZ0000"), None);
        assert_eq!(parse_hex_color("#FF00"), None);
    }

    #[test]
    fn test_validate_font_family() {
        assert!(validate_font_family("sans-serif").is_ok());
        assert!(validate_font_family("   ").is_err());
    }
}
