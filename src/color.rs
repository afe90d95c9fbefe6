//! Hex color validation for PWA theme colors
//!
//! Accepts `RGB` and `RRGGBB`, with or without a leading `#`.

use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3 or 6 hex chars, excluding '#')
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Validate a hex color and return it lowercased with a leading `#`.
///
/// The short form is kept short: `#FFF` becomes `#fff`, not `#ffffff`.
pub fn normalize_hex_color(s: &str) -> Result<String, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        3 | 6 => Ok(format!("#{}", hex.to_ascii_lowercase())),
        len => Err(ColorError::InvalidLength(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_six_digit() {
        assert_eq!(normalize_hex_color("#FF0000").unwrap(), "#ff0000");
        assert_eq!(normalize_hex_color("00ff00").unwrap(), "#00ff00");
    }

    #[test]
    fn test_normalize_three_digit() {
        assert_eq!(normalize_hex_color("#FFF").unwrap(), "#fff");
        assert_eq!(normalize_hex_color("abc").unwrap(), "#abc");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_hex_color("  #123456 ").unwrap(), "#123456");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_hex_color(""), Err(ColorError::Empty));
        assert_eq!(normalize_hex_color("   "), Err(ColorError::Empty));
    }

    #[test]
    fn test_hash_only() {
        assert_eq!(normalize_hex_color("#"), Err(ColorError::InvalidLength(0)));
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(normalize_hex_color("#ff00"), Err(ColorError::InvalidLength(4)));
        // 8-digit colors with alpha are not accepted for theme colors
        assert_eq!(normalize_hex_color("#ff0000ff"), Err(ColorError::InvalidLength(8)));
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(normalize_hex_color("#gg0000"), Err(ColorError::InvalidHex('g')));
        assert_eq!(normalize_hex_color("##fff"), Err(ColorError::InvalidHex('#')));
    }
}
