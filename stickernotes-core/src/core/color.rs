//! Note color palette and chrome color derivation.
//!
//! A note's header bar and buttons ("chrome") are always rendered in a dark
//! variant of the body color, derived by [`darken`]. The variant is a pure
//! function of the body color and is recomputed on every color change; it is
//! never persisted.

use crate::{Result, StickernotesError};

/// The fixed palette new notes pick their color from.
///
/// The first entry is also the fallback for saved records with no color.
pub const PALETTE: [&str; 7] = [
    "#FFEB3B", "#FF9800", "#4CAF50", "#2196F3", "#E91E63", "#9C27B0", "#00BCD4",
];

/// How much each channel is reduced when deriving the chrome color.
const DARKEN_STEP: u8 = 40;

/// Parses a `#rrggbb` string into its three 8-bit channels.
///
/// Accepts upper- and lowercase hex digits. Anything that is not exactly a
/// `#` followed by six hex digits is rejected.
///
/// # Errors
///
/// Returns [`StickernotesError::InvalidColor`] for malformed input.
pub fn parse_hex(color: &str) -> Result<(u8, u8, u8)> {
    let digits = color
        .strip_prefix('#')
        .filter(|d| d.len() == 6)
        .ok_or_else(|| StickernotesError::InvalidColor(color.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| StickernotesError::InvalidColor(color.to_string()))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Derives the dark chrome variant of `color`.
///
/// Each channel is reduced by 40, saturating at 0, and the result is
/// re-encoded as lowercase `#rrggbb`.
///
/// # Errors
///
/// Returns [`StickernotesError::InvalidColor`] if `color` is not a valid
/// `#rrggbb` string.
pub fn darken(color: &str) -> Result<String> {
    let (r, g, b) = parse_hex(color)?;
    Ok(format!(
        "#{:02x}{:02x}{:02x}",
        r.saturating_sub(DARKEN_STEP),
        g.saturating_sub(DARKEN_STEP),
        b.saturating_sub(DARKEN_STEP)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_white() {
        assert_eq!(darken("#FFFFFF").unwrap(), "#d7d7d7");
    }

    #[test]
    fn test_darken_black_floors_at_zero() {
        assert_eq!(darken("#000000").unwrap(), "#000000");
    }

    #[test]
    fn test_darken_palette_yellow() {
        assert_eq!(darken("#FFEB3B").unwrap(), "#d7c313");
    }

    #[test]
    fn test_darken_is_case_insensitive() {
        assert_eq!(darken("#ffeb3b").unwrap(), darken("#FFEB3B").unwrap());
    }

    #[test]
    fn test_parse_hex_rejects_malformed_input() {
        for bad in ["", "#fff", "FFEB3B", "#ggeb3b", "#FFEB3B00"] {
            assert!(parse_hex(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_palette_entries_are_valid() {
        for color in PALETTE {
            parse_hex(color).unwrap();
            darken(color).unwrap();
        }
    }
}
