//! Named-color parsing (§4.2).

use crate::value::Color;

/// Canonical CSS-like named colors. Lookup is case-insensitive; unknown
/// names fall back to opaque white, per spec.
const NAMED_COLORS: &[(&str, u8, u8, u8)] = &[
    ("black", 0, 0, 0),
    ("white", 255, 255, 255),
    ("red", 255, 0, 0),
    ("green", 0, 128, 0),
    ("blue", 0, 0, 255),
    ("yellow", 255, 255, 0),
    ("cyan", 0, 255, 255),
    ("magenta", 255, 0, 255),
    ("gray", 128, 128, 128),
    ("grey", 128, 128, 128),
    ("orange", 255, 165, 0),
    ("purple", 128, 0, 128),
    ("pink", 255, 192, 203),
    ("brown", 165, 42, 42),
    ("navy", 0, 0, 128),
    ("teal", 0, 128, 128),
    ("lime", 0, 255, 0),
    ("maroon", 128, 0, 0),
    ("olive", 128, 128, 0),
    ("silver", 192, 192, 192),
    ("gold", 255, 215, 0),
    ("indigo", 75, 0, 130),
    ("violet", 238, 130, 238),
    ("coral", 255, 127, 80),
    ("salmon", 250, 128, 114),
    ("khaki", 240, 230, 140),
    ("crimson", 220, 20, 60),
    ("turquoise", 64, 224, 208),
    ("beige", 245, 245, 220),
    ("ivory", 255, 255, 240),
    ("lavender", 230, 230, 250),
    ("tan", 210, 180, 140),
    ("chocolate", 210, 105, 30),
    ("plum", 221, 160, 221),
    ("orchid", 218, 112, 214),
    ("skyblue", 135, 206, 235),
    ("slategray", 112, 128, 144),
    ("slategrey", 112, 128, 144),
];

/// Parse a canonical named color (case-insensitive).
///
/// `"transparent"` maps to `(0, 0, 0, 0)`; any other unrecognized name
/// defaults to opaque white, matching the spec's fallback behavior.
pub fn parse_named_color(name: &str) -> Color {
    if name.eq_ignore_ascii_case("transparent") {
        return Color::rgba(0, 0, 0, 0);
    }
    for &(candidate, r, g, b) in NAMED_COLORS {
        if name.eq_ignore_ascii_case(candidate) {
            return Color::rgb(r, g, b);
        }
    }
    Color::WHITE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_is_case_insensitive() {
        assert_eq!(parse_named_color("Red"), Color::rgb(255, 0, 0));
        assert_eq!(parse_named_color("BLUE"), Color::rgb(0, 0, 255));
    }

    #[test]
    fn transparent_is_zero_alpha() {
        assert_eq!(parse_named_color("transparent"), Color::rgba(0, 0, 0, 0));
    }

    #[test]
    fn unknown_defaults_to_white() {
        assert_eq!(parse_named_color("notacolor"), Color::WHITE);
    }
}
