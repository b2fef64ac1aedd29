//! Terminal colors for each severity.

use std::collections::HashMap;
use std::sync::LazyLock;

use colored::Color;

/// Used for severity names missing from the palette.
pub const DEFAULT_COLOR: Color = Color::White;

const PALETTE: [(&str, &str); 6] = [
    ("DEBUG", "#3ACEFF"),    // sky blue
    ("INFO", "#A1F7FF"),     // light blue
    ("SUCCESS", "#69FE69"),  // bright green
    ("WARNING", "#FDF32F"),  // yellow
    ("ERROR", "#F61C1C"),    // red
    ("CRITICAL", "#FF6EFF"), // magenta
];

const CALL_SITE_HEX: &str = "#FF9500";

static COLORS: LazyLock<HashMap<&'static str, Color>> = LazyLock::new(|| {
    PALETTE
        .iter()
        .map(|&(name, hex)| {
            let color = hex_to_color(hex).expect("palette entries are valid hex colors");
            (name, color)
        })
        .collect()
});

static CALL_SITE_COLOR: LazyLock<Color> =
    LazyLock::new(|| hex_to_color(CALL_SITE_HEX).expect("call-site color is a valid hex color"));

/// Parse `#RRGGBB` (leading `#` optional) into a 24-bit color.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Color for a severity name, or [`DEFAULT_COLOR`] if unknown.
pub fn color_for(level_name: &str) -> Color {
    COLORS.get(level_name).copied().unwrap_or(DEFAULT_COLOR)
}

/// Color of the `[file:line -> function]` block.
pub fn call_site_color() -> Color {
    *CALL_SITE_COLOR
}

/// Emit escapes even when stdout is not a terminal.
pub fn force_ansi() {
    colored::control::set_override(true);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use colored::Colorize;

    use super::*;

    #[test]
    fn converts_hex_triples() {
        assert_eq!(
            hex_to_color("#69FE69"),
            Some(Color::TrueColor { r: 105, g: 254, b: 105 })
        );
        assert_eq!(hex_to_color("000000"), Some(Color::TrueColor { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(hex_to_color("#12345"), None);
        assert_eq!(hex_to_color("#GG0000"), None);
        assert_eq!(hex_to_color("#ééé"), None);
        assert_eq!(hex_to_color("#+1+1+1"), None);
    }

    #[test]
    fn renders_exact_truecolor_escapes() {
        force_ansi();
        assert_eq!(
            "ok".color(color_for("SUCCESS")).to_string(),
            "\x1b[38;2;105;254;105mok\x1b[0m"
        );
        assert_eq!(
            "x".color(call_site_color()).to_string(),
            "\x1b[38;2;255;149;0mx\x1b[0m"
        );
        assert_eq!("?".color(DEFAULT_COLOR).to_string(), "\x1b[37m?\x1b[0m");
    }

    #[test]
    fn every_supported_level_has_a_distinct_color() {
        let names = ["DEBUG", "INFO", "SUCCESS", "WARNING", "ERROR", "CRITICAL"];
        let colors: HashSet<String> = names
            .iter()
            .map(|name| color_for(name).to_fg_str().into_owned())
            .collect();
        assert_eq!(colors.len(), names.len());
        for code in colors {
            assert!(code.starts_with("38;2;"), "{code}");
        }
    }

    #[test]
    fn unknown_level_uses_default_color() {
        assert_eq!(color_for("Level 5"), DEFAULT_COLOR);
        assert_eq!(color_for("info"), DEFAULT_COLOR);
    }
}
