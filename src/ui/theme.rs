//! Color themes and ANSI escape sequences.
//!
//! Themes are TOML files. Four Catppuccin flavours are built in; a custom file
//! can be given with the `theme_file` option.
//!
//! # TOML Format
//!
//! ```toml
//! name = "gruvbox-dark"
//!
//! [colors]
//! header_fg = "#fbf1c7"
//! header_bg = "#3c3836"      # optional
//! selection_fg = "#282828"
//! selection_bg = "#d79921"
//! text_normal = "#ebdbb2"
//! text_dim = "#928374"
//! border = "#504945"
//! prompt_border = "#d79921"
//! match_highlight_fg = "#282828"
//! match_highlight_bg = "#b8bb26"
//! empty_state_fg = "#83a598"
//! favorite_fg = "#fabd2f"
//! error_fg = "#fb4934"
//! ```

use crate::domain::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const ESC: &str = "\x1b";

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles and secondary columns.
    pub text_dim: String,

    pub border: String,
    /// Border and label of the search / year / genre prompt.
    pub prompt_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Favorite star and the logged-in user.
    pub favorite_fg: String,

    /// Failed-request markers and warnings.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// ```
    /// use marquee::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(source).ok()
    }

    /// Reads a user theme.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |what: &str, e: &dyn std::fmt::Display| {
            MarqueeError::Theme(format!("cannot {what} {}: {e}", path.display()))
        };
        let raw = fs::read_to_string(path).map_err(|e| invalid("read", &e))?;
        toml::from_str(&raw).map_err(|e| invalid("parse", &e))
    }

    /// Parses `#rrggbb` (the `#` is optional).
    fn parse_hex(hex: &str) -> Option<[u8; 3]> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(rgb)
    }

    /// SGR truecolor escape; `layer` is 38 for foreground, 48 for background.
    /// Malformed colors render as white.
    fn truecolor(layer: u8, hex: &str) -> String {
        let [r, g, b] = Self::parse_hex(hex).unwrap_or([255, 255, 255]);
        format!("{ESC}[{layer};2;{r};{g};{b}m")
    }

    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::truecolor(38, hex)
    }

    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\x1b[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\x1b[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\x1b[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("embedded default theme is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn all_builtin_themes_parse() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            assert_eq!(Theme::from_name(name).map(|t| t.name), Some(name.to_string()));
        }
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#12"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#ff0000"), "\u{1b}[48;2;255;0;0m");
    }

    #[test]
    fn custom_theme_file_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, MarqueeError::Theme(_)));
    }
}
