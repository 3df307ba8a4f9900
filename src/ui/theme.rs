//! Colour palettes and ANSI escape sequence generation.
//!
//! Two palettes ship embedded in the binary, `light` and `dark`, selected by
//! the persisted [`ThemePreference`]. Palettes are plain TOML:
//!
//! ```toml
//! name = "dark"
//!
//! [colors]
//! header_fg = "#e6e6e6"
//! selection_fg = "#101418"
//! selection_bg = "#7aa2f7"
//! text_normal = "#d0d0d0"
//! text_dim = "#6b7280"
//! border = "#3b4252"
//! search_bar_border = "#7aa2f7"
//! match_highlight_fg = "#101418"
//! match_highlight_bg = "#e0af68"
//! empty_state_fg = "#7aa2f7"
//! error_fg = "#f7768e"
//! read_fg = "#5c6370"
//! star_fg = "#e0af68"
//! active_filter_fg = "#9ece6a"
//! ```

use crate::domain::error::{NewsdeskError, Result};
use crate::storage::ThemePreference;
use serde::{Deserialize, Serialize};

/// A colour palette.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Palette name, `light` or `dark`.
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colours (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, dates, disabled pagination arrows.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Fetch failure messages.
    pub error_fg: String,

    /// Titles of items marked read.
    pub read_fg: String,
    /// Star badge.
    pub star_fg: String,
    /// Filter bar values that restrict the list.
    pub active_filter_fg: String,
}

impl Theme {
    /// Loads a built-in palette by name.
    ///
    /// # Errors
    ///
    /// Returns [`NewsdeskError::Theme`] for an unknown name or a palette that
    /// fails to parse.
    ///
    /// # Example
    ///
    /// ```
    /// use newsdesk::ui::Theme;
    ///
    /// let theme = Theme::from_name("dark").unwrap();
    /// assert_eq!(theme.name, "dark");
    /// assert!(Theme::from_name("solarized").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return Err(NewsdeskError::Theme(format!("unknown theme {name:?}"))),
        };

        toml::from_str(toml_str).map_err(|e| NewsdeskError::Theme(format!("failed to parse {name} theme: {e}")))
    }

    /// Loads the palette matching a stored preference.
    ///
    /// # Errors
    ///
    /// See [`Theme::from_name`].
    pub fn from_preference(preference: ThemePreference) -> Result<Self> {
        Self::from_name(preference.theme_name())
    }

    /// Converts a hex colour to RGB. Malformed input gives white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The light palette.
    ///
    /// # Panics
    ///
    /// Panics if the embedded light palette fails to parse, which the unit
    /// tests rule out.
    fn default() -> Self {
        Self::from_name("light").expect("embedded light theme should always parse")
    }
}
