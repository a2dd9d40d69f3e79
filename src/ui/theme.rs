//! Color theme and ANSI escape sequence generation.
//!
//! A menu has eleven colorable elements. Colors are kept as the hex strings the
//! user supplied; only the drawing code interprets them, so a malformed value is
//! stored as-is and drawn as white.
//!
//! # TOML Format
//!
//! ```toml
//! name = "dusk"
//!
//! [colors]
//! background = "#1e1e2e"
//! title_fg = "#f5c2e7"
//! highlighted_bg = "#f5c2e7"
//! highlighted_fg = "#1e1e2e"
//! ```
//!
//! Colors missing from the file keep their defaults.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::ui::theme::{ColorElement, Theme};
//!
//! let theme = Theme::default();
//! assert_eq!(theme.colors.get(ColorElement::TitleFg), "#D81860");
//! print!("{}text{}", Theme::fg(theme.colors.get(ColorElement::ItemFg)), Theme::reset());
//! ```

use crate::domain::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_BG: &str = "#121212";
const DEFAULT_ACCENT: &str = "#D81860";
const DEFAULT_TEXT: &str = "#CACACA";

/// Named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Color for every element.
    #[serde(default)]
    pub colors: ThemeColors,
}

fn default_name() -> String {
    "default".to_string()
}

/// Colorable elements of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorElement {
    /// Everything not covered by another element.
    Background,
    /// Title background.
    TitleBg,
    /// Title text.
    TitleFg,
    /// Filter line background.
    FilterBg,
    /// Filter text.
    FilterFg,
    /// Normal row background.
    ItemBg,
    /// Normal row text.
    ItemFg,
    /// Highlighted row background.
    HighlightedBg,
    /// Highlighted row text.
    HighlightedFg,
    /// Selected row background.
    SelectedBg,
    /// Selected row text.
    SelectedFg,
}

impl ColorElement {
    /// Every element, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Background,
        Self::TitleBg,
        Self::TitleFg,
        Self::FilterBg,
        Self::FilterFg,
        Self::ItemBg,
        Self::ItemFg,
        Self::HighlightedBg,
        Self::HighlightedFg,
        Self::SelectedBg,
        Self::SelectedFg,
    ];

    /// Name used in theme files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::TitleBg => "title_bg",
            Self::TitleFg => "title_fg",
            Self::FilterBg => "filter_bg",
            Self::FilterFg => "filter_fg",
            Self::ItemBg => "item_bg",
            Self::ItemFg => "item_fg",
            Self::HighlightedBg => "highlighted_bg",
            Self::HighlightedFg => "highlighted_fg",
            Self::SelectedBg => "selected_bg",
            Self::SelectedFg => "selected_fg",
        }
    }

    /// Parses an element name. Dashes are accepted in place of underscores.
    ///
    /// ```
    /// use pickmenu::ui::theme::ColorElement;
    ///
    /// assert_eq!(ColorElement::from_name("title-fg"), Some(ColorElement::TitleFg));
    /// assert_eq!(ColorElement::from_name("border"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('-', "_").to_ascii_lowercase();
        Self::ALL.into_iter().find(|element| element.name() == normalized)
    }
}

/// Hex colors for every element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: String,
    pub title_bg: String,
    pub title_fg: String,
    pub filter_bg: String,
    pub filter_fg: String,
    pub item_bg: String,
    pub item_fg: String,
    pub highlighted_bg: String,
    pub highlighted_fg: String,
    pub selected_bg: String,
    pub selected_fg: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: DEFAULT_BG.to_string(),
            title_bg: DEFAULT_BG.to_string(),
            title_fg: DEFAULT_ACCENT.to_string(),
            filter_bg: DEFAULT_BG.to_string(),
            filter_fg: DEFAULT_TEXT.to_string(),
            item_bg: DEFAULT_BG.to_string(),
            item_fg: DEFAULT_TEXT.to_string(),
            highlighted_bg: DEFAULT_BG.to_string(),
            highlighted_fg: DEFAULT_ACCENT.to_string(),
            selected_bg: DEFAULT_BG.to_string(),
            selected_fg: DEFAULT_ACCENT.to_string(),
        }
    }
}

impl ThemeColors {
    /// Hex string of `element`.
    #[must_use]
    pub fn get(&self, element: ColorElement) -> &str {
        match element {
            ColorElement::Background => &self.background,
            ColorElement::TitleBg => &self.title_bg,
            ColorElement::TitleFg => &self.title_fg,
            ColorElement::FilterBg => &self.filter_bg,
            ColorElement::FilterFg => &self.filter_fg,
            ColorElement::ItemBg => &self.item_bg,
            ColorElement::ItemFg => &self.item_fg,
            ColorElement::HighlightedBg => &self.highlighted_bg,
            ColorElement::HighlightedFg => &self.highlighted_fg,
            ColorElement::SelectedBg => &self.selected_bg,
            ColorElement::SelectedFg => &self.selected_fg,
        }
    }

    /// Replaces the hex string of `element`.
    pub fn set(&mut self, element: ColorElement, hex: String) {
        let slot = match element {
            ColorElement::Background => &mut self.background,
            ColorElement::TitleBg => &mut self.title_bg,
            ColorElement::TitleFg => &mut self.title_fg,
            ColorElement::FilterBg => &mut self.filter_bg,
            ColorElement::FilterFg => &mut self.filter_fg,
            ColorElement::ItemBg => &mut self.item_bg,
            ColorElement::ItemFg => &mut self.item_fg,
            ColorElement::HighlightedBg => &mut self.highlighted_bg,
            ColorElement::HighlightedFg => &mut self.highlighted_fg,
            ColorElement::SelectedBg => &mut self.selected_bg,
            ColorElement::SelectedFg => &mut self.selected_fg,
        };
        *slot = hex;
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: default_name(),
            colors: ThemeColors::default(),
        }
    }
}

impl Theme {
    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Theme`] if the file cannot be read or parsed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use pickmenu::ui::theme::Theme;
    ///
    /// let theme = Theme::from_file("/path/to/theme.toml")?;
    /// # Ok::<(), pickmenu::MenuError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| MenuError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MenuError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts `#RRGGBB` (or `#RRGGBBAA`, alpha ignored) to an RGB tuple.
    ///
    /// Returns white for anything else.
    #[must_use]
    pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => (r, g, b),
            _ => (255, 255, 255),
        }
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold escape.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// ANSI underline escape.
    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// ANSI reset escape. Clears every attribute.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}
