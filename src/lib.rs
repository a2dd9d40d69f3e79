//! pickmenu: a filterable, keyboard-driven item menu.
//!
//! Give it a list of strings; the user types a filter, moves a highlight,
//! optionally marks several items, and commits a choice. The crate provides:
//! - A renderer-agnostic menu engine driven one key at a time
//! - Whitespace-tokenized substring filtering, case-sensitive or not
//! - Multi-selection, paging and wrap-around navigation
//! - A `crossterm` terminal renderer and a registry for custom renderers
//! - File-based OpenTelemetry tracing that never touches the terminal
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Binary (main.rs)                              │  ← dmenu-style CLI
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Menu engine
//! │  - Key state machine                                │
//! │  - Filter, editor, selection                        │
//! │  - View snapshot computation                        │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐       ┌───────────────────────┐
//! │ UI Layer (ui/)        │       │ Renderers (renderer/) │
//! │ - View snapshots      │ ◄──── │ - Renderer trait      │
//! │ - Themes              │       │ - Registry            │
//! │ - ANSI components     │       │ - Terminal renderer   │
//! └───────────────────────┘       └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - XDG paths (infrastructure/)                      │
//! │  - Error types (domain/error)                       │
//! │  - Item arena types (domain/item)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Menu state, key handling, filtering
//! - [`domain`]: Items, ids and errors
//! - [`infrastructure`]: Data and config locations
//! - [`renderer`]: Renderer contract, registry, terminal renderer
//! - [`ui`]: View snapshots, themes and ANSI drawing
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/pickmenu/config.toml
//! filter_mode = "case-insensitive"
//! lines = 10
//! wrap = true
//! title = "run:"
//! prefix = ">"
//! theme_file = "~/.config/pickmenu/dusk.toml"
//! trace_level = "pickmenu=debug"
//!
//! [colors]
//! highlighted_bg = "#D81860"
//! highlighted_fg = "#121212"
//! ```
//!
//! # Examples
//!
//! ## Driving the Engine Directly
//!
//! ```rust
//! use pickmenu::{Choice, Config, FilterMode, Key, RunResult};
//!
//! let config = Config {
//!     filter_mode: FilterMode::CaseInsensitive,
//!     ..Default::default()
//! };
//! let mut menu = pickmenu::initialize::<()>(&config)?;
//! for text in ["alpha", "beta", "gamma"] {
//!     menu.push_item(text)?;
//! }
//!
//! menu.advance(Key::Unicode, u32::from('G'))?;
//! let result = menu.advance(Key::Return, 0)?;
//!
//! let RunResult::Selected(Choice::Items(ids)) = result else { unreachable!() };
//! assert_eq!(menu.text_of(ids[0]), "gamma");
//! # Ok::<(), pickmenu::MenuError>(())
//! ```
//!
//! ## Running With a Renderer
//!
//! ```rust,no_run
//! use pickmenu::renderer::RendererRegistry;
//! use pickmenu::{Config, RunResult};
//!
//! let config = Config::default();
//! let mut menu = pickmenu::initialize::<()>(&config)?;
//! menu.push_item("one")?;
//!
//! let mut renderer = RendererRegistry::with_defaults().into_selected(None, config.renderer.as_deref())?;
//! if let RunResult::Selected(choice) = pickmenu::run(&mut menu, renderer.as_mut())? {
//!     println!("{choice:?}");
//! }
//! # Ok::<(), pickmenu::MenuError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Identity-Keyed Items
//!
//! Items live in a `slotmap` arena owned by the menu. The item list, the
//! filtered view and the selection store [`ItemId`]s, so two items with equal
//! text stay distinct and a removed item cannot be reached through a stale
//! reference.
//!
//! ## Immutable Snapshots
//!
//! Renderers receive an owned [`MenuView`](ui::MenuView) rather than a borrow
//! of the menu, keeping the engine free of drawing concerns.
//!
//! ## Recoverable Failures
//!
//! Storage growth goes through `try_reserve`, so running out of memory is
//! reported as [`MenuError::AllocationFailure`] with the menu unchanged.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod renderer;
pub mod ui;

pub use app::{filter, Choice, FilterMode, Key, Menu, RunResult, DEFAULT_FONT};
pub use domain::{Item, ItemId, MenuError, Result};
pub use renderer::{Priority, Renderer, RendererRegistry};
pub use ui::{ColorElement, Theme};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Settings applied to a menu by [`initialize`].
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Renderer to use when none is requested explicitly.
    pub renderer: Option<String>,

    /// `case-sensitive` (default) or `case-insensitive`.
    pub filter_mode: FilterMode,

    /// Wrap navigation around at the ends.
    pub wrap: bool,

    /// Vertical rows; 0 draws a single line.
    pub lines: u32,

    /// Title shown before the filter.
    pub title: Option<String>,

    /// Marker drawn before the highlighted row.
    pub prefix: Option<String>,

    /// Font description for renderers that use one. Default: `monospace 10`.
    pub font: Option<String>,

    /// Place the menu at the bottom of the screen.
    pub bottom: bool,

    /// Monitor index; 0 is the active monitor.
    pub monitor: u32,

    /// Ask the renderer to grab the keyboard.
    pub grab: bool,

    /// TOML theme file; `~` is expanded. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Per-element color overrides, applied after the theme.
    ///
    /// Keys are [`ColorElement`] names such as `highlighted_bg`.
    pub colors: BTreeMap<String, String>,

    /// `EnvFilter` directive for tracing, e.g. `debug` or `pickmenu=trace`.
    /// Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`] if the file cannot be read and
    /// [`MenuError::Config`] if it is not valid TOML or has unknown keys.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&contents).map_err(|e| {
            MenuError::Config(format!("{}: {e}", path.as_ref().display()))
        })
    }

    /// Builds a config from string key/value pairs, as found in environments
    /// or host plugin settings.
    ///
    /// Parsing is lenient: values that do not parse leave the default in
    /// place. Keys of the form `color.<element>` fill [`Config::colors`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pickmenu::{Config, FilterMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("lines".to_string(), "15".to_string());
    /// map.insert("filter_mode".to_string(), "case-insensitive".to_string());
    /// map.insert("wrap".to_string(), "maybe".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.lines, 15);
    /// assert_eq!(config.filter_mode, FilterMode::CaseInsensitive);
    /// assert!(!config.wrap);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let flag = |key: &str, default: bool| text(key).and_then(parse_bool).unwrap_or(default);
        let number = |key: &str, default: u32| {
            text(key).and_then(|v| v.parse::<u32>().ok()).unwrap_or(default)
        };

        let colors = map
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix("color.")
                    .map(|element| (element.to_string(), value.trim().to_string()))
            })
            .collect();

        Self {
            renderer: text("renderer").map(String::from),
            filter_mode: text("filter_mode")
                .and_then(FilterMode::from_name)
                .unwrap_or(defaults.filter_mode),
            wrap: flag("wrap", defaults.wrap),
            lines: number("lines", defaults.lines),
            title: map.get("title").cloned(),
            prefix: map.get("prefix").cloned(),
            font: text("font").map(String::from),
            bottom: flag("bottom", defaults.bottom),
            monitor: number("monitor", defaults.monitor),
            grab: flag("grab", defaults.grab),
            theme_file: text("theme_file").map(String::from),
            colors,
            trace_level: text("trace_level").map(String::from),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Creates a menu configured by `config`.
///
/// A theme file that cannot be loaded is logged and replaced by the default
/// theme; the menu still starts.
///
/// # Errors
///
/// Returns [`MenuError::Config`] if `config.colors` names an unknown element,
/// and [`MenuError::AllocationFailure`] if a text field cannot be stored.
pub fn initialize<T>(config: &Config) -> Result<Menu<T>> {
    tracing::debug!(?config, "initializing menu");

    let mut menu = Menu::new();
    menu.set_filter_mode(config.filter_mode);
    menu.set_wrap(config.wrap);
    menu.set_lines(config.lines);
    menu.set_bottom(config.bottom);
    menu.set_monitor(config.monitor);
    menu.set_grab(config.grab);
    menu.set_title(config.title.as_deref())?;
    menu.set_prefix(config.prefix.as_deref())?;
    menu.set_font(config.font.as_deref())?;

    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => {
                tracing::debug!(theme = %theme.name, "theme loaded");
                menu.set_theme(theme);
            }
            Err(e) => {
                tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme, using default");
            }
        }
    }

    for (name, hex) in &config.colors {
        let element = ColorElement::from_name(name)
            .ok_or_else(|| MenuError::Config(format!("unknown color element: {name}")))?;
        menu.set_color(element, hex)?;
    }

    Ok(menu)
}

/// Drives `menu` with `renderer` until the user commits or cancels.
///
/// Each round computes a snapshot sized for the renderer, draws it, passes the
/// renderer's page size to the menu, then reads and applies one key. A stale
/// filtered view is recomputed before the first frame.
///
/// # Errors
///
/// Propagates renderer I/O errors and allocation failures from the menu.
pub fn run<T>(menu: &mut Menu<T>, renderer: &mut dyn Renderer) -> Result<RunResult> {
    let _span = tracing::info_span!("run", renderer = renderer.name(), items = menu.items().len()).entered();

    if menu.is_filter_stale() {
        menu.filter();
    }

    loop {
        let view = menu.compute_view(renderer.viewport_rows(menu.lines()));
        renderer.render(&view)?;
        if let Some(rows) = renderer.page_size() {
            menu.set_page_hint(rows);
        }

        let (key, codepoint) = renderer.poll_key()?;
        let result = menu.advance(key, codepoint)?;
        if result.is_terminal() {
            tracing::info!(?result, "menu finished");
            return Ok(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_an_unconfigured_menu() {
        let menu: Menu = initialize(&Config::default()).unwrap();
        assert_eq!(menu.filter_mode(), FilterMode::CaseSensitive);
        assert_eq!(menu.lines(), 0);
        assert!(!menu.wrap());
        assert_eq!(menu.font(), DEFAULT_FONT);
        assert_eq!(menu.theme(), &Theme::default());
    }

    #[test]
    fn from_map_reads_colors_and_flags() {
        let map: BTreeMap<String, String> = [
            ("bottom", "yes"),
            ("grab", "1"),
            ("monitor", "-2"),
            ("color.title-fg", "#FFFFFF"),
            ("renderer", "  "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert!(config.bottom);
        assert!(config.grab);
        assert_eq!(config.monitor, 0);
        assert_eq!(config.renderer, None);
        assert_eq!(config.colors.get("title-fg").map(String::as_str), Some("#FFFFFF"));

        let menu: Menu = initialize(&config).unwrap();
        assert_eq!(menu.color(ColorElement::TitleFg), "#FFFFFF");
    }

    #[test]
    fn unknown_color_element_is_a_config_error() {
        let mut config = Config::default();
        config.colors.insert("border".to_string(), "#000000".to_string());
        assert!(matches!(initialize::<()>(&config), Err(MenuError::Config(_))));
    }

    #[test]
    fn missing_theme_file_falls_back_to_default() {
        let config = Config {
            theme_file: Some("/nonexistent/pickmenu/theme.toml".to_string()),
            ..Default::default()
        };
        let menu: Menu = initialize(&config).unwrap();
        assert_eq!(menu.theme(), &Theme::default());
    }
}
