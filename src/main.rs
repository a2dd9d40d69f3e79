//! Command-line front end.
//!
//! Reads items from stdin, one per line, lets the user pick on the terminal
//! and prints the result to stdout:
//!
//! ```text
//! ls | pickmenu -i -l 10 -p "open:"
//! ```
//!
//! # Output
//!
//! - Chosen items, one per line, in list order
//! - The typed filter text when nothing matched, or after `Ctrl+Enter`
//! - Nothing, with exit status 1, when cancelled
//!
//! # Configuration Precedence
//!
//! Built-in defaults, then the config file (`--config`, or
//! `$XDG_CONFIG_HOME/pickmenu/config.toml` if present), then flags.
//!
//! The menu is drawn on stderr so stdout carries only the result; input comes
//! from the controlling terminal even though stdin is a pipe.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use pickmenu::infrastructure::paths;
use pickmenu::renderer::RendererRegistry;
use pickmenu::{Choice, Config, FilterMode, Menu, MenuError, RunResult};

/// Filterable menu for lines read from stdin.
#[derive(Debug, Parser)]
#[command(name = "pickmenu", version, about)]
struct Cli {
    /// Match case-insensitively.
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Wrap navigation around at the ends.
    #[arg(short = 'w', long)]
    wrap: bool,

    /// Number of vertical rows; 0 lists items on one line.
    #[arg(short = 'l', long, value_name = "LINES")]
    lines: Option<u32>,

    /// Title shown before the filter.
    #[arg(short = 'p', long, value_name = "TITLE")]
    title: Option<String>,

    /// Marker drawn before the highlighted row.
    #[arg(short = 'P', long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Font description, for renderers that use one.
    #[arg(long = "fn", value_name = "FONT")]
    font: Option<String>,

    /// Place the menu at the bottom of the screen.
    #[arg(short = 'b', long)]
    bottom: bool,

    /// Monitor index; 0 is the active monitor.
    #[arg(short = 'm', long, value_name = "INDEX")]
    monitor: Option<u32>,

    /// Renderer to use instead of the default.
    #[arg(long, value_name = "NAME")]
    renderer: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Color override, e.g. `highlighted_bg=#D81860`. Repeatable.
    #[arg(long = "color", value_name = "ELEMENT=#HEX", value_parser = parse_color)]
    colors: Vec<(String, String)>,

    /// Tracing filter directive, e.g. `debug` or `pickmenu=trace`.
    #[arg(long, value_name = "DIRECTIVE")]
    trace_level: Option<String>,
}

fn parse_color(value: &str) -> Result<(String, String), String> {
    let (element, hex) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ELEMENT=#HEX, got `{value}`"))?;
    if element.trim().is_empty() || hex.trim().is_empty() {
        return Err(format!("expected ELEMENT=#HEX, got `{value}`"));
    }
    Ok((element.trim().to_string(), hex.trim().to_string()))
}

impl Cli {
    /// Loads the config file and layers the flags on top.
    fn config(&self) -> pickmenu::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => match paths::get_config_file().filter(|path| path.is_file()) {
                Some(path) => Config::from_file(path)?,
                None => Config::default(),
            },
        };

        if self.case_insensitive {
            config.filter_mode = FilterMode::CaseInsensitive;
        }
        config.wrap |= self.wrap;
        config.bottom |= self.bottom;
        if let Some(lines) = self.lines {
            config.lines = lines;
        }
        if let Some(monitor) = self.monitor {
            config.monitor = monitor;
        }
        if self.title.is_some() {
            config.title.clone_from(&self.title);
        }
        if self.prefix.is_some() {
            config.prefix.clone_from(&self.prefix);
        }
        if self.font.is_some() {
            config.font.clone_from(&self.font);
        }
        if self.trace_level.is_some() {
            config.trace_level.clone_from(&self.trace_level);
        }
        for (element, hex) in &self.colors {
            config.colors.insert(element.clone(), hex.clone());
        }

        Ok(config)
    }
}

fn read_items(menu: &mut Menu) -> pickmenu::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        menu.push_item(line.strip_suffix('\r').unwrap_or(&line))?;
    }
    Ok(())
}

fn print_result(menu: &Menu, choice: &Choice) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match choice {
        Choice::Items(ids) if ids.is_empty() => writeln!(out, "{}", menu.filter_text())?,
        Choice::Items(ids) => {
            for &id in ids {
                writeln!(out, "{}", menu.text_of(id))?;
            }
        }
        Choice::Text(text) => writeln!(out, "{text}")?,
    }
    out.flush()
}

fn pick(cli: &Cli) -> pickmenu::Result<bool> {
    let config = cli.config()?;
    if let Some(path) = pickmenu::observability::init_tracing(&config) {
        tracing::debug!(path = %path.display(), "tracing to file");
    }

    let mut menu: Menu = pickmenu::initialize(&config)?;
    read_items(&mut menu)?;
    tracing::info!(items = menu.items().len(), "items read");

    let mut renderer = RendererRegistry::with_defaults()
        .into_selected(cli.renderer.as_deref(), config.renderer.as_deref())?;

    match pickmenu::run(&mut menu, renderer.as_mut())? {
        RunResult::Selected(choice) => {
            // Leave the alternate screen before printing.
            drop(renderer);
            print_result(&menu, &choice)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match pick(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(MenuError::NoRenderer) => {
            eprintln!("pickmenu: no renderer available (is stderr a terminal?)");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "pickmenu failed");
            eprintln!("pickmenu: {e}");
            ExitCode::from(2)
        }
    }
}
