// ABOUTME: Resolves effective render settings from CLI flags, config files, and the terminal
// ABOUTME: CLI flags win over config values, which win over built-in defaults

use crate::cli::{Cli, SixelMode};
use crate::config::Config;
use crossterm::terminal::size as terminal_size;
use std::io::IsTerminal;
use termimg_core::constants::limits;
use termimg_core::{CapabilityProvider, FixedCapability, RenderConfig, TerminalCapabilities};

/// Approximate pixel width of one terminal cell
const CELL_WIDTH_PX: u32 = 8;

/// Columns left free on each side of an image
const MARGIN_COLUMNS: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub show_images: bool,
    pub sixel: SixelMode,
    pub render: RenderConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config, use_color: bool) -> Self {
        let show_images = !cli.no_images && config.show_images.unwrap_or(true);
        let sixel = cli.sixel.or(config.sixel).unwrap_or_default();
        let max_width = cli
            .max_width
            .or(config.max_width)
            .unwrap_or_else(default_max_width);
        let max_colors = cli
            .max_colors
            .map(usize::from)
            .or(config.max_colors)
            .unwrap_or(limits::DEFAULT_MAX_COLORS);

        Self {
            show_images,
            sixel,
            render: RenderConfig::builder()
                .max_width(max_width)
                .max_colors(max_colors)
                .use_color(use_color)
                .build(),
        }
    }

    /// Capability provider matching the requested Sixel mode
    pub fn capabilities(&self) -> Box<dyn CapabilityProvider> {
        match self.sixel {
            SixelMode::Auto => Box::new(TerminalCapabilities::new()),
            SixelMode::Always => Box::new(FixedCapability(true)),
            SixelMode::Never => Box::new(FixedCapability(false)),
        }
    }
}

/// Determine if color should be used for highlighted references
pub fn should_use_color(cli: &Cli) -> bool {
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if cli.force_color {
        return true;
    }
    std::env::var("TERM").unwrap_or_default() != "dumb" && std::io::stdout().is_terminal()
}

/// Terminal width in pixels minus margins, or the fallback when unknown
pub fn default_max_width() -> u32 {
    match terminal_size() {
        Ok((columns, _)) => width_for_columns(columns),
        Err(e) => {
            log::debug!("Failed to get terminal size: {}", e);
            limits::DEFAULT_MAX_WIDTH
        }
    }
}

fn width_for_columns(columns: u16) -> u32 {
    let usable = columns.saturating_sub(MARGIN_COLUMNS * 2) as u32 * CELL_WIDTH_PX;
    if usable == 0 {
        limits::DEFAULT_MAX_WIDTH
    } else {
        usable
    }
}
