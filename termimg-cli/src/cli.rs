// ABOUTME: CLI argument definitions for the termimg application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "termimg")]
#[command(about = "Render markup with inline Sixel images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Markup file to render (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Directory holding attachment files
    #[arg(long, short = 'd', value_name = "DIR")]
    pub attachments_dir: Option<PathBuf>,

    /// JSON manifest listing attachments (filename, content_type, location)
    #[arg(long, short = 'm', value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Show image references as text only
    #[arg(long)]
    pub no_images: bool,

    /// Maximum image width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum palette size (1-256)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub max_colors: Option<u16>,

    /// Whether to emit Sixel graphics
    #[arg(long, value_enum)]
    pub sixel: Option<SixelMode>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Force colored output even when piped
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SixelMode {
    /// Detect from the terminal environment
    #[default]
    Auto,
    /// Always emit Sixel
    Always,
    /// Never emit Sixel
    Never,
}
