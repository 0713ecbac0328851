// ABOUTME: Main entry point for the termimg application
// ABOUTME: Reads markup, resolves attachments and settings, and renders to stdout

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use termimg_cli::attachments::AttachmentSet;
use termimg_cli::cli::Cli;
use termimg_cli::cli_output::CliOutput;
use termimg_cli::config::Config;
use termimg_cli::settings::{should_use_color, Settings};
use termimg_core::{detect, DirectorySource, InlineRenderer};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        let output = CliOutput::new();
        output.error(&format!("{:#}", e));
        if !cli.verbose {
            output.hint("Run with --verbose for more detail");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let settings = Settings::resolve(cli, &config, should_use_color(cli));
    log::debug!("Resolved settings: {:?}", settings);

    let text = read_input(cli)?;

    let attachments_dir = cli
        .attachments_dir
        .as_deref()
        .or(config.attachments_dir.as_deref());
    let set = AttachmentSet::resolve(cli.manifest.as_deref(), attachments_dir)?;

    if settings.show_images && set.attachments.is_empty() && !detect(&text).is_empty() {
        CliOutput::new().warning("No attachments given; image references are shown as text");
    }

    let capabilities = settings.capabilities();
    let source = DirectorySource::new(&set.base_dir);
    let renderer = InlineRenderer::new(capabilities.as_ref(), &source, settings.render.clone());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    renderer
        .render(&mut handle, &text, &set.attachments, settings.show_images)
        .context("Failed to write output")?;
    handle.flush().context("Failed to flush output")?;

    Ok(())
}

/// Read the document, dropping one trailing newline since rendering adds its own
fn read_input(cli: &Cli) -> Result<String> {
    let mut text = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
