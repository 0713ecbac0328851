// ABOUTME: Terminal capability detection for Sixel graphics support
// ABOUTME: Heuristic environment inspection, memoized once per provider object

use crate::constants::env as vars;
use once_cell::sync::OnceCell;
use std::io::IsTerminal;

/// Terminals whose identification strings indicate Sixel support
const SIXEL_TERMINALS: &[&str] = &[
    "foot", "mlterm", "wezterm", "contour", "yaft", "sixel", "iterm", "mintty",
];

/// Answers whether the output terminal understands Sixel
pub trait CapabilityProvider {
    fn supports_sixel(&self) -> bool;
}

/// Why detection reached its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SixelDecision {
    Override(bool),
    NotInteractive,
    KnownTerminal,
    IncompatibleProtocol,
    WindowsTerminal,
    Unknown,
}

impl SixelDecision {
    pub fn supported(self) -> bool {
        match self {
            SixelDecision::Override(value) => value,
            SixelDecision::KnownTerminal | SixelDecision::WindowsTerminal => true,
            SixelDecision::NotInteractive
            | SixelDecision::IncompatibleProtocol
            | SixelDecision::Unknown => false,
        }
    }
}

/// Environment-backed provider. The decision is computed on first use and
/// never re-evaluated, even if the environment changes afterwards.
#[derive(Debug, Default)]
pub struct TerminalCapabilities {
    sixel: OnceCell<bool>,
}

impl TerminalCapabilities {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CapabilityProvider for TerminalCapabilities {
    fn supports_sixel(&self) -> bool {
        *self.sixel.get_or_init(|| {
            let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
            let decision = detect_sixel(|name| std::env::var(name).ok(), interactive);
            log::debug!("Sixel detection: {:?}", decision);
            decision.supported()
        })
    }
}

/// Provider with a predetermined answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCapability(pub bool);

impl CapabilityProvider for FixedCapability {
    fn supports_sixel(&self) -> bool {
        self.0
    }
}

/// Run the detection heuristics against an environment lookup.
///
/// The override variable wins over everything, including redirected streams.
pub fn detect_sixel<F>(lookup: F, interactive: bool) -> SixelDecision
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(vars::SIXEL_OVERRIDE) {
        return SixelDecision::Override(parse_override(&value));
    }

    if !interactive {
        return SixelDecision::NotInteractive;
    }

    let identity = [vars::TERM_PROGRAM, vars::TERM, vars::LC_TERMINAL]
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    // Kitty speaks its own graphics protocol and ignores Sixel
    if identity.contains("kitty") || lookup(vars::KITTY_WINDOW_ID).is_some() {
        return SixelDecision::IncompatibleProtocol;
    }

    if SIXEL_TERMINALS.iter().any(|name| identity.contains(name)) {
        return SixelDecision::KnownTerminal;
    }

    // Windows Terminal only exports a profile id in releases that render Sixel
    if lookup(vars::WT_SESSION).is_some() && lookup(vars::WT_PROFILE_ID).is_some() {
        return SixelDecision::WindowsTerminal;
    }

    SixelDecision::Unknown
}

fn parse_override(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
