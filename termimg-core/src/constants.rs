// ABOUTME: Centralized constants for the termimg rendering pipeline
// ABOUTME: Contains environment variable names, Sixel protocol bytes, and pipeline limits

/// Environment variables consulted by capability detection
pub mod env {
    /// Explicit Sixel override: "1" or "true" forces support, anything else disables it
    pub const SIXEL_OVERRIDE: &str = "TERMIMG_SIXEL";

    pub const TERM: &str = "TERM";
    pub const TERM_PROGRAM: &str = "TERM_PROGRAM";
    pub const LC_TERMINAL: &str = "LC_TERMINAL";
    pub const KITTY_WINDOW_ID: &str = "KITTY_WINDOW_ID";

    /// Windows Terminal session and profile markers
    pub const WT_SESSION: &str = "WT_SESSION";
    pub const WT_PROFILE_ID: &str = "WT_PROFILE_ID";
}

/// Default limits for the rendering pipeline
pub mod limits {
    /// Largest palette Sixel registers can address
    pub const MAX_PALETTE_SIZE: usize = 256;

    pub const DEFAULT_MAX_COLORS: usize = 256;

    /// Fallback render width when the terminal size is unknown
    pub const DEFAULT_MAX_WIDTH: u32 = 800;

    /// Largest attachment the filesystem source will read
    pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;
}

/// Sixel protocol framing and encoding constants
pub mod sixel {
    /// Device Control String introducer plus the fixed raster-attributes header
    pub const DCS_HEADER: &str = "\x1bP0;0;0q";

    /// String Terminator
    pub const ST: &str = "\x1b\\";

    /// Rows covered by one sixel character
    pub const BAND_HEIGHT: u32 = 6;

    /// Printable base added to the 6-bit row mask ('?')
    pub const CHAR_OFFSET: u8 = 0x3f;

    /// Runs longer than this are written as `!<count><char>`
    pub const RLE_THRESHOLD: usize = 3;

    pub const CARRIAGE_RETURN: char = '$';
    pub const NEXT_BAND: char = '-';
}
