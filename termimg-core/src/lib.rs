// ABOUTME: termimg core library: inline Sixel image rendering for terminal text output
// ABOUTME: Detects image references, decodes and quantizes attachments, and encodes Sixel

pub mod attachment;
pub mod capability;
pub mod compositor;
pub mod constants;
pub mod error;
pub mod quantize;
pub mod raster;
pub mod reference;
pub mod sixel;

#[cfg(test)]
mod test_helpers;

pub use attachment::{
    match_attachments, AttachmentDescriptor, AttachmentSource, DirectorySource, MemorySource,
};
pub use capability::{
    detect_sixel, CapabilityProvider, FixedCapability, SixelDecision, TerminalCapabilities,
};
pub use compositor::{InlineRenderer, RenderConfig};
pub use error::FetchError;
pub use quantize::{quantize, Color, Palette, QuantizedRaster};
pub use raster::{resize, CodecDecoder, DecodedRaster, ImageDecoder};
pub use reference::{detect, ImageReference, ReferenceKind};
pub use sixel::{encode, write_sixel};
