// ABOUTME: Inline compositor that interleaves source text with rendered Sixel images
// ABOUTME: Walks detected references in document order, highlighting spans and emitting images

use crate::attachment::{match_attachments, AttachmentDescriptor, AttachmentSource};
use crate::capability::CapabilityProvider;
use crate::constants::limits;
use crate::quantize::quantize;
use crate::raster::{resize, CodecDecoder, ImageDecoder};
use crate::reference::detect;
use crate::sixel;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RenderConfig {
    /// Widest image to emit, in pixels
    #[builder(default = limits::DEFAULT_MAX_WIDTH)]
    pub max_width: u32,

    #[builder(default = limits::DEFAULT_MAX_COLORS)]
    pub max_colors: usize,

    /// Highlight reference spans with ANSI color
    #[builder(default = true)]
    pub use_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct InlineRenderer<'a> {
    capabilities: &'a dyn CapabilityProvider,
    source: &'a dyn AttachmentSource,
    decoder: &'a dyn ImageDecoder,
    config: RenderConfig,
}

impl<'a> InlineRenderer<'a> {
    pub fn new(
        capabilities: &'a dyn CapabilityProvider,
        source: &'a dyn AttachmentSource,
        config: RenderConfig,
    ) -> Self {
        Self {
            capabilities,
            source,
            decoder: &CodecDecoder,
            config,
        }
    }

    pub fn with_decoder(mut self, decoder: &'a dyn ImageDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Write `text` to `writer`, following each image reference with its Sixel
    /// rendering when `show_images` is set and the terminal supports it.
    ///
    /// Images that cannot be fetched or decoded are left out; the text is
    /// always written in full. Only I/O errors from `writer` are returned.
    pub fn render<W: Write>(
        &self,
        writer: &mut W,
        text: &str,
        attachments: &[AttachmentDescriptor],
        show_images: bool,
    ) -> io::Result<()> {
        if text.is_empty() || attachments.is_empty() {
            writer.write_all(text.as_bytes())?;
            return writer.write_all(b"\n");
        }

        let images_enabled = show_images && self.capabilities.supports_sixel();
        let mut cursor = 0;

        for reference in detect(text) {
            // Overlapping matches: the earlier reference already consumed this text
            if reference.start < cursor {
                continue;
            }

            writer.write_all(text[cursor..reference.start].as_bytes())?;
            self.write_span(writer, reference.span(text))?;
            cursor = reference.end;

            if !images_enabled {
                continue;
            }

            let matched = match_attachments(attachments, &[reference.filename.as_str()]);
            let Some(attachment) = matched.first() else {
                log::debug!("No image attachment named {}", reference.filename);
                continue;
            };

            if let Some(encoded) = self.render_image(attachment) {
                writer.write_all(encoded.as_bytes())?;
                writer.write_all(b"\n")?;
            }
        }

        writer.write_all(text[cursor..].as_bytes())?;
        writer.write_all(b"\n")
    }

    /// Render into an owned string
    pub fn render_to_string(
        &self,
        text: &str,
        attachments: &[AttachmentDescriptor],
        show_images: bool,
    ) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.render(&mut buffer, text, attachments, show_images)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Fetch, decode, resize, quantize, and encode one attachment
    pub fn render_image(&self, attachment: &AttachmentDescriptor) -> Option<String> {
        let bytes = match self.source.fetch(attachment) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!(
                    "Skipping image {}: {}",
                    attachment.filename,
                    e.detailed_message()
                );
                return None;
            }
        };

        let raster = self.decoder.decode(&bytes)?;
        let raster = resize(raster, self.config.max_width);
        let quantized = quantize(&raster, self.config.max_colors);
        Some(sixel::encode(&quantized))
    }

    fn write_span<W: Write>(&self, writer: &mut W, span: &str) -> io::Result<()> {
        if self.config.use_color {
            write!(writer, "{}", span.cyan())
        } else {
            writer.write_all(span.as_bytes())
        }
    }
}
