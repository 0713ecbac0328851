// ABOUTME: RGB raster type, codec-backed decoding, and nearest-neighbour downscaling
// ABOUTME: Decoding sits behind a trait so the pipeline never depends on one codec

/// Interleaved 8-bit RGB pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedRaster {
    pub const CHANNELS: usize = 3;

    /// Returns `None` if `pixels` does not hold exactly `width * height` RGB samples
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(Self::CHANNELS)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster filled with one color
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let pixels = rgb.iter().copied().cycle().take(count * Self::CHANNELS).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Turns encoded image bytes into an RGB raster
pub trait ImageDecoder {
    /// `None` for corrupt or unsupported input
    fn decode(&self, bytes: &[u8]) -> Option<DecodedRaster>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, GIF, WebP, TIFF, BMP)
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecDecoder;

impl ImageDecoder for CodecDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<DecodedRaster> {
        let img = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(e) => {
                log::debug!("Failed to decode image ({} bytes): {}", bytes.len(), e);
                return None;
            }
        };

        // Drops alpha and expands grayscale
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        DecodedRaster::new(width, height, rgb.into_raw())
    }
}

/// Downscale to at most `max_width` pixels wide, preserving aspect ratio.
///
/// Never upscales: a raster already within bounds is returned untouched.
/// Sampling is nearest-neighbour with floor division, no filtering.
pub fn resize(raster: DecodedRaster, max_width: u32) -> DecodedRaster {
    let max_width = max_width.max(1);
    if raster.width <= max_width {
        return raster;
    }
    if raster.height == 0 {
        return DecodedRaster {
            width: max_width,
            height: 0,
            pixels: Vec::new(),
        };
    }

    let scale = max_width as f64 / raster.width as f64;
    let target_width = max_width;
    let target_height = ((raster.height as f64 * scale).round() as u32).max(1);

    log::debug!(
        "Scaling image from {}x{} to {}x{}",
        raster.width,
        raster.height,
        target_width,
        target_height
    );

    let (src_w, src_h) = (raster.width as u64, raster.height as u64);
    let (dst_w, dst_h) = (target_width as u64, target_height as u64);
    let mut pixels =
        Vec::with_capacity(target_width as usize * target_height as usize * DecodedRaster::CHANNELS);

    for y in 0..dst_h {
        let src_y = y * src_h / dst_h;
        for x in 0..dst_w {
            let src_x = x * src_w / dst_w;
            let offset = ((src_y * src_w + src_x) as usize) * DecodedRaster::CHANNELS;
            pixels.extend_from_slice(&raster.pixels[offset..offset + DecodedRaster::CHANNELS]);
        }
    }

    DecodedRaster {
        width: target_width,
        height: target_height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{encode_png, gray_alpha_png};

    fn gradient(width: u32, height: u32) -> DecodedRaster {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
            }
        }
        DecodedRaster::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_new_validates_length() {
        assert!(DecodedRaster::new(2, 2, vec![0; 12]).is_some());
        assert!(DecodedRaster::new(2, 2, vec![0; 11]).is_none());
        assert!(DecodedRaster::new(0, 0, Vec::new()).is_some());
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let raster = DecodedRaster::solid(3, 2, [1, 2, 3]);
        assert_eq!(raster.pixels().len(), 18);
        assert_eq!(raster.pixel(2, 1), [1, 2, 3]);
    }

    #[test]
    fn test_decode_png() {
        let png = encode_png(&DecodedRaster::solid(4, 3, [255, 0, 0]));
        let raster = CodecDecoder.decode(&png).unwrap();

        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.pixel(3, 2), [255, 0, 0]);
    }

    #[test]
    fn test_decode_normalizes_to_rgb() {
        let png = gray_alpha_png(2, 2, 200);
        let raster = CodecDecoder.decode(&png).unwrap();

        assert_eq!(raster.pixels().len(), 2 * 2 * 3);
        assert_eq!(raster.pixel(0, 0), [200, 200, 200]);
    }

    #[test]
    fn test_decode_corrupt_data() {
        assert!(CodecDecoder.decode(b"not an image").is_none());
        assert!(CodecDecoder.decode(&[]).is_none());
        assert!(CodecDecoder.decode(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).is_none());
    }

    #[test]
    fn test_resize_never_upscales() {
        let raster = gradient(10, 7);
        let resized = resize(raster.clone(), 10);
        assert_eq!(resized, raster);

        let resized = resize(raster.clone(), 500);
        assert_eq!(resized, raster);
    }

    #[test]
    fn test_resize_dimensions() {
        let resized = resize(gradient(100, 50), 40);
        assert_eq!(resized.width(), 40);
        assert_eq!(resized.height(), 20);

        // 7 * 3 / 9 = 2.333 rounds to 2
        let resized = resize(gradient(9, 7), 3);
        assert_eq!(resized.width(), 3);
        assert_eq!(resized.height(), 2);

        // 5 * 4 / 8 = 2.5 rounds to 3
        let resized = resize(gradient(8, 5), 4);
        assert_eq!(resized.height(), 3);
    }

    #[test]
    fn test_resize_nearest_neighbour_sampling() {
        let resized = resize(gradient(4, 4), 2);

        assert_eq!(resized.width(), 2);
        assert_eq!(resized.height(), 2);
        assert_eq!(resized.pixel(0, 0), [0, 0, 0]);
        assert_eq!(resized.pixel(1, 0), [2, 0, 2]);
        assert_eq!(resized.pixel(0, 1), [0, 2, 2]);
        assert_eq!(resized.pixel(1, 1), [2, 2, 4]);
    }

    #[test]
    fn test_resize_keeps_at_least_one_row() {
        let resized = resize(gradient(200, 1), 10);
        assert_eq!(resized.width(), 10);
        assert_eq!(resized.height(), 1);
    }

    #[test]
    fn test_resize_zero_height_raster() {
        let raster = DecodedRaster::new(100, 0, Vec::new()).unwrap();
        let resized = resize(raster, 10);

        assert_eq!(resized.width(), 10);
        assert_eq!(resized.height(), 0);
        assert!(resized.is_empty());
    }
}
