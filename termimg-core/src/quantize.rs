// ABOUTME: Frequency-based color quantization into a bounded, index-addressable palette
// ABOUTME: Maps every pixel to its nearest palette entry by squared RGB distance

use crate::constants::limits::MAX_PALETTE_SIZE;
use crate::raster::DecodedRaster;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn distance_sq(self, other: Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Components rescaled to the 0-100 range Sixel color registers use
    pub fn to_percent(self) -> (u32, u32, u32) {
        let pct = |c: u8| c as u32 * 100 / 255;
        (pct(self.r), pct(self.g), pct(self.b))
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// Ordered, non-empty set of distinct colors, at most 256 entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Empty input yields a single black entry so encoders always have a color
    fn from_colors(mut colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            colors.push(Color::BLACK);
        }
        colors.truncate(MAX_PALETTE_SIZE);
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of the closest entry; the first of equally close entries wins
    pub fn nearest(&self, color: Color) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (idx, candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_sq(*candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
                if dist == 0 {
                    break;
                }
            }
        }
        best_idx
    }
}

/// A raster expressed as palette indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedRaster {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    palette: Palette,
}

impl QuantizedRaster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// Palette color assigned to a pixel
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        self.palette.colors[self.index_at(x, y) as usize]
    }
}

/// Reduce `raster` to at most `max_colors` colors (clamped to 1..=256).
///
/// The palette holds the most frequent colors, ties broken by first
/// appearance. When the image has no more than `max_colors` distinct colors
/// every pixel keeps its exact color.
pub fn quantize(raster: &DecodedRaster, max_colors: usize) -> QuantizedRaster {
    let max_colors = max_colors.clamp(1, MAX_PALETTE_SIZE);

    // Distinct colors in encounter order, with their counts
    let mut seen: HashMap<Color, usize> = HashMap::new();
    let mut distinct: Vec<(Color, usize)> = Vec::new();
    for rgb in raster.pixels().chunks_exact(DecodedRaster::CHANNELS) {
        let color = Color::new(rgb[0], rgb[1], rgb[2]);
        match seen.get(&color) {
            Some(&slot) => distinct[slot].1 += 1,
            None => {
                seen.insert(color, distinct.len());
                distinct.push((color, 1));
            }
        }
    }

    // Stable sort keeps encounter order among equal counts
    distinct.sort_by(|a, b| b.1.cmp(&a.1));
    let palette = Palette::from_colors(
        distinct
            .iter()
            .take(max_colors)
            .map(|(color, _)| *color)
            .collect(),
    );

    // Each distinct color is matched against the palette once
    let mut lookup: HashMap<Color, u8> = palette
        .colors
        .iter()
        .enumerate()
        .map(|(idx, color)| (*color, idx as u8))
        .collect();

    let mut indices = Vec::with_capacity(raster.width() as usize * raster.height() as usize);
    for rgb in raster.pixels().chunks_exact(DecodedRaster::CHANNELS) {
        let color = Color::new(rgb[0], rgb[1], rgb[2]);
        let index = *lookup
            .entry(color)
            .or_insert_with(|| palette.nearest(color) as u8);
        indices.push(index);
    }

    log::debug!(
        "Quantized {} distinct colors to a {}-entry palette",
        distinct.len(),
        palette.len()
    );

    QuantizedRaster {
        width: raster.width(),
        height: raster.height(),
        indices,
        palette,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_from(width: u32, height: u32, colors: &[[u8; 3]]) -> DecodedRaster {
        let pixels = colors.iter().flatten().copied().collect();
        DecodedRaster::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_percent_conversion_truncates() {
        assert_eq!(Color::new(255, 0, 0).to_percent(), (100, 0, 0));
        assert_eq!(Color::new(128, 64, 1).to_percent(), (50, 25, 0));
        assert_eq!(Color::new(254, 3, 200).to_percent(), (99, 1, 78));
    }

    #[test]
    fn test_palette_ordered_by_frequency() {
        let raster = raster_from(
            5,
            1,
            &[[0, 0, 255], [255, 0, 0], [255, 0, 0], [0, 255, 0], [255, 0, 0]],
        );
        let quantized = quantize(&raster, 256);

        assert_eq!(
            quantized.palette().colors(),
            &[
                Color::new(255, 0, 0),
                Color::new(0, 0, 255),
                Color::new(0, 255, 0)
            ]
        );
        assert_eq!(quantized.indices(), &[1, 0, 0, 2, 0]);
    }

    #[test]
    fn test_ties_broken_by_encounter_order() {
        let raster = raster_from(4, 1, &[[9, 9, 9], [1, 1, 1], [1, 1, 1], [9, 9, 9]]);
        let quantized = quantize(&raster, 1);

        assert_eq!(quantized.palette().colors(), &[Color::new(9, 9, 9)]);
        assert!(quantized.indices().iter().all(|&i| i == 0));
    }

    #[test]
    fn test_lossless_when_colors_fit() {
        let mut colors = Vec::new();
        for i in 0..64u32 {
            colors.push([(i * 4) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8]);
        }
        let raster = raster_from(8, 8, &colors);
        let quantized = quantize(&raster, 64);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(quantized.color_at(x, y), Color::from(raster.pixel(x, y)));
            }
        }
    }

    #[test]
    fn test_nearest_color_assignment() {
        // Two dominant colors; the rare near-white pixel should map to white
        let raster = raster_from(
            5,
            1,
            &[[0, 0, 0], [0, 0, 0], [255, 255, 255], [255, 255, 255], [250, 240, 245]],
        );
        let quantized = quantize(&raster, 2);

        assert_eq!(quantized.palette().len(), 2);
        assert_eq!(quantized.color_at(4, 0), Color::new(255, 255, 255));
    }

    #[test]
    fn test_indices_are_valid() {
        let mut colors = Vec::new();
        for i in 0..300u32 {
            colors.push([(i % 256) as u8, (i / 2) as u8, (i * 13 % 256) as u8]);
        }
        let raster = raster_from(30, 10, &colors);
        let quantized = quantize(&raster, 16);

        assert_eq!(quantized.palette().len(), 16);
        assert_eq!(quantized.indices().len(), 300);
        assert!(quantized
            .indices()
            .iter()
            .all(|&i| (i as usize) < quantized.palette().len()));
    }

    #[test]
    fn test_empty_raster_gets_black_palette() {
        let raster = DecodedRaster::new(0, 0, Vec::new()).unwrap();
        let quantized = quantize(&raster, 256);

        assert_eq!(quantized.palette().colors(), &[Color::BLACK]);
        assert!(quantized.indices().is_empty());
    }

    #[test]
    fn test_max_colors_is_clamped() {
        let raster = raster_from(2, 1, &[[1, 2, 3], [4, 5, 6]]);

        let quantized = quantize(&raster, 0);
        assert_eq!(quantized.palette().len(), 1);

        let quantized = quantize(&raster, 10_000);
        assert_eq!(quantized.palette().len(), 2);
    }

    #[test]
    fn test_palette_nearest_prefers_first_on_tie() {
        let palette = Palette::from_colors(vec![Color::new(0, 0, 0), Color::new(2, 0, 0)]);
        assert_eq!(palette.nearest(Color::new(1, 0, 0)), 0);
        assert_eq!(palette.nearest(Color::new(2, 0, 0)), 1);
    }
}
