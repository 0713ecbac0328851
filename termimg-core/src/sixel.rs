// ABOUTME: Sixel escape-sequence encoder for quantized rasters
// ABOUTME: Emits palette registers then 6-row bands with run-length compressed color rows

use crate::constants::sixel::{
    BAND_HEIGHT, CARRIAGE_RETURN, CHAR_OFFSET, DCS_HEADER, NEXT_BAND, RLE_THRESHOLD, ST,
};
use crate::quantize::QuantizedRaster;
use std::io::{self, Write};

/// Encode a quantized raster as a complete `ESC P ... ESC \` Sixel block.
///
/// Output is a pure function of the input: identical rasters always produce
/// byte-identical sequences.
pub fn encode(raster: &QuantizedRaster) -> String {
    let width = raster.width() as usize;
    let height = raster.height();
    let palette = raster.palette();
    let indices = raster.indices();

    let mut out = String::with_capacity(DCS_HEADER.len() + palette.len() * 16 + indices.len());
    out.push_str(DCS_HEADER);

    for (index, color) in palette.colors().iter().enumerate() {
        let (r, g, b) = color.to_percent();
        out.push_str(&format!("#{};2;{};{};{}", index, r, g, b));
    }

    let mut row = vec![0u8; width];
    let mut present = vec![false; palette.len()];

    for band_top in (0..height).step_by(BAND_HEIGHT as usize) {
        let band_rows = BAND_HEIGHT.min(height - band_top) as usize;
        let band_start = band_top as usize * width;
        let band = &indices[band_start..band_start + band_rows * width];

        present.fill(false);
        for &index in band {
            present[index as usize] = true;
        }

        let mut any_color = false;
        for (color, _) in present.iter().enumerate().filter(|&(_, &used)| used) {
            any_color = true;

            for (x, sixel) in row.iter_mut().enumerate() {
                let mut bits = 0u8;
                for dy in 0..band_rows {
                    if band[dy * width + x] as usize == color {
                        bits |= 1 << dy;
                    }
                }
                *sixel = CHAR_OFFSET + bits;
            }

            out.push('#');
            out.push_str(&color.to_string());
            push_run_length(&mut out, &row);
            out.push(CARRIAGE_RETURN);
        }

        if any_color {
            out.push(NEXT_BAND);
        }
    }

    out.push_str(ST);
    out
}

/// Stream the encoded block into `writer`
pub fn write_sixel<W: Write>(writer: &mut W, raster: &QuantizedRaster) -> io::Result<()> {
    writer.write_all(encode(raster).as_bytes())
}

/// Append `row`, replacing runs longer than the threshold with `!<count><char>`
fn push_run_length(out: &mut String, row: &[u8]) {
    let mut i = 0;
    while i < row.len() {
        let value = row[i];
        let mut count = 1;
        while i + count < row.len() && row[i + count] == value {
            count += 1;
        }

        let ch = value as char;
        if count > RLE_THRESHOLD {
            out.push('!');
            out.push_str(&count.to_string());
            out.push(ch);
        } else {
            for _ in 0..count {
                out.push(ch);
            }
        }

        i += count;
    }
}
