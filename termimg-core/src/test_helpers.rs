// ABOUTME: Test helper utilities for building encoded image fixtures in memory
// ABOUTME: Encodes rasters to PNG so decoder and compositor tests exercise the real codec

use crate::raster::DecodedRaster;
use image::{DynamicImage, GrayAlphaImage, ImageFormat, LumaA, RgbImage};
use std::io::Cursor;

pub fn encode_png(raster: &DecodedRaster) -> Vec<u8> {
    let img = RgbImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
        .expect("raster length matches its dimensions");
    write_png(DynamicImage::ImageRgb8(img))
}

/// A grayscale PNG with a half-transparent alpha channel
pub fn gray_alpha_png(width: u32, height: u32, level: u8) -> Vec<u8> {
    let img = GrayAlphaImage::from_pixel(width, height, LumaA([level, 128]));
    write_png(DynamicImage::ImageLumaA8(img))
}

fn write_png(img: DynamicImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("PNG encoding succeeds");
    buffer
}
