use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::fs;
use std::path::Path;

/// Noisy RGB test image: compressible, but with enough entropy that encoder
/// quality actually changes the output size.
pub fn noisy_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        let v = (x.wrapping_mul(31) ^ y.wrapping_mul(17)) as u8;
        Rgb([v, x as u8, y as u8])
    }))
}

pub fn write_jpeg(path: &Path, img: &DynamicImage, quality: u8) {
    let mut buf = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .unwrap();
    fs::write(path, buf).unwrap();
}

pub fn write_png(path: &Path, img: &DynamicImage) {
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
