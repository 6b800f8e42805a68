use std::io::{self, Cursor};

use image::{imageops::FilterType, GenericImageView};
use log::debug;

use crate::PixelBuffer;

pub const DEFAULT_MAX_SIDE: u32 = 1200;

/// Decodes an image and converts it to RGBA8. Images with a side longer than `max_side`
/// are scaled down to fit, smaller ones are never scaled up.
pub fn load_image(bytes: &[u8], max_side: u32) -> io::Result<PixelBuffer> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let (width, height) = image.dimensions();
    let (target_width, target_height) = fit_dimensions(width, height, max_side);

    let image = if (target_width, target_height) != (width, height) {
        debug!("Resizing {width}x{height} to {target_width}x{target_height}");
        image.resize_exact(target_width, target_height, FilterType::Triangle)
    } else {
        image
    };

    PixelBuffer::try_from(image.to_rgba8())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn fit_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 {
        return (width, height);
    }
    let scale = (max_side as f64 / longest as f64).min(1.0);
    (
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    )
}

/// Lossless PNG with the alpha channel intact.
pub fn encode_png(buffer: &PixelBuffer) -> io::Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image::RgbaImage::from(buffer)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(io::Error::other)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorSample;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_dimensions(300, 200, 1200), (300, 200));
    }

    #[test]
    fn fit_scales_longest_side() {
        assert_eq!(fit_dimensions(2400, 1000, 1200), (1200, 500));
        assert_eq!(fit_dimensions(1000, 3000, 1200), (400, 1200));
        assert_eq!(fit_dimensions(5000, 1, 1200), (1200, 1));
    }

    #[test]
    fn load_downscales_large_image() {
        let buffer = load_image(&png_bytes(40, 20), 10).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (10, 5));
    }

    #[test]
    fn load_rejects_garbage() {
        let err = load_image(b"definitely not an image", 1200).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn png_keeps_alpha() {
        let mut buffer = load_image(&png_bytes(3, 2), 1200).unwrap();
        buffer.set(1, 1, ColorSample::new(1, 2, 3, 0));
        let reloaded = load_image(&encode_png(&buffer).unwrap(), 1200).unwrap();
        assert_eq!(reloaded, buffer);
    }
}
