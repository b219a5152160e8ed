//! # 1-bpp Raster Images
//!
//! Converts decoded images to the packed monochrome format used by the
//! raster graphics commands, and back to PNG for previews.
//!
//! ## Thresholding
//!
//! Each pixel is reduced to a luma value composited over white, using
//! 16-bit channels:
//!
//! ```text
//! gray = a · (299·r + 587·g + 114·b) / 65535 + 1000 · (65535 − a)
//! ```
//!
//! The threshold is the midpoint between the darkest and lightest pixel of
//! the image; pixels strictly below it print black. A uniform image therefore
//! prints entirely white.
//!
//! ## Packing
//!
//! Rows are `(width + 7) / 8` bytes, MSB first, 1 = black. Padding bits at
//! the end of a row are zero.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageEncoder, Luma};

use crate::error::ReciboError;

const M16: u64 = 0xFFFF;

/// A packed 1-bit-per-pixel bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// `row_bytes() * height` bytes, row-major.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Bytes per packed row.
    pub fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Build from already-packed data, zero-filling or truncating it to the
    /// size implied by `width` and `height`.
    pub fn from_packed(width: u32, height: u32, mut data: Vec<u8>) -> Self {
        let len = (width as usize).div_ceil(8) * height as usize;
        data.resize(len, 0);
        Self {
            width,
            height,
            data,
        }
    }

    /// Threshold a decoded image at the midpoint of its luma range.
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba16();
        let (width, height) = rgba.dimensions();

        let gray = |p: &image::Rgba<u16>| -> u64 {
            let [r, g, b, a] = p.0.map(u64::from);
            a * (299 * r + 587 * g + 114 * b) / M16 + 1000 * (M16 - a)
        };

        let (min, max) = rgba
            .pixels()
            .map(gray)
            .fold((u64::MAX, 0), |(lo, hi), g| (lo.min(g), hi.max(g)));
        let threshold = (max + min) / 2;

        let row_bytes = (width as usize).div_ceil(8);
        let mut data = vec![0u8; row_bytes * height as usize];
        for (x, y, p) in rgba.enumerate_pixels() {
            if gray(p) < threshold {
                data[y as usize * row_bytes + x as usize / 8] |= 0x80 >> (x % 8);
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Load and threshold an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReciboError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| ReciboError::ImageDecode(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_image(&img))
    }

    /// Whether the dot at `(x, y)` prints black. Out of range is white.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.row_bytes() + x as usize / 8;
        self.data
            .get(idx)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }

    /// Re-encode as an 8-bit grayscale PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, ReciboError> {
        let mut img = GrayImage::new(self.width, self.height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = if self.is_black(x, y) {
                Luma([0])
            } else {
                Luma([255])
            };
        }

        let mut png_bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png_bytes)
            .write_image(
                img.as_raw(),
                self.width,
                self.height,
                image::ExtendedColorType::L8,
            )
            .map_err(|e| ReciboError::ImageDecode(e.to_string()))?;
        Ok(png_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn checker(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_threshold_and_pack() {
        let raster = RasterImage::from_image(&checker(10, 2));
        assert_eq!(raster.row_bytes(), 2);
        // row 0: x even black, row 1: x odd black, padding bits clear
        assert_eq!(raster.data, vec![0b1010_1010, 0b1000_0000, 0b0101_0101, 0b0100_0000]);
        assert!(raster.is_black(0, 0));
        assert!(!raster.is_black(1, 0));
        assert!(!raster.is_black(20, 0));
    }

    #[test]
    fn test_uniform_image_is_white() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(9, 3, Rgba([40, 40, 40, 255])));
        let raster = RasterImage::from_image(&img);
        assert!(raster.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_transparent_is_white() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let raster = RasterImage::from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(raster.data, vec![0b0100_0000]);
    }

    #[test]
    fn test_from_packed_resizes() {
        let raster = RasterImage::from_packed(12, 2, vec![0xFF]);
        assert_eq!(raster.data, vec![0xFF, 0, 0, 0]);
        let raster = RasterImage::from_packed(8, 1, vec![1, 2, 3]);
        assert_eq!(raster.data, vec![1]);
    }

    #[test]
    fn test_open_and_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        checker(16, 4).save(&path).unwrap();

        let raster = RasterImage::open(&path).unwrap();
        let png = raster.to_png().unwrap();
        let back = image::load_from_memory(&png).unwrap();
        assert_eq!(RasterImage::from_image(&back), raster);
    }

    #[test]
    fn test_open_missing_file() {
        let err = RasterImage::open("/nonexistent/logo.png").unwrap_err();
        assert!(matches!(err, ReciboError::ImageDecode(_)));
    }
}
