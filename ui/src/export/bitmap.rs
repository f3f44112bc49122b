//! Immutable RGBA bitmap produced by a rasterizer.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};

use super::ExportError;

#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

/// JPEG bytes plus the pixel size PDF image objects need.
#[derive(Debug, Clone, PartialEq)]
pub struct JpegImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    /// Wrap raw RGBA rows. Zero-sized bitmaps are rejected.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyBitmap);
        }
        let pixels = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            ExportError::Raster(format!("pixel buffer does not match {width}x{height}"))
        })?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Rows `top..top + rows` flattened onto white and encoded as JPEG.
    pub fn rows_to_jpeg(&self, top: u32, rows: u32, quality: u8) -> Result<JpegImage, ExportError> {
        if rows == 0 || top.saturating_add(rows) > self.height() {
            return Err(ExportError::Encode(format!(
                "row range {top}+{rows} outside bitmap of height {}",
                self.height()
            )));
        }
        let region = image::imageops::crop_imm(&self.pixels, 0, top, self.width(), rows).to_image();
        let rgb = flatten_on_white(&region);

        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, quality)
            .encode_image(&rgb)
            .map_err(|err| ExportError::Encode(err.to_string()))?;

        Ok(JpegImage {
            data,
            width: rgb.width(),
            height: rgb.height(),
        })
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder
                .write_header()
                .map_err(|err| ExportError::Encode(err.to_string()))?
                .write_image_data(self.pixels.as_raw())
                .map_err(|err| ExportError::Encode(err.to_string()))?;
        }
        Ok(buffer)
    }
}

fn flatten_on_white(region: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(region.width(), region.height(), |x, y| {
        let [r, g, b, a] = region.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let raw = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Bitmap::from_rgba(width, height, raw).expect("bitmap")
    }

    #[test]
    fn zero_sized_bitmaps_are_rejected() {
        assert!(matches!(
            Bitmap::from_rgba(0, 10, Vec::new()),
            Err(ExportError::EmptyBitmap)
        ));
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn row_slices_keep_source_width() {
        let bitmap = solid(8, 20, [10, 20, 30, 255]);
        let jpeg = bitmap.rows_to_jpeg(5, 7, 95).expect("jpeg");
        assert_eq!((jpeg.width, jpeg.height), (8, 7));
        assert_eq!(&jpeg.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn out_of_range_rows_fail() {
        let bitmap = solid(4, 4, [0, 0, 0, 255]);
        assert!(bitmap.rows_to_jpeg(3, 2, 95).is_err());
        assert!(bitmap.rows_to_jpeg(0, 0, 95).is_err());
    }

    #[test]
    fn transparent_pixels_become_white() {
        let region = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        assert_eq!(flatten_on_white(&region).get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn png_has_signature() {
        let png = solid(3, 3, [1, 2, 3, 255]).to_png().expect("png");
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
