//! Image dimension probing.

use std::io::Cursor;

use image::ImageReader;
use tracing::debug;

use super::ImageProber;
use crate::dimensions::Dimensions;

/// Reads dimensions from the image header without decoding pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProber;

impl ImageProber for HeaderProber {
    fn probe_size(&self, bytes: &[u8]) -> Option<Dimensions> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?;

        match reader.into_dimensions() {
            Ok((width, height)) => Some(Dimensions::new(width, height)),
            Err(e) => {
                debug!("Could not read image dimensions: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, format)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn probes_png_and_jpeg() {
        assert_eq!(
            HeaderProber.probe_size(&encoded(37, 21, ImageFormat::Png)),
            Some(Dimensions::new(37, 21))
        );
        assert_eq!(
            HeaderProber.probe_size(&encoded(8, 5, ImageFormat::Jpeg)),
            Some(Dimensions::new(8, 5))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(HeaderProber.probe_size(b"definitely not an image"), None);
        assert_eq!(HeaderProber.probe_size(&[]), None);
    }
}
