use std::path::Path;

use thiserror::Error;

/// Error raised when a texture file cannot be decoded.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode texture {path}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 image ready for upload to the GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an image file and converts it to RGBA8.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Procedural checkerboard used when no texture file is available.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                let shade: [u8; 4] = if even {
                    [0x30, 0x68, 0xb0, 0xff]
                } else {
                    [0xe8, 0xe8, 0xe8, 0xff]
                };
                pixels.extend_from_slice(&shade);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_has_expected_shape() {
        let texture = TextureImage::checkerboard(8, 4);
        assert_eq!(texture.width, 8);
        assert_eq!(texture.height, 8);
        assert_eq!(texture.byte_size(), 8 * 8 * 4);

        let pixel = |x: usize, y: usize| &texture.pixels[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
        assert_ne!(pixel(0, 0), pixel(4, 0), "adjacent cells alternate");
        assert_eq!(pixel(0, 0), pixel(4, 4), "diagonal cells repeat");
    }

    #[test]
    fn decodes_png_from_disk() {
        let file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("temp png");
        let buffer = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        buffer.save(file.path()).expect("write png");

        let texture = TextureImage::from_path(file.path()).expect("decode png");
        assert_eq!((texture.width, texture.height), (2, 3));
        assert_eq!(&texture.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = TextureImage::from_path("does-not-exist.png").unwrap_err();
        assert!(err.to_string().contains("does-not-exist.png"));
    }
}
