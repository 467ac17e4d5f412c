use crate::core::color::from_rgb8;
use log::info;
use nalgebra::Vector3;
use std::path::Path;

/// Byte order of one 32-bit texel. The first named channel sits in the most
/// significant byte, which is also the first byte in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8888,
    Argb8888,
    Bgra8888,
    Abgr8888,
}

impl PixelFormat {
    /// Extracts the 8-bit RGB channels of a packed texel.
    #[inline]
    pub fn decode(self, pixel: u32) -> [u8; 3] {
        let [b0, b1, b2, b3] = pixel.to_be_bytes();
        match self {
            PixelFormat::Rgba8888 => [b0, b1, b2],
            PixelFormat::Argb8888 => [b1, b2, b3],
            PixelFormat::Bgra8888 => [b2, b1, b0],
            PixelFormat::Abgr8888 => [b3, b2, b1],
        }
    }

    /// Packs 8-bit RGBA channels into a texel of this format.
    #[inline]
    pub fn encode(self, rgba: [u8; 4]) -> u32 {
        let [r, g, b, a] = rgba;
        let bytes = match self {
            PixelFormat::Rgba8888 => [r, g, b, a],
            PixelFormat::Argb8888 => [a, r, g, b],
            PixelFormat::Bgra8888 => [b, g, r, a],
            PixelFormat::Abgr8888 => [a, b, g, r],
        };
        u32::from_be_bytes(bytes)
    }
}

/// A locked, row-major texture surface with four bytes per pixel.
/// Row 0 is the top of the image.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pixels: Vec<u32>,
}

impl Texture {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Loads an image from disk and normalizes it to RGBA8888.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture {:?}: {}", path_ref, e))?
            .to_rgba8();

        let (width, height) = img.dimensions();
        info!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Self::from_bytes(
            width as usize,
            height as usize,
            Self::BYTES_PER_PIXEL,
            PixelFormat::Rgba8888,
            img.as_raw(),
        )
    }

    /// Builds a texture from raw surface memory.
    ///
    /// Fails unless the surface has exactly four bytes per pixel and `bytes`
    /// covers `width * height` of them.
    pub fn from_bytes(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<Self, String> {
        if bytes_per_pixel != Self::BYTES_PER_PIXEL {
            return Err(format!(
                "Unsupported texture layout: {} bytes per pixel (expected {})",
                bytes_per_pixel,
                Self::BYTES_PER_PIXEL
            ));
        }
        if width == 0 || height == 0 {
            return Err(format!("Texture has an empty extent: {}x{}", width, height));
        }
        let expected = width * height * Self::BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(format!(
                "Texture data size mismatch: got {} bytes, expected {} for {}x{}",
                bytes.len(),
                expected,
                width,
                height
            ));
        }

        let pixels = bytes
            .chunks_exact(Self::BYTES_PER_PIXEL)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Builds an RGBA8888 texture from opaque RGB texels, row 0 first.
    pub fn from_rgb8_pixels(
        width: usize,
        height: usize,
        texels: &[[u8; 3]],
    ) -> Result<Self, String> {
        let bytes: Vec<u8> = texels
            .iter()
            .flat_map(|&[r, g, b]| [r, g, b, 255])
            .collect();
        Self::from_bytes(
            width,
            height,
            Self::BYTES_PER_PIXEL,
            PixelFormat::Rgba8888,
            &bytes,
        )
    }

    /// Procedural two-color checkerboard with `cells` squares along each axis.
    pub fn checkerboard(
        width: usize,
        height: usize,
        cells: usize,
        color_a: [u8; 3],
        color_b: [u8; 3],
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = cells.max(1);
        let format = PixelFormat::Rgba8888;

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let cx = x * cells / width;
                let cy = y * cells / height;
                let [r, g, b] = if (cx + cy) % 2 == 0 { color_a } else { color_b };
                pixels.push(format.encode([r, g, b, 255]));
            }
        }

        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Raw packed texel. Coordinates must be in bounds.
    #[inline(always)]
    pub fn raw_texel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Decoded texel color in [0, 1]. Coordinates must be in bounds.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Vector3<f32> {
        from_rgb8(self.format.decode(self.raw_texel(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::{TextureFilter, TextureWrap, sample};
    use nalgebra::Vector2;

    #[test]
    fn test_decode_respects_byte_order() {
        let bytes = [10, 20, 30, 40];
        let packed = u32::from_be_bytes(bytes);
        assert_eq!(PixelFormat::Rgba8888.decode(packed), [10, 20, 30]);
        assert_eq!(PixelFormat::Argb8888.decode(packed), [20, 30, 40]);
        assert_eq!(PixelFormat::Bgra8888.decode(packed), [30, 20, 10]);
        assert_eq!(PixelFormat::Abgr8888.decode(packed), [40, 30, 20]);
    }

    #[test]
    fn test_encode_decode_agree_per_format() {
        for format in [
            PixelFormat::Rgba8888,
            PixelFormat::Argb8888,
            PixelFormat::Bgra8888,
            PixelFormat::Abgr8888,
        ] {
            assert_eq!(format.decode(format.encode([1, 2, 3, 4])), [1, 2, 3]);
        }
    }

    #[test]
    fn test_rejects_three_bytes_per_pixel() {
        let data = vec![0u8; 2 * 2 * 3];
        let err = Texture::from_bytes(2, 2, 3, PixelFormat::Rgba8888, &data).unwrap_err();
        assert!(err.contains("3 bytes per pixel"));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let data = vec![0u8; 7];
        assert!(Texture::from_bytes(2, 1, 4, PixelFormat::Rgba8888, &data).is_err());
        assert!(Texture::from_bytes(0, 1, 4, PixelFormat::Rgba8888, &[]).is_err());
    }

    #[test]
    fn test_texel_lookup_is_row_major() {
        let tex = Texture::from_rgb8_pixels(
            2,
            2,
            &[[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
        )
        .unwrap();
        assert_eq!(tex.texel(1, 0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.texel(0, 1), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_load_png_keeps_top_row_first() {
        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(1, 1, image::Rgb([255, 255, 255]));
        let path = std::env::temp_dir()
            .join(format!("soft_rasterizer_texture_{}.png", std::process::id()));
        img.save(&path).unwrap();

        let tex = Texture::load(&path);
        let _ = std::fs::remove_file(&path);
        let tex = tex.unwrap();

        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.format, PixelFormat::Rgba8888);
        assert_eq!(tex.texel(0, 0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.texel(1, 1), Vector3::new(1.0, 1.0, 1.0));

        // v near 1 addresses the top row of the image.
        let top_left = sample(
            &tex,
            Vector2::new(0.1, 0.9),
            TextureFilter::Nearest,
            TextureWrap::Clamp,
        );
        assert_eq!(top_left, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = Texture::load("does/not/exist.png").unwrap_err();
        assert!(err.starts_with("Failed to load texture"));
    }

    #[test]
    fn test_checkerboard_alternates() {
        let tex = Texture::checkerboard(4, 4, 2, [255, 255, 255], [0, 0, 0]);
        assert_eq!(tex.texel(0, 0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(tex.texel(2, 0), Vector3::zeros());
        assert_eq!(tex.texel(2, 2), Vector3::new(1.0, 1.0, 1.0));
    }
}
