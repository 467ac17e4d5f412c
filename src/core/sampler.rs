use crate::core::color::saturate;
use crate::scene::texture::Texture;
use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::str::FromStr;

/// How texels are reconstructed between texel centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
}

/// How coordinates outside [0, 1] are brought back into the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    #[default]
    Clamp,
    Repeat,
}

impl FromStr for TextureFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(TextureFilter::Nearest),
            "bilinear" => Ok(TextureFilter::Bilinear),
            other => Err(format!(
                "Unknown texture filter '{}' (expected 'nearest' or 'bilinear')",
                other
            )),
        }
    }
}

impl FromStr for TextureWrap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" => Ok(TextureWrap::Clamp),
            "repeat" => Ok(TextureWrap::Repeat),
            other => Err(format!(
                "Unknown texture wrap '{}' (expected 'clamp' or 'repeat')",
                other
            )),
        }
    }
}

impl fmt::Display for TextureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureFilter::Nearest => write!(f, "nearest"),
            TextureFilter::Bilinear => write!(f, "bilinear"),
        }
    }
}

impl fmt::Display for TextureWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureWrap::Clamp => write!(f, "clamp"),
            TextureWrap::Repeat => write!(f, "repeat"),
        }
    }
}

/// Brings a texture coordinate into the canonical [0, 1] domain.
///
/// Repeat keeps `x - floor(x)`, so negative inputs wrap instead of mirroring.
#[inline]
pub fn apply_wrap(uv: Vector2<f32>, wrap: TextureWrap) -> Vector2<f32> {
    match wrap {
        TextureWrap::Clamp => uv.map(|c| c.clamp(0.0, 1.0)),
        TextureWrap::Repeat => uv.map(|c| c - c.floor()),
    }
}

/// Resolves a neighbor texel index that may have stepped one past either edge.
#[inline]
pub fn wrap_texel_index(index: i64, size: usize, wrap: TextureWrap) -> usize {
    let size = size as i64;
    match wrap {
        TextureWrap::Clamp => index.clamp(0, size - 1) as usize,
        TextureWrap::Repeat => index.rem_euclid(size) as usize,
    }
}

/// Samples `texture` at `tex_coord` and returns an RGB color in [0, 1].
///
/// The coordinate is wrapped first, then flipped vertically because the
/// texture stores its top row first while V grows upwards.
pub fn sample(
    texture: &Texture,
    tex_coord: Vector2<f32>,
    filter: TextureFilter,
    wrap: TextureWrap,
) -> Vector3<f32> {
    let wrapped = apply_wrap(tex_coord, wrap);
    let image_uv = Vector2::new(wrapped.x, 1.0 - wrapped.y);

    let x = image_uv.x * texture.width as f32;
    let y = image_uv.y * texture.height as f32;

    // u == 1.0 lands exactly on the far edge; keep it on the last texel.
    let px = (x.floor() as usize).min(texture.width - 1);
    let py = (y.floor() as usize).min(texture.height - 1);

    let p00 = texture.texel(px, py);

    let color = match filter {
        TextureFilter::Nearest => p00,
        TextureFilter::Bilinear => {
            let fx = x - px as f32;
            let fy = y - py as f32;

            let step_x: i64 = if fx < 0.5 { -1 } else { 1 };
            let step_y: i64 = if fy < 0.5 { -1 } else { 1 };
            let nx = wrap_texel_index(px as i64 + step_x, texture.width, wrap);
            let ny = wrap_texel_index(py as i64 + step_y, texture.height, wrap);

            //  ----- -----
            // | p00 | p10 |
            //  ----- -----
            // | p01 | p11 |
            //  ----- -----
            // mirrored as needed so that p10/p01 are the nearest neighbors.
            let p10 = texture.texel(nx, py);
            let p01 = texture.texel(px, ny);
            let p11 = texture.texel(nx, ny);

            let tx = (fx - 0.5).abs();
            let ty = (fy - 0.5).abs();

            let top = p00.lerp(&p10, tx);
            let bottom = p01.lerp(&p11, tx);
            top.lerp(&bottom, ty)
        }
    };

    saturate(color)
}
