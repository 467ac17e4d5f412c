use nalgebra::Vector3;

/// Clamps every channel into [0, 1].
#[inline]
pub fn saturate(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Converts a color to 8-bit channels, clamping first and rounding to nearest.
#[inline]
pub fn to_rgb8(color: Vector3<f32>) -> [u8; 3] {
    let c = saturate(color) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

/// Converts 8-bit channels to a [0, 1] color.
#[inline]
pub fn from_rgb8(rgb: [u8; 3]) -> Vector3<f32> {
    Vector3::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    )
}
