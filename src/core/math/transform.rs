use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

/// Smallest |w| accepted by the perspective divide.
pub const MIN_CLIP_W: f32 = 1e-6;

//=================================
// Transform Matrix Factory
//=================================

/// Builds the model, view and projection matrices used by the pipeline.
/// Right-handed: the camera looks down -Z and NDC depth runs from -1 (near) to +1 (far).
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Euler rotation in X-then-Y order, matching `rot_x * rot_y`.
    pub fn rotation_xy(angle_x_rad: f32, angle_y_rad: f32) -> Matrix4<f32> {
        Self::rotation_x(angle_x_rad) * Self::rotation_y(angle_y_rad)
    }

    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(scale)
    }

    /// Look-at view matrix. Maps world space into a camera space looking down -Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let back = (eye - target).normalize();
        let right = up.cross(&back).normalize();
        let true_up = back.cross(&right);

        let rotation = Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            back.x,    back.y,    back.z,    0.0,
            0.0,       0.0,       0.0,       1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection. Depth lands in NDC [-1, 1]; `w_clip = -z_view`.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad * 0.5).tan();
        let depth_range = near - far;

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,                         0.0,
            0.0,              f,   0.0,                         0.0,
            0.0,              0.0, (far + near) / depth_range,  2.0 * far * near / depth_range,
            0.0,              0.0, -1.0,                        0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Linearly remaps `x` from `[a, b]` onto `[u, v]`.
#[inline]
pub fn linear_remap(x: f32, a: f32, b: f32, u: f32, v: f32) -> f32 {
    (v - u) / (b - a) * (x - a) + u
}

/// Clip space -> NDC. `None` when `w` is too close to zero to divide by.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w.abs() < MIN_CLIP_W {
        return None;
    }
    Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
}

/// NDC -> pixel coordinates (viewport transform).
///
/// X maps `[-1, 1]` onto `[0, width - 1]`; Y maps onto `[height - 1, 0]`
/// because NDC +Y is up while raster row 0 is the top.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: usize, height: usize) -> Point2<f32> {
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;
    Point2::new(
        linear_remap(ndc_x, -1.0, 1.0, 0.0, max_x),
        linear_remap(ndc_y, -1.0, 1.0, max_y, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_linear_remap() {
        assert!(approx(linear_remap(0.0, -1.0, 1.0, 0.0, 639.0), 319.5));
        assert!(approx(linear_remap(1.0, -1.0, 1.0, 359.0, 0.0), 0.0));
        assert!(approx(linear_remap(-1.0, -1.0, 1.0, 359.0, 0.0), 359.0));
    }

    #[test]
    fn test_ndc_to_screen_flips_y() {
        let top_left = ndc_to_screen(-1.0, 1.0, 640, 360);
        let bottom_right = ndc_to_screen(1.0, -1.0, 640, 360);
        assert_eq!(top_left, Point2::new(0.0, 0.0));
        assert_eq!(bottom_right, Point2::new(639.0, 359.0));
    }

    #[test]
    fn test_perspective_division_rejects_zero_w() {
        assert!(apply_perspective_division(&Vector4::new(1.0, 1.0, 1.0, 0.0)).is_none());
        let p = apply_perspective_division(&Vector4::new(2.0, 4.0, 1.0, 2.0)).unwrap();
        assert_eq!(p, Point3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let proj = TransformFactory::perspective(1.0, 90.0_f32.to_radians(), 0.1, 100.0);
        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -0.1, 1.0))).unwrap();
        let far =
            apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, -100.0, 1.0))).unwrap();
        assert!(approx(near.z, -1.0));
        assert!(approx(far.z, 1.0));

        let clip = proj * Vector4::new(0.0, 0.0, -5.0, 1.0);
        assert!(approx(clip.w, 5.0));
    }

    #[test]
    fn test_view_looks_down_negative_z() {
        let view = TransformFactory::view(
            &Point3::new(0.0, 0.0, 5.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Vector3::y(),
        );
        let origin = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx(origin.x, 0.0));
        assert!(approx(origin.y, 0.0));
        assert!(approx(origin.z, -5.0));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = TransformFactory::rotation_y(std::f32::consts::FRAC_PI_2);
        let v = r * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.z, -1.0));
    }
}
