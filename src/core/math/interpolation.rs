use nalgebra::{Point2, Vector3};
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Anything supporting `a + b * t` qualifies, which covers nalgebra vectors and `f32`.
pub trait Interpolatable: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// 2D edge function: the signed area of the parallelogram spanned by `ab` and `ap`.
///
/// `edge(v0, v1, v2)` is twice the signed area of the triangle.
#[inline(always)]
pub fn edge_function(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Barycentric weights of `p` with respect to triangle `v`, given `area = edge(v0, v1, v2)`.
///
/// Each weight is the edge value opposite its vertex divided by `area`, so the
/// result is independent of winding. `area` must be non-zero.
///
/// # Returns
/// A Vector3 where:
/// - x: weight for v0
/// - y: weight for v1
/// - z: weight for v2
#[inline]
pub fn barycentric_weights(p: Point2<f32>, v: &[Point2<f32>; 3], area: f32) -> Vector3<f32> {
    let w0 = edge_function(v[1], v[2], p);
    let w1 = edge_function(v[2], v[0], p);
    let w2 = edge_function(v[0], v[1], p);
    Vector3::new(w0 / area, w1 / area, w2 / area)
}

/// Inclusive coverage test: edges and corners count as inside.
#[inline(always)]
pub fn is_covered(bary: Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

/// Plain screen-space interpolation.
#[inline]
pub fn interpolate_linear<T: Interpolatable>(values: &[T; 3], bary: Vector3<f32>) -> T {
    values[0] * bary.x + values[1] * bary.y + values[2] * bary.z
}

/// Perspective-correct interpolation.
///
/// Each attribute is weighted by its vertex's `1 / view_z`, blended with the
/// screen-space weights, then divided by the blended `1 / view_z`.
/// `inv_view_z` holds the three reciprocals, precomputed once per triangle.
#[inline]
pub fn interpolate_perspective<T: Interpolatable>(
    values: &[T; 3],
    inv_view_z: &[f32; 3],
    bary: Vector3<f32>,
) -> T {
    let interpolated_inv_z =
        inv_view_z[0] * bary.x + inv_view_z[1] * bary.y + inv_view_z[2] * bary.z;
    let blended = values[0] * (inv_view_z[0] * bary.x)
        + values[1] * (inv_view_z[1] * bary.y)
        + values[2] * (inv_view_z[2] * bary.z);
    blended * (1.0 / interpolated_inv_z)
}
