use crate::core::geometry::{WorldTriangle, WorldVertex};
use crate::pipeline::mesh_instance::MeshInstance;
use nalgebra::{Point3, Vector2, Vector3};

/// Appends one planar face as two triangles `(a, b, c)` and `(a, c, d)`.
///
/// Corners must be counter-clockwise seen from the side the face should be
/// visible from. UVs run from (0, 0) at `a` to (max_uv, max_uv) at `c`.
fn push_face(
    mesh: &mut MeshInstance,
    corners: [Point3<f32>; 4],
    color: Vector3<f32>,
    max_uv: f32,
) {
    let [a, b, c, d] = corners;
    let uv_a = Vector2::new(0.0, 0.0);
    let uv_b = Vector2::new(max_uv, 0.0);
    let uv_c = Vector2::new(max_uv, max_uv);
    let uv_d = Vector2::new(0.0, max_uv);

    mesh.add_triangle(WorldTriangle::new(
        WorldVertex::new(a, color, uv_a),
        WorldVertex::new(b, color, uv_b),
        WorldVertex::new(c, color, uv_c),
    ));
    mesh.add_triangle(WorldTriangle::new(
        WorldVertex::new(a, color, uv_a),
        WorldVertex::new(c, color, uv_c),
        WorldVertex::new(d, color, uv_d),
    ));
}

/// A `length x height` rectangle in the z = 0 plane, centered on the origin and
/// facing +Z.
pub fn quad(length: f32, height: f32, color: Vector3<f32>, max_uv: f32) -> MeshInstance {
    let hx = length.abs() / 2.0;
    let hy = height.abs() / 2.0;

    let mut mesh = MeshInstance::new();
    push_face(
        &mut mesh,
        [
            Point3::new(-hx, -hy, 0.0),
            Point3::new(hx, -hy, 0.0),
            Point3::new(hx, hy, 0.0),
            Point3::new(-hx, hy, 0.0),
        ],
        color,
        max_uv,
    );
    mesh
}

/// An axis-aligned box centered on the origin with outward-facing triangles.
/// Every face gets the full `[0, max_uv]` UV range.
pub fn cuboid(
    length: f32,
    height: f32,
    depth: f32,
    color: Vector3<f32>,
    max_uv: f32,
) -> MeshInstance {
    let hx = length.abs() / 2.0;
    let hy = height.abs() / 2.0;
    let hz = depth.abs() / 2.0;

    // Front ring (z+) then back ring (z-), each counter-clockwise from +Z.
    let p = [
        Point3::new(-hx, -hy, hz),
        Point3::new(hx, -hy, hz),
        Point3::new(hx, hy, hz),
        Point3::new(-hx, hy, hz),
        Point3::new(-hx, -hy, -hz),
        Point3::new(hx, -hy, -hz),
        Point3::new(hx, hy, -hz),
        Point3::new(-hx, hy, -hz),
    ];

    let faces = [
        [p[0], p[1], p[2], p[3]], // +Z
        [p[1], p[5], p[6], p[2]], // +X
        [p[5], p[4], p[7], p[6]], // -Z
        [p[4], p[0], p[3], p[7]], // -X
        [p[3], p[2], p[6], p[7]], // +Y
        [p[1], p[0], p[4], p[5]], // -Y
    ];

    let mut mesh = MeshInstance::new();
    for face in faces {
        push_face(&mut mesh, face, color, max_uv);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(tri: &WorldTriangle) -> Vector3<f32> {
        let [a, b, c] = tri.vertices.map(|v| v.position);
        (b - a).cross(&(c - a)).normalize()
    }

    #[test]
    fn test_quad_faces_positive_z() {
        let mesh = quad(2.0, -4.0, Vector3::new(1.0, 0.0, 0.0), 3.0);
        assert_eq!(mesh.len(), 2);
        for tri in mesh.triangles() {
            assert!((face_normal(tri) - Vector3::z()).norm() < 1e-6);
        }
        let corner = mesh.triangles()[0].vertices[2];
        assert_eq!(corner.position, Point3::new(1.0, 2.0, 0.0));
        assert_eq!(corner.tex_coord, Vector2::new(3.0, 3.0));
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mesh = cuboid(2.0, 2.0, 2.0, Vector3::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(mesh.len(), 12);
        for tri in mesh.triangles() {
            let centroid = tri
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            assert!(face_normal(tri).dot(&centroid) > 0.0);
        }
    }
}
