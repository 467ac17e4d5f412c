use crate::core::framebuffer::RenderTarget;
use crate::core::geometry::{ScreenTriangle, ScreenVertex, WorldTriangle};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::rasterizer::{MIN_VIEW_DEPTH, Rasterizer};
use crate::scene::texture::Texture;
use log::trace;
use nalgebra::{Matrix4, Vector3, Vector4};
use std::ops::AddAssign;

/// Camera-forward direction in view space.
const VIEW_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

/// Outcome of pushing one world triangle through the transform stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Front-facing and projectable; ready for the rasterizer.
    Visible(ScreenTriangle),
    /// Faces away from the camera.
    BackFacing,
    /// Touches or crosses the camera plane, so the divide is not safe.
    Rejected,
}

/// Per-draw triangle counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub submitted: usize,
    pub culled: usize,
    pub rejected: usize,
}

impl DrawStats {
    pub fn total(&self) -> usize {
        self.submitted + self.culled + self.rejected
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.submitted += other.submitted;
        self.culled += other.culled;
        self.rejected += other.rejected;
    }
}

/// An object's world-space triangles, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MeshInstance {
    triangles: Vec<WorldTriangle>,
}

impl MeshInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, triangle: WorldTriangle) {
        self.triangles.push(triangle);
    }

    pub fn triangles(&self) -> &[WorldTriangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Transforms, culls and projects one triangle into a `width x height` target.
    ///
    /// `model_view` is `view * model`.
    pub fn project_triangle(
        triangle: &WorldTriangle,
        projection: &Matrix4<f32>,
        model_view: &Matrix4<f32>,
        width: usize,
        height: usize,
    ) -> Projection {
        // 1. World -> View
        let view_pos: [Vector4<f32>; 3] =
            triangle.vertices.map(|v| model_view * v.position.to_homogeneous());

        // 2. Back-face culling against the fixed view direction
        let edge1 = (view_pos[1] - view_pos[0]).xyz();
        let edge2 = (view_pos[2] - view_pos[0]).xyz();
        if let Some(normal) = edge1.cross(&edge2).try_normalize(f32::EPSILON)
            && normal.dot(&VIEW_FORWARD) > 0.0
        {
            return Projection::BackFacing;
        }

        // 3. Anything at or behind the camera plane would poison 1/z later
        if view_pos.iter().any(|p| p.z > -MIN_VIEW_DEPTH) {
            return Projection::Rejected;
        }

        // 4. View -> Clip -> NDC -> Screen
        let to_screen = |i: usize| -> Option<ScreenVertex> {
            let world = &triangle.vertices[i];
            let ndc = apply_perspective_division(&(projection * view_pos[i]))?;
            Some(ScreenVertex::new(
                ndc_to_screen(ndc.x, ndc.y, width, height),
                world.color,
                world.tex_coord,
                ndc.z,
                view_pos[i].z,
            ))
        };

        let (Some(v0), Some(v1), Some(v2)) = (to_screen(0), to_screen(1), to_screen(2)) else {
            return Projection::Rejected;
        };
        Projection::Visible(ScreenTriangle::new(v0, v1, v2))
    }

    /// Draws every triangle of the mesh.
    ///
    /// Back-facing triangles are skipped without reaching the rasterizer.
    /// `texture` of `None` shades with interpolated vertex colors.
    pub fn draw<T: RenderTarget>(
        &self,
        rasterizer: &mut Rasterizer,
        target: &mut T,
        texture: Option<&Texture>,
        projection: &Matrix4<f32>,
        view: &Matrix4<f32>,
        model: &Matrix4<f32>,
    ) -> DrawStats {
        let (width, height) = target.size();
        let model_view = view * model;
        let mut stats = DrawStats::default();

        for triangle in &self.triangles {
            match Self::project_triangle(triangle, projection, &model_view, width, height) {
                Projection::Visible(screen_triangle) => {
                    rasterizer.rasterize(target, &screen_triangle, texture);
                    stats.submitted += 1;
                }
                Projection::BackFacing => stats.culled += 1,
                Projection::Rejected => stats.rejected += 1,
            }
        }

        trace!(
            "Mesh drawn: {} submitted, {} culled, {} rejected",
            stats.submitted, stats.culled, stats.rejected
        );
        stats
    }
}

impl FromIterator<WorldTriangle> for MeshInstance {
    fn from_iter<I: IntoIterator<Item = WorldTriangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::framebuffer::FrameBuffer;
    use crate::core::geometry::WorldVertex;
    use crate::core::math::transform::TransformFactory;
    use nalgebra::{Point3, Vector2};

    fn facing_camera() -> WorldTriangle {
        // Counter-clockwise seen from +Z, so the normal points back at a camera
        // looking down -Z.
        let color = Vector3::new(1.0, 1.0, 1.0);
        WorldTriangle::new(
            WorldVertex::new(Point3::new(-1.0, -1.0, -5.0), color, Vector2::new(0.0, 0.0)),
            WorldVertex::new(Point3::new(1.0, -1.0, -5.0), color, Vector2::new(1.0, 0.0)),
            WorldVertex::new(Point3::new(0.0, 1.0, -5.0), color, Vector2::new(0.5, 1.0)),
        )
    }

    fn projection() -> Matrix4<f32> {
        TransformFactory::perspective(1.0, 90.0_f32.to_radians(), 0.1, 100.0)
    }

    #[test]
    fn test_front_face_is_projected() {
        let tri = facing_camera();
        let outcome =
            MeshInstance::project_triangle(&tri, &projection(), &Matrix4::identity(), 101, 101);
        let Projection::Visible(screen) = outcome else {
            panic!("expected a visible triangle, got {:?}", outcome);
        };

        // x = -1 at z = -5 with a 90 degree fov lands at ndc -0.2.
        let v0 = screen.vertices[0];
        assert!((v0.screen.x - 40.0).abs() < 1e-3);
        assert!((v0.screen.y - 60.0).abs() < 1e-3);
        assert_eq!(v0.view_z, -5.0);
        assert!(v0.ndc_z > -1.0 && v0.ndc_z < 1.0);
        assert_eq!(v0.tex_coord, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_back_face_is_culled() {
        let tri = facing_camera().reversed();
        let outcome =
            MeshInstance::project_triangle(&tri, &projection(), &Matrix4::identity(), 64, 64);
        assert_eq!(outcome, Projection::BackFacing);
    }

    #[test]
    fn test_triangle_behind_camera_is_rejected() {
        let tri = facing_camera();
        let model = TransformFactory::translation(&Vector3::new(0.0, 0.0, 5.0));
        let outcome = MeshInstance::project_triangle(&tri, &projection(), &model, 64, 64);
        assert_eq!(outcome, Projection::Rejected);
    }

    #[test]
    fn test_draw_counts_only_front_faces() {
        let mesh: MeshInstance = [facing_camera(), facing_camera().reversed()]
            .into_iter()
            .collect();
        let mut rasterizer = Rasterizer::new(64, 64);
        let mut fb = FrameBuffer::new(64, 64);

        let stats = mesh.draw(
            &mut rasterizer,
            &mut fb,
            None,
            &projection(),
            &Matrix4::identity(),
            &Matrix4::identity(),
        );

        assert_eq!(stats, DrawStats { submitted: 1, culled: 1, rejected: 0 });
        assert_eq!(stats.total(), mesh.len());
        assert_eq!(fb.get_pixel(32, 32), Some([255, 255, 255]));
    }

    #[test]
    fn test_triangles_keep_insertion_order() {
        let mut mesh = MeshInstance::new();
        assert!(mesh.is_empty());
        let a = facing_camera();
        let b = a.reversed();
        mesh.add_triangle(a);
        mesh.add_triangle(b);
        assert_eq!(mesh.triangles(), &[a, b]);
    }
}
