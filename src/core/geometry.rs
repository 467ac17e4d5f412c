use nalgebra::{Point2, Point3, Vector2, Vector3};

/// A vertex as authored by the mesh generator, in object space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldVertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// RGB color. Not clamped at this stage.
    pub color: Vector3<f32>,
    /// Texture coordinates (UV). May exceed 1.0 to tile the texture.
    pub tex_coord: Vector2<f32>,
}

impl WorldVertex {
    pub fn new(position: Point3<f32>, color: Vector3<f32>, tex_coord: Vector2<f32>) -> Self {
        Self {
            position,
            color,
            tex_coord,
        }
    }
}

/// Three ordered world vertices. Winding decides which side is the front face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTriangle {
    pub vertices: [WorldVertex; 3],
}

impl WorldTriangle {
    pub fn new(v0: WorldVertex, v1: WorldVertex, v2: WorldVertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// The same triangle with the opposite winding.
    pub fn reversed(&self) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self::new(v0, v2, v1)
    }
}

/// A vertex after projection, ready for scan conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel-space position with sub-pixel precision. Row 0 is the top of the target.
    pub screen: Point2<f32>,
    pub color: Vector3<f32>,
    pub tex_coord: Vector2<f32>,
    /// Post-divide depth in NDC, [-1, 1] with far = +1. Used for the depth test.
    pub ndc_z: f32,
    /// Pre-divide view-space Z. Negative in front of the camera, never zero.
    pub view_z: f32,
}

impl ScreenVertex {
    pub fn new(
        screen: Point2<f32>,
        color: Vector3<f32>,
        tex_coord: Vector2<f32>,
        ndc_z: f32,
        view_z: f32,
    ) -> Self {
        Self {
            screen,
            color,
            tex_coord,
            ndc_z,
            view_z,
        }
    }
}

/// The unit of work consumed by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [ScreenVertex; 3],
}

impl ScreenTriangle {
    pub fn new(v0: ScreenVertex, v1: ScreenVertex, v2: ScreenVertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    #[inline]
    pub fn screen_points(&self) -> [Point2<f32>; 3] {
        [
            self.vertices[0].screen,
            self.vertices[1].screen,
            self.vertices[2].screen,
        ]
    }
}
