use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// A perspective camera that caches its view and projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Follows a render target resize. No-op for a zero-height target.
    pub fn set_aspect_ratio(&mut self, width: usize, height: usize) {
        if height == 0 {
            return;
        }
        let aspect_ratio = width as f32 / height as f32;
        if aspect_ratio != self.aspect_ratio {
            self.aspect_ratio = aspect_ratio;
            self.update_matrices();
        }
    }

    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_updates_projection() {
        let mut cam = Camera::new_perspective(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 4.0),
            Vector3::y(),
            45.0_f32.to_radians(),
            1.0,
            0.1,
            100.0,
        );
        let before = cam.projection_matrix();
        cam.set_aspect_ratio(640, 360);
        assert!((cam.aspect_ratio - 640.0 / 360.0).abs() < 1e-6);
        assert_ne!(before, cam.projection_matrix());
        assert!((cam.projection_matrix()[(1, 1)] - before[(1, 1)]).abs() < 1e-6);

        cam.set_aspect_ratio(10, 0);
        assert!((cam.aspect_ratio - 640.0 / 360.0).abs() < 1e-6);
    }
}
