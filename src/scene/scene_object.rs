use crate::core::math::transform::TransformFactory;
use crate::pipeline::mesh_instance::MeshInstance;
use nalgebra::{Matrix4, Vector3};

/// A mesh placed in the scene, optionally spinning over time.
pub struct SceneObject {
    pub mesh: MeshInstance,
    pub position: Vector3<f32>,
    /// Base Euler rotation in radians (x, y, z).
    pub rotation: Vector3<f32>,
    /// Angular velocity in radians per second (x, y, z).
    pub spin: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl SceneObject {
    pub fn new(mesh: MeshInstance, position: Vector3<f32>) -> Self {
        Self {
            mesh,
            position,
            rotation: Vector3::zeros(),
            spin: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>, spin: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self.spin = spin;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix at `time` seconds: `T * Rx * Ry * Rz * S`.
    pub fn model_matrix(&self, time: f32) -> Matrix4<f32> {
        let angles = self.rotation + self.spin * time;
        TransformFactory::translation(&self.position)
            * TransformFactory::rotation_xy(angles.x, angles.y)
            * TransformFactory::rotation_z(angles.z)
            * TransformFactory::scaling_nonuniform(&self.scale)
    }
}
