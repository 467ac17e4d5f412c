pub mod camera;
pub mod primitives;
pub mod scene_object;
pub mod texture;
