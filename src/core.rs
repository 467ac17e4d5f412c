pub mod color;
pub mod depth_buffer;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod rasterizer;
pub mod sampler;
