use crate::core::color::{saturate, to_rgb8};
use crate::core::depth_buffer::DepthBuffer;
use crate::core::framebuffer::RenderTarget;
use crate::core::geometry::ScreenTriangle;
use crate::core::math::interpolation::{
    barycentric_weights, edge_function, interpolate_linear, interpolate_perspective, is_covered,
};
use crate::core::sampler::{self, TextureFilter, TextureWrap};
use crate::scene::texture::Texture;
use log::trace;
use nalgebra::{Point2, Vector2, Vector3};

/// Smallest |view-space z| the rasterizer will take the reciprocal of.
pub const MIN_VIEW_DEPTH: f32 = 1e-4;

/// Scan-converts screen-space triangles into a render target.
///
/// Owns the depth buffer shared by every draw in a frame. The host resizes it
/// with the target and clears it once per frame; `rasterize` never does.
pub struct Rasterizer {
    depth_buffer: DepthBuffer,
    filter: TextureFilter,
    wrap: TextureWrap,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            depth_buffer: DepthBuffer::new(width, height),
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::Clamp,
        }
    }

    pub fn set_filter(&mut self, filter: TextureFilter) {
        self.filter = filter;
    }

    pub fn set_wrap(&mut self, wrap: TextureWrap) {
        self.wrap = wrap;
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    pub fn wrap(&self) -> TextureWrap {
        self.wrap
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    pub fn resize_depth_buffer(&mut self, width: usize, height: usize) {
        if self.depth_buffer.resize(width, height) {
            trace!("Depth buffer resized to {}x{}", width, height);
        }
    }

    pub fn clear_depth_buffer(&mut self) {
        self.depth_buffer.clear();
    }

    /// Rasterizes one triangle, writing covered and depth-accepted pixels to `target`.
    ///
    /// Untextured triangles shade with their perspective-correct vertex color;
    /// textured ones sample `texture` at the perspective-correct UV.
    /// Zero-area triangles and triangles touching the camera plane write nothing.
    pub fn rasterize<T: RenderTarget>(
        &mut self,
        target: &mut T,
        triangle: &ScreenTriangle,
        texture: Option<&Texture>,
    ) {
        let points = triangle.screen_points();

        // 1. Degenerate rejection
        let area = edge_function(points[0], points[1], points[2]);
        if area == 0.0 {
            return;
        }

        let [v0, v1, v2] = &triangle.vertices;
        if [v0.view_z, v1.view_z, v2.view_z]
            .iter()
            .any(|z| z.abs() < MIN_VIEW_DEPTH)
        {
            trace!("Skipping triangle on the camera plane");
            return;
        }

        // 2. Bounding box, clamped to what both the target and the depth buffer cover
        let (target_width, target_height) = target.size();
        let width = target_width.min(self.depth_buffer.width());
        let height = target_height.min(self.depth_buffer.height());
        let Some((start_x, end_x, start_y, end_y)) =
            Self::compute_bounding_box(&points, width, height)
        else {
            return;
        };

        let ndc_z = [v0.ndc_z, v1.ndc_z, v2.ndc_z];
        let inv_view_z = [1.0 / v0.view_z, 1.0 / v1.view_z, 1.0 / v2.view_z];
        let colors: [Vector3<f32>; 3] = [v0.color, v1.color, v2.color];
        let tex_coords: [Vector2<f32>; 3] = [v0.tex_coord, v1.tex_coord, v2.tex_coord];

        // 3. Pixel loop
        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let bary = barycentric_weights(pixel_center, &points, area);
                if !is_covered(bary) {
                    continue;
                }

                // Depth is linear in screen space after the divide.
                let depth = interpolate_linear(&ndc_z, bary);
                if !self.depth_buffer.test_and_update(x, y, depth) {
                    continue;
                }

                let color = match texture {
                    None => saturate(interpolate_perspective(&colors, &inv_view_z, bary)),
                    Some(tex) => {
                        let uv = interpolate_perspective(&tex_coords, &inv_view_z, bary);
                        sampler::sample(tex, uv, self.filter, self.wrap)
                    }
                };

                let [r, g, b] = to_rgb8(color);
                target.set_pixel(x, y, r, g, b);
            }
        }
    }

    /// Inclusive pixel bounds `(start_x, end_x, start_y, end_y)` of the triangle,
    /// or `None` when it lies entirely outside `width x height`.
    fn compute_bounding_box(
        points: &[Point2<f32>; 3],
        width: usize,
        height: usize,
    ) -> Option<(usize, usize, usize, usize)> {
        if width == 0 || height == 0 {
            return None;
        }

        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor();
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor();
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil();
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil();

        let last_x = (width - 1) as f32;
        let last_y = (height - 1) as f32;
        if max_x < 0.0 || max_y < 0.0 || min_x > last_x || min_y > last_y {
            return None;
        }

        Some((
            min_x.clamp(0.0, last_x) as usize,
            max_x.clamp(0.0, last_x) as usize,
            min_y.clamp(0.0, last_y) as usize,
            max_y.clamp(0.0, last_y) as usize,
        ))
    }
}
