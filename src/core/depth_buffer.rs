/// Depth value every cell holds after a clear. Matches the far plane in NDC.
pub const FAR_DEPTH: f32 = 1.0;

/// Per-pixel NDC depth for one render target.
///
/// Within a frame each cell holds the nearest depth accepted so far.
/// Clearing is the caller's job and must happen once per frame.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![FAR_DEPTH; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Reallocates when the dimensions change. Returns whether a reallocation happened.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, FAR_DEPTH);
        true
    }

    pub fn clear(&mut self) {
        self.data.fill(FAR_DEPTH);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Depth test and update.
    /// Rejects only depths strictly farther than the stored value, so equal depths
    /// let the later draw win. On success the new depth is written.
    #[inline]
    pub fn test_and_update(&mut self, x: usize, y: usize, depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        if depth > self.data[idx] {
            return false;
        }
        self.data[idx] = depth;
        true
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
