use crate::core::sampler::{TextureFilter, TextureWrap};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub texture: TextureConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default = "default_objects")]
    pub objects: Vec<ObjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            texture: TextureConfig::default(),
            camera: CameraConfig::default(),
            objects: default_objects(),
        }
    }
}

/// Built-in demo scene: a large spinning box with a smaller one beside it.
fn default_objects() -> Vec<ObjectConfig> {
    vec![
        ObjectConfig {
            shape: default_shape(),
            size: [2.0, 2.0, 2.0],
            color: [0.0, 1.0, 0.0],
            max_uv: default_max_uv(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
            spin: default_spin(),
        },
        ObjectConfig {
            shape: default_shape(),
            size: [1.0, 1.0, 1.0],
            color: [0.0, 1.0, 0.0],
            max_uv: default_max_uv(),
            position: [1.5, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
            spin: default_spin(),
        },
    ]
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    // --- Animation ---
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            background: default_background(),
            frames: default_frames(),
            frame_time: default_frame_time(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    360
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_background() -> [f32; 3] {
    [0.125, 0.125, 0.125]
}
fn default_frames() -> usize {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}

#[derive(Debug, Deserialize)]
pub struct TextureConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Image file. Falls back to a procedural checkerboard when unset or unreadable.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_filter")]
    pub filter: String, // "nearest", "bilinear"
    #[serde(default = "default_wrap")]
    pub wrap: String, // "clamp", "repeat"
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            filter: default_filter(),
            wrap: default_wrap(),
        }
    }
}

impl TextureConfig {
    pub fn filter_mode(&self) -> Result<TextureFilter, String> {
        self.filter.parse()
    }

    pub fn wrap_mode(&self) -> Result<TextureWrap, String> {
        self.wrap.parse()
    }
}

fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "nearest".to_string()
}
fn default_wrap() -> String {
    "clamp".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: default_camera_target(),
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 5.0]
}
fn default_camera_target() -> [f32; 3] {
    [0.0, 0.0, 4.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    #[serde(default = "default_shape")]
    pub shape: String, // "cuboid", "quad"
    /// Length, height, depth. Depth is ignored for quads.
    #[serde(default = "default_size")]
    pub size: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    #[serde(default = "default_max_uv")]
    pub max_uv: f32,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Degrees per second.
    #[serde(default = "default_spin")]
    pub spin: [f32; 3],
}

fn default_shape() -> String {
    "cuboid".to_string()
}
fn default_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_max_uv() -> f32 {
    1.0
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_spin() -> [f32; 3] {
    [360.0 / 16.0, 360.0 / 8.0, 0.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
