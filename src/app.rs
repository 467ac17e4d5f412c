use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::Rasterizer;
use crate::io::config::{Config, ObjectConfig};
use crate::io::image::save_framebuffer;
use crate::pipeline::mesh_instance::{DrawStats, MeshInstance};
use crate::scene::camera::Camera;
use crate::scene::primitives;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::Texture;
use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use std::time::{Duration, Instant};

const FALLBACK_TEXTURE_SIZE: usize = 256;
const FALLBACK_TEXTURE_CELLS: usize = 8;

/// Everything drawn in a frame.
pub struct Scene {
    pub camera: Camera,
    /// `None` shades with vertex colors.
    pub texture: Option<Texture>,
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn from_config(config: &Config) -> Result<Self, String> {
        // 1. Camera
        let aspect_ratio = config.render.width as f32 / config.render.height.max(1) as f32;
        let camera = Camera::new_perspective(
            Point3::from(config.camera.position),
            Point3::from(config.camera.target),
            Vector3::from(config.camera.up),
            config.camera.fov.to_radians(),
            aspect_ratio,
            config.camera.near,
            config.camera.far,
        );

        // 2. Texture
        let texture = if config.texture.enabled {
            Some(load_texture(config.texture.path.as_deref()))
        } else {
            None
        };

        // 3. Objects
        let objects = config
            .objects
            .iter()
            .map(build_object)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            camera,
            texture,
            objects,
        })
    }
}

fn load_texture(path: Option<&str>) -> Texture {
    let fallback = || {
        Texture::checkerboard(
            FALLBACK_TEXTURE_SIZE,
            FALLBACK_TEXTURE_SIZE,
            FALLBACK_TEXTURE_CELLS,
            [255, 255, 255],
            [64, 64, 64],
        )
    };

    match path {
        Some(path) => Texture::load(path).unwrap_or_else(|e| {
            warn!("{}. Using checkerboard texture.", e);
            fallback()
        }),
        None => {
            debug!("No texture path configured, using checkerboard texture.");
            fallback()
        }
    }
}

fn build_object(obj_conf: &ObjectConfig) -> Result<SceneObject, String> {
    let [length, height, depth] = obj_conf.size;
    let color = Vector3::from(obj_conf.color);

    let mesh: MeshInstance = match obj_conf.shape.as_str() {
        "cuboid" => primitives::cuboid(length, height, depth, color, obj_conf.max_uv),
        "quad" => primitives::quad(length, height, color, obj_conf.max_uv),
        other => return Err(format!("Unknown shape '{}'", other)),
    };

    let rotation = Vector3::from(obj_conf.rotation.map(f32::to_radians));
    let spin = Vector3::from(obj_conf.spin.map(f32::to_radians));
    Ok(SceneObject::new(mesh, Vector3::from(obj_conf.position))
        .with_rotation(rotation, spin)
        .with_scale(Vector3::from(obj_conf.scale)))
}

/// What a headless run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub stats: DrawStats,
    pub elapsed: Duration,
}

/// Renders `config.render.frames` frames (at least one) and returns the last one.
pub fn render(config: &Config, scene: &mut Scene) -> Result<(FrameBuffer, RunSummary), String> {
    let width = config.render.width;
    let height = config.render.height;
    if width == 0 || height == 0 {
        return Err(format!("Render size must be non-zero, got {}x{}", width, height));
    }

    let mut rasterizer = Rasterizer::new(width, height);
    rasterizer.set_filter(config.texture.filter_mode()?);
    rasterizer.set_wrap(config.texture.wrap_mode()?);

    let background = Vector3::from(config.render.background);
    let mut framebuffer = FrameBuffer::new(width, height);
    let frames = config.render.frames.max(1);
    let mut stats = DrawStats::default();
    let start_time = Instant::now();

    for frame in 0..frames {
        let time = frame as f32 * config.render.frame_time;

        framebuffer.resize(width, height);
        framebuffer.clear(background);
        rasterizer.resize_depth_buffer(width, height);
        rasterizer.clear_depth_buffer();
        scene.camera.set_aspect_ratio(width, height);

        let view = scene.camera.view_matrix();
        let projection = scene.camera.projection_matrix();
        let mut frame_stats = DrawStats::default();

        for object in &scene.objects {
            let model = object.model_matrix(time);
            frame_stats += object.mesh.draw(
                &mut rasterizer,
                &mut framebuffer,
                scene.texture.as_ref(),
                &projection,
                &view,
                &model,
            );
        }

        debug!(
            "Frame {} (t = {:.3}s): {} submitted, {} culled, {} rejected",
            frame, time, frame_stats.submitted, frame_stats.culled, frame_stats.rejected
        );
        stats += frame_stats;
    }

    let summary = RunSummary {
        frames,
        stats,
        elapsed: start_time.elapsed(),
    };
    Ok((framebuffer, summary))
}

/// Runs a headless render and saves the final frame to `config.render.output`.
pub fn run(config: &Config) -> Result<RunSummary, String> {
    info!(
        "Starting render ({}x{}, {} frame(s), filter {}, wrap {})...",
        config.render.width,
        config.render.height,
        config.render.frames.max(1),
        config.texture.filter,
        config.texture.wrap
    );
    let mut scene = Scene::from_config(config)?;
    let (framebuffer, summary) = render(config, &mut scene)?;
    info!("Render completed in {:.2?}", summary.elapsed);

    info!("Saving output to '{}'...", config.render.output);
    save_framebuffer(&framebuffer, &config.render.output)?;
    info!("Done.");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.render.width = 64;
        config.render.height = 36;
        config
    }

    #[test]
    fn test_default_scene_has_two_cubes() {
        let scene = Scene::from_config(&Config::default()).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert!(scene.objects.iter().all(|o| o.mesh.len() == 12));
        assert!(scene.texture.is_some());
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        let config = Config::from_toml("[[objects]]\nshape = \"torus\"").unwrap();
        let err = Scene::from_config(&config).err().unwrap();
        assert!(err.contains("torus"));
    }

    #[test]
    fn test_object_transform_comes_from_config() {
        let config = Config::from_toml(
            "[[objects]]\nshape = \"quad\"\nrotation = [0.0, 90.0, 0.0]\nscale = [2.0, 0.5, 1.0]",
        )
        .unwrap();
        let scene = Scene::from_config(&config).unwrap();

        let object = &scene.objects[0];
        assert_eq!(object.scale, Vector3::new(2.0, 0.5, 1.0));
        assert!((object.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(object.mesh.len(), 2);
    }

    #[test]
    fn test_missing_texture_falls_back_to_checkerboard() {
        let mut config = small_config();
        config.texture.path = Some("does/not/exist.png".to_string());
        let scene = Scene::from_config(&config).unwrap();
        let texture = scene.texture.unwrap();
        assert_eq!(texture.width, FALLBACK_TEXTURE_SIZE);
    }

    #[test]
    fn test_flat_frame_at_rest() {
        let mut config = small_config();
        config.texture.enabled = false;
        let mut scene = Scene::from_config(&config).unwrap();

        let (fb, summary) = render(&config, &mut scene).unwrap();

        assert_eq!(summary.frames, 1);
        // Axis-aligned boxes: only the -Z faces point away from the camera.
        assert_eq!(summary.stats, DrawStats { submitted: 20, culled: 4, rejected: 0 });
        assert_eq!(fb.get_pixel(32, 18), Some([0, 255, 0]));
        assert_eq!(fb.get_pixel(0, 0), Some([32, 32, 32]));
    }

    #[test]
    fn test_stats_accumulate_over_frames() {
        let mut config = small_config();
        config.render.frames = 3;
        let mut scene = Scene::from_config(&config).unwrap();

        let (_, summary) = render(&config, &mut scene).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.stats.total(), 3 * 24);
    }

    #[test]
    fn test_zero_sized_target_is_an_error() {
        let mut config = small_config();
        config.render.height = 0;
        let mut scene = Scene::from_config(&config).unwrap();
        assert!(render(&config, &mut scene).is_err());
    }

    #[test]
    fn test_run_writes_output() {
        let mut config = small_config();
        let path =
            std::env::temp_dir().join(format!("soft_rasterizer_run_{}.png", std::process::id()));
        config.render.output = path.to_string_lossy().into_owned();

        let summary = run(&config).unwrap();

        assert_eq!(summary.frames, 1);
        let saved = image::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!((saved.width(), saved.height()), (64, 36));
    }
}
