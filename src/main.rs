use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use soft_rasterizer::app;
use soft_rasterizer::core::sampler::{TextureFilter, TextureWrap};
use soft_rasterizer::io::config::Config;

/// Headless software rasterizer driven by a TOML scene file.
#[derive(Parser, Debug)]
#[command(name = "soft-rasterizer")]
#[command(about = "Renders textured, depth-tested triangles on the CPU")]
struct Cli {
    /// Scene configuration (TOML). Built-in demo scene when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output image path
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Number of animation frames to simulate; the last one is saved
    #[arg(short, long)]
    frames: Option<usize>,

    /// Texture filter: nearest or bilinear
    #[arg(long)]
    filter: Option<TextureFilter>,

    /// Texture wrap: clamp or repeat
    #[arg(long)]
    wrap: Option<TextureWrap>,

    /// Disable texturing and shade with vertex colors
    #[arg(long)]
    flat: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from '{}'", path);
            Config::load(path).map_err(|e| anyhow!(e))?
        }
        None => {
            info!("No config given, using the built-in scene");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.render.output = output;
    }
    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }
    if let Some(filter) = cli.filter {
        config.texture.filter = filter.to_string();
    }
    if let Some(wrap) = cli.wrap {
        config.texture.wrap = wrap.to_string();
    }
    if cli.flat {
        config.texture.enabled = false;
    }

    let summary = app::run(&config)
        .map_err(|e| anyhow!(e))
        .context("Render failed")?;
    info!(
        "{} frame(s): {} triangles submitted, {} culled, {} rejected",
        summary.frames, summary.stats.submitted, summary.stats.culled, summary.stats.rejected
    );
    Ok(())
}
