//! prompt3d - turn a text prompt into a 3D model file
//!
//! Builds a scene from the prompt (or loads a previously saved scene),
//! drives the simulated generation job with visible progress, and writes
//! the exported artifact to disk.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use prompt3d::config::AppConfig;
use prompt3d::job::{GenerationService, JobUpdate, SimulatedGeneration};
use prompt3d::{Complexity, GenerationOptions, Quality, Style};
use prompt3d_export::{export_with, Encoding, ExportOptions, Format, Payload};
use prompt3d_scene::{SceneNode, SceneValidator};

#[derive(Parser)]
#[command(name = "prompt3d")]
#[command(about = "Generate a 3D model from a text prompt and export it")]
#[command(version)]
struct Cli {
    /// Text prompt describing the model (omit when using --from-scene)
    prompt: Option<String>,

    /// Visual style: realistic, stylized, lowpoly, sculpted
    #[arg(long)]
    style: Option<Style>,

    /// Generation quality: draft, standard, high
    #[arg(long)]
    quality: Option<Quality>,

    /// Fallback complexity: simple, medium, detailed
    #[arg(long)]
    complexity: Option<Complexity>,

    /// Export format (glb, gltf, obj, stl, ply)
    #[arg(short, long)]
    format: Option<String>,

    /// Output path (defaults to the suggested filename in the output dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force the text sub-variant (ASCII STL, ASCII PLY)
    #[arg(long, conflicts_with = "binary")]
    text: bool,

    /// Force the binary sub-variant (binary STL, binary PLY)
    #[arg(long)]
    binary: bool,

    /// Also save the generated scene tree as RON
    #[arg(long)]
    save_scene: Option<PathBuf>,

    /// Export a previously saved scene instead of generating one
    #[arg(long, conflicts_with = "prompt")]
    from_scene: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins; the config file only supplies the default level
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let mut options = config.generation.to_options();
    if let Some(style) = cli.style {
        options = options.with_style(style);
    }
    if let Some(quality) = cli.quality {
        options = options.with_quality(quality);
    }
    if let Some(complexity) = cli.complexity {
        options = options.with_complexity(complexity);
    }

    let (scene, hint) = match (&cli.from_scene, &cli.prompt) {
        (Some(path), _) => {
            let scene = SceneNode::load(path)
                .with_context(|| format!("Failed to load scene from {}", path.display()))?;
            let errors = SceneValidator::validate_with_limit(&scene, config.limits.max_nodes);
            if let Some(error) = errors.first() {
                bail!("Loaded scene is invalid: {}", error);
            }
            let hint = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("model")
                .to_string();
            (scene, hint)
        }
        (None, Some(prompt)) => {
            let scene = run_generation(prompt, &options)?;
            let hint = scene.name.clone().unwrap_or_else(|| "model".to_string());
            (scene, hint)
        }
        (None, None) => bail!("Either a prompt or --from-scene is required"),
    };

    if let Some(path) = &cli.save_scene {
        scene
            .save(path)
            .with_context(|| format!("Failed to save scene to {}", path.display()))?;
        log::info!("Saved scene to {}", path.display());
    }

    let format_tag = cli.format.as_deref().unwrap_or(&config.export.format);
    let format: Format = format_tag
        .parse()
        .with_context(|| format!("Cannot export as '{}'", format_tag))?;

    let encoding = if cli.text {
        Some(Encoding::Text)
    } else if cli.binary {
        Some(Encoding::Binary)
    } else {
        None
    };

    let artifact = export_with(&scene, format, &hint, &ExportOptions { encoding })
        .with_context(|| format!("Export to {} failed", format))?;

    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.output_dir).join(&artifact.filename));
    let size = artifact.payload.len();
    let mime = artifact.mime;
    let bytes = match artifact.payload {
        Payload::Binary(bytes) => bytes,
        Payload::Text(text) => text.into_bytes(),
    };
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote {} ({} bytes, {})", path.display(), size, mime);
    println!("{}", path.display());
    Ok(())
}

/// Drive the simulated generation service to completion
fn run_generation(prompt: &str, options: &GenerationOptions) -> Result<SceneNode> {
    let mut service = SimulatedGeneration::new();
    let job = service.submit(prompt, options);

    loop {
        match service.advance(job) {
            Some(JobUpdate::Progress(event)) => {
                println!("[{}/{}] {}...", event.step, event.total, event.message);
            }
            Some(JobUpdate::Completed { scene }) => return Ok(scene),
            Some(JobUpdate::Failed { reason }) => bail!("Generation failed: {}", reason),
            None => bail!("Generation job disappeared before completing"),
        }
    }
}
