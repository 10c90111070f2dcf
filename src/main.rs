use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pixel_gfx::cli::Cli;
use pixel_gfx::config::SceneConfig;
use pixel_gfx::demo;
use pixel_gfx::{Canvas, MemorySurface};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut scene = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig {
            ops: demo::showcase(),
            ..SceneConfig::default()
        },
    };
    scene.apply_overrides(&cli);

    let surface = MemorySurface::try_new(scene.width, scene.height).context("invalid panel size")?;
    let mut canvas = Canvas::new(surface);
    scene.prepare(&mut canvas);
    let emitted = scene.ops.execute(&mut canvas);

    let surface = canvas.surface();
    info!(
        "{} ops, {} text bytes, {} lit pixels",
        scene.ops.len(),
        emitted,
        surface.pixels().iter().filter(|&&c| c != 0).count()
    );

    if !cli.no_ascii {
        print!("{}", surface.to_ascii());
    }

    Ok(())
}
