// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pixel-gfx")]
#[command(about = "Render a draw-op scene onto an in-memory panel", long_about = None)]
pub struct Cli {
    /// JSON scene file; the built-in demo scene is used when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Raw panel width (overrides the scene file)
    #[arg(long)]
    pub width: Option<i32>,

    /// Raw panel height (overrides the scene file)
    #[arg(long)]
    pub height: Option<i32>,

    /// Initial rotation, 0-3 (overrides the scene file)
    #[arg(long)]
    pub rotation: Option<u8>,

    /// Skip printing the panel as ASCII art
    #[arg(long = "no-ascii", default_value = "false")]
    pub no_ascii: bool,
}
