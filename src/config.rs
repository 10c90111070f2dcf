//! Scene files: panel geometry, text defaults and a list of draw ops.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::{Canvas, DisplayList};
use crate::traits::PixelSurface;

/// Default panel: a common 128x64 monochrome OLED.
pub const DEFAULT_WIDTH: i32 = 128;
pub const DEFAULT_HEIGHT: i32 = 64;

/// Top-level scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: i32,
    pub height: i32,
    pub rotation: u8,
    pub text: TextConfig,
    pub ops: DisplayList,
}

/// Text style applied before the ops run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub size: u8,
    pub wrap: bool,
    pub color: u16,
    /// `None` keeps the background transparent.
    pub background: Option<u16>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            rotation: 0,
            text: TextConfig::default(),
            ops: DisplayList::new(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 1,
            wrap: true,
            color: 0xFFFF,
            background: None,
        }
    }
}

impl SceneConfig {
    /// Read and parse a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing scene file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let scene = serde_json::from_str(raw)?;
        Ok(scene)
    }

    /// Command-line geometry wins over the file.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(rotation) = cli.rotation {
            self.rotation = rotation;
        }
    }

    /// Put a canvas into the scene's initial rotation and text style.
    pub fn prepare<S: PixelSurface>(&self, canvas: &mut Canvas<S>) {
        canvas.set_rotation(self.rotation);
        canvas.set_text_size(self.text.size);
        canvas.set_text_wrap(self.text.wrap);
        match self.text.background {
            Some(bg) => canvas.set_text_color_with_background(self.text.color, bg),
            None => canvas.set_text_color(self.text.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DrawOp, PixelRecorder};

    #[test]
    fn empty_object_uses_defaults() {
        let scene = SceneConfig::from_json("{}").unwrap();
        assert_eq!(scene, SceneConfig::default());
    }

    #[test]
    fn partial_text_block() {
        let scene = SceneConfig::from_json(r#"{"text": {"size": 2, "background": 0}}"#).unwrap();
        assert_eq!(scene.text.size, 2);
        assert!(scene.text.wrap);
        assert_eq!(scene.text.background, Some(0));
    }

    #[test]
    fn ops_are_parsed() {
        let scene = SceneConfig::from_json(
            r#"{"width": 32, "height": 16, "ops": [{"op": "clear", "color": 0}]}"#,
        )
        .unwrap();
        assert_eq!((scene.width, scene.height), (32, 16));
        assert_eq!(scene.ops.ops(), &[DrawOp::Clear { color: 0 }]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneConfig::from_json("{\"width\": \"wide\"}").is_err());
    }

    #[test]
    fn prepare_sets_style() {
        let scene = SceneConfig {
            rotation: 1,
            text: TextConfig {
                size: 0,
                wrap: false,
                color: 3,
                background: Some(4),
            },
            ..SceneConfig::default()
        };
        let mut canvas = Canvas::new(PixelRecorder::new(128, 64));
        scene.prepare(&mut canvas);
        assert_eq!(canvas.rotation(), 1);
        assert_eq!(canvas.text_size(), 1);
        assert!(!canvas.text_wrap());
        assert_eq!(canvas.state().text.background, 4);
    }
}
