pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod traits;

pub use crate::core::{
    Canvas, DisplayList, DrawOp, Fixed, MemorySurface, PixelRecorder, Printable, Radix,
};
pub use crate::traits::{ByteSink, PixelSurface};
