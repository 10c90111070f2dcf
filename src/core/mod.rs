pub mod canvas;
pub mod display_list;
pub mod font;
pub mod format;
pub mod memory_surface;
pub mod raster;
pub mod recorder;
pub mod text;

pub use canvas::{Canvas, CanvasState, Extent};
pub use display_list::{DisplayList, DrawOp};
pub use format::{Fixed, Printable, Radix};
pub use memory_surface::MemorySurface;
pub use raster::{BitOrder, Corners, Halves};
pub use recorder::PixelRecorder;
pub use text::TextState;
