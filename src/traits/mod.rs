pub mod sink;
pub mod surface;

pub use sink::*;
pub use surface::*;
