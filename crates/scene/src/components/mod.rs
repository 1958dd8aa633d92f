pub mod color;
pub mod polygon;
pub mod properties;

pub use color::*;
pub use polygon::*;
pub use properties::*;
