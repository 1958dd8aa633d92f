pub mod ecef;
pub mod ellipsoid;
pub mod geodesy;
pub mod ray;
pub mod vec;

pub use ecef::*;
pub use ellipsoid::*;
pub use geodesy::*;
pub use ray::*;
pub use vec::*;
