pub mod camera;
pub mod collection;
pub mod components;
pub mod entity;
pub mod picking;

pub use collection::*;
