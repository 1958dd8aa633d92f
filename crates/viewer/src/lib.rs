pub mod app;
pub mod basemap;
pub mod config;
pub mod demo;
pub mod drawing;
pub mod export;
pub mod host;
pub mod viewer;

pub use app::*;
pub use basemap::*;
pub use config::*;
pub use drawing::*;
pub use host::*;
pub use viewer::*;
