pub mod camera;
pub mod config;
pub mod events;
pub mod headless;
pub mod interaction;
pub mod manager;
pub mod panel;
pub mod picking;
pub mod surface;

pub use config::*;
pub use manager::*;
pub use surface::*;
