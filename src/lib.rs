pub mod config;
pub mod error;
pub mod marcher;
pub mod math;
pub mod render;

pub use config::SceneConfig;
pub use error::{Error, SceneError};
pub use marcher::{shade_pixel, RenderContext, Scene, SceneObject};
