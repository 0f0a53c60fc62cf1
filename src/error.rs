use std::io;
use thiserror::Error;

/// Reasons a scene description is rejected before rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("scene has {count} objects, at most {max} are supported")]
    TooManyObjects { count: usize, max: usize },

    #[error("sphere #{index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("ground #{index} has invalid grid density {density}")]
    InvalidGridDensity { index: usize, density: f64 },

    #[error("object #{index} is empty")]
    EmptyObject { index: usize },

    #[error("light direction has no length")]
    DegenerateLightDirection,

    #[error("fog distance must be positive, got {0}")]
    InvalidFogDistance(f64),

    #[error("light power {power} exceeds {max}")]
    InvalidLightPower { power: u32, max: u32 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("scene file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("invalid image size {width}x{height}")]
    ImageSize { width: u32, height: u32 },
}
