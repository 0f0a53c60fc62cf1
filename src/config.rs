use crate::error::{Error, SceneError};
use crate::marcher::{Scene, SceneObject, MAX_OBJECTS};
use crate::math::{normalize, v, O, V4};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Largest sun highlight exponent accepted; `powu` is linear in it.
pub const MAX_LIGHT_POWER: u32 = 1024;

/// Scene description as written in a JSON scene file.
///
/// Fields missing from a file take their value from the built-in scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: V4,
    /// Direction the light travels; normalized by [`SceneConfig::build`].
    pub light_direction: V4,
    /// Exponent of the sun highlight, higher is sharper.
    pub light_power: u32,
    pub light_color: V4,
    pub fog_color: V4,
    pub fog_distance: f64,
    pub sky_color: V4,
    pub objects: Vec<SceneObject>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            camera: v(0., 2., 7.),
            light_direction: v(1., -1., 1.),
            light_power: 20,
            light_color: v(1., 0.8, 0.6),
            fog_color: v(0.8, 0.9, 1.),
            fog_distance: 100.,
            sky_color: v(0.2, 0.5, 0.8),
            objects: vec![
                SceneObject::ground(v(1., 1., 1.), v(0.5, 0.5, 0.5), 2.),
                SceneObject::sphere(v(0., 2., 0.), 2., v(0.75, 1., 0.1)),
                SceneObject::sphere(v(1., 1., 2.), 1., v(0.1, 0.75, 1.)),
                SceneObject::sphere(v(-3., 1., 0.), 1., v(1., 0.1, 0.75)),
            ],
        }
    }
}

impl SceneConfig {
    pub fn from_json(src: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(src)?)
    }

    #[instrument(level = "info")]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_json(&src)?;
        debug!(objects = config.objects.len(), "scene file parsed");
        Ok(config)
    }

    /// Checks the description and freezes it into a [`Scene`].
    pub fn build(self) -> Result<Scene, SceneError> {
        if self.objects.len() > MAX_OBJECTS {
            return Err(SceneError::TooManyObjects {
                count: self.objects.len(),
                max: MAX_OBJECTS,
            });
        }
        for (index, object) in self.objects.iter().enumerate() {
            match object {
                SceneObject::Sphere(s) if !(s.radius.is_finite() && s.radius > 0.) => {
                    return Err(SceneError::InvalidRadius {
                        index,
                        radius: s.radius,
                    });
                }
                SceneObject::Ground(g) if !(g.grid_density.is_finite() && g.grid_density > 0.) => {
                    return Err(SceneError::InvalidGridDensity {
                        index,
                        density: g.grid_density,
                    });
                }
                SceneObject::Empty => return Err(SceneError::EmptyObject { index }),
                _ => {}
            }
        }
        let light_direction = normalize(&self.light_direction);
        if light_direction == O {
            return Err(SceneError::DegenerateLightDirection);
        }
        if !(self.fog_distance.is_finite() && self.fog_distance > 0.) {
            return Err(SceneError::InvalidFogDistance(self.fog_distance));
        }
        if self.light_power > MAX_LIGHT_POWER {
            return Err(SceneError::InvalidLightPower {
                power: self.light_power,
                max: MAX_LIGHT_POWER,
            });
        }

        Ok(Scene {
            camera_position: self.camera,
            objects: self.objects,
            light_direction,
            light_power: self.light_power,
            light_color: self.light_color,
            fog_color: self.fog_color,
            sky_color: self.sky_color,
            fog_distance: self.fog_distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::splat;

    #[test]
    fn default_scene_builds() {
        let scene = SceneConfig::default().build().unwrap();
        assert_eq!(scene.objects().len(), 4);
        assert_eq!(scene.camera_position(), v(0., 2., 7.));
        assert!((scene.light_direction().length() - 1.).abs() < 1e-12);
    }

    #[test]
    fn rejects_too_many_objects() {
        let config = SceneConfig {
            objects: vec![SceneObject::sphere(O, 1., splat(1.)); MAX_OBJECTS + 1],
            ..SceneConfig::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            SceneError::TooManyObjects { count: 17, max: 16 }
        );
    }

    #[test]
    fn accepts_full_capacity() {
        let config = SceneConfig {
            objects: vec![SceneObject::sphere(O, 1., splat(1.)); MAX_OBJECTS],
            ..SceneConfig::default()
        };
        assert!(config.build().is_ok());
    }

    #[test]
    fn rejects_bad_primitives() {
        let mut config = SceneConfig::default();
        config.objects[2] = SceneObject::sphere(O, 0., splat(1.));
        assert_eq!(
            config.clone().build().unwrap_err(),
            SceneError::InvalidRadius {
                index: 2,
                radius: 0.
            }
        );
        config.objects[2] = SceneObject::Empty;
        assert_eq!(
            config.clone().build().unwrap_err(),
            SceneError::EmptyObject { index: 2 }
        );
        config.objects[2] = SceneObject::ground(splat(1.), splat(0.), -1.);
        assert!(matches!(
            config.build().unwrap_err(),
            SceneError::InvalidGridDensity { index: 2, .. }
        ));
    }

    #[test]
    fn rejects_bad_lighting() {
        let config = SceneConfig {
            light_direction: O,
            ..SceneConfig::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            SceneError::DegenerateLightDirection
        );
        let config = SceneConfig {
            fog_distance: 0.,
            ..SceneConfig::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            SceneError::InvalidFogDistance(0.)
        );
    }

    #[test]
    fn rejects_huge_light_power() {
        let config = SceneConfig::from_json(r#"{"light_power": 4000000000}"#).unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            SceneError::InvalidLightPower {
                power: 4_000_000_000,
                max: MAX_LIGHT_POWER
            }
        );
        let config = SceneConfig {
            light_power: MAX_LIGHT_POWER,
            ..SceneConfig::default()
        };
        assert!(config.build().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{"light_power": 4, "camera": [1, 2, 3]}"#).unwrap();
        assert_eq!(config.light_power, 4);
        assert_eq!(config.camera, v(1., 2., 3.));
        assert_eq!(config.objects, SceneConfig::default().objects);
    }

    #[test]
    fn rejects_unknown_object_type() {
        let err = SceneConfig::from_json(r#"{"objects": [{"type": "torus"}]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
