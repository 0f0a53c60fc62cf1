use crate::marcher::primitives::{Renderable, SceneObject};
use crate::math::{dot, mix, powu, V4};

pub const MAX_OBJECTS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    pub distance: f64,
    pub index: usize,
}

/// Immutable scene description. Built through [`crate::config::SceneConfig`],
/// which enforces the object capacity and normalizes the light direction.
#[derive(Clone, Debug)]
pub struct Scene {
    pub(crate) camera_position: V4,
    pub(crate) objects: Vec<SceneObject>,
    pub(crate) light_direction: V4,
    pub(crate) light_power: u32,
    pub(crate) light_color: V4,
    pub(crate) fog_color: V4,
    pub(crate) sky_color: V4,
    pub(crate) fog_distance: f64,
}

impl Scene {
    pub fn camera_position(&self) -> V4 {
        self.camera_position
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn light_direction(&self) -> V4 {
        self.light_direction
    }

    pub fn fog_color(&self) -> V4 {
        self.fog_color
    }

    /// Linear scan for the smallest signed distance at `x`.
    ///
    /// A later object only wins with a strictly smaller distance, so ties go
    /// to the lower index. Returns `None` for a scene without objects.
    pub fn nearest_object(&self, x: &V4) -> Option<Nearest> {
        let mut nearest: Option<Nearest> = None;
        for (index, object) in self.objects.iter().enumerate() {
            let distance = object.sdf(x);
            if nearest.map_or(true, |n| distance < n.distance) {
                nearest = Some(Nearest { distance, index });
            }
        }
        nearest
    }

    /// Background seen along `dir`: sky fading to fog toward the horizon plus
    /// a sun highlight opposite the light direction.
    pub fn sky_color(&self, dir: &V4) -> V4 {
        let fog = (1. - dir.y).clamp(0., 1.);
        let sun = -dot(&self.light_direction, dir);
        mix(&self.sky_color, &self.fog_color, fog) + powu(sun, self.light_power) * self.light_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::math::{normalize, v, B2};

    fn scene_of(objects: Vec<SceneObject>) -> Scene {
        SceneConfig {
            objects,
            ..SceneConfig::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn nearest_prefers_lower_index_on_ties() {
        let color = v(1., 1., 1.);
        let scene = scene_of(vec![
            SceneObject::sphere(v(-3., 0., 0.), 1., color),
            SceneObject::sphere(v(3., 0., 0.), 1., color),
        ]);
        let nearest = scene.nearest_object(&v(0., 0., 0.)).unwrap();
        assert_eq!(nearest, Nearest { distance: 2., index: 0 });
    }

    #[test]
    fn nearest_picks_minimum() {
        let scene = SceneConfig::default().build().unwrap();
        // just in front of the sphere at (1, 1, 2)
        let nearest = scene.nearest_object(&v(1., 1., 3.5)).unwrap();
        assert_eq!(nearest.index, 2);
        assert!((nearest.distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn nearest_on_empty_scene() {
        let scene = scene_of(vec![]);
        assert_eq!(scene.nearest_object(&v(0., 0., 0.)), None);
    }

    #[test]
    fn sky_overhead_has_no_fog() {
        let scene = SceneConfig::default().build().unwrap();
        let sky = scene.sky_color(&B2);
        let sun = powu(-dot(&scene.light_direction, &B2), 20);
        let expected = v(0.2, 0.5, 0.8) + sun * v(1., 0.8, 0.6);
        assert!((sky - expected).length() < 1e-12);
    }

    #[test]
    fn sky_below_horizon_is_pure_fog() {
        let scene = SceneConfig::default().build().unwrap();
        // 1 - y = 2 saturates the fog blend
        let down = v(0., -1., 0.);
        let sun = powu(-dot(&scene.light_direction, &down), 20);
        assert_eq!(scene.sky_color(&down), scene.fog_color + sun * scene.light_color);
    }

    #[test]
    fn sky_peaks_opposite_the_light() {
        let scene = SceneConfig::default().build().unwrap();
        let toward_sun = -scene.light_direction();
        let away = normalize(&v(-1., 0.2, 1.));
        assert!(scene.sky_color(&toward_sun).x > scene.sky_color(&away).x);
    }
}
