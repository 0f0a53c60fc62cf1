use crate::math::{dist, normalize, sub, v, O, V4};
use serde::{Deserialize, Serialize};

/// Distance reported by the [`SceneObject::Empty`] sentinel.
pub const MAX_DISTANCE: f64 = 9999999.0;

pub trait Renderable {
    fn sdf(&self, x: &V4) -> f64;
    fn normal(&self, x: &V4) -> V4;
    fn color(&self, x: &V4) -> V4;
}

/// Infinite y = 0 plane with a checkerboard albedo.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub color1: V4,
    pub color2: V4,
    pub grid_density: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: V4,
    pub radius: f64,
    pub color: V4,
}

impl Renderable for Ground {
    fn sdf(&self, x: &V4) -> f64 {
        x.y
    }

    // Faces whichever side the query point is on.
    fn normal(&self, x: &V4) -> V4 {
        if x.y >= 0. {
            v(0., 1., 0.)
        } else {
            v(0., -1., 0.)
        }
    }

    fn color(&self, x: &V4) -> V4 {
        let cell_x = (x.x * self.grid_density).floor() as i64;
        let cell_z = (x.z * self.grid_density).floor() as i64;
        if (cell_x & 1) ^ (cell_z & 1) != 0 {
            self.color1
        } else {
            self.color2
        }
    }
}

impl Renderable for Sphere {
    fn sdf(&self, x: &V4) -> f64 {
        dist(x, &self.center) - self.radius
    }

    fn normal(&self, x: &V4) -> V4 {
        normalize(&sub(x, &self.center))
    }

    fn color(&self, _x: &V4) -> V4 {
        self.color
    }
}

/// A scene primitive. `Empty` is an inert placeholder that is never nearest
/// to anything in a validated scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneObject {
    Ground(Ground),
    Sphere(Sphere),
    #[default]
    #[serde(skip)]
    Empty,
}

impl SceneObject {
    pub fn ground(color1: V4, color2: V4, grid_density: f64) -> Self {
        SceneObject::Ground(Ground {
            color1,
            color2,
            grid_density,
        })
    }

    pub fn sphere(center: V4, radius: f64, color: V4) -> Self {
        SceneObject::Sphere(Sphere {
            center,
            radius,
            color,
        })
    }
}

impl Renderable for SceneObject {
    fn sdf(&self, x: &V4) -> f64 {
        match self {
            SceneObject::Ground(g) => g.sdf(x),
            SceneObject::Sphere(s) => s.sdf(x),
            SceneObject::Empty => MAX_DISTANCE,
        }
    }

    fn normal(&self, x: &V4) -> V4 {
        match self {
            SceneObject::Ground(g) => g.normal(x),
            SceneObject::Sphere(s) => s.normal(x),
            SceneObject::Empty => O,
        }
    }

    fn color(&self, x: &V4) -> V4 {
        match self {
            SceneObject::Ground(g) => g.color(x),
            SceneObject::Sphere(s) => s.color(x),
            SceneObject::Empty => O,
        }
    }
}
