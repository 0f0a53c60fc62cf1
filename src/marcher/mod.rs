use crate::math::{splat, Ray, V4};

pub mod primitives;
pub mod scene;

pub use primitives::{Ground, Renderable, SceneObject, Sphere, MAX_DISTANCE};
pub use scene::{Nearest, Scene, MAX_OBJECTS};

pub const DEFAULT_MAX_STEPS: u32 = 120;
pub const DEFAULT_MAX_BOUNCES: u32 = 12;
pub const DEFAULT_HIT_EPSILON: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    pub max_steps: u32,
    pub max_bounces: u32,
    pub hit_epsilon: f64,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            max_steps: DEFAULT_MAX_STEPS,
            max_bounces: DEFAULT_MAX_BOUNCES,
            hit_epsilon: DEFAULT_HIT_EPSILON,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f64,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Path {
    pub color: V4,
    pub bounces: u32,
    /// Set only when a trace missed. A zero bounce budget traces nothing and
    /// leaves this false.
    pub escaped: bool,
}

/// Marches from `x` along `dir` by the scene's distance bound.
///
/// A ray starting inside a surface would hit behind its origin and is
/// reported as a miss, like a ray that runs out of steps.
pub fn sphere_trace(ctx: &RenderContext, scene: &Scene, x: &V4, dir: &V4) -> Option<Hit> {
    let ray = Ray::new(*x, *dir);
    let mut distance = 0.;
    for _ in 0..ctx.max_steps {
        let nearest = scene.nearest_object(&ray.at(distance))?;
        distance += nearest.distance;
        if nearest.distance <= ctx.hit_epsilon {
            if distance < 0. {
                return None;
            }
            return Some(Hit {
                distance,
                index: nearest.index,
            });
        }
    }
    None
}

pub fn shade_path(ctx: &RenderContext, scene: &Scene, ray: &Ray) -> Path {
    let mut x = ray.x;
    let mut dir = ray.d;
    let mut mask = splat(1.);
    let mut bounces = 0;
    let mut escaped = false;

    while bounces < ctx.max_bounces {
        let hit = match sphere_trace(ctx, scene, &x, &dir) {
            Some(hit) => hit,
            None => {
                escaped = true;
                break;
            }
        };
        let object = &scene.objects[hit.index];
        let position = x + hit.distance * dir;
        let normal = object.normal(&position);
        let albedo = object.color(&position);

        let fog = (hit.distance / scene.fog_distance).clamp(0., 1.);
        mask *= albedo.mix(&scene.fog_color, fog);

        dir = dir.reflect(&normal);
        x = position + (2. * ctx.hit_epsilon) * dir;
        bounces += 1;
    }

    Path {
        color: scene.sky_color(&dir) * mask,
        bounces,
        escaped,
    }
}

/// Linear RGB, unbounded. Callers clamp before quantizing.
pub fn shade_pixel(ctx: &RenderContext, scene: &Scene, x: &V4, dir: &V4) -> V4 {
    shade_path(ctx, scene, &Ray::new(*x, *dir)).color
}
