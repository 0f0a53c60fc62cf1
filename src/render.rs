use crate::error::Error;
use crate::marcher::{shade_pixel, RenderContext, Scene};
use crate::math::{normalize, v, Ray, V4};
use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, instrument};

/// Distance from the eye to the image plane, in units of half the image height.
pub const FOCAL_LENGTH: f64 = 1.75;

/// Camera ray through pixel `(x, y)`, with `y` counted up from the bottom row.
pub fn pixel_ray(scene: &Scene, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let h = height as f64;
    let u = (2. * x as f64 - width as f64) / h;
    let v_ = (2. * y as f64 - h) / h;
    Ray::new(scene.camera_position(), normalize(&v(u, v_, -FOCAL_LENGTH)))
}

/// Scales a linear color to 8 bits, clamping each channel to `[0, 255]`.
pub fn to_rgb8(color: V4) -> Rgb<u8> {
    let quantize = |c: f64| (c * 255.).clamp(0., 255.) as u8;
    Rgb([quantize(color.x), quantize(color.y), quantize(color.z)])
}

/// Shades every pixel in parallel. Row 0 of the result is the top of the image.
#[instrument(level = "info", skip(ctx, scene))]
pub fn render(ctx: &RenderContext, scene: &Scene, width: u32, height: u32) -> Result<RgbImage, Error> {
    if width == 0 || height == 0 {
        return Err(Error::ImageSize { width, height });
    }
    let start = Instant::now();
    let w = width as usize;
    let pixel_vec: Vec<V4> = (0usize..(w * height as usize))
        .into_par_iter()
        .map(move |i| (i % w, i / w))
        .map(|(x, row)| {
            let y = height - 1 - row as u32;
            let ray = pixel_ray(scene, x as u32, y, width, height);
            shade_pixel(ctx, scene, &ray.x, &ray.d)
        })
        .collect();

    let mut img: RgbImage = ImageBuffer::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = to_rgb8(pixel_vec[(x + y * width) as usize]);
    }
    info!(
        elapsed_s = start.elapsed().as_secs_f32(),
        "render finished"
    );
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn center_pixel_looks_forward() {
        let scene = SceneConfig::default().build().unwrap();
        let ray = pixel_ray(&scene, 320, 240, 640, 480);
        assert_eq!(ray.x, v(0., 2., 7.));
        assert!((ray.d - v(0., 0., -1.)).length() < 1e-12);
    }

    #[test]
    fn bottom_left_pixel_points_down_left() {
        let scene = SceneConfig::default().build().unwrap();
        let ray = pixel_ray(&scene, 0, 0, 640, 480);
        assert!(ray.d.x < 0. && ray.d.y < 0. && ray.d.z < 0.);
        assert!((ray.d.length() - 1.).abs() < 1e-12);
    }

    #[test]
    fn quantize_clamps() {
        assert_eq!(to_rgb8(v(-0.5, 0.5, 3.)), Rgb([0, 127, 255]));
        assert_eq!(to_rgb8(v(1., 0., 0.999)), Rgb([255, 0, 254]));
    }

    #[test]
    fn rejects_empty_image() {
        let scene = SceneConfig::default().build().unwrap();
        let ctx = RenderContext::default();
        assert!(matches!(
            render(&ctx, &scene, 0, 10),
            Err(Error::ImageSize { .. })
        ));
    }

    #[test]
    fn renders_ground_below_sky_above() {
        let scene = SceneConfig {
            objects: vec![crate::marcher::SceneObject::ground(
                v(1., 0., 0.),
                v(1., 0., 0.),
                2.,
            )],
            ..SceneConfig::default()
        }
        .build()
        .unwrap();
        let ctx = RenderContext::default();
        let img = render(&ctx, &scene, 16, 12).unwrap();
        assert_eq!(img.dimensions(), (16, 12));
        // the bottom row sees the sky through a red mirror, the top row sees it directly
        let bottom = img.get_pixel(8, 11);
        let top = img.get_pixel(8, 0);
        assert!(bottom[0] > bottom[1]);
        assert!(top[1] > bottom[1]);
    }
}
