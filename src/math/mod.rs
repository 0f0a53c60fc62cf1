use serde::{Deserialize, Serialize};
use std::ops;

/// Lengths below this are treated as zero by [`normalize`].
pub const ZERO_LENGTH: f64 = 1e-5;

/// Homogeneous vector used for points, directions and RGB colors alike.
///
/// Points and directions keep `w` at zero. Serialized as `[x, y, z]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct V4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl From<[f64; 3]> for V4 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        v(x, y, z)
    }
}

impl From<V4> for [f64; 3] {
    fn from(a: V4) -> Self {
        [a.x, a.y, a.z]
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub x: V4,
    pub d: V4,
}

impl Ray {
    pub fn new(x: V4, d: V4) -> Self {
        Ray { x, d }
    }

    pub fn at(&self, t: f64) -> V4 {
        self.x + t * self.d
    }
}

pub fn v(x: f64, y: f64, z: f64) -> V4 {
    V4 { x, y, z, w: 0. }
}

pub fn splat(s: f64) -> V4 {
    V4 {
        x: s,
        y: s,
        z: s,
        w: s,
    }
}

pub fn add(x: &V4, y: &V4) -> V4 {
    V4 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
        w: x.w + y.w,
    }
}

pub fn sub(x: &V4, y: &V4) -> V4 {
    V4 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
        w: x.w - y.w,
    }
}

pub fn mul(scalar: f64, x: &V4) -> V4 {
    V4 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
        w: x.w * scalar,
    }
}

pub fn hadamard(x: &V4, y: &V4) -> V4 {
    V4 {
        x: x.x * y.x,
        y: x.y * y.y,
        z: x.z * y.z,
        w: x.w * y.w,
    }
}

pub fn quotient(x: &V4, y: &V4) -> V4 {
    V4 {
        x: x.x / y.x,
        y: x.y / y.y,
        z: x.z / y.z,
        w: x.w / y.w,
    }
}

pub fn dot(x: &V4, y: &V4) -> f64 {
    x.x * y.x + x.y * y.y + x.z * y.z + x.w * y.w
}

pub fn abs2(x: &V4) -> f64 {
    dot(x, x)
}

pub fn abs(x: &V4) -> f64 {
    abs2(x).sqrt()
}

pub fn dist(x: &V4, y: &V4) -> f64 {
    abs(&sub(x, y))
}

/// Unit vector in the direction of `x`, or [`O`] when `x` is shorter than [`ZERO_LENGTH`].
pub fn normalize(x: &V4) -> V4 {
    let len = abs(x);
    if len.abs() < ZERO_LENGTH {
        return O;
    }
    mul(1. / len, x)
}

// right-handed, w = 0
pub fn cross(v1: &V4, v2: &V4) -> V4 {
    v(
        v1.y * v2.z - v1.z * v2.y,
        v1.z * v2.x - v1.x * v2.z,
        v1.x * v2.y - v1.y * v2.x,
    )
}

pub fn reflect(x: &V4, normal: &V4) -> V4 {
    sub(x, &mul(2. * dot(normal, x), normal))
}

pub fn mix(x: &V4, y: &V4, a: f64) -> V4 {
    add(&mul(1. - a, x), &mul(a, y))
}

/// `base` raised to a non-negative integer power by repeated multiplication.
///
/// Exact for integer exponents; a negative base keeps its sign for odd `exp`.
pub fn powu(base: f64, exp: u32) -> f64 {
    let mut ret = 1.;
    for _ in 0..exp {
        ret *= base;
    }
    ret
}

impl V4 {
    pub fn dot(&self, rhs: &V4) -> f64 {
        dot(self, rhs)
    }

    pub fn length(&self) -> f64 {
        abs(self)
    }

    pub fn distance(&self, rhs: &V4) -> f64 {
        dist(self, rhs)
    }

    pub fn normalize(&self) -> V4 {
        normalize(self)
    }

    pub fn cross(&self, rhs: &V4) -> V4 {
        cross(self, rhs)
    }

    pub fn reflect(&self, normal: &V4) -> V4 {
        reflect(self, normal)
    }

    pub fn mix(&self, rhs: &V4, a: f64) -> V4 {
        mix(self, rhs, a)
    }
}

impl ops::Neg for V4 {
    type Output = V4;

    fn neg(self) -> V4 {
        mul(-1., &self)
    }
}

impl ops::Add<V4> for V4 {
    type Output = V4;

    fn add(self, rhs: V4) -> V4 {
        add(&self, &rhs)
    }
}

impl ops::Sub<V4> for V4 {
    type Output = V4;

    fn sub(self, rhs: V4) -> V4 {
        sub(&self, &rhs)
    }
}

impl ops::Mul<V4> for f64 {
    type Output = V4;

    fn mul(self, rhs: V4) -> Self::Output {
        mul(self, &rhs)
    }
}

impl ops::Mul<f64> for V4 {
    type Output = V4;

    fn mul(self, rhs: f64) -> Self::Output {
        mul(rhs, &self)
    }
}

impl ops::Mul<V4> for V4 {
    type Output = V4;

    fn mul(self, rhs: V4) -> Self::Output {
        hadamard(&self, &rhs)
    }
}

impl ops::Div<V4> for V4 {
    type Output = V4;

    fn div(self, rhs: V4) -> Self::Output {
        quotient(&self, &rhs)
    }
}

impl ops::Div<f64> for V4 {
    type Output = V4;

    fn div(self, rhs: f64) -> Self::Output {
        mul(1. / rhs, &self)
    }
}

impl ops::AddAssign<V4> for V4 {
    fn add_assign(&mut self, rhs: V4) {
        *self = add(self, &rhs);
    }
}

impl ops::SubAssign<V4> for V4 {
    fn sub_assign(&mut self, rhs: V4) {
        *self = sub(self, &rhs);
    }
}

impl ops::MulAssign<V4> for V4 {
    fn mul_assign(&mut self, rhs: V4) {
        *self = hadamard(self, &rhs);
    }
}

impl ops::MulAssign<f64> for V4 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = mul(rhs, self);
    }
}

pub const B1: V4 = V4 {
    x: 1.,
    y: 0.,
    z: 0.,
    w: 0.,
};

pub const B2: V4 = V4 {
    x: 0.,
    y: 1.,
    z: 0.,
    w: 0.,
};

pub const B3: V4 = V4 {
    x: 0.,
    y: 0.,
    z: 1.,
    w: 0.,
};

pub const O: V4 = V4 {
    x: 0.,
    y: 0.,
    z: 0.,
    w: 0.,
};
