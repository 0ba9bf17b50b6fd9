//! Bounding shapes for pickable objects.
//!
//! Every shape is defined in its own local frame, centered on the origin the
//! way the renderer's primitive geometries are:
//!
//! | Shape | Local frame |
//! |-------|-------------|
//! | [`BoundingShape::Cone`] | apex at `+height/2` on Y, base disk at `-height/2` |
//! | [`BoundingShape::Sphere`] | centered on the origin |
//! | [`BoundingShape::Tetrahedron`] | vertices on the sphere of `radius` |
//!
//! A [`Transform`] places the shape in the world. Rays are moved into the
//! local frame without renormalizing, so hit distances come back in world
//! units along the original ray.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ray::Ray;

const EPSILON: f64 = 1e-12;

/// Translation plus per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position of the local origin.
    pub translation: DVec3,
    /// Per-axis scale.
    pub scale: DVec3,
}

impl Transform {
    /// Unscaled transform at `translation`.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            scale: DVec3::ONE,
        }
    }

    /// Same translation, different scale.
    pub fn with_scale(self, scale: DVec3) -> Self {
        Self { scale, ..self }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(DVec3::ZERO)
    }
}

/// The pickable volume of an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundingShape {
    /// Upright cone (rocks).
    Cone {
        /// Base radius.
        radius: f64,
        /// Base to apex.
        height: f64,
    },
    /// Sphere (bushes).
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Regular tetrahedron (crystals).
    Tetrahedron {
        /// Circumradius.
        radius: f64,
    },
}

impl BoundingShape {
    /// Reject non-positive dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            BoundingShape::Cone { radius, height } => {
                ConfigError::check_positive("cone.radius", radius)?;
                ConfigError::check_positive("cone.height", height)
            }
            BoundingShape::Sphere { radius } => ConfigError::check_positive("sphere.radius", radius),
            BoundingShape::Tetrahedron { radius } => {
                ConfigError::check_positive("tetrahedron.radius", radius)
            }
        }
    }

    /// Distance along `ray` to the first surface hit, if any.
    ///
    /// Hits behind the ray origin are ignored.
    pub fn intersect(&self, ray: &Ray, transform: &Transform) -> Option<f64> {
        if transform.scale.cmpeq(DVec3::ZERO).any() {
            return None;
        }
        let origin = (ray.origin - transform.translation) / transform.scale;
        let direction = ray.direction / transform.scale;

        match *self {
            BoundingShape::Cone { radius, height } => cone_hit(origin, direction, radius, height),
            BoundingShape::Sphere { radius } => sphere_hit(origin, direction, radius),
            BoundingShape::Tetrahedron { radius } => {
                let [a, b, c, d] = tetrahedron_vertices(radius);
                [[a, c, b], [a, d, c], [a, b, d], [b, c, d]]
                    .iter()
                    .filter_map(|[p, q, r]| triangle_hit(origin, direction, *p, *q, *r))
                    .min_by(f64::total_cmp)
            }
        }
    }
}

/// Smallest non-negative root of `a t^2 + b t + c = 0` accepted by `keep`.
fn nearest_root(a: f64, b: f64, c: f64, keep: impl Fn(f64) -> bool) -> Option<f64> {
    let roots: [Option<f64>; 2] = if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            [None, None]
        } else {
            [Some(-c / b), None]
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            [None, None]
        } else {
            let sq = disc.sqrt();
            let (t0, t1) = ((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a));
            [Some(t0.min(t1)), Some(t0.max(t1))]
        }
    };
    roots
        .into_iter()
        .flatten()
        .filter(|&t| t >= 0.0 && keep(t))
        .min_by(f64::total_cmp)
}

fn sphere_hit(o: DVec3, d: DVec3, radius: f64) -> Option<f64> {
    nearest_root(d.dot(d), 2.0 * o.dot(d), o.dot(o) - radius * radius, |_| true)
}

fn cone_hit(o: DVec3, d: DVec3, radius: f64, height: f64) -> Option<f64> {
    let half = height * 0.5;
    // Lateral surface: r(y) = radius * (half - y) / height for y in [-half, half].
    let k = radius / height;
    let k2 = k * k;
    let oy = half - o.y;
    let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
    let b = 2.0 * (o.x * d.x + o.z * d.z + k2 * oy * d.y);
    let c = o.x * o.x + o.z * o.z - k2 * oy * oy;
    let side = nearest_root(a, b, c, |t| {
        let y = o.y + d.y * t;
        (-half..=half).contains(&y)
    });

    let base = if d.y.abs() > EPSILON {
        let t = (-half - o.y) / d.y;
        let x = o.x + d.x * t;
        let z = o.z + d.z * t;
        (t >= 0.0 && x * x + z * z <= radius * radius).then_some(t)
    } else {
        None
    };

    match (side, base) {
        (Some(s), Some(b)) => Some(s.min(b)),
        (s, b) => s.or(b),
    }
}

fn tetrahedron_vertices(radius: f64) -> [DVec3; 4] {
    let s = radius / 3f64.sqrt();
    [
        DVec3::new(1.0, 1.0, 1.0) * s,
        DVec3::new(-1.0, -1.0, 1.0) * s,
        DVec3::new(-1.0, 1.0, -1.0) * s,
        DVec3::new(1.0, -1.0, -1.0) * s,
    ]
}

/// Two-sided Moller-Trumbore.
fn triangle_hit(o: DVec3, d: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let p = d.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv = 1.0 / det;
    let s = o - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = d.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t >= 0.0).then_some(t)
}
