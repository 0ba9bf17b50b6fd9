//! Spawn context for particle initialization.
//!
//! Every particle is initialized exactly once, when its field is built. The
//! motion policy receives a [`SpawnContext`] carrying the particle's index,
//! the field's [`Bounds`] and center, and a seeded random source.

use glam::DVec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::ConfigError;

/// Spatial ranges particles are spawned within, relative to the field center.
///
/// Radial policies place particles on an annulus `inner_radius..outer_radius`
/// in the XZ plane; square policies use `outer_radius` as the half-extent.
/// Heights are drawn from `floor..ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Minimum horizontal distance from the center.
    pub inner_radius: f64,
    /// Maximum horizontal distance from the center.
    pub outer_radius: f64,
    /// Lowest spawn height.
    pub floor: f64,
    /// Highest spawn height.
    pub ceiling: f64,
}

impl Bounds {
    /// Bounds for an annulus of the given radii and heights.
    pub fn new(inner_radius: f64, outer_radius: f64, floor: f64, ceiling: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
            floor,
            ceiling,
        }
    }

    /// Reject inverted, negative or non-finite ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("bounds.inner_radius", self.inner_radius)?;
        ConfigError::check_range("bounds radius", self.inner_radius, self.outer_radius)?;
        ConfigError::check_range("bounds height", self.floor, self.ceiling)?;
        Ok(())
    }
}

impl Default for Bounds {
    /// The blizzard ring around the yeti: 5 to 50 units out, 2 to 14 up.
    fn default() -> Self {
        Self::new(5.0, 50.0, 2.0, 14.0)
    }
}

/// Derive a seed from the system clock for runs that don't pin one.
pub(crate) fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// Context provided to [`MotionPolicy::init_particle`](crate::MotionPolicy::init_particle).
///
/// Wraps a per-particle RNG so initialization is reproducible for a given
/// field seed regardless of how many draws other particles made.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(0, 7, Bounds::default(), DVec3::ZERO);
/// let angle = ctx.random_angle();
/// let distance = ctx.random_range(ctx.bounds.inner_radius, ctx.bounds.outer_radius);
/// ```
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: usize,
    /// Spawn ranges of the field.
    pub bounds: Bounds,
    /// Center of the field.
    pub center: DVec3,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context for one particle of a field seeded with `seed`.
    pub fn new(index: usize, seed: u64, bounds: Bounds, center: DVec3) -> Self {
        Self {
            index,
            bounds,
            center,
            rng: SmallRng::seed_from_u64(seed ^ index as u64),
        }
    }

    /// Uniform f64 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Uniform f64 in `[min, max)`. A degenerate range yields `min`.
    #[inline]
    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// `1.0` or `-1.0` with equal probability.
    #[inline]
    pub fn random_sign(&mut self) -> f64 {
        if self.random() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform angle in `[0, TAU)`.
    #[inline]
    pub fn random_angle(&mut self) -> f64 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random height within the bounds.
    pub fn random_height(&mut self) -> f64 {
        self.random_range(self.bounds.floor, self.bounds.ceiling)
    }

    /// Random distance within the bounds' annulus.
    pub fn random_distance(&mut self) -> f64 {
        self.random_range(self.bounds.inner_radius, self.bounds.outer_radius)
    }

    /// Random point in the XZ square of half-extent `bounds.outer_radius`
    /// around the center, at height `y`.
    pub fn random_in_square(&mut self, y: f64) -> DVec3 {
        let half = self.bounds.outer_radius;
        DVec3::new(
            self.center.x + self.random_range(-half, half),
            y,
            self.center.z + self.random_range(-half, half),
        )
    }
}

/// Point on the horizontal circle of `radius` around `center`, at height `y`.
#[inline]
pub fn ring_point(center: DVec3, angle: f64, radius: f64, y: f64) -> DVec3 {
    DVec3::new(
        center.x + angle.cos() * radius,
        y,
        center.z + angle.sin() * radius,
    )
}
