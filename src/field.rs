//! The particle field: a fixed-size point cloud advanced once per frame.
//!
//! The field owns both the per-particle motion state and a flat `x, y, z`
//! position buffer the renderer reads directly. The buffer is rewritten in
//! place on every [`ParticleField::advance`].
//!
//! # Example
//!
//! ```ignore
//! use snowfield::prelude::*;
//!
//! let mut field = FieldConfig::new()
//!     .with_count(10_000)
//!     .with_policy(MotionPolicy::blizzard())
//!     .with_center(DVec3::new(0.0, -0.5, 0.0))
//!     .with_seed(7)
//!     .build()?;
//!
//! // In the frame loop:
//! field.advance(time.delta());
//! renderer.upload(field.positions());
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::MotionPolicy;
use crate::spawn::{clock_seed, Bounds, SpawnContext};

/// One simulated snowflake.
///
/// What `angle`, `speed` and `vertical_velocity` mean depends on the
/// field's [`MotionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World position.
    pub position: DVec3,
    /// Angle around the field center, in radians.
    pub angle: f64,
    /// Angular speed, or fall rate for falling policies.
    pub speed: f64,
    /// Vertical velocity, or bob rate for drifting policies.
    pub vertical_velocity: f64,
}

/// Particle field configuration.
///
/// Use method chaining to configure, then call [`FieldConfig::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles.
    pub count: usize,
    /// Motion policy.
    pub policy: MotionPolicy,
    /// Spawn ranges.
    pub bounds: Bounds,
    /// Field center.
    pub center: DVec3,
    /// RNG seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl FieldConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the motion policy.
    pub fn with_policy(mut self, policy: MotionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the spawn ranges.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the field center.
    pub fn with_center(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    /// Pin the RNG seed for reproducible spawns.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the config and spawn the field.
    pub fn build(&self) -> Result<ParticleField, ConfigError> {
        let seed = self.seed.unwrap_or_else(clock_seed);
        ParticleField::with_seed(self.count, self.policy, self.bounds, self.center, seed)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            policy: MotionPolicy::default(),
            bounds: Bounds::default(),
            center: DVec3::ZERO,
            seed: None,
        }
    }
}

/// A fixed-size set of particles moved by one [`MotionPolicy`].
///
/// The particle count never changes after construction.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Flat `x, y, z` buffer, `3 * particles.len()` long.
    positions: Vec<f64>,
    policy: MotionPolicy,
    bounds: Bounds,
    center: DVec3,
    /// Accumulated `dt` of every accepted `advance`.
    elapsed: f64,
    steps: u64,
}

impl ParticleField {
    /// Spawn `count` particles, seeding from the system clock.
    pub fn new(
        count: usize,
        policy: MotionPolicy,
        bounds: Bounds,
        center: DVec3,
    ) -> Result<Self, ConfigError> {
        Self::with_seed(count, policy, bounds, center, clock_seed())
    }

    /// Spawn `count` particles from a fixed seed.
    ///
    /// The same arguments always produce the same field.
    pub fn with_seed(
        count: usize,
        policy: MotionPolicy,
        bounds: Bounds,
        center: DVec3,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyField(count));
        }
        policy.validate()?;
        bounds.validate()?;
        ConfigError::check_finite("center.x", center.x)?;
        ConfigError::check_finite("center.y", center.y)?;
        ConfigError::check_finite("center.z", center.z)?;

        let particles: Vec<Particle> = (0..count)
            .map(|i| {
                let mut ctx = SpawnContext::new(i, seed, bounds, center);
                policy.init_particle(&mut ctx)
            })
            .collect();
        let positions = particles
            .iter()
            .flat_map(|p| p.position.to_array())
            .collect();

        log::info!(
            "spawned {} particles ({}, seed {})",
            count,
            policy.name(),
            seed
        );

        Ok(Self {
            particles,
            positions,
            policy,
            bounds,
            center,
            elapsed: 0.0,
            steps: 0,
        })
    }

    /// Advance every particle by one step of `dt` seconds.
    ///
    /// A `dt` that is zero, negative or NaN leaves the field untouched.
    pub fn advance(&mut self, dt: f64) {
        if !(dt > 0.0) {
            return;
        }
        self.elapsed += dt;
        self.steps += 1;

        let (policy, elapsed, center) = (self.policy, self.elapsed, self.center);
        for (p, out) in self
            .particles
            .iter_mut()
            .zip(self.positions.chunks_exact_mut(3))
        {
            policy.step(p, dt, elapsed, center);
            out.copy_from_slice(&p.position.to_array());
        }
    }

    /// Flat `x, y, z` positions, `3 * len()` values.
    #[inline]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// The position buffer as raw bytes, for zero-copy upload.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Single-precision copy of the position buffer for renderers that
    /// take `f32` vertex data.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.positions.iter().map(|&v| v as f32).collect()
    }

    /// Per-particle state.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always `false`; a field holds at least one particle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The motion policy.
    #[inline]
    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    /// The spawn ranges.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The field center.
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Total simulated time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of accepted `advance` calls.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, policy: MotionPolicy) -> ParticleField {
        FieldConfig::new()
            .with_count(count)
            .with_policy(policy)
            .with_seed(1234)
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = FieldConfig::new().with_count(0).build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyField(0));
    }

    #[test]
    fn test_buffer_matches_particles() {
        let mut f = field(50, MotionPolicy::drift());
        f.advance(0.016);
        for (i, p) in f.particles().iter().enumerate() {
            assert_eq!(&f.positions()[i * 3..i * 3 + 3], &p.position.to_array());
        }
        assert_eq!(f.position_bytes().len(), 50 * 3 * 8);
        assert_eq!(f.positions_f32().len(), 150);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = field(20, MotionPolicy::blizzard());
        let b = field(20, MotionPolicy::blizzard());
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut f = field(10, MotionPolicy::orbit(5.0));
        let before = f.positions().to_vec();
        f.advance(-1.0);
        f.advance(f64::NAN);
        f.advance(0.0);
        assert_eq!(f.positions(), &before[..]);
        assert_eq!(f.steps(), 0);
        assert_eq!(f.elapsed(), 0.0);
    }

    #[test]
    fn test_elapsed_accumulates() {
        let mut f = field(1, MotionPolicy::drift());
        f.advance(0.25);
        f.advance(0.5);
        assert!((f.elapsed() - 0.75).abs() < 1e-12);
        assert_eq!(f.steps(), 2);
    }

    #[test]
    fn test_center_offsets_spawn() {
        let center = DVec3::new(100.0, 0.0, -100.0);
        let f = FieldConfig::new()
            .with_count(30)
            .with_center(center)
            .with_seed(3)
            .build()
            .unwrap();
        for p in f.particles() {
            let r = (p.position.x - center.x).hypot(p.position.z - center.z);
            assert!(r > 5.0 - 1e-9 && r < 50.0 + 1e-9);
        }
        assert_eq!(f.center(), center);
    }

    #[test]
    fn test_non_finite_center_rejected() {
        let err = FieldConfig::new()
            .with_center(DVec3::new(f64::NAN, 0.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { .. }));
    }
}
