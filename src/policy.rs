//! Motion policies for the particle field.
//!
//! A policy decides two things: where a particle starts
//! ([`MotionPolicy::init_particle`]) and how it moves each step
//! ([`MotionPolicy::step`]). Policies are plain data, selected once when the
//! field is built.
//!
//! | Policy | Horizontal motion | Vertical motion | Scaled by `dt` |
//! |--------|-------------------|-----------------|----------------|
//! | [`MotionPolicy::RadialSpin`] | spin about the center at fixed radius | none | no |
//! | [`MotionPolicy::VerticalFall`] | none | fall, wrap to ceiling | no |
//! | [`MotionPolicy::OrbitBob`] | orbit at a fixed radius | sinusoidal bob | yes |
//! | [`MotionPolicy::Drift`] | spin at the particle's own radius | sinusoidal bob | bob phase only |
//!
//! The unscaled policies assume the driver calls them once per fixed frame.
//!
//! # Example
//!
//! ```ignore
//! let field = FieldConfig::new()
//!     .with_count(10_000)
//!     .with_policy(MotionPolicy::snowfall())
//!     .build()?;
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::Particle;
use crate::spawn::{ring_point, SpawnContext};

/// How particles in a field move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Spin around the field center in the XZ plane.
    ///
    /// Each particle's direction (clockwise or counter-clockwise) is picked
    /// at spawn; the angle advances by `angular_speed` radians per step.
    RadialSpin {
        /// Radians per step.
        angular_speed: f64,
    },

    /// Fall straight down and reappear at `ceiling` once below the ground.
    VerticalFall {
        /// Slowest fall, in units per step.
        min_fall_rate: f64,
        /// Fastest fall, in units per step.
        max_fall_rate: f64,
        /// Wrap height.
        ceiling: f64,
    },

    /// Orbit the center on a circle of `radius` while bobbing up and down.
    OrbitBob {
        /// Orbit radius shared by all particles.
        radius: f64,
        /// Slowest orbit, in radians per second.
        min_speed: f64,
        /// Fastest orbit, in radians per second.
        max_speed: f64,
        /// Height change per step at the crest of the bob.
        bob_amplitude: f64,
    },

    /// Spin at the spawn radius by a fixed per-particle step while bobbing
    /// at an independent per-particle rate.
    Drift {
        /// Slowest spin, in radians per step.
        min_angular_speed: f64,
        /// Fastest spin, in radians per step.
        max_angular_speed: f64,
        /// Slowest bob rate, in radians per second.
        min_bob_rate: f64,
        /// Fastest bob rate, in radians per second.
        max_bob_rate: f64,
        /// Height change per step at the crest of the bob.
        bob_amplitude: f64,
    },
}

impl MotionPolicy {
    /// The swirling blizzard around the yeti.
    pub fn blizzard() -> Self {
        MotionPolicy::RadialSpin {
            angular_speed: 0.01,
        }
    }

    /// Plain snowfall from a ceiling of 50.
    pub fn snowfall() -> Self {
        MotionPolicy::VerticalFall {
            min_fall_rate: 0.02,
            max_fall_rate: 0.1,
            ceiling: 50.0,
        }
    }

    /// Flakes circling at `radius`.
    pub fn orbit(radius: f64) -> Self {
        MotionPolicy::OrbitBob {
            radius,
            min_speed: 0.1,
            max_speed: 0.5,
            bob_amplitude: 0.01,
        }
    }

    /// Slow spin with independent bobbing.
    pub fn drift() -> Self {
        MotionPolicy::Drift {
            min_angular_speed: 0.001,
            max_angular_speed: 0.005,
            min_bob_rate: 0.5,
            max_bob_rate: 2.0,
            bob_amplitude: 0.01,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            MotionPolicy::RadialSpin { .. } => "radial_spin",
            MotionPolicy::VerticalFall { .. } => "vertical_fall",
            MotionPolicy::OrbitBob { .. } => "orbit_bob",
            MotionPolicy::Drift { .. } => "drift",
        }
    }

    /// Reject parameters no particle could be spawned or stepped with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            MotionPolicy::RadialSpin { angular_speed } => {
                ConfigError::check_finite("angular_speed", angular_speed)
            }
            MotionPolicy::VerticalFall {
                min_fall_rate,
                max_fall_rate,
                ceiling,
            } => {
                ConfigError::check_non_negative("min_fall_rate", min_fall_rate)?;
                ConfigError::check_range("fall_rate", min_fall_rate, max_fall_rate)?;
                ConfigError::check_positive("ceiling", ceiling)
            }
            MotionPolicy::OrbitBob {
                radius,
                min_speed,
                max_speed,
                bob_amplitude,
            } => {
                ConfigError::check_positive("radius", radius)?;
                ConfigError::check_range("orbit speed", min_speed, max_speed)?;
                ConfigError::check_finite("bob_amplitude", bob_amplitude)
            }
            MotionPolicy::Drift {
                min_angular_speed,
                max_angular_speed,
                min_bob_rate,
                max_bob_rate,
                bob_amplitude,
            } => {
                ConfigError::check_range("angular speed", min_angular_speed, max_angular_speed)?;
                ConfigError::check_range("bob rate", min_bob_rate, max_bob_rate)?;
                ConfigError::check_finite("bob_amplitude", bob_amplitude)
            }
        }
    }

    /// Spawn one particle.
    pub fn init_particle(&self, ctx: &mut SpawnContext) -> Particle {
        match *self {
            MotionPolicy::RadialSpin { angular_speed } => {
                let angle = ctx.random_angle();
                let distance = ctx.random_distance();
                let y = ctx.random_height();
                Particle {
                    position: ring_point(ctx.center, angle, distance, y),
                    angle,
                    speed: angular_speed * ctx.random_sign(),
                    vertical_velocity: 0.0,
                }
            }
            MotionPolicy::VerticalFall {
                min_fall_rate,
                max_fall_rate,
                ceiling,
            } => {
                let y = ctx.random_range(0.0, ceiling);
                let fall_rate = ctx.random_range(min_fall_rate, max_fall_rate);
                Particle {
                    position: ctx.random_in_square(y),
                    angle: 0.0,
                    speed: fall_rate,
                    vertical_velocity: -fall_rate,
                }
            }
            MotionPolicy::OrbitBob {
                radius,
                min_speed,
                max_speed,
                ..
            } => {
                let angle = ctx.random_angle();
                let y = ctx.random_height();
                Particle {
                    position: ring_point(ctx.center, angle, radius, y),
                    angle,
                    speed: ctx.random_range(min_speed, max_speed),
                    vertical_velocity: 0.0,
                }
            }
            MotionPolicy::Drift {
                min_angular_speed,
                max_angular_speed,
                min_bob_rate,
                max_bob_rate,
                ..
            } => {
                let angle = ctx.random_angle();
                let distance = ctx.random_distance();
                let y = ctx.random_height();
                Particle {
                    position: ring_point(ctx.center, angle, distance, y),
                    angle,
                    speed: ctx.random_range(min_angular_speed, max_angular_speed),
                    vertical_velocity: ctx.random_range(min_bob_rate, max_bob_rate),
                }
            }
        }
    }

    /// Advance one particle by one step.
    ///
    /// `elapsed` is the field's accumulated time including this step's `dt`.
    /// The caller guarantees `dt > 0`.
    pub fn step(&self, p: &mut Particle, dt: f64, elapsed: f64, center: DVec3) {
        match *self {
            MotionPolicy::RadialSpin { .. } => {
                let dx = p.position.x - center.x;
                let dz = p.position.z - center.z;
                let radius = dx.hypot(dz);
                p.angle = dz.atan2(dx) + p.speed;
                p.position = ring_point(center, p.angle, radius, p.position.y);
            }
            MotionPolicy::VerticalFall { ceiling, .. } => {
                p.position.y += p.vertical_velocity;
                if p.position.y < 0.0 {
                    p.position.y = ceiling;
                }
            }
            MotionPolicy::OrbitBob {
                radius,
                bob_amplitude,
                ..
            } => {
                p.angle += p.speed * dt;
                let y = p.position.y + (elapsed * p.speed).sin() * bob_amplitude;
                p.position = ring_point(center, p.angle, radius, y);
            }
            MotionPolicy::Drift { bob_amplitude, .. } => {
                let radius = (p.position.x - center.x).hypot(p.position.z - center.z);
                p.angle += p.speed;
                let y = p.position.y + (elapsed * p.vertical_velocity).sin() * bob_amplitude;
                p.position = ring_point(center, p.angle, radius, y);
            }
        }
    }
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self::blizzard()
    }
}
