//! # Snowfield
//!
//! A CPU particle field for falling and swirling snow, plus a ray-pick
//! highlighter for the objects scattered through the scene.
//!
//! Snowfield owns the simulation state and timing so an external renderer
//! only has to upload a flat position buffer and draw objects at their
//! current color and scale.
//!
//! ## Quick Start
//!
//! ```ignore
//! use snowfield::prelude::*;
//!
//! let mut scene = Scene::new(&SceneConfig::default().with_seed(7))?;
//!
//! // Every frame:
//! scene.frame(frame_time);
//! renderer.upload(scene.field().position_bytes());
//!
//! // On click:
//! if let Some(hit) = scene.click(DVec2::new(x, y), DVec2::new(width, height)) {
//!     log::info!("picked object {}", hit.index);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle Fields
//!
//! A [`ParticleField`] is a fixed number of particles moved by a
//! [`MotionPolicy`] each time [`ParticleField::advance`] is called:
//!
//! ```ignore
//! MotionPolicy::blizzard()      // Swirl around the center at a fixed radius
//! MotionPolicy::snowfall()      // Fall and wrap back to the ceiling
//! MotionPolicy::orbit(15.0)     // Circle at one radius while bobbing
//! MotionPolicy::drift()         // Circle at the spawn radius while bobbing
//! ```
//!
//! ### Picking
//!
//! [`PickHighlighter::pick`] casts a [`Ray`] against each
//! [`PickableObject`]'s [`BoundingShape`] and highlights the nearest hit.
//! The highlight reverts once the clock passes the object's deadline and
//! [`PickHighlighter::poll_reversions`] is called.
//!
//! ## Feature Overview
//!
//! | Category | Types |
//! |----------|-------|
//! | Simulation | [`ParticleField`], [`FieldConfig`], [`MotionPolicy`], [`Bounds`] |
//! | Picking | [`PickHighlighter`], [`PickableObject`], [`BoundingShape`], [`Ray`] |
//! | Timing | [`Time`], [`TimerQueue`] |
//! | Scene | [`Scene`], [`SceneConfig`], [`Camera`] |

pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod highlight;
pub mod object;
pub mod policy;
pub mod ray;
pub mod scene;
pub mod schedule;
pub mod shape;
pub mod spawn;
pub mod time;

pub use bytemuck;
pub use camera::{ndc_from_pixel, Camera, CameraConfig};
pub use config::{ScatterConfig, SceneConfig};
pub use error::{ConfigError, SceneError};
pub use field::{FieldConfig, Particle, ParticleField};
pub use glam::{DVec2, DVec3, Vec3};
pub use highlight::{HighlightStyle, PickHighlighter, PickResult, DEFAULT_HIGHLIGHT_DURATION};
pub use object::{ObjectKind, PickableObject, Rgb};
pub use policy::MotionPolicy;
pub use ray::Ray;
pub use scene::Scene;
pub use schedule::{TimerHandle, TimerQueue};
pub use shape::{BoundingShape, Transform};
pub use spawn::{Bounds, SpawnContext};
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use snowfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, CameraConfig};
    pub use crate::config::{ScatterConfig, SceneConfig};
    pub use crate::error::{ConfigError, SceneError};
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::highlight::{HighlightStyle, PickHighlighter, PickResult};
    pub use crate::object::{ObjectKind, PickableObject, Rgb};
    pub use crate::policy::MotionPolicy;
    pub use crate::ray::Ray;
    pub use crate::scene::Scene;
    pub use crate::shape::{BoundingShape, Transform};
    pub use crate::spawn::{Bounds, SpawnContext};
    pub use crate::time::Time;
    pub use crate::{DVec2, DVec3, Vec3};
}
