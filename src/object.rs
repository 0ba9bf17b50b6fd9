//! Pickable scene objects and their visual state.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::schedule::TimerHandle;
use crate::shape::{BoundingShape, Transform};

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Light gray of the rocks.
    pub const ROCK: Rgb = Rgb(0xd3d3d3);
    /// Darker gray a picked object turns.
    pub const HIGHLIGHT: Rgb = Rgb(0xaaaaaa);
    /// Sky blue of the crystals.
    pub const CRYSTAL: Rgb = Rgb(0x87cefa);
    /// Muted green of the snowy bushes.
    pub const BUSH: Rgb = Rgb(0x4f6f52);

    /// Color from `0xRRGGBB`. Bits above 24 are dropped.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb(hex & 0xff_ffff)
    }

    /// Channels as `0.0..=1.0` floats, for the renderer.
    pub fn to_vec3(self) -> Vec3 {
        let r = ((self.0 >> 16) & 0xff) as f32;
        let g = ((self.0 >> 8) & 0xff) as f32;
        let b = (self.0 & 0xff) as f32;
        Vec3::new(r, g, b) / 255.0
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// What an object is in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Tall pointy rock.
    Rock,
    /// Floating crystal.
    Crystal,
    /// Snowy bush.
    Bush,
}

/// An object the pick highlighter can select.
///
/// Objects are either idle, showing their base color and scale, or
/// highlighted with a pending reversion:
///
/// ```text
/// Idle --pick--> Highlighted --reversion--> Idle
///                  |    ^
///                  +----+ pick (replaces the pending reversion)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PickableObject {
    kind: ObjectKind,
    shape: BoundingShape,
    position: DVec3,
    base_color: Rgb,
    base_scale: DVec3,
    current_color: Rgb,
    current_scale: DVec3,
    revert_deadline: Option<Duration>,
    pending: Option<TimerHandle>,
}

impl PickableObject {
    /// An idle object at `position` with unit scale.
    pub fn new(
        kind: ObjectKind,
        shape: BoundingShape,
        position: DVec3,
        base_color: Rgb,
    ) -> Result<Self, ConfigError> {
        shape.validate()?;
        Ok(Self {
            kind,
            shape,
            position,
            base_color,
            base_scale: DVec3::ONE,
            current_color: base_color,
            current_scale: DVec3::ONE,
            revert_deadline: None,
            pending: None,
        })
    }

    /// Replace the base scale. Only valid while idle.
    pub fn with_base_scale(mut self, scale: DVec3) -> Self {
        debug_assert!(self.revert_deadline.is_none());
        self.base_scale = scale;
        self.current_scale = scale;
        self
    }

    /// Scene role.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Pickable volume.
    pub fn shape(&self) -> &BoundingShape {
        &self.shape
    }

    /// World position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// World placement at the current scale.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            scale: self.current_scale,
        }
    }

    /// Resting color.
    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    /// Resting scale.
    pub fn base_scale(&self) -> DVec3 {
        self.base_scale
    }

    /// Color the renderer should draw this frame.
    pub fn current_color(&self) -> Rgb {
        self.current_color
    }

    /// Scale the renderer should draw this frame.
    pub fn current_scale(&self) -> DVec3 {
        self.current_scale
    }

    /// When the pending reversion is due, if highlighted.
    pub fn revert_deadline(&self) -> Option<Duration> {
        self.revert_deadline
    }

    /// Whether a reversion is pending.
    pub fn is_highlighted(&self) -> bool {
        self.revert_deadline.is_some()
    }

    pub(crate) fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub(crate) fn highlight(
        &mut self,
        color: Rgb,
        scale_factor: f64,
        deadline: Duration,
        timer: TimerHandle,
    ) {
        self.current_color = color;
        self.current_scale *= scale_factor;
        self.revert_deadline = Some(deadline);
        self.pending = Some(timer);
    }

    /// Back to base color and scale, whatever was showing before the pick.
    pub(crate) fn revert(&mut self) {
        self.current_color = self.base_color;
        self.current_scale = self.base_scale;
        self.revert_deadline = None;
        self.pending = None;
    }
}
