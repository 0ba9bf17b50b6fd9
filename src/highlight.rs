//! Ray picking with timed highlight reversion.
//!
//! [`PickHighlighter::pick`] casts a ray against every object, highlights the
//! nearest hit and schedules its reversion. Reversions only happen when the
//! driver calls [`PickHighlighter::poll_reversions`], normally once per frame.
//!
//! A reversion always restores the object's *base* color and scale, not the
//! state it showed just before the pick. The two differ only when an object
//! is re-picked while still highlighted; in that case the second pick
//! compounds the scale and the single remaining reversion still lands on the
//! base values.
//!
//! # Example
//!
//! ```ignore
//! let mut highlighter = PickHighlighter::new(Duration::from_millis(2000));
//!
//! // On click:
//! if let Some(ray) = camera.ray_from_pixel(click, viewport) {
//!     highlighter.pick(&ray, &mut objects, time.elapsed_duration());
//! }
//!
//! // Every frame:
//! highlighter.poll_reversions(time.elapsed_duration(), &mut objects);
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::object::{PickableObject, Rgb};
use crate::ray::Ray;
use crate::schedule::TimerQueue;

/// How long a highlight lasts unless configured otherwise.
pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

/// What a picked object looks like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// Color applied on pick.
    pub color: Rgb,
    /// Multiplier applied to the current scale on pick.
    pub scale_factor: f64,
}

impl HighlightStyle {
    /// Reject a scale factor that would collapse or mirror the object.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("highlight.scale_factor", self.scale_factor)
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: Rgb::HIGHLIGHT,
            scale_factor: 1.2,
        }
    }
}

/// Outcome of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked object in the slice passed to `pick`.
    pub index: usize,
    /// Distance along the ray to the hit.
    pub distance: f64,
    /// World-space hit point.
    pub point: DVec3,
    /// Color showing just before the pick.
    pub previous_color: Rgb,
    /// Scale showing just before the pick.
    pub previous_scale: DVec3,
    /// When the highlight will be reverted.
    pub revert_at: Duration,
}

/// Picks objects and reverts their highlights after a fixed delay.
#[derive(Debug)]
pub struct PickHighlighter {
    duration: Duration,
    style: HighlightStyle,
    timers: TimerQueue<usize>,
}

impl PickHighlighter {
    /// Create a highlighter whose highlights last `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            style: HighlightStyle::default(),
            timers: TimerQueue::new(),
        }
    }

    /// Use a different highlight look.
    ///
    /// Fails if the scale factor is not finite and positive.
    pub fn with_style(mut self, style: HighlightStyle) -> Result<Self, ConfigError> {
        style.validate()?;
        self.style = style;
        Ok(self)
    }

    /// How long highlights last.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The highlight look.
    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Number of highlights waiting to be reverted.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// When the next reversion is due.
    pub fn next_reversion(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Nearest object hit by `ray`, without touching any state.
    ///
    /// Equal distances resolve to the earliest object in the slice.
    pub fn nearest_hit(ray: &Ray, objects: &[PickableObject]) -> Option<(usize, f64)> {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, obj) in objects.iter().enumerate() {
            let Some(distance) = obj.shape().intersect(ray, &obj.transform()) else {
                continue;
            };
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        nearest
    }

    /// Highlight the nearest object hit by `ray` at time `now`.
    ///
    /// Returns `None`, changing nothing, if the ray hits no object. Picking an
    /// object that is already highlighted cancels its pending reversion and
    /// schedules a new one at `now + duration`.
    pub fn pick(
        &mut self,
        ray: &Ray,
        objects: &mut [PickableObject],
        now: Duration,
    ) -> Option<PickResult> {
        let (index, distance) = Self::nearest_hit(ray, objects)?;
        let obj = &mut objects[index];

        let previous_color = obj.current_color();
        let previous_scale = obj.current_scale();
        if let Some(timer) = obj.pending_timer() {
            self.timers.cancel(timer);
        }

        let revert_at = now + self.duration;
        let timer = self.timers.schedule(index, revert_at);
        obj.highlight(self.style.color, self.style.scale_factor, revert_at, timer);

        log::debug!(
            "picked {:?} #{} at distance {:.3}, reverting at {:?}",
            obj.kind(),
            index,
            distance,
            revert_at
        );

        Some(PickResult {
            index,
            distance,
            point: ray.at(distance),
            previous_color,
            previous_scale,
            revert_at,
        })
    }

    /// Revert every highlight due at or before `now`.
    ///
    /// Returns the current indices of reverted objects in deadline order.
    ///
    /// A reversion is matched to its object by timer handle. If objects were
    /// removed or reordered since the pick, the object is found wherever it
    /// now sits; only reversions whose object is gone are dropped.
    pub fn poll_reversions(&mut self, now: Duration, objects: &mut [PickableObject]) -> Vec<usize> {
        let mut reverted = Vec::new();
        for (timer, picked_at) in self.timers.poll(now) {
            let index = match objects.get(picked_at) {
                Some(obj) if obj.pending_timer() == Some(timer) => Some(picked_at),
                _ => objects
                    .iter()
                    .position(|obj| obj.pending_timer() == Some(timer)),
            };
            match index {
                Some(index) => {
                    let obj = &mut objects[index];
                    obj.revert();
                    log::debug!("reverted {:?} #{}", obj.kind(), index);
                    reverted.push(index);
                }
                None => log::warn!("dropping reversion for missing object #{}", picked_at),
            }
        }
        reverted
    }

    /// Revert every highlighted object now and forget all pending timers.
    pub fn reset(&mut self, objects: &mut [PickableObject]) {
        for obj in objects.iter_mut().filter(|o| o.is_highlighted()) {
            obj.revert();
        }
        self.timers.clear();
    }
}

impl Default for PickHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_DURATION)
    }
}
