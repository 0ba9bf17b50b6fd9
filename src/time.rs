//! Frame clock for the simulation loop.
//!
//! Provides a single source of truth for time-related values: the delta fed
//! to [`ParticleField::advance`](crate::ParticleField::advance) and the
//! timestamp fed to the pick highlighter.
//!
//! The driver measures each frame and hands the duration to [`Time::tick`],
//! so the clock never reads the wall clock itself.
//!
//! # Example
//!
//! ```ignore
//! use snowfield::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In your frame loop:
//! time.tick(frame_start.elapsed());
//!
//! log::info!("Elapsed: {:.2}s", time.elapsed());
//! log::info!("Delta: {:.4}s", time.delta());
//! log::info!("Frame: {}", time.frame());
//! log::info!("FPS: {:.1}", time.fps());
//! ```

use std::time::Duration;

/// Time tracking for the frame loop.
///
/// Elapsed time is simulated time: it stops while paused and follows the
/// fixed delta and time scale when those are set.
#[derive(Debug)]
pub struct Time {
    /// Simulated time since start.
    elapsed: Duration,
    /// Simulated time of the last frame, in seconds.
    delta_secs: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f64,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Raw time accumulated since the last FPS update.
    fps_window: Duration,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<Duration>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f64,
}

impl Time {
    /// Create a stopped-at-zero time tracker.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window: Duration::ZERO,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance by `raw` of real time. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` in seconds for convenience.
    pub fn tick(&mut self, raw: Duration) -> (f64, f64) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed(), self.delta_secs);
        }

        let step = self.fixed_delta.unwrap_or(raw);
        let step = if self.time_scale == 1.0 {
            step
        } else {
            step.mul_f64(self.time_scale)
        };
        self.delta_secs = step.as_secs_f64();
        self.elapsed += step;

        self.frame_count += 1;

        self.fps_window += raw;
        if self.fps_window >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f64 / self.fps_window.as_secs_f64();
            self.fps_frame_count = self.frame_count;
            self.fps_window = Duration::ZERO;
        }

        (self.elapsed(), self.delta_secs)
    }

    /// Total simulated time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Simulated time of the last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, `delta()` returns 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set a fixed delta time for deterministic updates.
    ///
    /// The particle policies that step by a constant amount per call assume
    /// this is set. Pass `None` to use real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<Duration>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Get elapsed time as a Duration.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        self.elapsed
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
