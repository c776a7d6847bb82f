//! Simulation clock.
//!
//! Every animated term in the field (overlays, the meteor stream, anchor
//! pulses) reads one shared simulation time. That time advances by a fixed
//! step per tick rather than by wall-clock delta, so the animation runs at
//! the same rate per frame regardless of how fast frames arrive. Wall-clock
//! time is only used to measure FPS.
//!
//! # Example
//!
//! ```ignore
//! use morphfield::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // In your frame loop:
//! let t = clock.tick();
//!
//! println!("Time: {:.2}", clock.time());
//! println!("Frame: {}", clock.frame());
//! println!("FPS: {:.1}", clock.fps());
//! ```

use std::time::{Duration, Instant};

/// Simulation time added per tick at time scale 1.0.
pub const TIME_STEP: f64 = 0.01;

/// Fixed-step simulation clock with wall-clock FPS measurement.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Simulation time at the last change of time scale.
    epoch: f64,
    /// Unpaused ticks since `epoch`.
    steps: u64,
    /// Simulation time added by the last tick.
    step: f64,
    /// Ticks since start (paused ticks included).
    frame_count: u64,
    /// Measured FPS, refreshed every `fps_update_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Multiplier on the fixed step (1.0 = normal speed).
    time_scale: f32,
}

impl Clock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self {
            epoch: 0.0,
            steps: 0,
            step: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance one tick. Returns the new simulation time.
    pub fn tick(&mut self) -> f64 {
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        if self.paused {
            self.step = 0.0;
            return self.time();
        }

        let before = self.time();
        self.steps += 1;
        let now = self.time();
        self.step = now - before;
        now
    }

    /// Current simulation time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.epoch + self.steps as f64 * TIME_STEP * f64::from(self.time_scale)
    }

    /// Simulation time added by the last tick.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Freeze simulation time. Ticks still count frames.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.epoch = self.time();
        self.steps = 0;
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Reset to time zero.
    pub fn reset(&mut self) {
        *self = Self {
            time_scale: self.time_scale,
            ..Self::new()
        };
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
