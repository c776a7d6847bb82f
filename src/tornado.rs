//! Tornado flow field.
//!
//! The tornado does not use its static target directly. Each particle rides
//! a loop from the top of the funnel to the bottom, spinning faster near the
//! top, and wraps back up when it reaches the end. Particles fade in and out
//! over the first and last 15% of the loop so the wrap is invisible, and the
//! simulator teleports a particle on the wrap instead of springing it across
//! the whole column.
//!
//! The static target still matters: its normalized height fixes where on the
//! loop each particle starts.

use glam::Vec3;
use std::f64::consts::TAU;

/// Flow field parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowField {
    /// Bottom of the column.
    pub y_min: f32,
    /// Column height.
    pub y_range: f32,
    /// Loop speed shared by all particles.
    pub base_flow: f32,
    /// Extra loop speed scaled by per-particle noise.
    pub flow_jitter: f32,
    /// Every n-th particle is debris.
    pub debris_stride: usize,
    /// Loop fraction faded at each end.
    pub fade: f32,
    /// Vertical gap (in scaled units) that counts as a loop wrap.
    pub wrap_threshold: f32,
}

impl Default for FlowField {
    fn default() -> Self {
        Self {
            y_min: -3.0,
            y_range: 6.0,
            base_flow: 0.15,
            flow_jitter: 0.1,
            debris_stride: 20,
            fade: 0.15,
            wrap_threshold: 2.0,
        }
    }
}

/// One particle's place in the flow at one instant. Coordinates are unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSample {
    /// Loop progress in `[0, 1)`; 0 is the bottom of the column.
    pub progress: f32,
    /// Height on the column.
    pub height: f32,
    /// Funnel radius at this height, including debris or noise offsets.
    pub radius: f32,
    /// Azimuth around the y axis, wrapped to one turn.
    pub theta: f32,
    /// Opacity, ramping over the loop ends.
    pub alpha: f32,
    /// Whether this particle is debris.
    pub debris: bool,
    /// Fixed per-particle noise in `[0, 1)`.
    pub noise: f32,
}

impl FlowSample {
    /// Cartesian position of the sample, unscaled.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.theta.cos(),
            self.height,
            self.radius * self.theta.sin(),
        )
    }
}

/// Fixed per-index noise in `[0, 1)`.
#[inline]
pub fn index_noise(index: usize) -> f32 {
    (index as f32 * 0.123).fract()
}

impl FlowField {
    /// Where particle `index` sits in the flow at `time`, given the height of
    /// its static (unscaled) target.
    pub fn sample(&self, index: usize, base_y: f32, time: f64) -> FlowSample {
        let noise = index_noise(index);
        let flow_speed = f64::from(self.base_flow + noise * self.flow_jitter);
        let phase = f64::from((base_y - self.y_min) / self.y_range);

        // Flow runs top to bottom.
        let mut progress = (phase - time * flow_speed).rem_euclid(1.0) as f32;
        // A remainder just below 1 rounds up to it.
        if progress >= 1.0 {
            progress = 0.0;
        }
        let height = self.y_min + progress * self.y_range;

        let mut radius = 0.2 + 0.12 * (height + 3.5).powf(1.8);
        let debris = index % self.debris_stride == 0;
        if debris {
            radius *= 1.5 + noise * 1.5;
            radius += (time * 2.0 + index as f64).sin() as f32 * 0.2;
        } else {
            radius += (noise - 0.5) * 0.3;
        }

        // Spins faster near the top.
        let rot_speed = f64::from(0.8 + (3.5 - height) * 0.3);
        let theta = (index as f64 * 0.1 - time * rot_speed).rem_euclid(TAU) as f32;

        FlowSample {
            progress,
            height,
            radius,
            theta,
            alpha: self.alpha(progress),
            debris,
            noise,
        }
    }

    /// Opacity for a loop position.
    pub fn alpha(&self, progress: f32) -> f32 {
        let alpha = if progress > 1.0 - self.fade {
            (1.0 - progress) / self.fade
        } else if progress < self.fade {
            progress / self.fade
        } else {
            1.0
        };
        alpha.clamp(0.0, 1.0)
    }

    /// Vertex color for a sample, premultiplied by its alpha.
    pub fn color(&self, sample: &FlowSample) -> Vec3 {
        if sample.debris {
            Vec3::new(1.0, 0.8, 0.0) * sample.alpha
        } else {
            let depth = 0.5 + sample.noise * 0.5;
            Vec3::new(0.0, 0.4 + depth * 0.6, 0.6 + depth * 0.4) * sample.alpha
        }
    }

    /// Whether the gap between a target and the particle chasing it is a loop wrap.
    ///
    /// The threshold scales with the cloud, so at extreme scales it can fire
    /// every tick or never.
    #[inline]
    pub fn wraps(&self, target_y: f32, current_y: f32, scale: f32) -> bool {
        target_y - current_y > self.wrap_threshold * scale
    }
}
