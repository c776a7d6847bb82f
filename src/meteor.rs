//! Background meteor stream.
//!
//! Meteors drift toward the camera along +z at a shared stream speed that
//! breathes over time and surges every so often. A meteor that passes the
//! camera is recycled far behind with fresh x and y. At high speed the stream
//! draws streaks: one line segment per meteor, head to tail.

use crate::sampling::{centered, unit};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::FRAC_PI_4;

/// Half-width of the spawn box on x and y.
pub const SPAWN_HALF_EXTENT: f32 = 1000.0;
/// Meteors past this z are recycled.
pub const RECYCLE_Z: f32 = 200.0;
/// z that recycled meteors restart at.
pub const RESPAWN_Z: f32 = -1800.0;
/// Stream speed ceiling.
pub const MAX_SPEED: f32 = 20.0;
/// Stream speeds above this draw trails.
pub const TRAIL_THRESHOLD: f32 = 10.0;
/// Trail length per unit of stream speed.
pub const TRAIL_LENGTH: f32 = 3.0;
/// Field roll per tick.
pub const SPIN: f32 = 0.0002;

/// Stream speed at simulation time `t`.
///
/// A slow swell plus a faster shimmer, doubled during surges, capped at
/// [`MAX_SPEED`].
pub fn stream_speed(t: f64) -> f32 {
    let mut modulation = 1.0 + (t * 0.5).sin() * 0.3 + (t * 3.0).sin() * 0.2;
    if (t * 0.2).sin() > 0.8 {
        modulation *= 2.0;
    }
    (5.0 * modulation as f32).min(MAX_SPEED)
}

/// Trail opacity for a stream speed; zero means trails are hidden.
pub fn trail_opacity(speed: f32) -> f32 {
    if speed > TRAIL_THRESHOLD {
        ((speed - TRAIL_THRESHOLD) / 10.0).min(0.5)
    } else {
        0.0
    }
}

/// The meteor stream.
#[derive(Debug, Clone)]
pub struct MeteorField {
    positions: Vec<Vec3>,
    /// Per-meteor drift speed. Carried as data; advection uses the stream speed.
    speeds: Vec<f32>,
    /// Per-meteor heading. Carried as data alongside `speeds`.
    angles: Vec<f32>,
    /// Two vertices per meteor: head then tail.
    trails: Vec<Vec3>,
    speed: f32,
    trail_opacity: f32,
    rotation_z: f32,
}

impl MeteorField {
    /// Scatter `count` meteors through the spawn volume.
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);
        let mut angles = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec3::new(
                centered(rng) * 2.0 * SPAWN_HALF_EXTENT,
                centered(rng) * 2.0 * SPAWN_HALF_EXTENT,
                centered(rng) * 2.0 * SPAWN_HALF_EXTENT - 500.0,
            ));
            speeds.push(0.2 + unit(rng) * 0.5);
            angles.push(FRAC_PI_4 + centered(rng) * 0.2);
        }

        Self {
            trails: vec![Vec3::ZERO; count * 2],
            positions,
            speeds,
            angles,
            speed: 0.0,
            trail_opacity: 0.0,
            rotation_z: 0.0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Advance the stream to simulation time `time`. Returns the stream speed.
    pub fn tick<R: Rng + ?Sized>(&mut self, time: f64, rng: &mut R) -> f32 {
        self.speed = stream_speed(time);
        self.trail_opacity = trail_opacity(self.speed);
        self.rotation_z -= SPIN;

        let show_trails = self.trails_visible();
        let tail = Vec3::new(0.0, 0.0, -TRAIL_LENGTH * self.speed);
        for (i, position) in self.positions.iter_mut().enumerate() {
            position.z += self.speed;
            if position.z > RECYCLE_Z {
                position.x = centered(rng) * 2.0 * SPAWN_HALF_EXTENT;
                position.y = centered(rng) * 2.0 * SPAWN_HALF_EXTENT;
                position.z = RESPAWN_Z;
            }

            if show_trails {
                self.trails[i * 2] = *position;
                self.trails[i * 2 + 1] = *position + tail;
            }
        }
        self.speed
    }

    /// Stream speed from the last tick.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn trails_visible(&self) -> bool {
        self.trail_opacity > 0.0
    }

    #[inline]
    pub fn trail_opacity(&self) -> f32 {
        self.trail_opacity
    }

    /// Accumulated roll of the whole field about z.
    #[inline]
    pub fn rotation_z(&self) -> f32 {
        self.rotation_z
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Position buffer as flat `[x, y, z, ...]`.
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Trail line-segment buffer, six floats per meteor.
    pub fn trail_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.trails)
    }

    /// Direct access for hosts that script meteors.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }
}
