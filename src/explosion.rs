//! Impact bursts.
//!
//! A fixed pool of short-lived sparks. Slots are claimed from a free list
//! and returned when their spark burns out, so spawning never scans the pool
//! and never allocates. When the pool is exhausted a burst is truncated to
//! however many slots are free.

use crate::sampling::{random_burst, unit};
use glam::Vec3;
use rand::Rng;

/// Sparks per burst.
pub const BURST_SIZE: usize = 15;
/// Velocity retained each tick.
pub const DRAG: f32 = 0.95;
/// Size of a spark at birth as it starts shrinking.
pub const SHRINK_FROM: f32 = 1.5;
/// Sentinel y for inactive sparks, far outside any camera.
pub const HIDDEN_Y: f32 = 99999.0;

/// Per-spark state that does not go to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spark {
    velocity: Vec3,
    age: u32,
    life: f32,
    active: bool,
}

/// Fixed-capacity burst pool.
#[derive(Debug, Clone)]
pub struct ExplosionPool {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    sparks: Vec<Spark>,
    /// Free slot indices; popped from the back.
    free: Vec<usize>,
}

impl ExplosionPool {
    /// Create a pool of `capacity` hidden sparks.
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::new(0.0, HIDDEN_Y, 0.0); capacity],
            colors: vec![Vec3::ONE; capacity],
            sizes: vec![0.0; capacity],
            sparks: vec![Spark::default(); capacity],
            // Reversed so a fresh pool hands out 0, 1, 2, ...
            free: (0..capacity).rev().collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.sparks.len()
    }

    /// Number of live sparks.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    /// Whether slot `index` holds a live spark.
    pub fn is_active(&self, index: usize) -> bool {
        self.sparks.get(index).is_some_and(|s| s.active)
    }

    /// Spawn one burst of [`BURST_SIZE`] sparks at `origin`.
    ///
    /// Returns how many sparks were actually spawned.
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, origin: Vec3, color: Vec3, rng: &mut R) -> usize {
        self.spawn(origin, color, BURST_SIZE, rng)
    }

    /// Spawn up to `count` sparks at `origin`.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: Vec3,
        color: Vec3,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let mut spawned = 0;
        while spawned < count {
            let Some(i) = self.free.pop() else {
                log::trace!(
                    "Explosion pool exhausted, burst truncated to {}/{}",
                    spawned,
                    count
                );
                break;
            };

            let life = 30.0 + unit(rng) * 20.0;
            let speed = 0.2 + unit(rng) * 0.5;
            self.sparks[i] = Spark {
                velocity: random_burst(rng, speed),
                age: 0,
                life,
                active: true,
            };
            self.positions[i] = origin;
            self.colors[i] = color;
            self.sizes[i] = 0.5 + unit(rng);
            spawned += 1;
        }
        spawned
    }

    /// Age, move and shrink every live spark; retire the ones past their life.
    pub fn tick(&mut self) {
        for (i, spark) in self.sparks.iter_mut().enumerate() {
            if !spark.active {
                continue;
            }

            spark.age += 1;
            let age = spark.age as f32;
            if age > spark.life {
                spark.active = false;
                self.positions[i].y = HIDDEN_Y;
                self.free.push(i);
                continue;
            }

            self.positions[i] += spark.velocity;
            spark.velocity *= DRAG;
            self.sizes[i] = SHRINK_FROM * (1.0 - age / spark.life);
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Position buffer as flat `[x, y, z, ...]`.
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color buffer as flat `[r, g, b, ...]`.
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}
