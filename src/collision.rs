//! Meteor strikes on the cloud.
//!
//! A fast meteor crossing the z = 0 plane near the cloud is tested against a
//! strided sample of cloud particles in projection (x and y only). The first
//! particle it hits gets a cyan burst and a kick, then the meteor moves on.
//! The kick lands in the particle's velocity and is integrated by the next
//! cloud tick.

use crate::explosion::ExplosionPool;
use crate::meteor::MeteorField;
use crate::sampling::centered;
use crate::simulator::ParticleSimulator;
use glam::Vec3;
use rand::Rng;

/// Stream speed below which nothing is tested.
pub const MIN_SPEED: f32 = 5.0;
/// Meteors outside `|x|, |y| < BOUNDS` cannot reach the cloud.
pub const BOUNDS: f32 = 20.0;
/// Only every `STRIDE`-th cloud particle is tested.
pub const STRIDE: usize = 5;
/// Squared hit radius in the xy plane.
pub const HIT_RADIUS_SQ: f32 = 0.25;
/// Burst color for impacts.
pub const IMPACT_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// One meteor strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub meteor: usize,
    pub particle: usize,
    /// Particle position at the moment of the hit.
    pub position: Vec3,
}

/// Whether a meteor at `position` is a collision candidate at stream `speed`.
#[inline]
pub fn in_strike_zone(position: Vec3, speed: f32) -> bool {
    speed > MIN_SPEED
        && position.z.abs() < speed * 2.0
        && position.x.abs() < BOUNDS
        && position.y.abs() < BOUNDS
}

/// Test every meteor against the cloud and apply hits.
///
/// Run after the meteors advance. Recycled meteors sit far behind the
/// cloud and never qualify on the tick they respawn.
pub fn resolve<R: Rng + ?Sized>(
    meteors: &MeteorField,
    cloud: &mut ParticleSimulator,
    explosions: &mut ExplosionPool,
    rng: &mut R,
) -> Vec<Impact> {
    let speed = meteors.speed();
    let mut impacts = Vec::new();

    for (m, meteor) in meteors.positions().iter().enumerate() {
        if !in_strike_zone(*meteor, speed) {
            continue;
        }

        let hit = cloud
            .positions()
            .iter()
            .enumerate()
            .step_by(STRIDE)
            .find(|(_, p)| {
                let dx = meteor.x - p.x;
                let dy = meteor.y - p.y;
                dx * dx + dy * dy < HIT_RADIUS_SQ
            })
            .map(|(i, p)| (i, *p));

        if let Some((particle, position)) = hit {
            explosions.spawn_burst(position, IMPACT_COLOR, rng);
            let knockback = Vec3::new(
                centered(rng) * 0.5,
                centered(rng) * 0.5,
                centered(rng) * 0.5 + speed * 0.05,
            );
            cloud.apply_impulse(particle, knockback);
            log::trace!("Meteor {} hit particle {} at {}", m, particle, position);
            impacts.push(Impact {
                meteor: m,
                particle,
                position,
            });
        }
    }

    impacts
}
