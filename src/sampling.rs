//! Random geometry primitives.
//!
//! Every stochastic part of the field (shape targets, initial cloud, meteor
//! spawns, burst velocities) draws through these helpers. They take any
//! [`rand::Rng`], so tests can pass a seeded or mocked generator.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Random f32 in `[0, 1)`.
#[inline]
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen()
}

/// Random f32 in `[-0.5, 0.5)`.
#[inline]
pub fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() - 0.5
}

/// Point at `radius` along the direction given by azimuth `theta` and polar angle `phi`.
#[inline]
pub fn spherical(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Random point on the surface of a sphere of given radius.
///
/// Polar angle is `acos(2u - 1)`, which keeps the density uniform over the
/// surface instead of bunching at the poles.
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = unit(rng) * TAU;
    let phi = (unit(rng) * 2.0 - 1.0).acos();
    spherical(radius, theta, phi)
}

/// Random point inside a sphere of given radius, centered at origin.
///
/// Distribution is uniform throughout the volume.
pub fn random_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = unit(rng) * TAU;
    let phi = (unit(rng) * 2.0 - 1.0).acos();
    // Cube root for uniform volume distribution
    let r = unit(rng).cbrt() * radius;
    spherical(r, theta, phi)
}

/// Random point inside a cube of given half-size, centered at origin.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, half_size: f32) -> Vec3 {
    Vec3::new(
        centered(rng) * 2.0 * half_size,
        centered(rng) * 2.0 * half_size,
        centered(rng) * 2.0 * half_size,
    )
}

/// Random point inside a disk in the XZ plane at y=0.
pub fn random_in_disk<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = unit(rng) * TAU;
    let r = radius * unit(rng).sqrt(); // sqrt for uniform disk
    Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}

/// Random direction scaled by `speed`, with the polar angle drawn uniformly
/// in `[0, PI)`.
///
/// This is the burst distribution: it favours the poles slightly, which
/// reads as a livelier spray than a perfectly even shell.
pub fn random_burst<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec3 {
    let theta = unit(rng) * TAU;
    let phi = unit(rng) * PI;
    spherical(speed, theta, phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_sphere_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let pos = random_in_sphere(&mut rng, 0.5);
            assert!(pos.length() <= 0.5 + 0.001);
        }
    }

    #[test]
    fn test_random_on_sphere_radius() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let pos = random_on_sphere(&mut rng, 3.0);
            assert!((pos.length() - 3.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_random_in_cube_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let pos = random_in_cube(&mut rng, 1.0);
            assert!(pos.abs().max_element() <= 1.0);
        }
    }

    #[test]
    fn test_random_in_disk_is_flat() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let pos = random_in_disk(&mut rng, 1.5);
            assert_eq!(pos.y, 0.0);
            assert!(pos.length() <= 1.5 + 0.001);
        }
    }
}
