//! Parametric target shapes.
//!
//! A [`ShapeTarget`] holds one destination point per particle index. It is
//! rebuilt in full whenever the active shape changes and handed to the
//! simulator in one move, so the simulator never sees a half-written table.
//!
//! | Id | Rule |
//! |----|------|
//! | `sphere-default` | Uniform in a unit ball |
//! | `heart` | Extruded `16 sin³t` / `13 cos t - ...` curve, scaled by 0.1 |
//! | `flower` | Four-petal rose `r = cos(4θ) + 0.5` |
//! | `saturn` | 30% body sphere, 70% tilted ring skewed to the inner edge |
//! | `buddha` | Head sphere, torso ellipsoid, flattened leg disc |
//! | `fireworks` | Sphere shells of random radius |
//! | `tornado` | Widening funnel with 5% debris |
//! | anything else | Uniform cube `[-1, 1]³` |

use crate::error::ShapeError;
use crate::sampling::{self, centered, unit};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Share of saturn particles (by index) that form the planet body.
pub const SATURN_BODY_FRACTION: f32 = 0.3;
/// Ring tilt about the x axis (30 degrees).
pub const SATURN_RING_TILT: f32 = PI / 6.0;
/// Share of tornado samples flung out as debris.
pub const TORNADO_DEBRIS_CHANCE: f64 = 0.05;

/// Selectable target shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// Uniform-in-ball cloud.
    #[default]
    Sphere,
    Heart,
    Flower,
    Saturn,
    Buddha,
    Fireworks,
    Tornado,
    /// Fallback for unrecognised ids.
    Cube,
}

impl Shape {
    /// All shapes, in menu order.
    pub const ALL: [Shape; 8] = [
        Shape::Sphere,
        Shape::Heart,
        Shape::Flower,
        Shape::Saturn,
        Shape::Buddha,
        Shape::Fireworks,
        Shape::Tornado,
        Shape::Cube,
    ];

    /// Resolve a shape id, falling back to [`Shape::Cube`] for anything unknown.
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or(Shape::Cube)
    }

    /// Stable string id.
    pub fn id(&self) -> &'static str {
        match self {
            Shape::Sphere => "sphere-default",
            Shape::Heart => "heart",
            Shape::Flower => "flower",
            Shape::Saturn => "saturn",
            Shape::Buddha => "buddha",
            Shape::Fireworks => "fireworks",
            Shape::Tornado => "tornado",
            Shape::Cube => "cube",
        }
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sphere-default" | "sphere" => Ok(Shape::Sphere),
            "heart" => Ok(Shape::Heart),
            "flower" => Ok(Shape::Flower),
            "saturn" => Ok(Shape::Saturn),
            "buddha" => Ok(Shape::Buddha),
            "fireworks" => Ok(Shape::Fireworks),
            "tornado" => Ok(Shape::Tornado),
            "cube" => Ok(Shape::Cube),
            other => Err(ShapeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Destination table for one shape: exactly one point per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTarget {
    shape: Shape,
    points: Box<[Vec3]>,
}

impl ShapeTarget {
    /// Shape this table was generated from.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of points (always the particle count).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Target point for particle `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Generate `count` target points for `shape`.
///
/// Each point is drawn independently, so two calls give different clouds
/// with the same statistics.
pub fn generate<R: Rng + ?Sized>(shape: Shape, count: usize, rng: &mut R) -> ShapeTarget {
    let body_cutoff = count as f32 * SATURN_BODY_FRACTION;
    let points = (0..count)
        .map(|i| match shape {
            Shape::Sphere => sampling::random_in_sphere(rng, 1.0),
            Shape::Heart => heart_point(rng),
            Shape::Flower => flower_point(rng),
            Shape::Saturn => {
                if (i as f32) < body_cutoff {
                    sampling::random_on_sphere(rng, 1.0)
                } else {
                    saturn_ring_point(rng)
                }
            }
            Shape::Buddha => buddha_point(rng),
            Shape::Fireworks => {
                let radius = unit(rng) * 3.0 + 0.1;
                sampling::random_on_sphere(rng, radius)
            }
            Shape::Tornado => tornado_point(rng),
            Shape::Cube => sampling::random_in_cube(rng, 1.0),
        })
        .collect();

    ShapeTarget { shape, points }
}

fn heart_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = unit(rng) * TAU;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = centered(rng) * 5.0;
    Vec3::new(x, y, z) * 0.1
}

fn flower_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const PETALS: f32 = 4.0;
    let theta = unit(rng) * TAU;
    let petal = (PETALS * theta).cos();
    let radius = petal + 0.5;
    Vec3::new(
        radius * theta.cos() * 2.0,
        radius * theta.sin() * 2.0,
        unit(rng) * petal * 0.5,
    )
}

fn saturn_ring_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = unit(rng) * TAU;
    // Squared draw packs the ring toward its inner edge.
    let radius = 1.5 + unit(rng).powi(2) * 2.5;
    let x = radius * theta.cos();
    let y = centered(rng) * 0.1;
    let z = radius * theta.sin();

    let (sin, cos) = SATURN_RING_TILT.sin_cos();
    Vec3::new(x, y * cos - z * sin, y * sin + z * cos)
}

fn buddha_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let choice = unit(rng);
    if choice < 0.2 {
        // head
        sampling::random_on_sphere(rng, 0.5) + Vec3::new(0.0, 1.2, 0.0)
    } else if choice < 0.6 {
        // torso
        sampling::random_on_sphere(rng, 0.8) * Vec3::new(1.2, 1.0, 0.8)
    } else {
        // crossed legs
        let disc = sampling::random_in_disk(rng, 1.5);
        Vec3::new(disc.x, centered(rng) * 0.5 - 0.8, disc.z)
    }
}

fn tornado_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let y = centered(rng) * 6.0;
    let lift = y + 3.0;
    let mut radius = 0.2 + 0.15 * lift.powf(1.8);
    radius += unit(rng) * 0.5 * (1.0 + lift / 6.0);

    let theta = unit(rng) * TAU;
    let mut point = Vec3::new(radius * theta.cos(), y, radius * theta.sin());

    if rng.gen_bool(TORNADO_DEBRIS_CHANCE) {
        point.x *= 1.5 + unit(rng);
        point.z *= 1.5 + unit(rng);
        point.y += centered(rng);
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_shape_fills_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for shape in Shape::ALL {
            let target = generate(shape, 1234, &mut rng);
            assert_eq!(target.len(), 1234, "{shape} produced wrong count");
            assert_eq!(target.shape(), shape);
            assert!(target.points().iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(Shape::Heart, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_unknown_id_falls_back_to_cube() {
        assert_eq!(Shape::from_id("dodecahedron"), Shape::Cube);
        assert_eq!(Shape::from_id(""), Shape::Cube);
        assert_eq!(Shape::from_id("sphere"), Shape::Sphere);
        assert!("dodecahedron".parse::<Shape>().is_err());
    }

    #[test]
    fn test_id_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_id(shape.id()), shape);
        }
    }

    #[test]
    fn test_calls_differ() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = generate(Shape::Flower, 64, &mut rng);
        let b = generate(Shape::Flower, 64, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_heart_thickness() {
        let mut rng = StdRng::seed_from_u64(3);
        let target = generate(Shape::Heart, 5000, &mut rng);
        for p in target.points() {
            assert!(p.z.abs() <= 0.25 + 1e-6);
        }
    }

    #[test]
    fn test_saturn_split() {
        let mut rng = StdRng::seed_from_u64(4);
        let count = 20_000;
        let target = generate(Shape::Saturn, count, &mut rng);

        let body = target
            .points()
            .iter()
            .filter(|p| (p.length() - 1.0).abs() < 0.01)
            .count();
        let ratio = body as f32 / count as f32;
        assert!((ratio - 0.3).abs() < 0.03, "body ratio {ratio}");

        // Ring points stay between the inner and outer radius.
        for p in &target.points()[(count as f32 * 0.3).ceil() as usize..] {
            let r = p.length();
            assert!(r >= 1.5 - 0.001 && r <= 4.0 + 0.06, "ring radius {r}");
        }
    }

    #[test]
    fn test_sphere_is_volumetric() {
        let mut rng = StdRng::seed_from_u64(5);
        let target = generate(Shape::Sphere, 20_000, &mut rng);
        // Uniform ball: an eighth of the volume sits inside radius 0.5.
        let inner = target.points().iter().filter(|p| p.length() < 0.5).count();
        let ratio = inner as f32 / 20_000.0;
        assert!((ratio - 0.125).abs() < 0.02, "inner ratio {ratio}");
    }

    #[test]
    fn test_fireworks_radius_range() {
        let mut rng = StdRng::seed_from_u64(6);
        let target = generate(Shape::Fireworks, 2000, &mut rng);
        for p in target.points() {
            let r = p.length();
            assert!(r >= 0.1 - 0.001 && r <= 3.1 + 0.001);
        }
    }

    #[test]
    fn test_tornado_column_height() {
        let mut rng = StdRng::seed_from_u64(8);
        let target = generate(Shape::Tornado, 2000, &mut rng);
        for p in target.points() {
            // Debris can jitter half a unit past the column ends.
            assert!(p.y >= -3.5 && p.y <= 3.5);
        }
    }

    #[test]
    fn test_cube_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let target = generate(Shape::Cube, 2000, &mut rng);
        assert!(target.points().iter().all(|p| p.abs().max_element() <= 1.0));
    }
}
