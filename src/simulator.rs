//! The particle cloud.
//!
//! Every particle chases its point in the current [`ShapeTarget`] with a
//! damped spring. Switching shapes only swaps the target table; the
//! particles keep their positions and velocities and fly over to the new
//! shape on their own.
//!
//! Per tick, per particle:
//!
//! 1. Target = static point × scale, then the shape's [`Overlay`].
//! 2. Tornado only: a loop wrap teleports the particle to its target.
//! 3. Pointer parallax shifts the target on x and y.
//! 4. `v = (v + (target - p) * SPRING) * DAMPING; p += v`.

use crate::color::{self, ColorScheme};
use crate::overlay::Overlay;
use crate::sampling;
use crate::shape::{self, Shape, ShapeTarget};
use glam::{Vec2, Vec3};
use rand::Rng;

/// Fraction of the distance to target added to velocity each tick.
pub const SPRING: f32 = 0.05;
/// Velocity retained each tick.
pub const DAMPING: f32 = 0.9;
/// Target shift per unit of pointer NDC.
pub const PARALLAX: f32 = 0.5;
/// Radius of the ball the cloud starts in.
pub const INITIAL_RADIUS: f32 = 2.0;

/// Spring-driven particle cloud.
#[derive(Debug, Clone)]
pub struct ParticleSimulator {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Vec3>,
    target: ShapeTarget,
    overlay: Overlay,
    colors_dirty: bool,
}

impl ParticleSimulator {
    /// Create `count` particles at rest, scattered through a ball, with
    /// `shape` as the first target.
    pub fn new<R: Rng + ?Sized>(count: usize, shape: Shape, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| sampling::random_in_sphere(rng, INITIAL_RADIUS))
            .collect();
        let target = shape::generate(shape, count, rng);

        Self {
            positions,
            velocities: vec![Vec3::ZERO; count],
            colors: vec![Vec3::ONE; count],
            overlay: Overlay::for_shape(shape),
            target,
            colors_dirty: true,
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Shape currently targeted.
    pub fn shape(&self) -> Shape {
        self.target.shape()
    }

    pub fn target(&self) -> &ShapeTarget {
        &self.target
    }

    /// Retarget the cloud. The new table is built in full before it replaces
    /// the old one, so a tick never sees a mix of two shapes.
    pub fn set_shape<R: Rng + ?Sized>(&mut self, shape: Shape, rng: &mut R) {
        let target = shape::generate(shape, self.len(), rng);
        self.target = target;
        self.overlay = Overlay::for_shape(shape);
    }

    /// Advance every particle one step.
    pub fn tick(&mut self, time: f64, scale: f32, pointer: Option<Vec2>) {
        let parallax = pointer.map(|p| p * PARALLAX);

        for (i, (position, velocity)) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .enumerate()
        {
            let steer = self.overlay.steer(i, self.target.get(i), time, scale);
            let mut target = steer.target;

            if let Some(flow) = steer.wrap {
                if flow.wraps(target.y, position.y, scale) {
                    *position = target;
                }
            }
            if let Some(color) = steer.color {
                self.colors[i] = color;
                self.colors_dirty = true;
            }
            if let Some(offset) = parallax {
                target.x += offset.x;
                target.y += offset.y;
            }

            *velocity = (*velocity + (target - *position) * SPRING) * DAMPING;
            *position += *velocity;
        }
    }

    /// Rewrite every color from `scheme`, reading current positions.
    pub fn recolor<R: Rng + ?Sized>(&mut self, scheme: ColorScheme, rng: &mut R) {
        color::fill(&mut self.colors, &self.positions, scheme, rng);
        self.colors_dirty = true;
    }

    /// Position of particle `index`, if it exists.
    #[inline]
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Velocity of particle `index`, if it exists.
    #[inline]
    pub fn velocity(&self, index: usize) -> Option<Vec3> {
        self.velocities.get(index).copied()
    }

    /// Add `impulse` to the velocity of particle `index`. Out-of-range
    /// indices are ignored.
    pub fn apply_impulse(&mut self, index: usize, impulse: Vec3) {
        if let Some(v) = self.velocities.get_mut(index) {
            *v += impulse;
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Position buffer as flat `[x, y, z, x, y, z, ...]`.
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color buffer as flat `[r, g, b, r, g, b, ...]`.
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Whether colors changed since the last [`clear_colors_dirty`](Self::clear_colors_dirty).
    #[inline]
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Mark colors as uploaded.
    pub fn clear_colors_dirty(&mut self) {
        self.colors_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Put every particle exactly on its scaled target, at rest.
    fn settle(sim: &mut ParticleSimulator, scale: f32) {
        let targets: Vec<Vec3> = sim.target.points().iter().map(|p| *p * scale).collect();
        sim.positions.copy_from_slice(&targets);
        sim.velocities.fill(Vec3::ZERO);
    }

    #[test]
    fn test_new_cloud() {
        let sim = ParticleSimulator::new(1000, Shape::Sphere, &mut rng());
        assert_eq!(sim.len(), 1000);
        assert_eq!(sim.target().len(), 1000);
        assert!(sim
            .positions()
            .iter()
            .all(|p| p.length() <= INITIAL_RADIUS + 1e-4));
        assert!(sim.velocities().iter().all(|v| *v == Vec3::ZERO));
    }

    #[test]
    fn test_at_rest_on_target_stays() {
        let mut sim = ParticleSimulator::new(200, Shape::Sphere, &mut rng());
        settle(&mut sim, 1.0);
        let before = sim.positions().to_vec();

        sim.tick(0.5, 1.0, None);

        for (a, b) in before.iter().zip(sim.positions()) {
            assert!((*a - *b).length() < 1e-6);
        }
    }

    #[test]
    fn test_spring_step() {
        let mut sim = ParticleSimulator::new(1, Shape::Cube, &mut rng());
        let target = sim.target.get(0);
        sim.positions[0] = target + Vec3::new(1.0, 0.0, 0.0);

        sim.tick(0.0, 1.0, None);

        // v = (0 + (-1) * 0.05) * 0.9
        let v = sim.velocity(0).unwrap();
        assert!((v.x + 0.045).abs() < 1e-6);
        let p = sim.position(0).unwrap();
        assert!((p.x - (target.x + 1.0 - 0.045)).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_parallax() {
        let mut sim = ParticleSimulator::new(1, Shape::Cube, &mut rng());
        settle(&mut sim, 1.0);
        let target = sim.target.get(0);

        sim.tick(0.0, 1.0, Some(Vec2::new(1.0, -1.0)));

        // Pulled toward target + (0.5, -0.5)
        let v = sim.velocity(0).unwrap();
        assert!((v.x - 0.5 * SPRING * DAMPING).abs() < 1e-6);
        assert!((v.y + 0.5 * SPRING * DAMPING).abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
        assert!((sim.position(0).unwrap().z - target.z).abs() < 1e-6);
    }

    #[test]
    fn test_shape_switch_keeps_state() {
        let mut rng = rng();
        let mut sim = ParticleSimulator::new(500, Shape::Sphere, &mut rng);
        for _ in 0..10 {
            sim.tick(0.0, 1.0, None);
        }
        let positions = sim.positions().to_vec();
        let velocities = sim.velocities().to_vec();

        sim.set_shape(Shape::Heart, &mut rng);

        assert_eq!(sim.shape(), Shape::Heart);
        assert_eq!(sim.target().len(), 500);
        assert_eq!(sim.positions(), &positions[..]);
        assert_eq!(sim.velocities(), &velocities[..]);
    }

    #[test]
    fn test_tornado_teleports_on_wrap() {
        let mut sim = ParticleSimulator::new(40, Shape::Tornado, &mut rng());
        sim.velocities[1] = Vec3::new(0.1, 0.2, 0.3);
        // Far below any target on the column.
        sim.positions[1] = Vec3::new(0.0, -100.0, 0.0);

        sim.tick(0.0, 1.0, None);

        let p = sim.position(1).unwrap();
        assert!(p.y > -4.0, "particle was not teleported: {p}");
        // Velocity survives the teleport, then the spring runs from the target.
        let v = sim.velocity(1).unwrap();
        assert!((v - Vec3::new(0.1, 0.2, 0.3) * DAMPING).length() < 1e-5);
    }

    #[test]
    fn test_tornado_writes_colors() {
        let mut sim = ParticleSimulator::new(40, Shape::Tornado, &mut rng());
        sim.clear_colors_dirty();
        sim.tick(1.0, 1.0, None);
        assert!(sim.colors_dirty());
        assert!(sim
            .colors()
            .iter()
            .all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
    }

    #[test]
    fn test_static_shape_leaves_colors() {
        let mut sim = ParticleSimulator::new(40, Shape::Heart, &mut rng());
        sim.clear_colors_dirty();
        sim.tick(1.0, 1.0, None);
        assert!(!sim.colors_dirty());
    }

    #[test]
    fn test_impulse_and_bounds() {
        let mut sim = ParticleSimulator::new(3, Shape::Cube, &mut rng());
        sim.apply_impulse(2, Vec3::X);
        sim.apply_impulse(99, Vec3::X);
        assert_eq!(sim.velocity(2), Some(Vec3::X));
        assert_eq!(sim.position(99), None);
    }

    #[test]
    fn test_buffers_are_flat() {
        let sim = ParticleSimulator::new(10, Shape::Sphere, &mut rng());
        assert_eq!(sim.position_buffer().len(), 30);
        assert_eq!(sim.color_buffer().len(), 30);
        assert_eq!(sim.position_buffer()[3], sim.positions()[1].x);
    }
}
