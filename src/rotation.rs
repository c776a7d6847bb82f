//! Cloud group rotation.

use crate::shape::Shape;
use glam::{EulerRot, Quat, Vec2, Vec3};

/// Yaw added every tick.
pub const AUTO_SPIN: f32 = 0.002;
/// Pointer steering gain.
pub const POINTER_GAIN: f32 = 0.01;
/// Fixed roll for the ringed planet.
pub const SATURN_TILT: f32 = 0.2;

/// Euler angles (radians, XYZ order) applied to the whole cloud.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneRotation {
    pub euler: Vec3,
}

impl SceneRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick.
    ///
    /// Yaw always creeps forward and the pointer's x adds to it. The
    /// pointer's y sets pitch outright; with no pointer the last pitch holds.
    pub fn tick(&mut self, shape: Shape, pointer: Option<Vec2>) {
        self.euler.y += AUTO_SPIN;
        if let Some(p) = pointer {
            self.euler.y += p.x * POINTER_GAIN;
            self.euler.x = -p.y * POINTER_GAIN;
        }
        self.euler.z = if shape == Shape::Saturn { SATURN_TILT } else { 0.0 };
    }

    /// Rotation as a quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.euler.x, self.euler.y, self.euler.z)
    }

    /// Rotate a point from cloud space to world space.
    #[inline]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.quat() * point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_spin() {
        let mut rot = SceneRotation::new();
        for _ in 0..100 {
            rot.tick(Shape::Heart, None);
        }
        assert!((rot.euler.y - 0.2).abs() < 1e-5);
        assert_eq!(rot.euler.x, 0.0);
        assert_eq!(rot.euler.z, 0.0);
    }

    #[test]
    fn test_pointer_steers() {
        let mut rot = SceneRotation::new();
        rot.tick(Shape::Heart, Some(Vec2::new(1.0, 0.5)));
        assert!((rot.euler.y - 0.012).abs() < 1e-6);
        assert!((rot.euler.x + 0.005).abs() < 1e-6);

        // Pitch holds once the pointer leaves.
        rot.tick(Shape::Heart, None);
        assert!((rot.euler.x + 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_saturn_tilt() {
        let mut rot = SceneRotation::new();
        rot.tick(Shape::Saturn, None);
        assert_eq!(rot.euler.z, SATURN_TILT);
        rot.tick(Shape::Sphere, None);
        assert_eq!(rot.euler.z, 0.0);
    }

    #[test]
    fn test_apply_yaw() {
        let rot = SceneRotation {
            euler: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        };
        let p = rot.apply(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
