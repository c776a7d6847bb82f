//! Per-shape kinematic overlays.
//!
//! An overlay turns a particle's scaled static target into the point the
//! spring actually chases this tick. Most shapes only modulate the target;
//! the tornado replaces it outright.

use crate::shape::Shape;
use crate::tornado::FlowField;
use glam::Vec3;

/// Kinematic rule applied on top of a shape's static target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// Static target, unchanged.
    None,
    /// Whole-shape radial pulse: target × (1 + amplitude·sin(frequency·t)).
    Pulse { amplitude: f32, frequency: f32 },
    /// Independent vertical bob per particle, phase-shifted by index.
    Float {
        amplitude: f32,
        speed: f32,
        phase_stride: f32,
    },
    /// Target recomputed from the tornado flow field.
    Flow(FlowField),
}

impl Overlay {
    /// The overlay each shape runs.
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Fireworks => Overlay::Pulse {
                amplitude: 0.5,
                frequency: 1.0,
            },
            Shape::Heart => Overlay::Pulse {
                amplitude: 0.05,
                frequency: 5.0,
            },
            Shape::Saturn => Overlay::Float {
                amplitude: 0.05,
                speed: 1.5,
                // Large stride so neighbouring indices are out of phase.
                phase_stride: 13.0,
            },
            Shape::Tornado => Overlay::Flow(FlowField::default()),
            Shape::Sphere | Shape::Flower | Shape::Buddha | Shape::Cube => Overlay::None,
        }
    }

    /// Steer particle `index` toward this tick's target.
    ///
    /// `base` is the unscaled static target, `scale` the live cloud scale.
    pub fn steer(&self, index: usize, base: Vec3, time: f64, scale: f32) -> Steer {
        let scaled = base * scale;
        match *self {
            Overlay::None => Steer::to(scaled),
            Overlay::Pulse {
                amplitude,
                frequency,
            } => {
                let wave = (time * f64::from(frequency)).sin() as f32;
                Steer::to(scaled * (1.0 + amplitude * wave))
            }
            Overlay::Float {
                amplitude,
                speed,
                phase_stride,
            } => {
                let phase = index as f64 * f64::from(phase_stride);
                let bob = (time * f64::from(speed) + phase).sin() as f32 * amplitude;
                Steer::to(scaled + Vec3::new(0.0, bob, 0.0))
            }
            Overlay::Flow(flow) => {
                let sample = flow.sample(index, base.y, time);
                Steer {
                    target: sample.position() * scale,
                    color: Some(flow.color(&sample)),
                    wrap: Some(flow),
                }
            }
        }
    }
}

/// Result of an overlay for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steer {
    /// Point the spring pulls toward (before pointer parallax).
    pub target: Vec3,
    /// Vertex color override for this tick.
    pub color: Option<Vec3>,
    /// Flow whose loop wrap should teleport the particle instead of springing it.
    pub wrap: Option<FlowField>,
}

impl Steer {
    fn to(target: Vec3) -> Self {
        Self {
            target,
            color: None,
            wrap: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_shapes_scale_only() {
        let base = Vec3::new(1.0, 2.0, 3.0);
        for shape in [Shape::Sphere, Shape::Flower, Shape::Buddha, Shape::Cube] {
            let steer = Overlay::for_shape(shape).steer(4, base, 12.3, 2.0);
            assert_eq!(steer.target, base * 2.0);
            assert!(steer.color.is_none());
            assert!(steer.wrap.is_none());
        }
    }

    #[test]
    fn test_fireworks_pulse() {
        let overlay = Overlay::for_shape(Shape::Fireworks);
        let base = Vec3::new(1.0, 0.0, 0.0);
        let t = std::f64::consts::FRAC_PI_2;
        let steer = overlay.steer(0, base, t, 1.0);
        assert!((steer.target.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_heartbeat() {
        let overlay = Overlay::for_shape(Shape::Heart);
        let base = Vec3::new(0.0, 2.0, 0.0);
        let t = std::f64::consts::FRAC_PI_2 / 5.0;
        let steer = overlay.steer(0, base, t, 1.0);
        assert!((steer.target.y - 2.1).abs() < 1e-5);
    }

    #[test]
    fn test_saturn_float_is_vertical_and_phased() {
        let overlay = Overlay::for_shape(Shape::Saturn);
        let base = Vec3::new(1.0, 0.0, 1.0);
        let a = overlay.steer(0, base, 1.0, 1.0).target;
        let b = overlay.steer(1, base, 1.0, 1.0).target;
        assert_eq!(a.x, 1.0);
        assert_eq!(a.z, 1.0);
        assert!(a.y.abs() <= 0.05 && b.y.abs() <= 0.05);
        assert!((a.y - b.y).abs() > 1e-4);
    }

    #[test]
    fn test_tornado_replaces_target() {
        let overlay = Overlay::for_shape(Shape::Tornado);
        let steer = overlay.steer(0, Vec3::new(9.0, 0.0, 9.0), 0.0, 2.0);
        let flow = FlowField::default();
        let expected = flow.sample(0, 0.0, 0.0).position() * 2.0;
        assert!((steer.target - expected).length() < 1e-5);
        assert!(steer.color.is_some());
        assert!(steer.wrap.is_some());
    }
}
