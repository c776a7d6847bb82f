//! Label anchors.
//!
//! A handful of points buried inside the cloud that a host can hang labels
//! on. They ride the cloud's rotation and scale, fade in as the cloud grows
//! past a threshold (ringed planet and fireworks only), and pulse gently.
//!
//! Hover needs the anchor projected to screen space, which depends on a
//! camera this crate does not own. Hosts project [`Anchor::world`] and feed
//! the result to [`Anchors::hover`].

use crate::rotation::SceneRotation;
use crate::sampling::{spherical, unit};
use crate::shape::Shape;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::PI;

/// Pointer distance in NDC that counts as hovering.
pub const HOVER_RADIUS: f32 = 0.15;
/// Visibility needed before hover is considered.
pub const HOVER_MIN_VISIBILITY: f32 = 0.5;
/// Scale at which anchors start to appear.
pub const FADE_START: f32 = 1.2;
/// Scale range over which anchors fade fully in.
pub const FADE_RANGE: f32 = 1.5;

/// One anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Position in cloud space, unscaled.
    pub base: Vec3,
    /// Position in world space after the last update.
    pub world: Vec3,
    /// Sprite size after the last update.
    pub size: f32,
    pub hovered: bool,
}

/// All anchors plus their shared visibility.
#[derive(Debug, Clone)]
pub struct Anchors {
    anchors: Vec<Anchor>,
    visibility: f32,
}

/// Anchor opacity for `shape` at cloud `scale`.
pub fn visibility(shape: Shape, scale: f32) -> f32 {
    match shape {
        Shape::Saturn | Shape::Fireworks => ((scale - FADE_START) / FADE_RANGE).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

impl Anchors {
    /// Spread `count` anchors over a Fibonacci sphere with random radii.
    /// The first anchor sits close to the center.
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let anchors = (0..count)
            .map(|j| {
                let k = j as f32 + 0.5;
                let phi = (1.0 - 2.0 * k / count as f32).acos();
                let theta = PI * (1.0 + 5f32.sqrt()) * k;
                let radius = 0.4 + unit(rng) * 0.4;

                let mut base = spherical(radius, theta, phi);
                if j == 0 {
                    base *= 0.2;
                }
                Anchor {
                    base,
                    world: base,
                    size: 0.15,
                    hovered: false,
                }
            })
            .collect();

        Self {
            anchors,
            visibility: 0.0,
        }
    }

    /// Refresh visibility, world positions and pulse sizes.
    pub fn update(&mut self, shape: Shape, scale: f32, rotation: &SceneRotation, time: f64) {
        self.visibility = visibility(shape, scale);
        if self.visibility <= 0.0 {
            return;
        }

        let quat = rotation.quat();
        for (j, anchor) in self.anchors.iter_mut().enumerate() {
            anchor.world = quat * anchor.base * scale;
            let pulse = 0.2 + 0.05 * (time * 3.0 + j as f64).sin() as f32;
            anchor.size = if anchor.hovered { pulse * 1.5 } else { pulse };
        }
    }

    /// Hover test for anchor `index` given its projected NDC position.
    ///
    /// Records and returns the result. Never hovers while anchors are
    /// mostly faded or there is no pointer.
    pub fn hover(&mut self, index: usize, projected: Vec2, pointer: Option<Vec2>) -> bool {
        let visible = self.visibility > HOVER_MIN_VISIBILITY;
        let Some(anchor) = self.anchors.get_mut(index) else {
            return false;
        };
        anchor.hovered = match pointer {
            Some(p) if visible => p.distance(projected) < HOVER_RADIUS,
            _ => false,
        };
        anchor.hovered
    }

    #[inline]
    pub fn visibility(&self) -> f32 {
        self.visibility
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility > 0.0
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }
}
