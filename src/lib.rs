//! # morphfield - Shape-Morphing Particle Field
//!
//! A cloud of particles that springs between target shapes, wrapped in a
//! meteor stream that knocks sparks out of it.
//!
//! morphfield is the simulation only: it owns every position, velocity and
//! color and exposes them as flat `f32` buffers ready for vertex upload.
//! Windowing, cameras and drawing belong to the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphfield::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut field = MorphField::new(Config::default().with_shape("heart"))?;
//!     let mut input = InputState::new();
//!
//!     loop {
//!         // Event handlers write into `input` between frames.
//!         field.tick(&input.snapshot());
//!         draw_points(field.cloud().position_buffer(), field.material_tint());
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! A [`Shape`] is turned into a [`ShapeTarget`]: one random point per
//! particle. Switching shapes swaps the table; particles keep their momentum
//! and spring over to the new points. Some shapes animate their targets
//! through an [`Overlay`]: the heart beats, the fireworks breathe, the rings
//! bob and the tornado replaces its targets with a looping flow field.
//!
//! ### Scale
//!
//! Wheel, slider and hand openness are three independent factors. Their
//! product is the target scale; the live scale eases toward it.
//!
//! ### Meteors and bursts
//!
//! The meteor stream speeds up and slows down on its own. When it is fast,
//! meteors crossing the cloud hit particles, kick them and spawn a cyan
//! burst from the [`ExplosionPool`].
//!
//! ## Tick order
//!
//! | Step | Component |
//! |------|-----------|
//! | 1 | [`Clock`] |
//! | 2 | [`ScaleAggregator`] |
//! | 3 | [`ParticleSimulator`] |
//! | 4 | [`SceneRotation`] |
//! | 5 | [`MeteorField`] then [`collision::resolve`] |
//! | 6 | [`ExplosionPool`] |
//! | 7 | [`Anchors`] |
//! | 8 | Recolor, when a scheme or shape change is pending |

pub mod anchors;
pub mod collision;
pub mod color;
pub mod config;
mod engine;
pub mod error;
pub mod explosion;
pub mod input;
pub mod meteor;
pub mod overlay;
pub mod rotation;
pub mod sampling;
pub mod scale;
pub mod shape;
pub mod simulator;
pub mod time;
pub mod tornado;

pub use anchors::{Anchor, Anchors};
pub use bytemuck;
pub use collision::Impact;
pub use color::ColorScheme;
pub use config::Config;
pub use engine::MorphField;
pub use error::{ColorError, ConfigError, ShapeError};
pub use explosion::ExplosionPool;
pub use glam::{Vec2, Vec3};
pub use input::{FrameInput, InputState};
pub use meteor::MeteorField;
pub use overlay::Overlay;
pub use rotation::SceneRotation;
pub use scale::{ScaleAggregator, ScaleFactors};
pub use shape::{Shape, ShapeTarget};
pub use simulator::ParticleSimulator;
pub use time::Clock;
pub use tornado::FlowField;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use morphfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::ColorScheme;
    pub use crate::config::Config;
    pub use crate::engine::MorphField;
    pub use crate::error::ConfigError;
    pub use crate::input::{FrameInput, InputState};
    pub use crate::shape::Shape;
    pub use crate::{Vec2, Vec3};
}
