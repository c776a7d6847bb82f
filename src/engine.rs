//! The field: every component, stepped in a fixed order.

use crate::anchors::Anchors;
use crate::collision::{self, Impact};
use crate::color::{self, ColorScheme};
use crate::config::Config;
use crate::error::{ColorError, ConfigError};
use crate::explosion::ExplosionPool;
use crate::input::FrameInput;
use crate::meteor::MeteorField;
use crate::rotation::SceneRotation;
use crate::scale::ScaleAggregator;
use crate::shape::Shape;
use crate::simulator::ParticleSimulator;
use crate::time::Clock;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A shape-morphing particle field.
///
/// Owns the cloud, the meteor stream, the burst pool, the label anchors and
/// the clock. Call [`tick`](Self::tick) once per frame, then read the
/// buffers for rendering.
///
/// # Example
///
/// ```ignore
/// use morphfield::{Config, FrameInput, MorphField};
///
/// let mut field = MorphField::new(Config::default().with_seed(1))?;
/// field.set_shape_id("heart");
///
/// loop {
///     field.tick(&FrameInput::default());
///     upload(field.cloud().position_buffer());
///     if field.cloud().colors_dirty() {
///         upload(field.cloud().color_buffer());
///         field.clear_colors_dirty();
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MorphField {
    clock: Clock,
    scale: ScaleAggregator,
    cloud: ParticleSimulator,
    rotation: SceneRotation,
    meteors: MeteorField,
    explosions: ExplosionPool,
    anchors: Anchors,
    impacts: Vec<Impact>,
    scheme: ColorScheme,
    base_color: Vec3,
    recolor_pending: bool,
    pointer: Option<Vec2>,
    rng: SmallRng,
}

impl MorphField {
    /// Build a field from `config`.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_color = config.base_color()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let shape = config.shape();
        let scheme = config.color_scheme.for_shape(shape);
        let mut cloud = ParticleSimulator::new(config.particle_count, shape, &mut rng);
        cloud.recolor(scheme, &mut rng);
        let meteors = MeteorField::new(config.meteor_count, &mut rng);
        let anchors = Anchors::new(config.anchor_count, &mut rng);

        log::info!(
            "Created field: {} particles, {} meteors, {} spark slots, shape '{}', scheme '{}'",
            config.particle_count,
            config.meteor_count,
            config.explosion_capacity,
            shape,
            scheme
        );

        Ok(Self {
            clock: Clock::new(),
            scale: ScaleAggregator::new(),
            cloud,
            rotation: SceneRotation::new(),
            meteors,
            explosions: ExplosionPool::new(config.explosion_capacity),
            anchors,
            impacts: Vec::new(),
            scheme,
            base_color,
            recolor_pending: false,
            pointer: None,
            rng,
        })
    }

    /// Advance the whole field one frame.
    ///
    /// While the clock is paused only the frame counter moves.
    pub fn tick(&mut self, input: &FrameInput) {
        if self.clock.is_paused() {
            self.clock.tick();
            return;
        }

        let time = self.clock.tick();
        let scale = self.scale.update(&input.scale);
        let shape = self.cloud.shape();
        self.pointer = input.pointer;

        self.cloud.tick(time, scale, input.pointer);
        self.rotation.tick(shape, input.pointer);

        self.meteors.tick(time, &mut self.rng);
        self.impacts = collision::resolve(
            &self.meteors,
            &mut self.cloud,
            &mut self.explosions,
            &mut self.rng,
        );

        self.explosions.tick();
        self.anchors.update(shape, scale, &self.rotation, time);

        if self.recolor_pending {
            self.cloud.recolor(self.scheme, &mut self.rng);
            self.recolor_pending = false;
        }
    }

    /// Retarget the cloud to `shape`.
    ///
    /// Also applies the tornado palette rule and schedules a recolor.
    pub fn set_shape(&mut self, shape: Shape) {
        self.cloud.set_shape(shape, &mut self.rng);
        let scheme = self.scheme.for_shape(shape);
        if scheme != self.scheme {
            log::debug!("Color scheme '{}' -> '{}' for shape '{}'", self.scheme, scheme, shape);
        }
        self.scheme = scheme;
        self.recolor_pending = true;
        log::debug!("Shape set to '{}'", shape);
    }

    /// Retarget the cloud by id. Unknown ids fall back to the cube.
    pub fn set_shape_id(&mut self, id: &str) -> Shape {
        let shape = id.parse().unwrap_or_else(|_| {
            log::debug!("Unknown shape id '{}', using '{}'", id, Shape::Cube);
            Shape::Cube
        });
        self.set_shape(shape);
        shape
    }

    /// Switch color scheme; the cloud is recolored at the end of the next tick.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
        self.recolor_pending = true;
        log::debug!("Color scheme set to '{}'", scheme);
    }

    /// Switch color scheme by id.
    pub fn set_color_scheme_id(&mut self, id: &str) -> Result<(), ColorError> {
        self.set_color_scheme(id.parse()?);
        Ok(())
    }

    /// Base color for the `single` scheme. Takes effect through the material tint.
    pub fn set_base_color(&mut self, rgb: Vec3) {
        self.base_color = rgb.clamp(Vec3::ZERO, Vec3::ONE);
    }

    /// Base color from a `#rrggbb` string.
    pub fn set_base_color_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_base_color(color::parse_hex(hex)?);
        Ok(())
    }

    /// Material tint the renderer should multiply vertex colors by.
    pub fn material_tint(&self) -> Vec3 {
        color::material_tint(self.scheme, self.base_color)
    }

    pub fn shape(&self) -> Shape {
        self.cloud.shape()
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    /// Live cloud scale.
    pub fn scale(&self) -> f32 {
        self.scale.current()
    }

    /// Simulation time.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Pointer seen by the last tick.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn cloud(&self) -> &ParticleSimulator {
        &self.cloud
    }

    /// Position of cloud particle `index`.
    pub fn particle_position(&self, index: usize) -> Option<Vec3> {
        self.cloud.position(index)
    }

    /// Mark the cloud color buffer as uploaded.
    pub fn clear_colors_dirty(&mut self) {
        self.cloud.clear_colors_dirty();
    }

    pub fn rotation(&self) -> &SceneRotation {
        &self.rotation
    }

    pub fn meteors(&self) -> &MeteorField {
        &self.meteors
    }

    pub fn explosions(&self) -> &ExplosionPool {
        &self.explosions
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// Hover test for anchor `index` at its projected NDC position, against
    /// the last tick's pointer.
    pub fn hover_anchor(&mut self, index: usize, projected: Vec2) -> bool {
        self.anchors.hover(index, projected, self.pointer)
    }

    /// Meteor strikes from the last tick.
    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }
}
