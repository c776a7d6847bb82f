//! Scale aggregation.
//!
//! Three independent inputs drive the size of the cloud: the scroll wheel,
//! a slider, and hand openness. Each factor is clamped to its own range; the
//! product is not. The aggregator then eases the live scale toward that
//! product by a fixed fraction per tick so input jumps never pop the cloud.

use std::ops::RangeInclusive;

/// Valid range for the wheel and slider factors.
pub const FACTOR_RANGE: RangeInclusive<f32> = 0.1..=5.0;
/// Valid range for the gesture factor.
pub const GESTURE_RANGE: RangeInclusive<f32> = 0.1..=6.0;
/// Scale change per unit of wheel delta (positive delta shrinks).
pub const WHEEL_SENSITIVITY: f32 = 0.001;
/// Fraction of the remaining gap closed each tick.
pub const SMOOTHING: f32 = 0.1;

/// Extension ratio at which the hand reads as fully closed.
pub const CLOSED_EXTENSION: f32 = 0.8;
/// Extension ratio at which the hand reads as fully open.
pub const OPEN_EXTENSION: f32 = 1.5;

/// Map hand openness in `[0, 1]` to the gesture scale factor.
pub fn gesture_scale(openness: f32) -> f32 {
    let (min, max) = (*GESTURE_RANGE.start(), *GESTURE_RANGE.end());
    min + openness.clamp(0.0, 1.0) * (max - min)
}

/// Hand response curve: fingertip extension ratio (average tip-to-wrist
/// distance over palm size) to openness in `[0, 1]`.
pub fn openness_from_extension(ratio: f32) -> f32 {
    ((ratio - CLOSED_EXTENSION) / (OPEN_EXTENSION - CLOSED_EXTENSION)).clamp(0.0, 1.0)
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// The three scale factors as written by input sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub wheel: f32,
    pub slider: f32,
    pub gesture: f32,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self {
            wheel: 1.0,
            slider: 1.0,
            gesture: 1.0,
        }
    }
}

impl ScaleFactors {
    /// Accumulate a wheel delta. Scrolling down (positive delta) shrinks.
    pub fn apply_wheel_delta(&mut self, delta_y: f32) {
        if delta_y.is_finite() {
            self.wheel = clamp_to(self.wheel - delta_y * WHEEL_SENSITIVITY, &FACTOR_RANGE);
        }
    }

    pub fn set_slider(&mut self, value: f32) {
        if value.is_finite() {
            self.slider = clamp_to(value, &FACTOR_RANGE);
        }
    }

    /// Set the gesture factor from hand openness in `[0, 1]`.
    pub fn set_gesture_openness(&mut self, openness: f32) {
        if openness.is_finite() {
            self.gesture = gesture_scale(openness);
        }
    }

    /// Unclamped product of all three factors.
    #[inline]
    pub fn product(&self) -> f32 {
        self.wheel * self.slider * self.gesture
    }
}

/// Smoothed scale fed to the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAggregator {
    factors: ScaleFactors,
    current: f32,
}

impl Default for ScaleAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleAggregator {
    pub fn new() -> Self {
        Self {
            factors: ScaleFactors::default(),
            current: 1.0,
        }
    }

    /// Live scale.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Scale the live value is easing toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.factors.product()
    }

    /// Last accepted factors.
    pub fn factors(&self) -> ScaleFactors {
        self.factors
    }

    /// Accept this frame's factors and advance the live scale one step.
    ///
    /// Non-finite factors are dropped (the previous value is kept) and
    /// finite ones are clamped to their range, so a bad input source can
    /// never push NaN into the position buffer.
    pub fn update(&mut self, input: &ScaleFactors) -> f32 {
        self.factors.wheel = sanitize("wheel", input.wheel, self.factors.wheel, &FACTOR_RANGE);
        self.factors.slider = sanitize("slider", input.slider, self.factors.slider, &FACTOR_RANGE);
        self.factors.gesture =
            sanitize("gesture", input.gesture, self.factors.gesture, &GESTURE_RANGE);

        self.current += (self.target() - self.current) * SMOOTHING;
        self.current
    }
}

fn sanitize(name: &str, value: f32, previous: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        clamp_to(value, range)
    } else {
        log::warn!("Ignoring non-finite {} scale factor {}", name, value);
        previous
    }
}
