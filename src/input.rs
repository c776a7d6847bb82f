//! Input handling for the particle field.
//!
//! Input sources (window events, a slider, a hand tracker) write into an
//! [`InputState`] whenever they fire. Once per tick the host takes a
//! [`FrameInput`] snapshot and hands it to [`MorphField::tick`], so the
//! simulation reads one consistent set of values for the whole frame.
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputState::new();
//! input.set_window_size(1280, 720);
//!
//! // From your event loop:
//! input.cursor_moved(640.0, 360.0);
//! input.scroll(-120.0);
//!
//! // Once per frame:
//! field.tick(&input.snapshot());
//! ```
//!
//! [`MorphField::tick`]: crate::MorphField::tick

use crate::scale::{self, ScaleFactors};
use glam::Vec2;

/// Pointer value hosts use to mean "no pointer on screen".
pub const OFFSCREEN: Vec2 = Vec2::new(-999.0, -999.0);

/// Interpret a raw NDC pointer that may carry the [`OFFSCREEN`] sentinel.
///
/// Any coordinate at or below -2 is outside the viewport and means no pointer.
pub fn pointer_from_ndc(ndc: Vec2) -> Option<Vec2> {
    (ndc.x > -2.0 && ndc.y > -2.0).then_some(ndc)
}

/// Everything the simulation reads from the outside world in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Scale factors from wheel, slider and gesture.
    pub scale: ScaleFactors,
    /// Pointer in normalized device coordinates (-1 to 1, y up), if on screen.
    pub pointer: Option<Vec2>,
}

impl FrameInput {
    /// Input with a pointer at `ndc` and neutral scale.
    pub fn with_pointer(ndc: Vec2) -> Self {
        Self {
            pointer: Some(ndc),
            ..Default::default()
        }
    }
}

/// Accumulates asynchronous input between ticks.
///
/// A tracked hand pointer takes over from the mouse while it is present.
/// When the hand is lost the pointer stays where the hand left it until the
/// mouse moves again.
#[derive(Debug, Clone)]
pub struct InputState {
    scale: ScaleFactors,
    mouse_position: Vec2,
    pointer: Option<Vec2>,
    hand_pointer: Option<Vec2>,
    window_size: (u32, u32),
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self {
            scale: ScaleFactors::default(),
            mouse_position: Vec2::ZERO,
            pointer: None,
            hand_pointer: None,
            window_size: (800, 600),
        }
    }

    /// Update window size for NDC calculations.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Mouse moved to `(x, y)` in window pixels. Ignored while a hand pointer is active.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
        if self.hand_pointer.is_some() {
            return;
        }

        let (w, h) = self.window_size;
        if w > 0 && h > 0 {
            self.pointer = Some(Vec2::new(
                (x / w as f32) * 2.0 - 1.0,
                1.0 - (y / h as f32) * 2.0, // Y flipped
            ));
        }
    }

    /// Mouse left the window.
    pub fn cursor_left(&mut self) {
        if self.hand_pointer.is_none() {
            self.pointer = None;
        }
    }

    /// Scroll wheel moved. Positive `delta_y` (scrolling down) shrinks the cloud.
    pub fn scroll(&mut self, delta_y: f32) {
        self.scale.apply_wheel_delta(delta_y);
    }

    /// Scale slider value.
    pub fn set_slider(&mut self, value: f32) {
        self.scale.set_slider(value);
    }

    /// Hand openness in `[0, 1]` from the scale hand.
    pub fn set_hand_openness(&mut self, openness: f32) {
        self.scale.set_gesture_openness(openness);
    }

    /// Raw fingertip extension ratio from the scale hand.
    pub fn set_hand_extension(&mut self, ratio: f32) {
        self.set_hand_openness(scale::openness_from_extension(ratio));
    }

    /// Pointing hand's index fingertip in camera image coordinates (0 to 1,
    /// y down, unmirrored), or `None` when the hand is lost.
    pub fn set_hand_pointer(&mut self, landmark: Option<Vec2>) {
        self.hand_pointer = landmark.map(|p| Vec2::new(1.0 - p.x * 2.0, 1.0 - p.y * 2.0));
        if let Some(ndc) = self.hand_pointer {
            self.pointer = Some(ndc);
        }
    }

    /// Whether a hand is currently steering the pointer.
    pub fn hand_active(&self) -> bool {
        self.hand_pointer.is_some()
    }

    /// Get the mouse position in screen pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Current pointer in NDC, if any.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Current scale factors.
    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    /// Snapshot for this tick.
    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            scale: self.scale,
            pointer: self.pointer,
        }
    }
}
