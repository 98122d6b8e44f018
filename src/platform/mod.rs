//! Platform abstraction layer
//!
//! Turns raw browser input into the simulation's three input events.
//! Kept free of `web_sys` types so the mapping is testable natively.

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::InputEvent;

/// Map a `KeyboardEvent.code` to an input event
pub fn key_to_input(code: &str) -> Option<InputEvent> {
    match code {
        "ArrowLeft" | "KeyA" => Some(InputEvent::LaneLeft),
        "ArrowRight" | "KeyD" => Some(InputEvent::LaneRight),
        "Space" | "ArrowUp" | "KeyW" => Some(InputEvent::Jump),
        _ => None,
    }
}

/// Tracks one touch from start to end
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Classify the finished gesture. A touch end without a start is ignored.
    pub fn touch_end(&mut self, x: f32) -> Option<InputEvent> {
        let start = self.start_x.take()?;
        Some(classify_swipe(x - start))
    }
}

/// Horizontal displacement beyond the threshold is a lane change,
/// anything shorter is a tap (jump).
///
/// Direction follows the finger: a rightward swipe (positive `dx`) is
/// `LaneRight`. A swipe toward an edge the player already occupies stays a
/// lane change (a no-op), never a jump.
pub fn classify_swipe(dx: f32) -> InputEvent {
    if dx > SWIPE_THRESHOLD {
        InputEvent::LaneRight
    } else if dx < -SWIPE_THRESHOLD {
        InputEvent::LaneLeft
    } else {
        InputEvent::Jump
    }
}
