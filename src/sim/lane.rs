//! Discrete lateral lanes
//!
//! The player and every spawned entity snap to one of a fixed, ordered set
//! of x offsets. Lane changes are instant jumps between neighbouring slots.

use rand::Rng;

/// Ordered set of lane x offsets
#[derive(Debug, Clone, PartialEq)]
pub struct Lanes {
    offsets: Vec<f32>,
}

impl Lanes {
    /// Panics on an empty set; callers validate tuning first.
    pub fn new(offsets: Vec<f32>) -> Self {
        assert!(!offsets.is_empty(), "lane set must not be empty");
        Self { offsets }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// X offset of a lane (clamped to the edge lanes)
    #[inline]
    pub fn x(&self, index: usize) -> f32 {
        self.offsets[index.min(self.offsets.len() - 1)]
    }

    /// Uniformly random lane offset
    pub fn random_x<R: Rng>(&self, rng: &mut R) -> f32 {
        self.offsets[rng.random_range(0..self.offsets.len())]
    }
}

/// Current lane of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneIndex(usize);

impl LaneIndex {
    pub fn new(index: usize, lanes: &Lanes) -> Self {
        Self(index.min(lanes.count() - 1))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Move one lane left; no-op at the left edge. Returns whether it moved.
    pub fn shift_left(&mut self) -> bool {
        if self.0 > 0 {
            self.0 -= 1;
            true
        } else {
            false
        }
    }

    /// Move one lane right; no-op at the right edge. Returns whether it moved.
    pub fn shift_right(&mut self, lanes: &Lanes) -> bool {
        if self.0 + 1 < lanes.count() {
            self.0 += 1;
            true
        } else {
            false
        }
    }
}
