//! Game balance values fixed at startup
//!
//! Defaults come from [`crate::consts`]. A host may override any subset from
//! JSON before a session starts; nothing here changes mid-run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning (fatal at startup)
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("lane set is empty")]
    NoLanes,
    #[error("start lane {start} out of range for {count} lanes")]
    StartLaneOutOfRange { start: usize, count: usize },
    #[error("track needs at least one segment")]
    NoSegments,
    #[error("segment length must be positive, got {0}")]
    SegmentLength(f32),
    #[error("pool capacity must be non-zero")]
    ZeroCapacity,
    #[error("gravity must pull down, got {0}")]
    Gravity(f32),
    #[error("jump impulse must be positive, got {0}")]
    JumpImpulse(f32),
    #[error("speed must be positive and not exceed max speed ({initial} > {max})")]
    Speed { initial: f32, max: f32 },
    #[error("max speed {max} exceeds the no-tunneling limit {limit}")]
    MaxSpeed { max: f32, limit: f32 },
    #[error("speed increment must not be negative, got {0}")]
    SpeedIncrement(f32),
    #[error("window of {window} segments must be non-zero and shorter than the {count} seeded segments")]
    Window { window: usize, count: usize },
    #[error("reap margin must not be negative, got {0}")]
    ReapMargin(f32),
    #[error("timer interval must be positive, got {0} ms")]
    Interval(f64),
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lanes: Vec<f32>,
    pub start_lane: usize,
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub score_per_tick: u64,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub resting_height: f32,
    pub segment_length: f32,
    pub segment_count: usize,
    pub window_segments: usize,
    pub pool_capacity: usize,
    pub reap_margin: f32,
    pub spawn_interval_ms: f64,
    pub speed_up_interval_ms: f64,
    pub spawn_batch: usize,
    pub spawn_ahead: f32,
    pub spawn_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: LANES.to_vec(),
            start_lane: START_LANE,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,
            score_per_tick: SCORE_PER_TICK,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            resting_height: RESTING_HEIGHT,
            segment_length: SEGMENT_LENGTH,
            segment_count: SEGMENT_COUNT,
            window_segments: WINDOW_SEGMENTS,
            pool_capacity: POOL_CAPACITY,
            reap_margin: REAP_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            speed_up_interval_ms: SPEED_UP_INTERVAL_MS,
            spawn_batch: SPAWN_BATCH,
            spawn_ahead: SPAWN_AHEAD,
            spawn_spacing: SPAWN_SPACING,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the preconditions a session relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lanes.is_empty() {
            return Err(TuningError::NoLanes);
        }
        if self.start_lane >= self.lanes.len() {
            return Err(TuningError::StartLaneOutOfRange {
                start: self.start_lane,
                count: self.lanes.len(),
            });
        }
        if self.segment_count == 0 {
            return Err(TuningError::NoSegments);
        }
        if self.window_segments == 0 || self.window_segments >= self.segment_count {
            return Err(TuningError::Window {
                window: self.window_segments,
                count: self.segment_count,
            });
        }
        if self.segment_length <= 0.0 {
            return Err(TuningError::SegmentLength(self.segment_length));
        }
        if self.pool_capacity == 0 {
            return Err(TuningError::ZeroCapacity);
        }
        if self.reap_margin < 0.0 {
            return Err(TuningError::ReapMargin(self.reap_margin));
        }
        if self.gravity >= 0.0 {
            return Err(TuningError::Gravity(self.gravity));
        }
        if self.jump_impulse <= 0.0 {
            return Err(TuningError::JumpImpulse(self.jump_impulse));
        }
        if self.initial_speed <= 0.0 || self.initial_speed > self.max_speed {
            return Err(TuningError::Speed {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        // Closing speed 2 * max stays within the combined box depth
        if self.max_speed > MAX_SPEED {
            return Err(TuningError::MaxSpeed {
                max: self.max_speed,
                limit: MAX_SPEED,
            });
        }
        if self.speed_increment < 0.0 {
            return Err(TuningError::SpeedIncrement(self.speed_increment));
        }
        for interval in [self.spawn_interval_ms, self.speed_up_interval_ms] {
            if interval <= 0.0 {
                return Err(TuningError::Interval(interval));
            }
        }
        Ok(())
    }

    /// Ground distance kept ahead of the player
    pub fn window_length(&self) -> f32 {
        self.window_segments as f32 * self.segment_length
    }
}
