//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, pools, collisions, game state)
//! - `renderer`: Scene mirror and WebGPU rendering pipeline
//! - `platform`: Browser input classification
//! - `camera`: Follow camera and projection
//! - `tuning`: Startup game balance

pub mod camera;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use camera::Camera;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Lateral lane offsets (left, center, right)
    pub const LANES: [f32; 3] = [-2.0, 0.0, 2.0];
    /// Player starts in the center lane
    pub const START_LANE: usize = 1;

    /// Forward speed at the start of a run (units per tick)
    pub const INITIAL_SPEED: f32 = 0.05;
    /// Speed added by every speed-up timer firing
    pub const SPEED_INCREMENT: f32 = 0.01;
    /// Closing speed (2 * speed) must stay below the combined box depth or hits tunnel
    pub const MAX_SPEED: f32 = 0.5;
    /// Score gained per tick
    pub const SCORE_PER_TICK: u64 = 1;

    /// Vertical acceleration while airborne (units per tick²)
    pub const GRAVITY: f32 = -0.015;
    /// Initial upward velocity of a jump
    pub const JUMP_IMPULSE: f32 = 0.3;
    /// Player center height when grounded
    pub const RESTING_HEIGHT: f32 = 0.5;

    /// Ground segment dimensions
    pub const SEGMENT_LENGTH: f32 = 100.0;
    pub const SEGMENT_WIDTH: f32 = 10.0;
    /// Segments seeded before the first tick
    pub const SEGMENT_COUNT: usize = 20;
    /// Ground kept ahead of the player, in segments
    pub const WINDOW_SEGMENTS: usize = 10;

    /// Max active obstacles / coins
    pub const POOL_CAPACITY: usize = 30;
    /// Entities this far behind the player are reaped
    pub const REAP_MARGIN: f32 = 10.0;

    /// Spawn timer interval (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 950.0;
    /// Speed-up timer interval (ms)
    pub const SPEED_UP_INTERVAL_MS: f64 = 45_000.0;
    /// Obstacle/coin pairs per spawn batch
    pub const SPAWN_BATCH: usize = 4;
    /// Distance ahead of the player of the first spawn in a batch
    pub const SPAWN_AHEAD: f32 = 50.0;
    /// Forward spacing between spawns in a batch
    pub const SPAWN_SPACING: f32 = 10.0;

    /// Entity extents
    pub const PLAYER_SIZE: f32 = 1.0;
    pub const OBSTACLE_SIZE: f32 = 1.0;
    pub const COIN_RADIUS: f32 = 0.3;

    /// Camera rig offset from the player
    pub const CAMERA_HEIGHT: f32 = 10.0;
    pub const CAMERA_DISTANCE: f32 = 15.0;
    /// Vertical field of view (degrees)
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;

    /// Horizontal swipe distance (px) separating a lane change from a tap
    pub const SWIPE_THRESHOLD: f32 = 50.0;
}
