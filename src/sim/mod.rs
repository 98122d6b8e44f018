//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock time only enters through the spawn scheduler
//! - No rendering or platform dependencies

pub mod collision;
pub mod lane;
pub mod player;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::Aabb;
pub use lane::{LaneIndex, Lanes};
pub use player::{JumpPhase, Player};
pub use pool::{Entity, EntityKind, EntityPool, HitOutcome};
pub use spawn::{SpawnScheduler, Timer, increase_speed, spawn_batch};
pub use state::{CameraRig, GameEvent, GamePhase, GameState};
pub use tick::{InputEvent, TickInput, apply_input, tick};
pub use track::{Track, TrackSegment};
