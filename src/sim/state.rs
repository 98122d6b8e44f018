//! Game state and core simulation types
//!
//! One `GameState` is one run. Everything a tick reads or writes lives here,
//! so independent sessions never share anything.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::lane::Lanes;
use super::player::Player;
use super::pool::{EntityKind, EntityPool};
use super::track::{Extension, Track};
use crate::consts::{CAMERA_DISTANCE, CAMERA_HEIGHT};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player is running
    Running,
    /// Hit an obstacle; terminal
    GameOver,
}

/// Notifications for the rendering and HUD collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A ground segment was appended
    SegmentAdded { id: u32, z: f32 },
    /// An obstacle or coin entered its pool
    EntitySpawned { id: u32, kind: EntityKind, pos: Vec3 },
    /// Segment, obstacle or coin left the world; detach its visual
    Removed { id: u32 },
    /// Coin counter changed
    CoinsChanged { coins: u32 },
    /// Speed-up timer fired
    SpeedChanged { speed: f32 },
    /// Run ended
    GameOver { score: u64, coins: u32 },
}

/// Camera rig placement derived from the player each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn behind(player_pos: Vec3) -> Self {
        Self {
            eye: player_pos + Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_DISTANCE),
            target: player_pos,
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub lanes: Lanes,
    pub score: u64,
    pub coins: u32,
    /// Forward speed (units per tick)
    pub speed: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub track: Track,
    pub obstacles: EntityPool,
    pub coin_pool: EntityPool,
    pub camera: CameraRig,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default()).expect("default tuning is valid")
    }

    /// Create a new run; rejects tuning that breaks session preconditions
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let lanes = Lanes::new(tuning.lanes.clone());
        let player = Player::new(&lanes, tuning.start_lane, tuning.resting_height);

        let mut next_id = 1;
        let track = Track::seeded(
            tuning.segment_count,
            tuning.segment_length,
            tuning.window_length(),
            || {
                let id = next_id;
                next_id += 1;
                id
            },
        );
        if track.is_empty() {
            return Err(TuningError::NoSegments);
        }

        let obstacles = EntityPool::new(
            EntityKind::Obstacle,
            tuning.pool_capacity,
            tuning.resting_height,
            tuning.reap_margin,
        );
        let coin_pool = EntityPool::new(
            EntityKind::Coin,
            tuning.pool_capacity,
            tuning.resting_height,
            tuning.reap_margin,
        );

        let events = track
            .iter()
            .map(|s| GameEvent::SegmentAdded { id: s.id, z: s.z })
            .collect();

        log::info!(
            "New run: seed={} lanes={} segments={}",
            seed,
            lanes.count(),
            track.len()
        );

        Ok(Self {
            seed,
            speed: tuning.initial_speed,
            tuning,
            lanes,
            score: 0,
            coins: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            camera: CameraRig::behind(player.pos),
            player,
            track,
            obstacles,
            coin_pool,
            events,
            rng: Pcg32::seed_from_u64(seed),
            next_id,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    fn pool_mut(&mut self, kind: EntityKind) -> &mut EntityPool {
        match kind {
            EntityKind::Obstacle => &mut self.obstacles,
            EntityKind::Coin => &mut self.coin_pool,
        }
    }

    pub fn pool(&self, kind: EntityKind) -> &EntityPool {
        match kind {
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Coin => &self.coin_pool,
        }
    }

    /// Spawn one entity at `z` in a random lane (no-op when the pool is full)
    pub fn spawn(&mut self, kind: EntityKind, z: f32) -> Option<u32> {
        if self.pool(kind).is_full() {
            return None;
        }
        let id = self.next_entity_id();
        let Self {
            obstacles,
            coin_pool,
            lanes,
            rng,
            ..
        } = self;
        let pool = match kind {
            EntityKind::Obstacle => obstacles,
            EntityKind::Coin => coin_pool,
        };
        let id = pool.spawn(id, z, lanes, rng)?;
        self.push_spawned(kind, id);
        Some(id)
    }

    /// Place an entity at an exact position (no-op when the pool is full)
    pub fn place(&mut self, kind: EntityKind, pos: Vec3) -> Option<u32> {
        if self.pool(kind).is_full() {
            return None;
        }
        let id = self.next_entity_id();
        let id = self.pool_mut(kind).insert(id, pos)?;
        self.push_spawned(kind, id);
        Some(id)
    }

    fn push_spawned(&mut self, kind: EntityKind, id: u32) {
        if let Some(entity) = self.pool(kind).get(id) {
            let pos = entity.pos;
            self.events.push(GameEvent::EntitySpawned { id, kind, pos });
        }
    }

    /// Extend the ground window if the player is running out of track
    pub fn maintain_track(&mut self) -> Option<Extension> {
        let Self {
            track,
            next_id,
            player,
            events,
            ..
        } = self;
        let ext = track.maintain(player.pos.z, || {
            let id = *next_id;
            *next_id += 1;
            id
        })?;
        events.push(GameEvent::SegmentAdded {
            id: ext.added.id,
            z: ext.added.z,
        });
        events.push(GameEvent::Removed { id: ext.evicted.id });
        Some(ext)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter the terminal phase (idempotent)
    pub fn end_run(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: score={} coins={}",
            self.time_ticks,
            self.score,
            self.coins
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            coins: self.coins,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_run() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert_eq!(state.track.len(), SEGMENT_COUNT);
        assert_eq!(state.player.lane.get(), START_LANE);
        assert!(state.obstacles.is_empty() && state.coin_pool.is_empty());
        // Seeded segments are announced to the renderer
        assert_eq!(state.events.len(), SEGMENT_COUNT);
        assert_eq!(state.camera.eye, Vec3::new(0.0, RESTING_HEIGHT + 10.0, 15.0));
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let mut state = GameState::new(1);
        let a = state.spawn(EntityKind::Obstacle, -50.0).unwrap();
        let b = state.spawn(EntityKind::Coin, -50.0).unwrap();
        assert_ne!(a, b);
        assert!(state.track.iter().all(|s| s.id != a && s.id != b));
    }

    #[test]
    fn test_spawn_full_pool_is_silent() {
        let tuning = Tuning {
            pool_capacity: 2,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(3, tuning).unwrap();
        state.drain_events();
        assert!(state.spawn(EntityKind::Coin, -10.0).is_some());
        assert!(state.spawn(EntityKind::Coin, -20.0).is_some());
        assert!(state.spawn(EntityKind::Coin, -30.0).is_none());
        assert_eq!(state.coin_pool.len(), 2);
        assert_eq!(state.drain_events().len(), 2);
    }

    #[test]
    fn test_invalid_tuning_is_fatal() {
        let tuning = Tuning {
            segment_count: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(0, tuning).is_err());
    }

    #[test]
    fn test_end_run_once() {
        let mut state = GameState::new(9);
        state.drain_events();
        state.end_run();
        state.end_run();
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_same_seed_same_lanes() {
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        for i in 0..20 {
            let z = -(i as f32) * 10.0;
            a.spawn(EntityKind::Obstacle, z);
            b.spawn(EntityKind::Obstacle, z);
        }
        let xa: Vec<f32> = a.obstacles.iter().map(|e| e.pos.x).collect();
        let xb: Vec<f32> = b.obstacles.iter().map(|e| e.pos.x).collect();
        assert_eq!(xa, xb);
    }
}
