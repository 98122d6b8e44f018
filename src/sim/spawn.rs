//! Wall-clock spawn and speed-up scheduling
//!
//! Runs beside the frame loop, not inside it: batches and speed-ups follow
//! elapsed milliseconds so their cadence doesn't drift with frame rate.
//! Both operations check the game-over flag on every firing.

use super::pool::EntityKind;
use super::state::{GameEvent, GameState};

/// Spawn one batch of obstacles and coins ahead of the player.
/// Returns false once the run is over (the caller stops re-arming).
pub fn spawn_batch(state: &mut GameState) -> bool {
    if state.is_game_over() {
        return false;
    }
    let base_z = state.player.pos.z - state.tuning.spawn_ahead;
    let spacing = state.tuning.spawn_spacing;
    let mut spawned = 0;
    for i in 0..state.tuning.spawn_batch {
        let z = base_z - i as f32 * spacing;
        spawned += state.spawn(EntityKind::Obstacle, z).is_some() as usize;
        spawned += state.spawn(EntityKind::Coin, z).is_some() as usize;
    }
    log::debug!(
        "Spawn batch at z={}: {} new (obstacles={}, coins={})",
        base_z,
        spawned,
        state.obstacles.len(),
        state.coin_pool.len()
    );
    true
}

/// Raise the forward speed by one increment, up to the cap.
/// Returns false once the run is over.
pub fn increase_speed(state: &mut GameState) -> bool {
    if state.is_game_over() {
        return false;
    }
    let speed = (state.speed + state.tuning.speed_increment).min(state.tuning.max_speed);
    if speed != state.speed {
        state.speed = speed;
        log::info!("Speed up: {:.3}", speed);
        state.events.push(GameEvent::SpeedChanged { speed });
    }
    true
}

/// Fixed-interval timer over a millisecond clock
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    interval_ms: f64,
    next_due_ms: f64,
}

impl Timer {
    pub fn new(interval_ms: f64, first_due_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: first_due_ms,
        }
    }

    /// Number of firings due by `now_ms`, advancing the schedule
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let mut fired = 0;
        while now_ms >= self.next_due_ms {
            self.next_due_ms += self.interval_ms;
            fired += 1;
        }
        fired
    }
}

/// Both recurring timers of a run, driven by an external clock
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    spawn: Timer,
    speed_up: Timer,
    stopped: bool,
}

impl SpawnScheduler {
    /// First batch fires at `start_ms`, first speed-up one interval later
    pub fn new(state: &GameState, start_ms: f64) -> Self {
        let tuning = &state.tuning;
        Self {
            spawn: Timer::new(tuning.spawn_interval_ms, start_ms),
            speed_up: Timer::new(
                tuning.speed_up_interval_ms,
                start_ms + tuning.speed_up_interval_ms,
            ),
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Fire every timer firing that came due by `now_ms`
    pub fn poll(&mut self, now_ms: f64, state: &mut GameState) {
        if self.stopped {
            return;
        }
        for _ in 0..self.spawn.poll(now_ms) {
            if !spawn_batch(state) {
                self.stopped = true;
                return;
            }
        }
        for _ in 0..self.speed_up.poll(now_ms) {
            if !increase_speed(state) {
                self.stopped = true;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_batch_layout() {
        let mut state = GameState::new(4);
        assert!(spawn_batch(&mut state));
        assert_eq!(state.obstacles.len(), SPAWN_BATCH);
        assert_eq!(state.coin_pool.len(), SPAWN_BATCH);
        let mut zs: Vec<f32> = state.obstacles.iter().map(|e| e.pos.z).collect();
        zs.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(zs, vec![-50.0, -60.0, -70.0, -80.0]);
    }

    #[test]
    fn test_batches_respect_capacity() {
        let mut state = GameState::new(4);
        for _ in 0..20 {
            spawn_batch(&mut state);
        }
        assert_eq!(state.obstacles.len(), POOL_CAPACITY);
        assert_eq!(state.coin_pool.len(), POOL_CAPACITY);
    }

    #[test]
    fn test_speed_capped() {
        let mut state = GameState::new(4);
        for _ in 0..100 {
            increase_speed(&mut state);
        }
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn test_timer_poll() {
        let mut timer = Timer::new(950.0, 0.0);
        assert_eq!(timer.poll(0.0), 1);
        assert_eq!(timer.poll(949.0), 0);
        assert_eq!(timer.poll(2000.0), 2);
        assert_eq!(timer.poll(2849.0), 0);
        assert_eq!(timer.poll(2850.0), 1);
    }

    #[test]
    fn test_scheduler_cadence() {
        let mut state = GameState::new(4);
        let mut scheduler = SpawnScheduler::new(&state, 1000.0);
        scheduler.poll(1000.0, &mut state);
        assert_eq!(state.obstacles.len(), SPAWN_BATCH);

        // One speed-up after 45 s
        scheduler.poll(1000.0 + SPEED_UP_INTERVAL_MS, &mut state);
        assert!((state.speed - (INITIAL_SPEED + SPEED_INCREMENT)).abs() < 1e-6);
    }

    #[test]
    fn test_nothing_after_game_over() {
        let mut state = GameState::new(4);
        let mut scheduler = SpawnScheduler::new(&state, 0.0);
        state.end_run();
        scheduler.poll(100_000.0, &mut state);
        assert!(scheduler.is_stopped());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.speed, INITIAL_SPEED);
        assert!(!spawn_batch(&mut state));
        assert!(!increase_speed(&mut state));
    }

    #[test]
    fn test_collision_stops_spawning() {
        let mut state = GameState::new(4);
        let mut scheduler = SpawnScheduler::new(&state, 0.0);
        let pos = state.player.pos;
        state.place(EntityKind::Obstacle, pos);
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let obstacles = state.obstacles.len();
        let speed = state.speed;
        scheduler.poll(60_000.0, &mut state);
        assert_eq!(state.obstacles.len(), obstacles);
        assert_eq!(state.speed, speed);
    }
}
