//! Per-frame simulation tick
//!
//! Core game loop that advances one run by one display frame.

use super::pool::HitOutcome;
use super::state::{CameraRig, GameEvent, GameState};

/// Discrete player input, already classified by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    LaneLeft,
    LaneRight,
    /// Keyboard jump or touch tap
    Jump,
}

/// Input collected between two ticks (one-shot, cleared by the host)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Apply one input event immediately. Ignored after game over.
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    if state.is_game_over() {
        return;
    }
    match event {
        InputEvent::LaneLeft => {
            state.player.move_left(&state.lanes);
        }
        InputEvent::LaneRight => {
            state.player.move_right(&state.lanes);
        }
        InputEvent::Jump => {
            state.player.jump(state.tuning.jump_impulse);
        }
    }
}

/// Advance the run by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() {
        return;
    }

    for &event in &input.events {
        apply_input(state, event);
    }

    state.time_ticks += 1;

    // Run forward
    state.player.advance(state.speed);
    state.score += state.tuning.score_per_tick;

    state.player.integrate_jump(state.tuning.gravity);

    // Keep ground ahead
    let player_z = state.player.pos.z;
    state.maintain_track();

    // Obstacles
    let player_box = state.player.bounds();
    state.obstacles.advance(state.speed);
    for id in state.obstacles.reap(player_z) {
        state.events.push(GameEvent::Removed { id });
    }
    let pass = state
        .obstacles
        .collide(&player_box, |_| HitOutcome::Halt);
    if pass.halted {
        state.end_run();
        return;
    }

    // Coins
    state.coin_pool.advance(state.speed);
    for id in state.coin_pool.reap(player_z) {
        state.events.push(GameEvent::Removed { id });
    }
    let pass = state
        .coin_pool
        .collide(&player_box, |_| HitOutcome::Remove);
    for id in pass.removed {
        state.coins += 1;
        state.events.push(GameEvent::Removed { id });
        state.events.push(GameEvent::CoinsChanged { coins: state.coins });
    }

    state.camera = CameraRig::behind(state.player.pos);
}
