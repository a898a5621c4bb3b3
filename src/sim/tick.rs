//! Per-frame simulation tick
//!
//! Core game loop step. Runs to completion or stops at the first collision.

use serde::{Deserialize, Serialize};

use super::obstacle::should_spawn;
use super::particle;
use super::state::{CollisionKind, SessionPhase, SimulationState};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// Frame completed, keep going
    Continue,
    /// This frame ended the session
    GameOver(CollisionKind),
}

/// Advance the simulation by one frame at clock reading `now` (seconds)
pub fn tick(state: &mut SimulationState, now: f64) -> TickOutcome {
    if state.phase != SessionPhase::Playing {
        return TickOutcome::Idle;
    }

    state.frames += 1;

    // Player physics
    state.player.apply_gravity(state.tuning.gravity);

    // Floor/ceiling
    if let Some(kind) = state.player.boundary_collision(0.0, state.height) {
        return end_session(state, kind);
    }

    // Difficulty & score
    state.update_difficulty(now);

    // Time-based spawning
    if should_spawn(now, state.last_spawn_time, state.difficulty.spawn_interval) {
        state.spawn_obstacle();
        state.last_spawn_time = now;
    }

    // Obstacle movement & collision, newest first so swap_remove never skips
    let width = state.tuning.obstacle_width;
    let speed = state.difficulty.scroll_speed;
    let mut pruned = 0;
    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.advance(speed);

        if obstacle.collides(&state.player, width) {
            return end_session(state, CollisionKind::Obstacle);
        }

        if obstacle.is_off_screen(width) {
            state.obstacles.swap_remove(i);
            pruned += 1;
        }
    }
    if pruned > 0 {
        log::debug!("Pruned {pruned} obstacle(s), {} active", state.obstacles.len());
    }

    particle::advance(&mut state.particles, state.tuning.particle_decay);

    TickOutcome::Continue
}

fn end_session(state: &mut SimulationState, kind: CollisionKind) -> TickOutcome {
    state.phase = SessionPhase::GameOver;
    state.end_reason = Some(kind);
    log::info!(
        "Game over ({}) after {} frames, score {:.1}",
        kind.as_str(),
        state.frames,
        state.score
    );
    TickOutcome::GameOver(kind)
}
