//! Session state and core simulation types
//!
//! One `SimulationState` lives for the whole page/process and is reset at
//! the start of every session.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, compute_difficulty, score_for};
use super::obstacle::{Obstacle, SpawnArea};
use super::particle::{self, Particle};
use super::player::Player;
use crate::consts::{DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH};
use crate::settings::{Settings, Tuning};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Playing,
    /// Session ended by a collision; waits for restart
    GameOver,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Floor,
    Ceiling,
    Obstacle,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::Floor => "floor",
            CollisionKind::Ceiling => "ceiling",
            CollisionKind::Obstacle => "obstacle",
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed of the current session's RNG
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Particles per thrust (0 when effects are disabled)
    pub particle_burst: usize,
    pub phase: SessionPhase,
    /// View dimensions in pixels
    pub width: f32,
    pub height: f32,
    /// Clock reading at session start (seconds)
    pub start_time: f64,
    /// Clock reading of the last obstacle spawn (seconds)
    pub last_spawn_time: f64,
    /// Survival time in seconds
    pub elapsed_time: f32,
    /// Survival time truncated to tenths
    pub score: f32,
    pub difficulty: Difficulty,
    /// Ticks run this session
    pub frames: u64,
    pub player: Player,
    /// Unordered; removal uses swap_remove
    pub obstacles: Vec<Obstacle>,
    /// Visual only
    pub particles: Vec<Particle>,
    /// Set when the session ends
    pub end_reason: Option<CollisionKind>,
}

impl SimulationState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let tuning = settings.tuning.clone();
        let mut player = Player::new(tuning.player_radius);
        player.place(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            difficulty: Difficulty::initial(&tuning),
            particle_burst: settings.particle_burst(),
            tuning,
            phase: SessionPhase::Idle,
            width: DEFAULT_VIEW_WIDTH,
            height: DEFAULT_VIEW_HEIGHT,
            start_time: 0.0,
            last_spawn_time: 0.0,
            elapsed_time: 0.0,
            score: 0.0,
            frames: 0,
            player,
            obstacles: Vec::new(),
            particles: Vec::new(),
            end_reason: None,
        }
    }

    /// Begin a fresh session at clock reading `now`
    ///
    /// Clears every entity, timer and difficulty value, then spawns the first
    /// obstacle immediately.
    pub fn reset(&mut self, now: f64, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = SessionPhase::Playing;
        self.start_time = now;
        self.last_spawn_time = now;
        self.frames = 0;
        self.obstacles.clear();
        self.particles.clear();
        self.end_reason = None;

        self.update_difficulty(now);

        self.player.radius = self.tuning.player_radius;
        self.player.place(self.width, self.height);
        self.player.velocity = 0.0;

        self.spawn_obstacle();
    }

    /// New view size; the orb is only re-centered outside of play
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        if self.phase != SessionPhase::Playing {
            self.player.place(width, height);
        }
    }

    /// Recompute elapsed time, score and difficulty for clock reading `now`
    pub fn update_difficulty(&mut self, now: f64) {
        self.elapsed_time = ((now - self.start_time).max(0.0)) as f32;
        self.score = score_for(self.elapsed_time);
        self.difficulty = compute_difficulty(self.elapsed_time, &self.tuning);
    }

    pub fn spawn_area(&self) -> SpawnArea {
        SpawnArea {
            view_width: self.width,
            view_height: self.height,
            min_height: self.tuning.min_obstacle_height,
            policy: self.tuning.spawn_policy,
        }
    }

    /// Add an obstacle using the current gap size
    pub fn spawn_obstacle(&mut self) {
        let area = self.spawn_area();
        if let Some(obstacle) = area.spawn(&mut self.rng, self.difficulty.gap_size) {
            self.obstacles.push(obstacle);
        }
    }

    /// Apply a thrust input; ignored unless playing
    ///
    /// Returns whether the input was applied.
    pub fn thrust(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        self.player.apply_thrust(self.tuning.thrust);
        let origin = self.player.exhaust_point();
        particle::emit(&mut self.particles, &mut self.rng, origin, self.particle_burst);
        true
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            phase: self.phase,
            player: &self.player,
            obstacles: &self.obstacles,
            particles: &self.particles,
            score: self.score,
            difficulty: self.difficulty.factor,
            width: self.width,
            height: self.height,
            obstacle_width: self.tuning.obstacle_width,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: SessionPhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: f32,
    pub difficulty: f32,
    pub width: f32,
    pub height: f32,
    pub obstacle_width: f32,
}

impl RenderSnapshot<'_> {
    /// HUD score text (one decimal place)
    pub fn score_text(&self) -> String {
        format!("{:.1}", self.score)
    }

    /// Game-over banner text
    pub fn final_score_text(&self) -> String {
        format!("{:.1} points", self.score)
    }

    /// HUD difficulty text
    pub fn difficulty_text(&self) -> String {
        format!("x{:.2}", self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_state_is_idle() {
        let state = SimulationState::new(1, &Settings::default());
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(160.0, 300.0));
    }

    #[test]
    fn test_reset_starts_playing_with_one_obstacle() {
        let mut state = SimulationState::new(1, &Settings::default());
        state.reset(10.0, 5);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.start_time, 10.0);
        assert_eq!(state.last_spawn_time, 10.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].gap_size(), state.tuning.base_gap);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.difficulty.factor, 1.0);
    }

    #[test]
    fn test_thrust_only_while_playing() {
        let mut state = SimulationState::new(1, &Settings::default());
        assert!(!state.thrust());
        assert!(state.particles.is_empty());

        state.reset(0.0, 1);
        assert!(state.thrust());
        assert_eq!(state.player.velocity, state.tuning.thrust);
        assert_eq!(state.particles.len(), 5);
        assert!(state.particles.iter().all(|p| p.pos == Vec2::new(160.0, 315.0)));
    }

    #[test]
    fn test_particles_disabled() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut state = SimulationState::new(1, &settings);
        state.reset(0.0, 1);
        assert!(state.thrust());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_resize_moves_player_only_when_not_playing() {
        let mut state = SimulationState::new(1, &Settings::default());
        state.resize(1000.0, 500.0);
        assert_eq!(state.player.pos, Vec2::new(200.0, 250.0));

        state.reset(0.0, 1);
        state.player.pos.y = 123.0;
        state.resize(400.0, 300.0);
        assert_eq!(state.player.pos, Vec2::new(200.0, 123.0));
        assert_eq!(state.width, 400.0);
    }

    #[test]
    fn test_snapshot_text() {
        let mut state = SimulationState::new(1, &Settings::default());
        state.reset(0.0, 1);
        state.update_difficulty(12.34);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.score_text(), "12.3");
        assert_eq!(snapshot.final_score_text(), "12.3 points");
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(snapshot.difficulty_text(), "x1.25");
    }
}
