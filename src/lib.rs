//! Orb Runner - A one-button side-scrolling survival game
//!
//! Core modules:
//! - `sim`: Frame simulation (difficulty, physics, obstacles, particles)
//! - `session`: Start/restart/input commands and frame scheduling
//! - `platform`: Clock, scheduler and lifecycle hook capabilities
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `settings`: Data-driven game tuning and preferences

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SpawnPolicy, Tuning};

/// Game configuration constants
///
/// Motion values are per frame: the simulation advances one step per display
/// refresh, so speeds are in pixels/frame and gravity in pixels/frame².
pub mod consts {
    /// Downward acceleration applied every frame
    pub const GRAVITY: f32 = 0.25;
    /// Vertical velocity set by a thrust input (negative is up)
    pub const THRUST: f32 = -5.0;

    /// Obstacle scroll speed at difficulty 1.0
    pub const BASE_SPEED: f32 = 3.0;
    /// Obstacle gap height at difficulty 1.0
    pub const BASE_GAP: f32 = 280.0;
    /// Seconds between obstacle spawns at difficulty 1.0
    pub const BASE_SPAWN_INTERVAL: f32 = 2.0;

    /// Difficulty gained per second survived
    pub const DIFFICULTY_RATE: f32 = 0.02;
    /// Difficulty ceiling (reached after 100 seconds)
    pub const MAX_DIFFICULTY: f32 = 3.0;

    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Smallest pipe section above or below a gap
    pub const MIN_OBSTACLE_HEIGHT: f32 = 50.0;

    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Player column as a fraction of view width
    pub const PLAYER_X_FRACTION: f32 = 0.2;

    /// Particles emitted per thrust
    pub const PARTICLE_BURST: usize = 5;
    /// Life lost per frame (particles live 20 frames)
    pub const PARTICLE_DECAY: f32 = 0.05;
    /// Rendered particle edge length
    pub const PARTICLE_SIZE: f32 = 3.0;

    /// View size used before the host reports one
    pub const DEFAULT_VIEW_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEW_HEIGHT: f32 = 600.0;
}
