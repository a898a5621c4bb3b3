//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - One step per display frame
//! - Time read only through the `now` argument of `tick`
//! - Seeded RNG per session
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod obstacle;
pub mod particle;
pub mod player;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, compute_difficulty, score_for};
pub use obstacle::{Obstacle, SpawnArea, should_spawn};
pub use particle::Particle;
pub use player::Player;
pub use state::{CollisionKind, RenderSnapshot, SessionPhase, SimulationState};
pub use tick::{TickOutcome, tick};
