//! Continuous difficulty scaling
//!
//! Everything here is a pure function of survival time.

use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Scalar parameters derived from elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Multiplier in [1.0, max_difficulty]
    pub factor: f32,
    /// Obstacle movement per frame
    pub scroll_speed: f32,
    /// Vertical gap for newly spawned obstacles
    pub gap_size: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

impl Difficulty {
    /// Parameters at the start of a session
    pub fn initial(tuning: &Tuning) -> Self {
        compute_difficulty(0.0, tuning)
    }
}

/// Derive difficulty parameters for a survival time in seconds
///
/// 0s -> 1.0, 25s -> 1.5, 100s and beyond -> 3.0 with default tuning.
pub fn compute_difficulty(elapsed: f32, tuning: &Tuning) -> Difficulty {
    let elapsed = elapsed.max(0.0);
    let factor = (1.0 + elapsed * tuning.difficulty_rate).min(tuning.max_difficulty);

    Difficulty {
        factor,
        scroll_speed: tuning.base_speed * factor,
        gap_size: tuning.base_gap / factor,
        spawn_interval: tuning.base_spawn_interval / factor,
    }
}

/// Survival time truncated to one decimal place
#[inline]
pub fn score_for(elapsed: f32) -> f32 {
    (elapsed * 10.0).floor() / 10.0
}
