//! Game tuning and preferences
//!
//! Stored as JSON: LocalStorage on the web, an optional file on native.
//! Every field has a default, so partial documents are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What to do when the view is too short to fit a gap between two
/// minimum-height pipe sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Spawn anyway with the top section pinned to the minimum height
    #[default]
    Clamp,
    /// Skip this spawn; the next attempt waits a full interval
    Skip,
}

impl SpawnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Clamp => "clamp",
            SpawnPolicy::Skip => "skip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clamp" => Some(SpawnPolicy::Clamp),
            "skip" => Some(SpawnPolicy::Skip),
            _ => None,
        }
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub thrust: f32,
    pub base_speed: f32,
    pub base_gap: f32,
    /// Seconds
    pub base_spawn_interval: f32,
    pub difficulty_rate: f32,
    pub max_difficulty: f32,
    pub obstacle_width: f32,
    pub min_obstacle_height: f32,
    pub player_radius: f32,
    pub particle_burst: usize,
    pub particle_decay: f32,
    pub spawn_policy: SpawnPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            thrust: THRUST,
            base_speed: BASE_SPEED,
            base_gap: BASE_GAP,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            difficulty_rate: DIFFICULTY_RATE,
            max_difficulty: MAX_DIFFICULTY,
            obstacle_width: OBSTACLE_WIDTH,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,
            player_radius: PLAYER_RADIUS,
            particle_burst: PARTICLE_BURST,
            particle_decay: PARTICLE_DECAY,
            spawn_policy: SpawnPolicy::Clamp,
        }
    }
}

impl Tuning {
    /// Reject values that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            (self.base_speed, "base_speed must be > 0"),
            (self.base_gap, "base_gap must be > 0"),
            (self.base_spawn_interval, "base_spawn_interval must be > 0"),
            (self.obstacle_width, "obstacle_width must be > 0"),
            (self.player_radius, "player_radius must be > 0"),
            (self.particle_decay, "particle_decay must be > 0"),
        ];
        for (value, msg) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(msg));
            }
        }
        if !self.gravity.is_finite() || !self.thrust.is_finite() {
            return Err(SettingsError::Invalid("gravity and thrust must be finite"));
        }
        if !(self.difficulty_rate.is_finite() && self.difficulty_rate >= 0.0) {
            return Err(SettingsError::Invalid("difficulty_rate must be >= 0"));
        }
        if !(self.max_difficulty.is_finite() && self.max_difficulty >= 1.0) {
            return Err(SettingsError::Invalid("max_difficulty must be >= 1"));
        }
        if !(self.min_obstacle_height.is_finite() && self.min_obstacle_height >= 0.0) {
            return Err(SettingsError::Invalid("min_obstacle_height must be >= 0"));
        }
        Ok(())
    }
}

/// Settings load/validation failure
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "settings are not valid JSON: {e}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,

    // === Visual Effects ===
    /// Thrust particle bursts
    pub particles: bool,

    // === HUD ===
    /// Show the current difficulty multiplier next to the score
    pub show_difficulty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            particles: true,
            show_difficulty: true,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Particles emitted per thrust (0 when effects are off)
    pub fn particle_burst(&self) -> usize {
        if self.particles {
            self.tuning.particle_burst
        } else {
            0
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orb_runner_settings";

    /// Environment variable naming a native settings file
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "ORB_RUNNER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {e}"),
            }
        }
    }

    /// Load settings from the file named by `ORB_RUNNER_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {path}");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {path}: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {path}: {e}");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
