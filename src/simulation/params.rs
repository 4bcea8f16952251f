use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors raised while loading or checking parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The parameter file could not be read or written.
    #[error("failed to access params file: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid JSON for [`Params`].
    #[error("malformed params file: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is out of its allowed range.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Tunable session parameters.
///
/// Durations are in milliseconds, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// World width.
    pub world_width: f32,
    /// World height (depth).
    pub world_height: f32,
    /// Player spawn depth.
    pub player_start_y: f32,
    /// Base time between two player bites.
    pub attack_cooldown_ms: f32,
    /// Length of a dash.
    pub dash_duration_ms: f32,
    /// Time between two dashes.
    pub dash_cooldown_ms: f32,
    /// Speed factor while dashing.
    pub dash_speed_multiplier: f32,
    /// Radius around the player hit by a damaging dash.
    pub dash_hit_radius: f32,
    /// Period of the hunger decay timer.
    pub hunger_interval_ms: f32,
    /// Hunger drained per decay tick.
    pub hunger_decay: f32,
    /// Damage taken per decay tick at zero hunger.
    pub starvation_damage: f32,
    /// Period of the spawn timer.
    pub spawn_interval_ms: f32,
    /// Period of the survival score timer.
    pub survival_interval_ms: f32,
    /// Period of the regeneration timer.
    pub regen_interval_ms: f32,
    /// Enemy population cap.
    pub max_enemies: usize,
    /// Enemies spawned when the session starts.
    pub initial_enemies: usize,
    /// Distance of spawn points from the side walls.
    pub spawn_edge_margin: f32,
    /// Distance of spawn points from the biome band edges.
    pub spawn_band_margin: f32,
    /// Enemies further than this outside the world are removed.
    pub cleanup_margin: f32,
    /// Score for entering a biome for the first time.
    pub biome_bonus: u64,
    /// Score for each applied evolution.
    pub evolution_bonus: u64,
    /// Kill score per point of enemy max health.
    pub kill_score_per_health: u64,
    /// Entries kept in the recent event log.
    pub event_log_size: usize,
    /// Seed for reproducible sessions. Random when unset.
    pub rng_seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 2000.0,
            world_height: 2800.0,
            player_start_y: 200.0,
            attack_cooldown_ms: 300.0,
            dash_duration_ms: 250.0,
            dash_cooldown_ms: 1500.0,
            dash_speed_multiplier: 3.0,
            dash_hit_radius: 55.0,
            hunger_interval_ms: 1000.0,
            hunger_decay: 2.0,
            starvation_damage: 5.0,
            spawn_interval_ms: 2000.0,
            survival_interval_ms: 1000.0,
            regen_interval_ms: 1000.0,
            max_enemies: 30,
            initial_enemies: 10,
            spawn_edge_margin: 50.0,
            spawn_band_margin: 30.0,
            cleanup_margin: 100.0,
            biome_bonus: 150,
            evolution_bonus: 200,
            kill_score_per_health: 10,
            event_log_size: 20,
            rng_seed: None,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file. Missing fields take their defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the JSON file
    ///
    /// # Returns
    ///
    /// Validated parameters, or the reason they could not be loaded.
    pub fn load_from_file(path: &str) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        info!(path, "loaded params");
        Ok(params)
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Checks that every value is usable by a session.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("hunger_interval_ms", self.hunger_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("survival_interval_ms", self.survival_interval_ms),
            ("regen_interval_ms", self.regen_interval_ms),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ParamsError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let non_negative = [
            ("attack_cooldown_ms", self.attack_cooldown_ms),
            ("dash_duration_ms", self.dash_duration_ms),
            ("dash_cooldown_ms", self.dash_cooldown_ms),
            ("dash_speed_multiplier", self.dash_speed_multiplier),
            ("dash_hit_radius", self.dash_hit_radius),
            ("hunger_decay", self.hunger_decay),
            ("starvation_damage", self.starvation_damage),
            ("spawn_edge_margin", self.spawn_edge_margin),
            ("spawn_band_margin", self.spawn_band_margin),
            ("cleanup_margin", self.cleanup_margin),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ParamsError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if !(0.0..=self.world_height).contains(&self.player_start_y) {
            return Err(ParamsError::Invalid {
                field: "player_start_y",
                reason: "must lie inside the world",
            });
        }
        if self.initial_enemies > self.max_enemies {
            return Err(ParamsError::Invalid {
                field: "initial_enemies",
                reason: "must not exceed max_enemies",
            });
        }
        Ok(())
    }
}
