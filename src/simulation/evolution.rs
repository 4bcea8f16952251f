//! Evolution gating and application.
//!
//! Evolutions are permanent: once applied, an id stays in the applied list for
//! the rest of the session and its effects are folded into the player's stats.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::catalog::evolutions::UnknownEvolution;
use super::catalog::{EVOLUTIONS, EvolutionDef, EvolutionEffects, EvolutionId};
use super::dna::DnaPool;
use super::stats::Stats;

/// Dash damage fraction used when an evolution does not set one.
pub const DEFAULT_DASH_MULTIPLIER: f32 = 0.8;

/// Reasons an evolution cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvolutionError {
    /// The evolution was applied earlier in this session.
    #[error("evolution `{0}` is already applied")]
    AlreadyApplied(EvolutionId),
    /// The DNA pool does not cover the requirements.
    #[error("not enough DNA for evolution `{0}`")]
    RequirementsNotMet(EvolutionId),
    /// No evolution has this id.
    #[error(transparent)]
    Unknown(#[from] UnknownEvolution),
}

/// Tracks applied evolutions and applies new ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionEngine {
    /// Applied evolutions in application order. No duplicates.
    applied: Vec<EvolutionId>,
}

impl EvolutionEngine {
    /// Creates an engine with nothing applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applied evolutions in application order.
    pub fn applied(&self) -> &[EvolutionId] {
        &self.applied
    }

    /// Checks whether an evolution was applied.
    pub fn is_applied(&self, id: EvolutionId) -> bool {
        self.applied.contains(&id)
    }

    /// Lists evolutions that are not applied and whose requirements are met.
    ///
    /// # Arguments
    ///
    /// * `dna` - Current DNA pool
    ///
    /// # Returns
    ///
    /// Matching catalog entries in catalog order.
    pub fn available(&self, dna: &DnaPool) -> Vec<&'static EvolutionDef> {
        EVOLUTIONS
            .iter()
            .filter(|def| !self.is_applied(def.id) && dna.meets(def.requirements))
            .collect()
    }

    /// Applies an evolution: folds its effects into `stats` and pays its DNA cost.
    ///
    /// Refuses already-applied evolutions and unaffordable ones; on refusal
    /// neither `stats` nor `dna` is touched.
    ///
    /// # Arguments
    ///
    /// * `stats` - Player stats to modify
    /// * `dna` - DNA pool to pay from
    /// * `id` - Evolution to apply
    ///
    /// # Returns
    ///
    /// The applied catalog entry.
    pub fn apply(
        &mut self,
        stats: &mut Stats,
        dna: &mut DnaPool,
        id: EvolutionId,
    ) -> Result<&'static EvolutionDef, EvolutionError> {
        if self.is_applied(id) {
            return Err(EvolutionError::AlreadyApplied(id));
        }
        let def = id.def();
        if !dna.consume(def.requirements) {
            return Err(EvolutionError::RequirementsNotMet(id));
        }

        apply_effects(stats, &def.effects);
        self.applied.push(id);
        info!(evolution = %id, dna_left = dna.total(), "evolution applied");
        Ok(def)
    }
}

/// Folds one evolution's effects into the stat block.
///
/// Multipliers compound, dodge/life steal/regeneration add up, capabilities
/// overwrite earlier parameters.
pub fn apply_effects(stats: &mut Stats, effects: &EvolutionEffects) {
    if let Some(x) = effects.speed_multiplier {
        stats.speed_multiplier *= x;
    }
    if let Some(x) = effects.damage_multiplier {
        stats.damage_multiplier *= x;
    }
    if let Some(x) = effects.max_health_multiplier {
        stats.max_health *= x;
        stats.health = stats.max_health;
    }
    if let Some(x) = effects.dodge_chance {
        stats.dodge_chance = (stats.dodge_chance + x).min(1.0);
    }
    if let Some(x) = effects.attack_range_multiplier {
        stats.attack_range *= x;
    }
    if let Some(x) = effects.attack_cooldown_multiplier {
        stats.attack_cooldown_multiplier *= x;
    }
    if let Some(area) = effects.area_damage {
        stats.area_damage = true;
        stats.area_radius = area.radius;
    }
    if let Some(dash) = effects.dash_damage {
        stats.dash_damage = true;
        stats.dash_damage_multiplier = dash.multiplier.unwrap_or(DEFAULT_DASH_MULTIPLIER);
    }
    if effects.poison.is_some() {
        stats.poison = effects.poison;
    }
    if effects.berserk.is_some() {
        stats.berserk = effects.berserk;
    }
    if effects.storm.is_some() {
        stats.storm = effects.storm;
    }
    if let Some(x) = effects.health_regen {
        stats.health_regen += x;
    }
    if let Some(x) = effects.life_steal {
        stats.life_steal += x;
    }
    if let Some(x) = effects.hunger_efficiency {
        stats.hunger_efficiency *= x;
    }
    stats.clamp();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::catalog::evolutions::DashEffect;
    use crate::simulation::dna::DnaType;

    #[test]
    fn nothing_available_with_empty_pool() {
        let engine = EvolutionEngine::new();
        assert!(engine.available(&DnaPool::new()).is_empty());
    }

    #[test]
    fn dodge_is_capped() {
        let mut stats = Stats {
            dodge_chance: 0.9,
            ..Stats::default()
        };
        apply_effects(
            &mut stats,
            &EvolutionEffects {
                dodge_chance: Some(0.4),
                ..EvolutionEffects::NONE
            },
        );
        assert_eq!(stats.dodge_chance, 1.0);
    }

    #[test]
    fn dash_multiplier_defaults() {
        let mut stats = Stats::default();
        apply_effects(
            &mut stats,
            &EvolutionEffects {
                dash_damage: Some(DashEffect { multiplier: None }),
                ..EvolutionEffects::NONE
            },
        );
        assert!(stats.dash_damage);
        assert_eq!(stats.dash_damage_multiplier, DEFAULT_DASH_MULTIPLIER);
    }

    #[test]
    fn max_health_rescale_fully_heals() {
        let mut stats = Stats {
            health: 20.0,
            ..Stats::default()
        };
        apply_effects(
            &mut stats,
            &EvolutionEffects {
                max_health_multiplier: Some(1.5),
                ..EvolutionEffects::NONE
            },
        );
        assert_eq!(stats.max_health, 150.0);
        assert_eq!(stats.health, 150.0);
    }

    #[test]
    fn refused_apply_changes_nothing() {
        let mut engine = EvolutionEngine::new();
        let mut stats = Stats::default();
        let mut dna = DnaPool::new();
        dna.add(DnaType::Speed, 49);

        let err = engine.apply(&mut stats, &mut dna, EvolutionId::Agile);
        assert_eq!(err, Err(EvolutionError::RequirementsNotMet(EvolutionId::Agile)));
        assert_eq!(stats, Stats::default());
        assert_eq!(dna.get(DnaType::Speed), 49);
        assert!(engine.applied().is_empty());
    }
}
