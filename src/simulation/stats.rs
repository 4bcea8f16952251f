//! Player stat block.

use serde::{Deserialize, Serialize};

use super::catalog::evolutions::{BerserkEffect, PoisonEffect, StormEffect};

/// Hunger level below which the player is starving.
pub const STARVING_THRESHOLD: f32 = 30.0;
/// Speed factor applied while starving.
pub const STARVING_SPEED_FACTOR: f32 = 0.6;
/// Share of restored hunger that also heals.
pub const FEED_HEAL_RATIO: f32 = 0.3;

/// Mutable numeric state of the player.
///
/// `health` stays in `[0, max_health]` and `hunger` in `[0, max_hunger]`;
/// every mutator clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Current health.
    pub health: f32,
    /// Health cap.
    pub max_health: f32,
    /// Current hunger (full is good).
    pub hunger: f32,
    /// Hunger cap.
    pub max_hunger: f32,
    /// Base swim speed (units per second).
    pub speed: f32,
    /// Base bite damage.
    pub damage: f32,
    /// Bite reach, added to the target's radius.
    pub attack_range: f32,
    /// Chance in `[0, 1]` to ignore an incoming hit.
    pub dodge_chance: f32,
    /// Product of all speed modifiers.
    pub speed_multiplier: f32,
    /// Product of all damage modifiers.
    pub damage_multiplier: f32,
    /// Product of all attack cooldown modifiers.
    pub attack_cooldown_multiplier: f32,
    /// Bites hit every enemy in range.
    pub area_damage: bool,
    /// Radius of the area bite.
    pub area_radius: f32,
    /// Dashes damage enemies.
    pub dash_damage: bool,
    /// Fraction of effective damage dealt per dash hit.
    pub dash_damage_multiplier: f32,
    /// Health regenerated per second.
    pub health_regen: f32,
    /// Fraction of dealt damage healed.
    pub life_steal: f32,
    /// Divides hunger decay.
    pub hunger_efficiency: f32,
    /// Poison applied on hit.
    pub poison: Option<PoisonEffect>,
    /// Low-health damage bonus.
    pub berserk: Option<BerserkEffect>,
    /// Passive damage pulse.
    pub storm: Option<StormEffect>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            hunger: 100.0,
            max_hunger: 100.0,
            speed: 150.0,
            damage: 10.0,
            attack_range: 50.0,
            dodge_chance: 0.0,
            speed_multiplier: 1.0,
            damage_multiplier: 1.0,
            attack_cooldown_multiplier: 1.0,
            area_damage: false,
            area_radius: 0.0,
            dash_damage: false,
            dash_damage_multiplier: 0.0,
            health_regen: 0.0,
            life_steal: 0.0,
            hunger_efficiency: 1.0,
            poison: None,
            berserk: None,
            storm: None,
        }
    }
}

impl Stats {
    /// Checks whether hunger is below the starving threshold.
    pub fn is_starving(&self) -> bool {
        self.hunger < STARVING_THRESHOLD
    }

    /// Current swim speed, recomputed on every call.
    ///
    /// `speed * speed_multiplier`, reduced to 60% while starving.
    pub fn effective_speed(&self) -> f32 {
        let speed = self.speed * self.speed_multiplier;
        if self.is_starving() {
            speed * STARVING_SPEED_FACTOR
        } else {
            speed
        }
    }

    /// Current bite damage.
    ///
    /// `damage * damage_multiplier`, times the berserk multiplier while health
    /// is below the berserk threshold.
    pub fn effective_damage(&self) -> f32 {
        let damage = self.damage * self.damage_multiplier;
        match self.berserk {
            Some(berserk) if self.health < self.max_health * berserk.threshold => {
                damage * berserk.multiplier
            }
            _ => damage,
        }
    }

    /// Checks whether the player is dead.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtracts health, clamped at 0.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    /// Adds health, clamped at `max_health`.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    /// Restores hunger and heals 30% of the restored amount.
    pub fn feed(&mut self, hunger_restore: f32) {
        self.hunger = (self.hunger + hunger_restore).clamp(0.0, self.max_hunger);
        self.heal(hunger_restore * FEED_HEAL_RATIO);
    }

    /// Drains hunger, clamped at 0.
    pub fn drain_hunger(&mut self, amount: f32) {
        self.hunger = (self.hunger - amount).clamp(0.0, self.max_hunger);
    }

    /// Pulls every bounded field back into range.
    pub fn clamp(&mut self) {
        self.max_health = self.max_health.max(0.0);
        self.max_hunger = self.max_hunger.max(0.0);
        self.health = self.health.clamp(0.0, self.max_health);
        self.hunger = self.hunger.clamp(0.0, self.max_hunger);
        self.dodge_chance = self.dodge_chance.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starving_slows_down() {
        let mut stats = Stats {
            speed_multiplier: 1.5,
            ..Stats::default()
        };
        assert!((stats.effective_speed() - 225.0).abs() < 1e-4);

        stats.hunger = 29.0;
        assert!((stats.effective_speed() - 135.0).abs() < 1e-4);

        stats.hunger = 30.0;
        assert!((stats.effective_speed() - 225.0).abs() < 1e-4);
    }

    #[test]
    fn berserk_only_below_threshold() {
        let mut stats = Stats {
            berserk: Some(BerserkEffect {
                threshold: 0.3,
                multiplier: 2.0,
            }),
            ..Stats::default()
        };
        assert!((stats.effective_damage() - 10.0).abs() < 1e-4);

        stats.health = 29.0;
        assert!((stats.effective_damage() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn feed_clamps_both_bars() {
        let mut stats = Stats {
            hunger: 90.0,
            health: 98.0,
            ..Stats::default()
        };
        stats.feed(25.0);
        assert_eq!(stats.hunger, 100.0);
        assert_eq!(stats.health, 100.0);
    }

    #[test]
    fn damage_never_goes_negative() {
        let mut stats = Stats::default();
        stats.take_damage(250.0);
        assert_eq!(stats.health, 0.0);
        assert!(stats.is_dead());
    }
}
