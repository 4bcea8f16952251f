//! Combat resolution between the player and enemies.
//!
//! The resolver only changes health and reports kills. Rewards are read with
//! [`CombatResolver::reward`] and applied by the session, so every kill path
//! (bite, dash, poison, storm) is rewarded the same way and exactly once.

use std::collections::HashSet;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dna::DnaDrop;
use super::enemy::Enemy;
use super::geometric_utils;
use super::params::Params;
use super::player::Player;
use super::spatial::SpatialIndex;

/// What the player gains from a kill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    /// DNA dropped; may still be random.
    pub dna: DnaDrop,
    /// DNA amount.
    pub dna_amount: u32,
    /// Hunger restored.
    pub hunger_restore: f32,
}

/// Result of an incoming hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// The hit was avoided; nothing changed.
    Dodged,
    /// Health was reduced by this amount (before clamping).
    Damaged(f32),
}

/// Attack cooldown and per-dash hit bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatResolver {
    cooldown_ms: f32,
    dash_hits: HashSet<u64>,
}

impl CombatResolver {
    /// Creates a resolver with the bite ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time until the next bite is allowed.
    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }

    /// Counts down the bite cooldown.
    pub fn tick(&mut self, delta_ms: f32) {
        self.cooldown_ms = (self.cooldown_ms - delta_ms).max(0.0);
    }

    /// Bites the nearest enemy in range, or every enemy in range with area damage.
    ///
    /// Does nothing while the bite is cooling down. A bite that finds no
    /// target does not start the cooldown.
    ///
    /// # Arguments
    ///
    /// * `player` - Attacking player; healed by life steal
    /// * `enemies` - All live enemies
    /// * `params` - Session parameters (base cooldown)
    ///
    /// # Returns
    ///
    /// Ids of the enemies killed by this bite.
    pub fn attack(&mut self, player: &mut Player, enemies: &mut [Enemy], params: &Params) -> Vec<u64> {
        if self.cooldown_ms > 0.0 {
            return Vec::new();
        }

        let reach = player.stats.attack_range;
        let widest = enemies.iter().map(|enemy| enemy.size).fold(0.0, f32::max);
        let in_range: Vec<usize> = candidates(enemies, &player.pos, reach + widest)
            .into_iter()
            .filter(|&i| {
                !enemies[i].is_dead()
                    && geometric_utils::distance(&player.pos, &enemies[i].pos) < reach + enemies[i].size
            })
            .collect();
        if in_range.is_empty() {
            return Vec::new();
        }

        self.cooldown_ms = params.attack_cooldown_ms * player.stats.attack_cooldown_multiplier;

        let targets = if player.stats.area_damage {
            in_range
        } else {
            nearest(enemies, &player.pos, &in_range).into_iter().collect()
        };

        let damage = player.stats.effective_damage();
        targets
            .into_iter()
            .filter_map(|i| strike(player, &mut enemies[i], damage))
            .collect()
    }

    /// Reads the reward for killing an enemy from the catalog.
    pub fn reward(enemy: &Enemy) -> Reward {
        let spec = enemy.spec();
        Reward {
            dna: spec.dna,
            dna_amount: spec.dna_amount,
            hunger_restore: spec.hunger_restore,
        }
    }

    /// Applies an incoming hit to the player, rolling against dodge chance.
    pub fn apply_damage_to_player(player: &mut Player, amount: f32, rng: &mut impl Rng) -> DamageOutcome {
        if rng.random::<f32>() < player.stats.dodge_chance {
            return DamageOutcome::Dodged;
        }
        player.stats.take_damage(amount);
        DamageOutcome::Damaged(amount)
    }

    /// Starts a new dash: every enemy may be hit once again.
    pub fn begin_dash(&mut self) {
        self.dash_hits.clear();
    }

    /// Damages enemies touched by a damaging dash, each at most once per dash.
    ///
    /// # Returns
    ///
    /// Ids of the enemies killed.
    pub fn dash_pass(&mut self, player: &mut Player, enemies: &mut [Enemy], params: &Params) -> Vec<u64> {
        if !player.is_dashing() || !player.stats.dash_damage {
            return Vec::new();
        }

        let damage = player.stats.effective_damage() * player.stats.dash_damage_multiplier;
        let mut killed = Vec::new();
        for i in candidates(enemies, &player.pos, params.dash_hit_radius) {
            let enemy = &mut enemies[i];
            if enemy.is_dead()
                || self.dash_hits.contains(&enemy.id)
                || geometric_utils::distance(&player.pos, &enemy.pos) >= params.dash_hit_radius
            {
                continue;
            }
            self.dash_hits.insert(enemy.id);
            killed.extend(strike(player, enemy, damage));
        }
        killed
    }

    /// Applies poison damage over time.
    ///
    /// # Returns
    ///
    /// Ids of the enemies the poison killed this tick.
    pub fn tick_poison(enemies: &mut [Enemy], delta_ms: f32) -> Vec<u64> {
        let mut killed = Vec::new();
        for enemy in enemies.iter_mut() {
            let Some(mut poison) = enemy.poison else {
                continue;
            };
            if enemy.is_dead() {
                continue;
            }

            let active_ms = delta_ms.min(poison.remaining_ms);
            enemy.take_damage(poison.dps * active_ms / 1000.0);
            poison.remaining_ms -= delta_ms;
            enemy.poison = (poison.remaining_ms > 0.0).then_some(poison);

            if enemy.is_dead() {
                debug!(enemy = enemy.id, kind = ?enemy.kind, "enemy succumbed to poison");
                killed.push(enemy.id);
            }
        }
        killed
    }

    /// Damages every live enemy strictly within `radius` of `center`.
    ///
    /// # Returns
    ///
    /// Ids of the enemies killed.
    pub fn area_pulse(center: &Array1<f32>, enemies: &mut [Enemy], radius: f32, damage: f32) -> Vec<u64> {
        let mut killed = Vec::new();
        for i in candidates(enemies, center, radius) {
            let enemy = &mut enemies[i];
            if enemy.is_dead() || geometric_utils::distance(center, &enemy.pos) >= radius {
                continue;
            }
            enemy.take_damage(damage);
            if enemy.is_dead() {
                killed.push(enemy.id);
            }
        }
        killed
    }
}

/// Deals damage to one enemy with the player's on-hit effects.
///
/// # Returns
///
/// The enemy id if the hit killed it.
fn strike(player: &mut Player, enemy: &mut Enemy, damage: f32) -> Option<u64> {
    enemy.take_damage(damage);

    if player.stats.life_steal > 0.0 {
        player.stats.heal(damage * player.stats.life_steal);
    }
    if let Some(poison) = player.stats.poison {
        enemy.poison(poison.dps, poison.duration_ms);
    }

    if enemy.is_dead() {
        debug!(enemy = enemy.id, kind = ?enemy.kind, damage, "enemy killed");
        Some(enemy.id)
    } else {
        None
    }
}

/// Index of the enemy nearest to `pos`; ties go to the first in slice order.
fn nearest(enemies: &[Enemy], pos: &Array1<f32>, indices: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for &i in indices {
        let d = geometric_utils::distance(pos, &enemies[i].pos);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Enemies possibly within `radius`, in slice order.
fn candidates(enemies: &[Enemy], center: &Array1<f32>, radius: f32) -> Vec<usize> {
    match SpatialIndex::build(enemies) {
        Ok(index) => index.indices_within(center, radius),
        Err(err) => {
            warn!(?err, "spatial index unavailable, scanning all enemies");
            (0..enemies.len()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::catalog::EnemyKind;
    use crate::simulation::catalog::evolutions::PoisonEffect;
    use crate::simulation::geometric_utils::vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup(positions: &[(f32, f32)], kind: EnemyKind) -> (Player, Vec<Enemy>) {
        let mut rng = StdRng::seed_from_u64(42);
        let enemies = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Enemy::new(i as u64, kind, vec2(x, y), &mut rng))
            .collect();
        (Player::new(0.0, 0.0), enemies)
    }

    #[test]
    fn bite_hits_only_the_nearest() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(40.0, 0.0), (20.0, 0.0)], EnemyKind::Puffer);
        let mut combat = CombatResolver::new();

        combat.attack(&mut player, &mut enemies, &params);
        assert_eq!(enemies[0].health, 3.0);
        assert_eq!(enemies[1].health, -7.0);
    }

    #[test]
    fn bite_without_target_keeps_cooldown_ready() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(500.0, 0.0)], EnemyKind::Common);
        let mut combat = CombatResolver::new();

        assert!(combat.attack(&mut player, &mut enemies, &params).is_empty());
        assert_eq!(combat.cooldown_ms(), 0.0);
    }

    #[test]
    fn bite_respects_cooldown() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(20.0, 0.0), (30.0, 0.0)], EnemyKind::Common);
        let mut combat = CombatResolver::new();

        assert_eq!(combat.attack(&mut player, &mut enemies, &params), vec![0]);
        assert!(combat.attack(&mut player, &mut enemies, &params).is_empty());

        combat.tick(params.attack_cooldown_ms);
        assert_eq!(combat.attack(&mut player, &mut enemies, &params), vec![1]);
    }

    #[test]
    fn area_bite_hits_everything_in_range() {
        let params = Params::default();
        let (mut player, mut enemies) =
            setup(&[(20.0, 0.0), (0.0, -30.0), (300.0, 0.0)], EnemyKind::Common);
        player.stats.area_damage = true;
        let mut combat = CombatResolver::new();

        let killed = combat.attack(&mut player, &mut enemies, &params);
        assert_eq!(killed, vec![0, 1]);
        assert_eq!(enemies[2].health, 1.0);
    }

    #[test]
    fn life_steal_heals_and_poison_sticks() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(20.0, 0.0)], EnemyKind::Shark);
        player.stats.health = 50.0;
        player.stats.life_steal = 0.5;
        player.stats.poison = Some(PoisonEffect {
            dps: 5.0,
            duration_ms: 3000.0,
        });
        let mut combat = CombatResolver::new();

        combat.attack(&mut player, &mut enemies, &params);
        assert_eq!(player.stats.health, 55.0);
        assert!(enemies[0].poison.is_some());
    }

    #[test]
    fn poison_kills_once() {
        let (_, mut enemies) = setup(&[(0.0, 0.0)], EnemyKind::Hunter);
        enemies[0].poison(1.0, 5000.0);

        assert!(CombatResolver::tick_poison(&mut enemies, 1000.0).is_empty());
        assert_eq!(CombatResolver::tick_poison(&mut enemies, 1000.0), vec![0]);
        assert!(CombatResolver::tick_poison(&mut enemies, 1000.0).is_empty());
    }

    #[test]
    fn poison_wears_off() {
        let (_, mut enemies) = setup(&[(0.0, 0.0)], EnemyKind::Shark);
        enemies[0].poison(2.0, 500.0);

        CombatResolver::tick_poison(&mut enemies, 1000.0);
        assert_eq!(enemies[0].health, 7.0);
        assert!(enemies[0].poison.is_none());
    }

    #[test]
    fn certain_dodge_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = Player::new(0.0, 0.0);
        player.stats.dodge_chance = 1.0;

        for _ in 0..1000 {
            let outcome = CombatResolver::apply_damage_to_player(&mut player, 50.0, &mut rng);
            assert_eq!(outcome, DamageOutcome::Dodged);
        }
        assert_eq!(player.stats.health, 100.0);
    }

    #[test]
    fn zero_dodge_never_dodges() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut player = Player::new(0.0, 0.0);
        player.stats.max_health = 1.0e6;
        player.stats.health = 1.0e6;

        for _ in 0..1000 {
            let outcome = CombatResolver::apply_damage_to_player(&mut player, 1.0, &mut rng);
            assert_eq!(outcome, DamageOutcome::Damaged(1.0));
        }
        assert_eq!(player.stats.health, 1.0e6 - 1000.0);
    }

    #[test]
    fn hit_without_dodge_clamps_at_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = Player::new(0.0, 0.0);

        let outcome = CombatResolver::apply_damage_to_player(&mut player, 150.0, &mut rng);
        assert_eq!(outcome, DamageOutcome::Damaged(150.0));
        assert_eq!(player.stats.health, 0.0);
    }

    #[test]
    fn bite_reaches_oversized_enemies() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(120.0, 0.0)], EnemyKind::Shark);
        enemies[0].size = 90.0;
        enemies[0].health = 1.0;
        let mut combat = CombatResolver::new();

        // Reach 50 plus radius 90 covers a center 120 away.
        assert_eq!(combat.attack(&mut player, &mut enemies, &params), vec![0]);
    }

    #[test]
    fn dash_hits_each_enemy_once_per_dash() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(30.0, 0.0), (100.0, 0.0)], EnemyKind::Shark);
        player.stats.dash_damage = true;
        player.stats.dash_damage_multiplier = 0.8;
        let mut combat = CombatResolver::new();

        player.start_dash(&params);
        combat.begin_dash();
        combat.dash_pass(&mut player, &mut enemies, &params);
        combat.dash_pass(&mut player, &mut enemies, &params);
        assert!((enemies[0].health - 0.0).abs() < 1e-5);
        assert_eq!(enemies[1].health, 8.0);

        player.tick_dash(params.dash_cooldown_ms);
        player.start_dash(&params);
        combat.begin_dash();
        let killed = combat.dash_pass(&mut player, &mut enemies, &params);
        assert!(killed.is_empty());
    }

    #[test]
    fn dash_without_capability_is_harmless() {
        let params = Params::default();
        let (mut player, mut enemies) = setup(&[(10.0, 0.0)], EnemyKind::Common);
        let mut combat = CombatResolver::new();

        player.start_dash(&params);
        combat.begin_dash();
        assert!(combat.dash_pass(&mut player, &mut enemies, &params).is_empty());
        assert_eq!(enemies[0].health, 1.0);
    }

    #[test]
    fn area_pulse_uses_strict_radius() {
        let (_, mut enemies) = setup(&[(80.0, 0.0), (79.0, 0.0)], EnemyKind::Common);
        let killed = CombatResolver::area_pulse(&vec2(0.0, 0.0), &mut enemies, 80.0, 10.0);
        assert_eq!(killed, vec![1]);
    }

    #[test]
    fn reward_reads_the_catalog() {
        let (_, enemies) = setup(&[(0.0, 0.0)], EnemyKind::Mutant);
        let reward = CombatResolver::reward(&enemies[0]);
        assert_eq!(reward.dna, DnaDrop::Random);
        assert_eq!(reward.dna_amount, 20);
        assert_eq!(reward.hunger_restore, 35.0);
    }
}
