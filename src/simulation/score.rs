//! Score bookkeeping.
//!
//! Every point is added through [`ScoreTracker::add_score`], so the total is
//! always the sum of the category counters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::BiomeId;

/// Where score points came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    /// Killing enemies.
    Enemies,
    /// Collecting DNA.
    Dna,
    /// Applying evolutions.
    Evolutions,
    /// Discovering biomes.
    Biomes,
    /// Staying alive.
    Survival,
}

/// Score total and per-category counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sum of all categories.
    pub total: u64,
    /// Points from kills.
    pub enemies: u64,
    /// Points from DNA.
    pub dna: u64,
    /// Points from evolutions.
    pub evolutions: u64,
    /// Points from discoveries.
    pub biomes: u64,
    /// Points from survival time.
    pub survival: u64,
}

impl ScoreBreakdown {
    fn slot_mut(&mut self, category: ScoreCategory) -> &mut u64 {
        match category {
            ScoreCategory::Enemies => &mut self.enemies,
            ScoreCategory::Dna => &mut self.dna,
            ScoreCategory::Evolutions => &mut self.evolutions,
            ScoreCategory::Biomes => &mut self.biomes,
            ScoreCategory::Survival => &mut self.survival,
        }
    }
}

/// Accumulates score and remembers discovered biomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    breakdown: ScoreBreakdown,
    visited: BTreeSet<BiomeId>,
}

impl ScoreTracker {
    /// Creates a tracker. The starting biome counts as visited, without a bonus.
    pub fn new(start: BiomeId) -> Self {
        Self {
            breakdown: ScoreBreakdown::default(),
            visited: BTreeSet::from([start]),
        }
    }

    /// Adds points to a category and to the total.
    pub fn add_score(&mut self, amount: u64, category: ScoreCategory) {
        let slot = self.breakdown.slot_mut(category);
        *slot = slot.saturating_add(amount);
        self.breakdown.total = self.breakdown.total.saturating_add(amount);
    }

    /// Records entering a biome and awards `bonus` on the first visit.
    ///
    /// # Returns
    ///
    /// `true` if this was the first visit.
    pub fn visit_biome(&mut self, biome: BiomeId, bonus: u64) -> bool {
        let first_visit = self.visited.insert(biome);
        if first_visit {
            self.add_score(bonus, ScoreCategory::Biomes);
        }
        first_visit
    }

    /// Scores a kill: `per_health * max_health` for the enemy, plus the DNA amount.
    pub fn record_kill(&mut self, max_health: f32, dna_amount: u32, per_health: u64) {
        self.add_score(per_health * max_health.max(0.0) as u64, ScoreCategory::Enemies);
        self.add_score(dna_amount as u64, ScoreCategory::Dna);
    }

    /// Current total.
    pub fn score(&self) -> u64 {
        self.breakdown.total
    }

    /// Total and per-category counters.
    pub fn breakdown(&self) -> ScoreBreakdown {
        self.breakdown
    }

    /// Biomes visited so far, shallowest first.
    pub fn visited_biomes(&self) -> &BTreeSet<BiomeId> {
        &self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_biome_gives_no_bonus() {
        let mut score = ScoreTracker::new(BiomeId::Surface);
        assert!(!score.visit_biome(BiomeId::Surface, 150));
        assert_eq!(score.score(), 0);
    }

    #[test]
    fn biome_bonus_is_paid_once() {
        let mut score = ScoreTracker::new(BiomeId::Surface);
        assert!(score.visit_biome(BiomeId::Reef, 150));
        assert!(!score.visit_biome(BiomeId::Reef, 150));
        assert_eq!(score.breakdown().biomes, 150);
    }

    #[test]
    fn kill_scores_enemy_and_dna() {
        let mut score = ScoreTracker::new(BiomeId::Surface);
        score.record_kill(8.0, 25, 10);

        let breakdown = score.breakdown();
        assert_eq!(breakdown.enemies, 80);
        assert_eq!(breakdown.dna, 25);
        assert_eq!(breakdown.total, 105);
    }
}
