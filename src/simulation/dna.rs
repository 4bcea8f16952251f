//! DNA resource pool collected from kills and spent on evolutions.
//!
//! DNA comes in four fixed types. Counts are unsigned, and consumption only
//! happens after [`DnaPool::meets`] confirmed the pool is large enough, so the
//! pool can never go negative.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The four DNA resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnaType {
    /// Dropped by fast, skittish fish.
    Speed,
    /// Dropped by tough fish.
    Defense,
    /// Dropped by predators.
    Attack,
    /// Dropped by glowing fish.
    Energy,
}

impl DnaType {
    /// All DNA types in display order.
    pub const ALL: [DnaType; 4] = [
        DnaType::Speed,
        DnaType::Defense,
        DnaType::Attack,
        DnaType::Energy,
    ];

    /// Picks a DNA type uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Lowercase identifier used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            DnaType::Speed => "speed",
            DnaType::Defense => "defense",
            DnaType::Attack => "attack",
            DnaType::Energy => "energy",
        }
    }
}

/// DNA type carried by an enemy's reward.
///
/// `Random` is resolved to a concrete type at the moment the reward is
/// collected, not when the reward is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnaDrop {
    /// Always the given type.
    Fixed(DnaType),
    /// One of the four types, chosen on collection.
    Random,
}

impl DnaDrop {
    /// Resolves the drop into a concrete DNA type.
    pub fn resolve(self, rng: &mut impl Rng) -> DnaType {
        match self {
            DnaDrop::Fixed(dna_type) => dna_type,
            DnaDrop::Random => DnaType::random(rng),
        }
    }
}

/// Banked DNA per type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaPool {
    /// Speed DNA.
    pub speed: u32,
    /// Defense DNA.
    pub defense: u32,
    /// Attack DNA.
    pub attack: u32,
    /// Energy DNA.
    pub energy: u32,
}

impl DnaPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the banked amount of one type.
    pub fn get(&self, dna_type: DnaType) -> u32 {
        match dna_type {
            DnaType::Speed => self.speed,
            DnaType::Defense => self.defense,
            DnaType::Attack => self.attack,
            DnaType::Energy => self.energy,
        }
    }

    fn slot_mut(&mut self, dna_type: DnaType) -> &mut u32 {
        match dna_type {
            DnaType::Speed => &mut self.speed,
            DnaType::Defense => &mut self.defense,
            DnaType::Attack => &mut self.attack,
            DnaType::Energy => &mut self.energy,
        }
    }

    /// Adds DNA of one type.
    pub fn add(&mut self, dna_type: DnaType, amount: u32) {
        let slot = self.slot_mut(dna_type);
        *slot = slot.saturating_add(amount);
    }

    /// Checks whether every requirement is met (logical AND, no partial credit).
    ///
    /// # Arguments
    ///
    /// * `requirements` - Pairs of DNA type and minimum amount
    ///
    /// # Returns
    ///
    /// `true` if the pool holds at least the threshold for every pair.
    pub fn meets(&self, requirements: &[(DnaType, u32)]) -> bool {
        requirements
            .iter()
            .all(|&(dna_type, amount)| self.get(dna_type) >= amount)
    }

    /// Subtracts the exact requirement amounts. Surplus stays banked.
    ///
    /// Returns `false` and leaves the pool untouched when any requirement is
    /// not met.
    pub fn consume(&mut self, requirements: &[(DnaType, u32)]) -> bool {
        if !self.meets(requirements) {
            return false;
        }
        for &(dna_type, amount) in requirements {
            *self.slot_mut(dna_type) -= amount;
        }
        true
    }

    /// Total DNA across all types.
    pub fn total(&self) -> u64 {
        DnaType::ALL.iter().map(|&t| u64::from(self.get(t))).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn consume_keeps_surplus() {
        let mut pool = DnaPool::new();
        pool.add(DnaType::Attack, 45);
        pool.add(DnaType::Energy, 31);

        assert!(pool.consume(&[(DnaType::Attack, 30), (DnaType::Energy, 30)]));
        assert_eq!(pool.attack, 15);
        assert_eq!(pool.energy, 1);
    }

    #[test]
    fn consume_refuses_when_short() {
        let mut pool = DnaPool::new();
        pool.add(DnaType::Attack, 40);

        assert!(!pool.consume(&[(DnaType::Attack, 30), (DnaType::Energy, 30)]));
        assert_eq!(pool.attack, 40);
        assert_eq!(pool.energy, 0);
    }

    #[test]
    fn total_does_not_overflow_on_full_slots() {
        let mut pool = DnaPool::new();
        for t in DnaType::ALL {
            pool.add(t, u32::MAX);
        }
        assert_eq!(pool.total(), 4 * u64::from(u32::MAX));
    }

    #[test]
    fn random_drop_resolves_to_a_real_type() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let t = DnaDrop::Random.resolve(&mut rng);
            assert!(DnaType::ALL.contains(&t));
        }
        assert_eq!(
            DnaDrop::Fixed(DnaType::Energy).resolve(&mut rng),
            DnaType::Energy
        );
    }
}
