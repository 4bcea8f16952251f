//! Enemy instances.

use ndarray::Array1;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::behavior::BehaviorState;
use super::catalog::{Behavior, EnemyKind, EnemyType};
use super::geometric_utils::vec2;
use super::locatable::Locatable;

/// Poison currently eating at an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePoison {
    /// Damage per second.
    pub dps: f32,
    /// Time left before the poison wears off.
    pub remaining_ms: f32,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Session-unique identifier.
    pub id: u64,
    /// Catalog kind.
    pub kind: EnemyKind,
    /// Movement strategy, fixed at spawn.
    pub behavior: Behavior,
    /// Position in world space.
    pub pos: Array1<f32>,
    /// Velocity in units per second.
    pub velocity: Array1<f32>,
    /// Body radius.
    pub size: f32,
    /// Base swim speed.
    pub speed: f32,
    /// Contact damage.
    pub damage: f32,
    /// Current health.
    pub health: f32,
    /// Health at spawn.
    pub max_health: f32,
    /// Time until the next contact attack is allowed.
    pub attack_cooldown_ms: f32,
    /// Active poison, if any.
    pub poison: Option<ActivePoison>,
    /// AI state.
    pub state: BehaviorState,
}

impl Enemy {
    /// Creates an enemy of the given kind at rest.
    ///
    /// # Arguments
    ///
    /// * `id` - Session-unique identifier
    /// * `kind` - Catalog kind providing stats and behavior
    /// * `pos` - Spawn position
    /// * `rng` - Randomness for the initial AI state
    pub fn new(id: u64, kind: EnemyKind, pos: Array1<f32>, rng: &mut dyn RngCore) -> Self {
        let spec = kind.spec();
        Self {
            id,
            kind,
            behavior: spec.behavior,
            pos,
            velocity: vec2(0.0, 0.0),
            size: spec.size,
            speed: spec.speed,
            damage: spec.damage,
            health: spec.health,
            max_health: spec.health,
            attack_cooldown_ms: 0.0,
            poison: None,
            state: BehaviorState::new(rng),
        }
    }

    /// Catalog entry of this enemy's kind.
    pub fn spec(&self) -> &'static EnemyType {
        self.kind.spec()
    }

    /// Checks whether the enemy is dead.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtracts health. Health may go negative; death is `health <= 0`.
    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    /// Applies poison, or refreshes it when already poisoned.
    pub fn poison(&mut self, dps: f32, duration_ms: f32) {
        self.poison = Some(ActivePoison {
            dps,
            remaining_ms: duration_ms,
        });
    }
}

impl Locatable for Enemy {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }

    fn velocity(&self) -> &Array1<f32> {
        &self.velocity
    }
}
