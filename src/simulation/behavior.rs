//! Enemy AI: one movement strategy per behavior kind.
//!
//! Every enemy carries its own [`BehaviorState`]; strategies read the player's
//! position and the enemy's timers and write the enemy's velocity. Transitions
//! depend only on the distance to the player and on per-enemy timers, so
//! enemies never share state.

use ndarray::Array1;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::catalog::Behavior;
use super::enemy::Enemy;
use super::geometric_utils::{self, vec2};

/// Flee when the player is closer than this.
pub const FLEE_DISTANCE: f32 = 200.0;
/// Chase when the player is closer than this.
pub const CHASE_DISTANCE: f32 = 300.0;
/// Stop closing in below this distance.
pub const CHASE_STOP_DISTANCE: f32 = 40.0;
/// A hidden ambusher strikes below this distance.
pub const AMBUSH_TRIGGER_DISTANCE: f32 = 120.0;
/// A revealed ambusher keeps chasing below this distance.
pub const AMBUSH_CHASE_DISTANCE: f32 = 250.0;
/// A revealed ambusher hides again beyond this distance.
pub const AMBUSH_RESET_DISTANCE: f32 = 400.0;
/// Hunters give up beyond this distance and patrol.
pub const HUNT_MAX_DISTANCE: f32 = 500.0;
/// Hunters frenzy below this distance.
pub const HUNT_BURST_DISTANCE: f32 = 150.0;
/// Patrol orbit radius on the X axis (Y uses half).
pub const PATROL_RADIUS: f32 = 100.0;
/// Contact attack reach, added to the enemy's size.
pub const CONTACT_REACH: f32 = 30.0;
/// Time between two contact attacks of the same enemy.
pub const CONTACT_COOLDOWN_MS: f32 = 1000.0;

const FLEE_SPEED_FACTOR: f32 = 1.5;
const FLEE_DRAG: f32 = 0.98;
const AMBUSH_DRAG: f32 = 0.9;
const AMBUSH_BURST_FACTOR: f32 = 2.0;
const WANDER_SPEED_FACTOR: f32 = 0.5;
const WANDER_TURN: f32 = 0.5;
const WANDER_MIN_MS: f32 = 500.0;
const WANDER_MAX_MS: f32 = 1500.0;
const HUNT_BURST_FACTOR: f32 = 1.5;
const PATROL_SPEED_FACTOR: f32 = 0.7;
const FLOAT_PHASE_STEP: f32 = 0.01;
const PATROL_PHASE_STEP: f32 = 0.02;

/// Transient per-enemy AI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorState {
    /// Wander heading in radians.
    pub wander_angle: f32,
    /// Time until the wander heading changes.
    pub wander_timer_ms: f32,
    /// Ambushers: whether the enemy has struck.
    pub ambush_revealed: bool,
    /// Hunters: close-range burst active. Visual signal only.
    pub in_frenzy: bool,
    /// Float drift phase.
    pub float_phase: f32,
    /// Patrol orbit phase.
    pub patrol_phase: f32,
    /// Patrol orbit center, captured on the first patrol tick.
    pub patrol_center: Option<Array1<f32>>,
}

impl BehaviorState {
    /// Creates a fresh state with randomized heading, timer and phases.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            wander_angle: rng.random_range(0.0..std::f32::consts::TAU),
            wander_timer_ms: rng.random_range(WANDER_MIN_MS..WANDER_MAX_MS),
            ambush_revealed: false,
            in_frenzy: false,
            float_phase: rng.random_range(0.0..std::f32::consts::TAU),
            patrol_phase: rng.random_range(0.0..std::f32::consts::TAU),
            patrol_center: None,
        }
    }
}

/// What a strategy can see this tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    /// Player position.
    pub player_pos: &'a Array1<f32>,
    /// Center distance between the enemy and the player.
    pub distance: f32,
    /// Time since the previous tick.
    pub delta_ms: f32,
}

/// A movement strategy: writes the enemy's velocity for this tick.
pub type Strategy = fn(&mut Enemy, &Surroundings<'_>, &mut dyn RngCore);

impl Behavior {
    /// Lookup table from behavior kind to strategy.
    pub fn strategy(self) -> Strategy {
        match self {
            Behavior::Flee => flee,
            Behavior::Chase => chase,
            Behavior::Wander => wander,
            Behavior::Ambush => ambush,
            Behavior::Float => float,
            Behavior::Hunt => hunt,
            Behavior::Patrol => patrol,
        }
    }
}

/// Runs the enemy's strategy for one tick.
///
/// # Arguments
///
/// * `enemy` - Enemy to steer
/// * `player_pos` - Current player position
/// * `delta_ms` - Time since the previous tick
/// * `rng` - Randomness for wander turns
///
/// # Returns
///
/// The distance to the player used for this tick's decisions.
pub fn steer(
    enemy: &mut Enemy,
    player_pos: &Array1<f32>,
    delta_ms: f32,
    rng: &mut dyn RngCore,
) -> f32 {
    let surroundings = Surroundings {
        player_pos,
        distance: geometric_utils::distance(&enemy.pos, player_pos),
        delta_ms,
    };
    (enemy.behavior.strategy())(enemy, &surroundings, rng);
    surroundings.distance
}

/// Counts down the contact cooldown and decides whether the enemy bites.
///
/// Independent of the movement strategy. Harmless enemies never bite.
///
/// # Returns
///
/// The damage to deal to the player, if the enemy attacks this tick.
pub fn contact_attack(enemy: &mut Enemy, distance: f32, delta_ms: f32) -> Option<f32> {
    enemy.attack_cooldown_ms = (enemy.attack_cooldown_ms - delta_ms).max(0.0);

    if enemy.damage <= 0.0 || distance >= enemy.size + CONTACT_REACH {
        return None;
    }
    if enemy.attack_cooldown_ms > 0.0 {
        return None;
    }
    enemy.attack_cooldown_ms = CONTACT_COOLDOWN_MS;
    Some(enemy.damage)
}

fn flee(enemy: &mut Enemy, s: &Surroundings<'_>, _rng: &mut dyn RngCore) {
    if s.distance < FLEE_DISTANCE {
        enemy.velocity =
            geometric_utils::velocity_towards(s.player_pos, &enemy.pos, enemy.speed * FLEE_SPEED_FACTOR);
    } else {
        enemy.velocity *= FLEE_DRAG;
    }
}

fn chase(enemy: &mut Enemy, s: &Surroundings<'_>, rng: &mut dyn RngCore) {
    if s.distance >= CHASE_DISTANCE {
        wander(enemy, s, rng);
    } else if s.distance >= CHASE_STOP_DISTANCE {
        enemy.velocity = geometric_utils::velocity_towards(&enemy.pos, s.player_pos, enemy.speed);
    }
}

fn wander(enemy: &mut Enemy, s: &Surroundings<'_>, rng: &mut dyn RngCore) {
    let state = &mut enemy.state;
    state.wander_timer_ms -= s.delta_ms;
    if state.wander_timer_ms <= 0.0 {
        state.wander_angle += rng.random_range(-WANDER_TURN..WANDER_TURN);
        state.wander_timer_ms = rng.random_range(WANDER_MIN_MS..WANDER_MAX_MS);
    }
    enemy.velocity =
        geometric_utils::velocity_from_angle(enemy.state.wander_angle, enemy.speed * WANDER_SPEED_FACTOR);
}

fn ambush(enemy: &mut Enemy, s: &Surroundings<'_>, rng: &mut dyn RngCore) {
    if !enemy.state.ambush_revealed {
        if s.distance < AMBUSH_TRIGGER_DISTANCE {
            enemy.state.ambush_revealed = true;
            enemy.velocity = geometric_utils::velocity_towards(
                &enemy.pos,
                s.player_pos,
                enemy.speed * AMBUSH_BURST_FACTOR,
            );
        } else {
            enemy.velocity *= AMBUSH_DRAG;
        }
        return;
    }

    if s.distance < AMBUSH_CHASE_DISTANCE {
        enemy.velocity = geometric_utils::velocity_towards(&enemy.pos, s.player_pos, enemy.speed);
    } else {
        if s.distance > AMBUSH_RESET_DISTANCE {
            enemy.state.ambush_revealed = false;
        }
        wander(enemy, s, rng);
    }
}

fn float(enemy: &mut Enemy, _s: &Surroundings<'_>, _rng: &mut dyn RngCore) {
    enemy.state.float_phase += FLOAT_PHASE_STEP;
    let phase = enemy.state.float_phase;
    enemy.velocity = vec2(
        (phase * 0.3).sin() * 0.3 * enemy.speed,
        phase.sin() * 0.5 * enemy.speed,
    );
}

fn hunt(enemy: &mut Enemy, s: &Surroundings<'_>, rng: &mut dyn RngCore) {
    if s.distance >= HUNT_MAX_DISTANCE {
        enemy.state.in_frenzy = false;
        patrol(enemy, s, rng);
        return;
    }

    enemy.state.in_frenzy = s.distance < HUNT_BURST_DISTANCE;
    let factor = if enemy.state.in_frenzy {
        HUNT_BURST_FACTOR
    } else {
        1.0
    };
    enemy.velocity = geometric_utils::velocity_towards(&enemy.pos, s.player_pos, enemy.speed * factor);
}

fn patrol(enemy: &mut Enemy, _s: &Surroundings<'_>, _rng: &mut dyn RngCore) {
    let center = enemy
        .state
        .patrol_center
        .get_or_insert_with(|| enemy.pos.clone())
        .clone();
    enemy.state.patrol_phase += PATROL_PHASE_STEP;
    let phase = enemy.state.patrol_phase;

    let waypoint = vec2(
        center[0] + phase.cos() * PATROL_RADIUS,
        center[1] + (phase * 0.5).sin() * PATROL_RADIUS * 0.5,
    );
    enemy.velocity =
        geometric_utils::velocity_towards(&enemy.pos, &waypoint, enemy.speed * PATROL_SPEED_FACTOR);
}
