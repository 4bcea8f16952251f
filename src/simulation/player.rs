//! The player-fish: body, stats and dash state.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{self, vec2};
use super::locatable::Locatable;
use super::params::Params;
use super::stats::Stats;

/// Distance to the target below which the player stops swimming.
const ARRIVE_RADIUS: f32 = 10.0;
/// Per-tick velocity blend towards the desired velocity.
const STEER_BLEND: f32 = 0.1;
/// Per-tick velocity blend towards rest.
const BRAKE_BLEND: f32 = 0.2;

/// Dash timers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    /// Time left in the current dash (0 when not dashing).
    pub remaining_ms: f32,
    /// Time until the next dash is allowed.
    pub cooldown_ms: f32,
    /// Dash direction in radians.
    pub heading: f32,
}

/// The controllable fish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position in world space.
    pub pos: Array1<f32>,
    /// Velocity in units per second.
    pub velocity: Array1<f32>,
    /// Facing in radians.
    pub rot: f32,
    /// Stat block.
    pub stats: Stats,
    /// Dash timers.
    pub dash: DashState,
    /// World-space point the player swims towards.
    pub target: Option<Array1<f32>>,
}

impl Player {
    /// Creates a player at rest with base stats.
    ///
    /// # Arguments
    ///
    /// * `x` - Spawn X
    /// * `y` - Spawn Y (depth)
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: vec2(x, y),
            velocity: vec2(0.0, 0.0),
            rot: 0.0,
            stats: Stats::default(),
            dash: DashState::default(),
            target: None,
        }
    }

    /// Checks whether a dash is in progress.
    pub fn is_dashing(&self) -> bool {
        self.dash.remaining_ms > 0.0
    }

    /// Checks whether a new dash may start.
    pub fn can_dash(&self) -> bool {
        !self.is_dashing() && self.dash.cooldown_ms <= 0.0
    }

    /// Starts a dash towards the target, or along the current facing.
    ///
    /// # Returns
    ///
    /// `true` if the dash started, `false` while dashing or cooling down.
    pub fn start_dash(&mut self, params: &Params) -> bool {
        if !self.can_dash() {
            return false;
        }
        self.dash.heading = match &self.target {
            Some(target) if geometric_utils::distance(&self.pos, target) > ARRIVE_RADIUS => {
                geometric_utils::angle_between(&self.pos, target)
            }
            _ => self.rot,
        };
        self.dash.remaining_ms = params.dash_duration_ms;
        self.dash.cooldown_ms = params.dash_cooldown_ms;
        true
    }

    /// Fraction of the dash cooldown that has elapsed, in `[0, 1]`.
    ///
    /// 1 means a dash is available.
    pub fn dash_ready_fraction(&self, params: &Params) -> f32 {
        if params.dash_cooldown_ms <= 0.0 {
            return 1.0;
        }
        (1.0 - self.dash.cooldown_ms / params.dash_cooldown_ms).clamp(0.0, 1.0)
    }

    /// Counts down the dash timers.
    pub fn tick_dash(&mut self, delta_ms: f32) {
        self.dash.remaining_ms = (self.dash.remaining_ms - delta_ms).max(0.0);
        self.dash.cooldown_ms = (self.dash.cooldown_ms - delta_ms).max(0.0);
    }

    /// Sets the velocity for this tick from the target and dash state.
    pub fn steer(&mut self, params: &Params) {
        let speed = self.stats.effective_speed();

        if self.is_dashing() {
            self.rot = self.dash.heading;
            self.velocity =
                geometric_utils::velocity_from_angle(self.dash.heading, speed * params.dash_speed_multiplier);
            return;
        }

        match &self.target {
            Some(target) if geometric_utils::distance(&self.pos, target) > ARRIVE_RADIUS => {
                self.rot = geometric_utils::angle_between(&self.pos, target);
                let desired = geometric_utils::velocity_from_angle(self.rot, speed);
                self.velocity = geometric_utils::lerp(&self.velocity, &desired, STEER_BLEND);
            }
            _ => {
                self.velocity = geometric_utils::lerp(&self.velocity, &vec2(0.0, 0.0), BRAKE_BLEND);
            }
        }
    }
}

impl Locatable for Player {
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
