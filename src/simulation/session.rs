//! A single game session: owns the world and advances it.
//!
//! The host drives the session with [`GameSession::update`] once per frame and
//! forwards player intents (`set_target`, `attack`, `dash`, evolution
//! selection). Everything else (AI, contact damage, poison, periodic timers,
//! biome discovery, game over) happens inside `update`.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::behavior;
use super::catalog::{BiomeId, EnemyKind, EvolutionDef, EvolutionId};
use super::combat::{CombatResolver, DamageOutcome};
use super::dna::DnaPool;
use super::enemy::Enemy;
use super::event_log::{EventLog, LoggedEvent};
use super::events::{EventQueue, GameEvent};
use super::evolution::{EvolutionEngine, EvolutionError};
use super::geometric_utils::{self, vec2};
use super::locatable::Locatable;
use super::params::{Params, ParamsError};
use super::player::Player;
use super::scheduler::{Scheduler, SchedulerError, TimerHandle, TimerKind};
use super::score::{ScoreBreakdown, ScoreCategory, ScoreTracker};
use super::spawn::{self, SpawnController};
use super::stats::Stats;

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The player died; the session accepts no more changes.
    #[error("the session is over")]
    Terminated,
    /// An evolution could not be applied.
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
    /// The parameters are unusable.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// A periodic timer could not be started.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Final state reported when the player dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverSnapshot {
    /// DNA left unspent.
    pub dna: DnaPool,
    /// Evolutions in application order.
    pub evolutions: Vec<EvolutionId>,
    /// Final score.
    pub score: ScoreBreakdown,
    /// Seconds survived.
    pub survival_seconds: u64,
}

/// All state of one game.
pub struct GameSession {
    params: Params,
    rng: StdRng,
    player: Player,
    enemies: Vec<Enemy>,
    dna: DnaPool,
    evolution: EvolutionEngine,
    combat: CombatResolver,
    spawner: SpawnController,
    score: ScoreTracker,
    scheduler: Scheduler,
    storm_timer: Option<TimerHandle>,
    events: EventQueue,
    log: EventLog,
    biome: BiomeId,
    time_ms: f32,
    survival_seconds: u64,
    game_over: Option<GameOverSnapshot>,
}

impl GameSession {
    /// Starts a session: player at the top center, initial enemies, timers running.
    ///
    /// # Arguments
    ///
    /// * `params` - Session parameters; validated first
    ///
    /// # Returns
    ///
    /// The new session, or why it could not start.
    pub fn new(params: Params) -> Result<Self, SessionError> {
        params.validate()?;

        let rng = match params.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let player = Player::new(params.world_width / 2.0, params.player_start_y);
        let biome = spawn::biome_at(player.pos[1]).id;

        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::HungerDecay, params.hunger_interval_ms)?;
        scheduler.schedule(TimerKind::Spawn, params.spawn_interval_ms)?;
        scheduler.schedule(TimerKind::Survival, params.survival_interval_ms)?;
        scheduler.schedule(TimerKind::Regeneration, params.regen_interval_ms)?;

        let mut session = Self {
            rng,
            player,
            enemies: Vec::with_capacity(params.max_enemies),
            dna: DnaPool::new(),
            evolution: EvolutionEngine::new(),
            combat: CombatResolver::new(),
            spawner: SpawnController::new(),
            score: ScoreTracker::new(biome),
            scheduler,
            storm_timer: None,
            events: EventQueue::new(),
            log: EventLog::new(params.event_log_size),
            biome,
            time_ms: 0.0,
            survival_seconds: 0,
            game_over: None,
            params,
        };

        for _ in 0..session.params.initial_enemies {
            session.spawn_random();
        }
        info!(
            enemies = session.enemies.len(),
            biome = biome.as_str(),
            "session started"
        );
        Ok(session)
    }

    /// Sets the world-space point the player swims towards.
    ///
    /// The point is clamped to the world.
    pub fn set_target(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        self.ensure_running()?;
        let mut target = vec2(x, y);
        geometric_utils::clamp_to_bounds_mut(&mut target, self.params.world_width, self.params.world_height);
        self.player.target = Some(target);
        Ok(())
    }

    /// Stops swimming towards a target; the player glides to rest.
    pub fn clear_target(&mut self) -> Result<(), SessionError> {
        self.ensure_running()?;
        self.player.target = None;
        Ok(())
    }

    /// Bites.
    ///
    /// # Returns
    ///
    /// Ids of the enemies killed; their rewards are already collected.
    pub fn attack(&mut self) -> Result<Vec<u64>, SessionError> {
        self.ensure_running()?;
        let killed = self.combat.attack(&mut self.player, &mut self.enemies, &self.params);
        self.collect_kills(&killed);
        Ok(killed)
    }

    /// Starts a dash.
    ///
    /// # Returns
    ///
    /// `true` if the dash started, `false` while dashing or cooling down.
    pub fn dash(&mut self) -> Result<bool, SessionError> {
        self.ensure_running()?;
        if !self.player.start_dash(&self.params) {
            return Ok(false);
        }
        self.combat.begin_dash();
        debug!(heading = self.player.dash.heading, "dash started");
        Ok(true)
    }

    /// Lists evolutions the player can afford right now.
    ///
    /// An empty list means there is nothing to choose.
    pub fn request_evolution_menu(&self) -> Result<Vec<&'static EvolutionDef>, SessionError> {
        self.ensure_running()?;
        Ok(self.evolution.available(&self.dna))
    }

    /// Applies an evolution chosen from the menu.
    ///
    /// # Returns
    ///
    /// The applied catalog entry. Refused evolutions leave the session unchanged.
    pub fn select_evolution(&mut self, id: EvolutionId) -> Result<&'static EvolutionDef, SessionError> {
        self.ensure_running()?;
        let def = self.evolution.apply(&mut self.player.stats, &mut self.dna, id)?;

        self.score.add_score(self.params.evolution_bonus, ScoreCategory::Evolutions);
        if let Some(storm) = def.effects.storm {
            if let Some(handle) = self.storm_timer.take() {
                self.scheduler.cancel(handle);
            }
            self.storm_timer = Some(self.scheduler.schedule(TimerKind::StormPulse, storm.interval_ms)?);
        }
        self.emit(GameEvent::EvolutionApplied { id, visual: def.visual });
        Ok(def)
    }

    /// Places an enemy of the given kind, for scripted encounters.
    ///
    /// # Returns
    ///
    /// The new enemy's id.
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, x: f32, y: f32) -> Result<u64, SessionError> {
        self.ensure_running()?;
        let enemy = self.spawner.place(kind, vec2(x, y), &mut self.rng);
        let id = enemy.id;
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Advances the session by one frame.
    ///
    /// Order: player movement, enemy AI and contact attacks, dash and poison
    /// damage, biome discovery, out-of-world cleanup, then periodic timers.
    /// The game ends the moment health reaches 0; nothing after that point
    /// runs in the same frame.
    ///
    /// # Arguments
    ///
    /// * `time_ms` - Host clock in milliseconds
    /// * `delta_ms` - Time since the previous update in milliseconds
    pub fn update(&mut self, time_ms: f32, delta_ms: f32) -> Result<(), SessionError> {
        self.ensure_running()?;
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        let dt = delta_ms / 1000.0;
        self.time_ms = time_ms;

        self.move_player(dt, delta_ms);
        self.move_enemies(dt, delta_ms);
        if self.is_over() {
            return Ok(());
        }

        let killed = self.combat.dash_pass(&mut self.player, &mut self.enemies, &self.params);
        self.collect_kills(&killed);
        let killed = CombatResolver::tick_poison(&mut self.enemies, delta_ms);
        self.collect_kills(&killed);

        self.detect_biome_change();
        self.cleanup_enemies();

        for kind in self.scheduler.advance(delta_ms) {
            if self.is_over() {
                break;
            }
            self.fire(kind);
        }
        Ok(())
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Session parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Player stats.
    pub fn stats(&self) -> &Stats {
        &self.player.stats
    }

    /// Banked DNA.
    pub fn dna(&self) -> &DnaPool {
        &self.dna
    }

    /// Applied evolutions in application order.
    pub fn applied_evolutions(&self) -> &[EvolutionId] {
        self.evolution.applied()
    }

    /// Biome the player is in.
    pub fn current_biome(&self) -> BiomeId {
        self.biome
    }

    /// Current total score.
    pub fn score(&self) -> u64 {
        self.score.score()
    }

    /// Score per category.
    pub fn score_breakdown(&self) -> ScoreBreakdown {
        self.score.breakdown()
    }

    /// Dash readiness in `[0, 1]`; 1 means a dash is available.
    pub fn dash_ready_fraction(&self) -> f32 {
        self.player.dash_ready_fraction(&self.params)
    }

    /// Live enemies.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Recent events, newest first.
    pub fn recent_events(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.log.events().iter()
    }

    /// Biomes entered at least once, the starting one included.
    pub fn visited_biomes(&self) -> &BTreeSet<BiomeId> {
        self.score.visited_biomes()
    }

    /// Seconds survived so far.
    pub fn survival_seconds(&self) -> u64 {
        self.survival_seconds
    }

    /// Host clock at the last update, in milliseconds.
    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Checks whether the player has died.
    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Final snapshot, once the game is over.
    pub fn game_over_snapshot(&self) -> Option<&GameOverSnapshot> {
        self.game_over.as_ref()
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.game_over.is_some() {
            return Err(SessionError::Terminated);
        }
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        self.log
            .log(self.time_ms / 1000.0, event.describe(), event.category());
        self.events.push(event);
    }

    fn move_player(&mut self, dt: f32, delta_ms: f32) {
        self.player.tick_dash(delta_ms);
        self.combat.tick(delta_ms);
        self.player.steer(&self.params);
        self.player.update(dt);
        geometric_utils::clamp_to_bounds_mut(
            &mut self.player.pos,
            self.params.world_width,
            self.params.world_height,
        );
    }

    fn move_enemies(&mut self, dt: f32, delta_ms: f32) {
        let mut hits = Vec::new();
        for enemy in &mut self.enemies {
            let distance = behavior::steer(enemy, &self.player.pos, delta_ms, &mut self.rng);
            enemy.update(dt);
            if let Some(damage) = behavior::contact_attack(enemy, distance, delta_ms) {
                hits.push(damage);
            }
        }
        for damage in hits {
            if self.is_over() {
                break;
            }
            self.damage_player(damage);
        }
    }

    fn damage_player(&mut self, amount: f32) {
        match CombatResolver::apply_damage_to_player(&mut self.player, amount, &mut self.rng) {
            DamageOutcome::Dodged => self.emit(GameEvent::PlayerDodged),
            DamageOutcome::Damaged(amount) => self.emit(GameEvent::PlayerDamaged { amount }),
        }
        if self.player.stats.is_dead() {
            self.end_game();
        }
    }

    /// Removes killed enemies and pays out their rewards.
    fn collect_kills(&mut self, killed: &[u64]) {
        for &id in killed {
            let Some(index) = self.enemies.iter().position(|enemy| enemy.id == id) else {
                continue;
            };
            let enemy = self.enemies.remove(index);
            let reward = CombatResolver::reward(&enemy);
            let dna_type = reward.dna.resolve(&mut self.rng);

            self.dna.add(dna_type, reward.dna_amount);
            self.player.stats.feed(reward.hunger_restore);
            self.score.record_kill(
                enemy.max_health,
                reward.dna_amount,
                self.params.kill_score_per_health,
            );
            debug!(
                enemy = id,
                kind = ?enemy.kind,
                dna = dna_type.as_str(),
                amount = reward.dna_amount,
                "reward collected"
            );
            self.emit(GameEvent::EnemyKilled {
                id,
                kind: enemy.kind,
                dna_type,
                dna_amount: reward.dna_amount,
                hunger_restore: reward.hunger_restore,
            });
        }
    }

    fn detect_biome_change(&mut self) {
        let biome = spawn::biome_at(self.player.pos[1]).id;
        if biome == self.biome {
            return;
        }
        self.biome = biome;
        let first_visit = self.score.visit_biome(biome, self.params.biome_bonus);
        if first_visit {
            info!(biome = biome.as_str(), "new biome discovered");
        }
        self.emit(GameEvent::BiomeEntered { biome, first_visit });
    }

    fn cleanup_enemies(&mut self) {
        let (width, height, margin) = (
            self.params.world_width,
            self.params.world_height,
            self.params.cleanup_margin,
        );
        self.enemies
            .retain(|enemy| !geometric_utils::is_out_of_bounds(&enemy.pos, width, height, margin));
    }

    fn spawn_random(&mut self) {
        if let Some(enemy) = self
            .spawner
            .spawn(&self.params, self.enemies.len(), &mut self.rng)
        {
            self.enemies.push(enemy);
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::HungerDecay => {
                let stats = &mut self.player.stats;
                stats.drain_hunger(self.params.hunger_decay / stats.hunger_efficiency);
                if stats.hunger <= 0.0 {
                    self.damage_player(self.params.starvation_damage);
                }
            }
            TimerKind::Spawn => self.spawn_random(),
            TimerKind::Survival => {
                self.survival_seconds += 1;
                self.score.add_score(1, ScoreCategory::Survival);
            }
            TimerKind::Regeneration => {
                let regen = self.player.stats.health_regen;
                if regen > 0.0 {
                    self.player
                        .stats
                        .heal(regen * self.params.regen_interval_ms / 1000.0);
                }
            }
            TimerKind::StormPulse => {
                if let Some(storm) = self.player.stats.storm {
                    let killed = CombatResolver::area_pulse(
                        &self.player.pos,
                        &mut self.enemies,
                        storm.radius,
                        storm.damage,
                    );
                    self.collect_kills(&killed);
                }
            }
        }
    }

    fn end_game(&mut self) {
        let stopped = self.scheduler.shutdown();
        let snapshot = GameOverSnapshot {
            dna: self.dna,
            evolutions: self.evolution.applied().to_vec(),
            score: self.score.breakdown(),
            survival_seconds: self.survival_seconds,
        };
        info!(
            score = snapshot.score.total,
            survival_seconds = snapshot.survival_seconds,
            evolutions = snapshot.evolutions.len(),
            timers_stopped = stopped,
            "game over"
        );
        self.emit(GameEvent::GameOver(snapshot.clone()));
        self.game_over = Some(snapshot);
    }
}
