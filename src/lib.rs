//! # Abyss - Deep-Sea Survival Simulation
//!
//! The simulation core of a single-player survival game. A player-fish hunts
//! enemies for DNA, spends DNA on permanent evolutions, and dives through five
//! depth biomes with their own enemy populations while enemies hunt it back.
//!
//! ## Features
//!
//! - Static catalogs of enemy kinds, evolutions and biome bands
//! - Player stats with hunger, starvation and evolution modifiers
//! - Bite, area, dash, poison and storm combat
//! - Seven enemy AI behaviors (flee, chase, wander, ambush, float, hunt, patrol)
//! - Biome-aware weighted spawning
//! - Score tracking by category
//! - Repeating timers with cancellable handles
//! - JSON-loadable parameters with optional seeding
//!
//! ## Core Modules
//!
//! - [`simulation::session`] - Game session and tick function
//! - [`simulation::combat`] - Combat resolution
//! - [`simulation::behavior`] - Enemy AI
//! - [`simulation::evolution`] - Evolution gating and effects
//! - [`simulation::spawn`] - Biome lookup and spawning
//! - [`simulation::events`] - Events drained by the host

/// Core simulation logic and data structures.
pub mod simulation {
    /// Enemy AI strategies and contact attacks.
    pub mod behavior;
    /// Static catalogs: enemy kinds, evolutions, biome bands.
    pub mod catalog;
    /// Combat between the player and enemies.
    pub mod combat;
    /// DNA resource types and pool.
    pub mod dna;
    /// Enemy instances.
    pub mod enemy;
    /// Bounded log of recent events.
    pub mod event_log;
    /// Events emitted to the host.
    pub mod events;
    /// Evolution gating and application.
    pub mod evolution;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Trait for locatable entities that can be updated.
    ///
    /// The [`locatable::Locatable`] trait is implemented by all entities that have
    /// a position in 2D space and can be updated over time (Player, Enemy).
    pub mod locatable;
    /// Session parameters.
    pub mod params;
    /// The player-fish.
    pub mod player;
    /// Repeating session timers.
    pub mod scheduler;
    /// Score bookkeeping.
    pub mod score;
    /// Game session with tick function and player intents.
    pub mod session;
    /// KD-tree radius queries over enemies.
    pub mod spatial;
    /// Biome lookup and enemy spawning.
    pub mod spawn;
    /// Player stat block.
    pub mod stats;
}
