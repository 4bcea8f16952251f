//! Events emitted by a session for the host to consume.
//!
//! The session pushes events while it updates; the host drains them once per
//! frame to drive rendering, audio or HUD feeds.

use serde::{Deserialize, Serialize};

use super::catalog::{BiomeId, EnemyKind, EvolutionId, EvolutionVisual};
use super::dna::DnaType;
use super::event_log::EventCategory;
use super::session::GameOverSnapshot;

/// Something noteworthy that happened during an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy died and its reward was collected.
    EnemyKilled {
        /// Id of the dead enemy.
        id: u64,
        /// Its kind.
        kind: EnemyKind,
        /// DNA type collected (random drops already resolved).
        dna_type: DnaType,
        /// DNA amount collected.
        dna_amount: u32,
        /// Hunger restored.
        hunger_restore: f32,
    },
    /// An evolution was applied.
    EvolutionApplied {
        /// Applied evolution.
        id: EvolutionId,
        /// Renderer hints for the new look.
        visual: EvolutionVisual,
    },
    /// The player avoided a hit.
    PlayerDodged,
    /// The player lost health.
    PlayerDamaged {
        /// Damage taken.
        amount: f32,
    },
    /// The player crossed into another biome.
    BiomeEntered {
        /// Entered biome.
        biome: BiomeId,
        /// Whether this was the first visit.
        first_visit: bool,
    },
    /// The player died; the session is over.
    GameOver(GameOverSnapshot),
}

impl GameEvent {
    /// Log category of the event.
    pub fn category(&self) -> EventCategory {
        match self {
            GameEvent::EnemyKilled { .. } => EventCategory::Combat,
            GameEvent::EvolutionApplied { .. } => EventCategory::Evolution,
            GameEvent::PlayerDodged | GameEvent::PlayerDamaged { .. } => EventCategory::Damage,
            GameEvent::BiomeEntered { .. } => EventCategory::Biome,
            GameEvent::GameOver(_) => EventCategory::Death,
        }
    }

    /// Short human-readable description.
    pub fn describe(&self) -> String {
        match self {
            GameEvent::EnemyKilled {
                kind,
                dna_type,
                dna_amount,
                ..
            } => format!(
                "Ate a {} (+{} {} DNA)",
                kind.spec().name,
                dna_amount,
                dna_type.as_str()
            ),
            GameEvent::EvolutionApplied { id, .. } => format!("Evolved: {}", id.def().name),
            GameEvent::PlayerDodged => "Dodged!".to_owned(),
            GameEvent::PlayerDamaged { amount } => format!("Took {amount:.0} damage"),
            GameEvent::BiomeEntered { biome, first_visit } => {
                if *first_visit {
                    format!("Discovered {}", biome.band().name)
                } else {
                    format!("Entered {}", biome.band().name)
                }
            }
            GameEvent::GameOver(snapshot) => format!("Game over, score {}", snapshot.score.total),
        }
    }
}

/// Queue of events not yet consumed by the host.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
