use abyss::simulation::geometric_utils;
use abyss::simulation::params::Params;
use abyss::simulation::session::{GameOverSnapshot, GameSession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Frame length of the headless run.
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Default run length in seconds.
const DEFAULT_SECONDS: f32 = 120.0;
/// Dash when the nearest enemy is this close.
const DASH_DISTANCE: f32 = 150.0;

/// Runs a scripted session without rendering and prints the outcome as JSON.
///
/// Usage: `abyss [params.json] [seconds]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => Params::load_from_file(&path)?,
        None => Params {
            rng_seed: Some(0xABE5_5EED),
            ..Params::default()
        },
    };
    let seconds = match args.next() {
        Some(s) => s.parse::<f32>()?,
        None => DEFAULT_SECONDS,
    };

    let mut session = GameSession::new(params)?;
    let frames = (seconds * 1000.0 / FRAME_MS) as u64;
    info!(frames, "starting headless run");

    for frame in 0..frames {
        autopilot(&mut session)?;
        session.update(frame as f32 * FRAME_MS, FRAME_MS)?;
        for event in session.drain_events() {
            tracing::debug!(event = event.describe(), "event");
        }
        if session.is_over() {
            break;
        }
    }

    let snapshot = match session.game_over_snapshot() {
        Some(snapshot) => snapshot.clone(),
        None => {
            warn!("time limit reached, player still alive");
            GameOverSnapshot {
                dna: *session.dna(),
                evolutions: session.applied_evolutions().to_vec(),
                score: session.score_breakdown(),
                survival_seconds: session.survival_seconds(),
            }
        }
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Swims towards the nearest enemy, bites, dashes in close, evolves when possible.
fn autopilot(session: &mut GameSession) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(def) = session.request_evolution_menu()?.first() {
        session.select_evolution(def.id)?;
    }

    let player_pos = session.player().pos.clone();
    let nearest = session
        .enemies()
        .iter()
        .map(|enemy| (geometric_utils::distance(&player_pos, &enemy.pos), enemy.pos.clone()))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    match nearest {
        Some((distance, pos)) => {
            session.set_target(pos[0], pos[1])?;
            if distance < DASH_DISTANCE {
                session.dash()?;
            }
            session.attack()?;
        }
        None => session.clear_target()?,
    }
    Ok(())
}
