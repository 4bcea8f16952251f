#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use abyss::simulation::catalog::{EVOLUTIONS, EvolutionEffects, EvolutionId};
use abyss::simulation::dna::{DnaPool, DnaType};
use abyss::simulation::evolution::{EvolutionEngine, EvolutionError, apply_effects};
use abyss::simulation::stats::Stats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn pool(speed: u32, defense: u32, attack: u32, energy: u32) -> DnaPool {
    let mut dna = DnaPool::new();
    dna.add(DnaType::Speed, speed);
    dna.add(DnaType::Defense, defense);
    dna.add(DnaType::Attack, attack);
    dna.add(DnaType::Energy, energy);
    dna
}

#[test]
fn test_available_matches_requirements() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats::default();

    engine
        .apply(&mut stats, &mut pool(50, 0, 0, 0), EvolutionId::Agile)
        .unwrap();

    for _ in 0..200 {
        let dna = pool(
            rng.random_range(0..100),
            rng.random_range(0..100),
            rng.random_range(0..100),
            rng.random_range(0..100),
        );
        let available: Vec<EvolutionId> = engine.available(&dna).iter().map(|def| def.id).collect();

        for def in &EVOLUTIONS {
            let affordable = def
                .requirements
                .iter()
                .all(|&(dna_type, amount)| dna.get(dna_type) >= amount);
            let expected = affordable && def.id != EvolutionId::Agile;
            assert_eq!(available.contains(&def.id), expected, "{}", def.id);
        }
    }
}

#[test]
fn test_apply_consumes_exact_requirements() {
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats::default();
    let mut dna = pool(40, 10, 100, 45);

    engine
        .apply(&mut stats, &mut dna, EvolutionId::Electric)
        .unwrap();

    assert_eq!(dna, pool(40, 10, 70, 15));
    assert!(stats.area_damage);
    assert_eq!(stats.area_radius, 60.0);
}

#[test]
fn test_multipliers_compound() {
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats::default();
    let mut dna = pool(200, 200, 200, 200);

    engine.apply(&mut stats, &mut dna, EvolutionId::Agile).unwrap();
    engine.apply(&mut stats, &mut dna, EvolutionId::Brutal).unwrap();

    assert!((stats.speed_multiplier - 1.5 * 0.8).abs() < 1e-6);
    assert!((stats.damage_multiplier - 1.4).abs() < 1e-6);
    assert!((stats.effective_speed() - 150.0 * 1.2).abs() < 1e-3);
}

#[test]
fn test_speed_multipliers_multiply() {
    let mut stats = Stats::default();
    let effect = |factor: f32| EvolutionEffects {
        speed_multiplier: Some(factor),
        ..EvolutionEffects::NONE
    };

    apply_effects(&mut stats, &effect(1.5));
    apply_effects(&mut stats, &effect(1.2));

    assert!((stats.speed_multiplier - 1.8).abs() < 1e-6);
    assert!((stats.effective_speed() - 150.0 * 1.8).abs() < 1e-3);
}

#[test]
fn test_dodge_stacks_and_caps() {
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats::default();
    let mut dna = pool(500, 500, 500, 500);

    engine.apply(&mut stats, &mut dna, EvolutionId::Agile).unwrap();
    engine.apply(&mut stats, &mut dna, EvolutionId::Phantom).unwrap();

    assert!((stats.dodge_chance - 0.6).abs() < 1e-6);
    assert!(stats.dodge_chance <= 1.0);
}

#[test]
fn test_health_rescale_heals_fully() {
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats {
        health: 10.0,
        ..Stats::default()
    };
    let mut dna = pool(0, 100, 50, 0);

    engine.apply(&mut stats, &mut dna, EvolutionId::Titan).unwrap();
    assert_eq!(stats.max_health, 200.0);
    assert_eq!(stats.health, 200.0);
}

#[test]
fn test_guarded_apply() {
    let mut engine = EvolutionEngine::new();
    let mut stats = Stats::default();
    let mut dna = pool(100, 0, 0, 0);

    engine.apply(&mut stats, &mut dna, EvolutionId::Agile).unwrap();
    let before = (stats.clone(), dna);

    assert_eq!(
        engine.apply(&mut stats, &mut dna, EvolutionId::Agile),
        Err(EvolutionError::AlreadyApplied(EvolutionId::Agile))
    );
    assert_eq!(
        engine.apply(&mut stats, &mut dna, EvolutionId::Brutal),
        Err(EvolutionError::RequirementsNotMet(EvolutionId::Brutal))
    );
    assert_eq!((stats, dna), before);
    assert_eq!(engine.applied(), &[EvolutionId::Agile]);
}

#[test]
fn test_strict_id_parsing() {
    assert_eq!("dash_striker".parse::<EvolutionId>().unwrap(), EvolutionId::DashStriker);

    let err = "wings".parse::<EvolutionId>().map_err(EvolutionError::from);
    assert!(matches!(err, Err(EvolutionError::Unknown(_))));
}
