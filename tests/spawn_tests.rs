#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use abyss::simulation::catalog::{BIOMES, BiomeId, ENEMY_TYPES, EnemyKind};
use abyss::simulation::params::Params;
use abyss::simulation::spawn::{SpawnController, biome_at, select_weighted};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_biome_bands_partition_the_world() {
    for pair in BIOMES.windows(2) {
        assert_eq!(pair[0].y_end, pair[1].y_start);
    }
    assert_eq!(BIOMES[0].y_start, 0.0);
    assert_eq!(BIOMES[BIOMES.len() - 1].y_end, 2800.0);

    for band in &BIOMES {
        assert_eq!(biome_at(band.y_start).id, band.id);
        assert_eq!(biome_at((band.y_start + band.y_end) / 2.0).id, band.id);
    }
}

#[test]
fn test_depth_beyond_the_world_is_abyss() {
    assert_eq!(biome_at(2800.0).id, BiomeId::Abyss);
    assert_eq!(biome_at(1.0e6).id, BiomeId::Abyss);
}

#[test]
fn test_reef_distribution_follows_weights() {
    let reef = BiomeId::Reef.band();
    assert_eq!(reef.spawn_multiplier, 1.0);

    let candidates: Vec<_> = ENEMY_TYPES.iter().filter(|t| t.allowed_in(BiomeId::Reef)).collect();
    let total: f32 = candidates.iter().map(|t| t.spawn_weight).sum();

    let mut rng = StdRng::seed_from_u64(2024);
    let samples = 20_000;
    let mut counts: HashMap<EnemyKind, usize> = HashMap::new();
    for _ in 0..samples {
        *counts.entry(select_weighted(reef, &mut rng)).or_default() += 1;
    }

    for candidate in candidates {
        let expected = candidate.spawn_weight / total;
        let observed = counts.get(&candidate.kind).copied().unwrap_or(0) as f32 / samples as f32;
        assert!(
            (observed - expected).abs() < 0.02,
            "{:?}: expected {expected}, observed {observed}",
            candidate.kind
        );
    }
}

#[test]
fn test_only_allowed_kinds_spawn_per_band() {
    let mut rng = StdRng::seed_from_u64(7);
    for band in &BIOMES {
        for _ in 0..500 {
            let kind = select_weighted(band, &mut rng);
            assert!(
                kind == EnemyKind::Common || kind.spec().allowed_in(band.id),
                "{kind:?} in {:?}",
                band.id
            );
        }
    }
}

#[test]
fn test_spawn_positions() {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(99);
    let mut spawner = SpawnController::new();

    for _ in 0..500 {
        let enemy = spawner.spawn(&params, 0, &mut rng).unwrap();
        let (x, y) = (enemy.pos[0], enemy.pos[1]);
        assert!(x == 50.0 || x == params.world_width - 50.0);

        let band = biome_at(y);
        assert!(y >= band.y_start + 30.0 && y <= band.y_end - 30.0);
        assert_eq!(enemy.health, enemy.spec().health);
        assert_eq!(enemy.behavior, enemy.spec().behavior);
    }
}

#[test]
fn test_spawn_cap() {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut spawner = SpawnController::new();

    assert!(spawner.spawn(&params, 30, &mut rng).is_none());
    assert!(spawner.spawn(&params, 31, &mut rng).is_none());
    assert!(spawner.spawn(&params, 29, &mut rng).is_some());
}

#[test]
fn test_tolerant_tag_parsing() {
    assert_eq!(EnemyKind::from_tag("SHARK"), EnemyKind::Shark);
    assert_eq!(EnemyKind::from_tag("kraken"), EnemyKind::Common);
    assert_eq!(BiomeId::from_tag("reef"), BiomeId::Reef);
    assert_eq!(BiomeId::from_tag("trench"), BiomeId::Abyss);
}
