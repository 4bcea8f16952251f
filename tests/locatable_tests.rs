#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use abyss::simulation::catalog::EnemyKind;
use abyss::simulation::enemy::Enemy;
use abyss::simulation::locatable::Locatable;
use abyss::simulation::player::Player;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_player_locatable() {
    let mut player = Player::new(10.0, 20.0);

    // Test pos accessor
    assert_eq!(player.pos()[0], 10.0);
    assert_eq!(player.pos()[1], 20.0);

    // At rest, update does not move
    player.update(1.0);
    assert_eq!(player.pos()[0], 10.0);

    // Velocity is integrated over dt
    player.velocity = Array1::from_vec(vec![100.0, -50.0]);
    player.update(0.5);
    assert_eq!(player.pos()[0], 60.0);
    assert_eq!(player.pos()[1], -5.0);

    // Test pos_mut accessor
    player.pos_mut()[0] = 15.0;
    assert_eq!(player.pos()[0], 15.0);
}

#[test]
fn test_enemy_locatable() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut enemy = Enemy::new(3, EnemyKind::Shark, Array1::from_vec(vec![0.0, 0.0]), &mut rng);

    assert_eq!(enemy.velocity()[0], 0.0);
    enemy.velocity = Array1::from_vec(vec![0.0, 110.0]);
    enemy.update(2.0);
    assert_eq!(enemy.pos()[1], 220.0);
}

#[test]
fn test_distance_between_entities() {
    let mut rng = StdRng::seed_from_u64(0);
    let player = Player::new(0.0, 0.0);
    let enemy = Enemy::new(0, EnemyKind::Common, Array1::from_vec(vec![30.0, 40.0]), &mut rng);

    assert!((player.distance_to(&enemy) - 50.0).abs() < 1e-4);
    assert!((enemy.distance_to(&player) - 50.0).abs() < 1e-4);
}
