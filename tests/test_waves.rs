use cosmic_conflict::behavior::{spawn_standard, speed_bonus};
use cosmic_conflict::entities::{Enemy, EnemyKind};
use cosmic_conflict::registry::Group;
use cosmic_conflict::waves::{WaveKind, WaveSpawner};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Ticks once per second starting at `start_s`; returns how many ticks it
/// took for a wave to finish.
fn run_until_complete(
    spawner: &mut WaveSpawner,
    enemies: &mut Group<Enemy>,
    rng: &mut StdRng,
    start_s: u64,
) -> u64 {
    for tick in 0..100 {
        if spawner.tick(enemies, rng, (start_s + tick) * 1000) {
            return tick + 1;
        }
    }
    panic!("wave never completed");
}

// ── Interval wave ─────────────────────────────────────────────────────────────

#[test]
fn first_wave_is_a_fifteen_second_stream() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    // The first tick opens the wave, fifteen more run it out.
    let ticks = run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    assert_eq!(ticks, 16);
    assert_eq!(spawner.total_waves_completed, 1);
    assert_eq!(spawner.current_wave, 1);
    assert!(!spawner.in_wave);
}

#[test]
fn interval_wave_spawns_every_interval() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    spawner.tick(&mut enemies, &mut rng, 1_000);
    assert!(enemies.is_empty());
    spawner.tick(&mut enemies, &mut rng, 2_000);
    assert!(enemies.is_empty());
    spawner.tick(&mut enemies, &mut rng, 3_000);
    assert_eq!(enemies.len(), 1);
    assert!(enemies.iter().all(|e| e.kind == EnemyKind::Standard));
}

#[test]
fn enemies_still_above_field_leave_with_the_wave() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    // Nothing was advanced, so every spawn is still above the field.
    assert!(enemies.is_empty());
}

#[test]
fn visible_enemies_survive_the_end_of_a_wave() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    let mut survivor = spawn_standard(&mut rng, 0, 0);
    survivor.rect.y = 120;
    enemies.add(survivor);
    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    assert_eq!(enemies.len(), 1);
}

// ── Formation wave ────────────────────────────────────────────────────────────

#[test]
fn formation_spawns_two_groups_of_three() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    assert!(!spawner.tick(&mut enemies, &mut rng, 20_000));
    assert_eq!(enemies.len(), 6);
    assert!(enemies.iter().all(|e| e.kind == EnemyKind::Diagonal && e.vx < 0));

    let WaveKind::Formation { anchors, .. } = spawner.waves[1].kind else {
        panic!("second wave should be a formation");
    };
    let first = enemies.iter().next().expect("formation is populated");
    assert_eq!(first.rect.center(), anchors[0]);
}

#[test]
fn formation_ends_early_once_cleared() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    spawner.tick(&mut enemies, &mut rng, 20_000);
    assert!(!spawner.tick(&mut enemies, &mut rng, 21_000));

    enemies.clear();
    assert!(spawner.tick(&mut enemies, &mut rng, 22_000));
    assert_eq!(spawner.total_waves_completed, 2);
    assert_eq!(spawner.current_wave, 0);
}

#[test]
fn formation_times_out_after_thirty_seconds() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    let ticks = run_until_complete(&mut spawner, &mut enemies, &mut rng, 20);
    assert_eq!(ticks, 31);
    assert_eq!(enemies.len(), 6);
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[test]
fn enemies_speed_up_every_four_waves() {
    assert_eq!(speed_bonus(0), 0);
    assert_eq!(speed_bonus(3), 0);
    assert_eq!(speed_bonus(4), 1);
    assert_eq!(speed_bonus(9), 2);

    let mut rng = seeded_rng();
    let slow = spawn_standard(&mut rng, 0, 0);
    let fast = spawn_standard(&mut seeded_rng(), 0, 8);
    assert_eq!(fast.speed, slow.speed + 2);
    assert_eq!(fast.bullet_speed, slow.bullet_speed + 2);
}

#[test]
fn reset_restarts_rotation_but_keeps_difficulty() {
    let mut spawner = WaveSpawner::default();
    let mut enemies = Group::new();
    let mut rng = seeded_rng();

    run_until_complete(&mut spawner, &mut enemies, &mut rng, 1);
    spawner.reset();
    assert_eq!(spawner.current_wave, 0);
    // Difficulty earned before the restart carries over.
    assert_eq!(spawner.total_waves_completed, 1);
    assert!(!spawner.in_wave);
    assert_eq!(spawner.waves.len(), 2);
}
