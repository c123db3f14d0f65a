use cosmic_conflict::behavior::{spawn_diagonal, spawn_power_up, spawn_standard};
use cosmic_conflict::collision::{self, Collidable};
use cosmic_conflict::config::{FIELD_HEIGHT, FIELD_WIDTH};
use cosmic_conflict::entities::*;
use cosmic_conflict::player::Player;
use cosmic_conflict::registry::Registry;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn player() -> Player {
    let profile = ShipProfile {
        speed: 50,
        ammo: 10,
        lives: 3,
        kind: "Interceptor".into(),
        fire_rate: 30,
        bullet_speed: 10,
    };
    Player::new("SHIP1", 0, &profile, 0)
}

fn enemy_at(x: i32, y: i32) -> Enemy {
    let mut enemy = spawn_standard(&mut seeded_rng(), 0, 0);
    enemy.rect.x = x;
    enemy.rect.y = y;
    enemy
}

fn bullet_at(owner: BulletOwner, x: i32, y: i32) -> Bullet {
    Bullet {
        rect: Rect::new(x, y, 6, 12),
        speed: 8,
        owner,
        drift: Drift::None,
    }
}

// ── Shots ─────────────────────────────────────────────────────────────────────

#[test]
fn simultaneous_hits_all_count() {
    let mut reg = Registry::default();
    let mut p = player();
    reg.enemies.add(enemy_at(20, 100));
    reg.enemies.add(enemy_at(200, 100));
    reg.enemies.add(enemy_at(320, 100));
    reg.player_bullets.add(bullet_at(BulletOwner::Player, 30, 110));
    reg.player_bullets.add(bullet_at(BulletOwner::Player, 210, 110));

    let outcome = collision::resolve_shots(&mut reg, &mut p);
    assert_eq!(outcome.enemies_destroyed, 2);
    assert_eq!(p.score, 2);
    assert_eq!(p.ammo(), 14);
    assert_eq!(reg.enemies.len(), 1);
    assert!(reg.player_bullets.is_empty());
    assert_eq!(reg.effects.len(), 2);
}

#[test]
fn one_shot_through_overlapping_enemies_downs_both() {
    let mut reg = Registry::default();
    let mut p = player();
    reg.enemies.add(enemy_at(100, 100));
    reg.enemies.add(enemy_at(104, 104));
    reg.player_bullets.add(bullet_at(BulletOwner::Player, 110, 110));

    let outcome = collision::resolve_shots(&mut reg, &mut p);
    assert_eq!(outcome.enemies_destroyed, 2);
    assert!(reg.enemies.is_empty());
}

#[test]
fn touching_edges_do_not_collide() {
    let enemy = enemy_at(100, 100);
    let shot = bullet_at(BulletOwner::Player, enemy.rect.right(), 110);
    assert!(!shot.collides_with(&enemy));
}

#[test]
fn enemy_shots_cost_a_life_each() {
    let mut reg = Registry::default();
    let mut p = player();
    let (cx, cy) = p.rect.center();
    reg.enemy_bullets.add(bullet_at(BulletOwner::Enemy, cx, cy));
    reg.enemy_bullets.add(bullet_at(BulletOwner::Enemy, cx - 10, cy));
    reg.enemy_bullets.add(bullet_at(BulletOwner::Enemy, 10, 10));

    let outcome = collision::resolve_shots(&mut reg, &mut p);
    assert_eq!(outcome.lives_lost, 2);
    assert!(!outcome.game_over);
    assert_eq!(p.lives(), 1);
    assert_eq!(reg.enemy_bullets.len(), 1);
}

#[test]
fn kill_and_hit_in_the_same_pass_both_apply() {
    let mut reg = Registry::default();
    let mut p = player();
    let (cx, cy) = p.rect.center();
    reg.enemies.add(enemy_at(20, 100));
    reg.player_bullets.add(bullet_at(BulletOwner::Player, 30, 110));
    reg.enemy_bullets.add(bullet_at(BulletOwner::Enemy, cx, cy));

    let outcome = collision::resolve_shots(&mut reg, &mut p);
    assert_eq!(outcome.enemies_destroyed, 1);
    assert_eq!(outcome.lives_lost, 1);
    assert!(!outcome.game_over);
    assert_eq!(p.score, 1);
    assert_eq!(p.ammo(), 12);
    assert_eq!(p.lives(), 2);
    assert!(reg.enemies.is_empty());
    assert!(reg.player_bullets.is_empty());
    assert!(reg.enemy_bullets.is_empty());
    assert_eq!(reg.effects.len(), 1);
}

#[test]
fn last_life_lost_to_a_shot_ends_the_game() {
    let mut reg = Registry::default();
    let mut p = player();
    p.lose_life();
    p.lose_life();
    let (cx, cy) = p.rect.center();
    reg.enemy_bullets.add(bullet_at(BulletOwner::Enemy, cx, cy));

    let outcome = collision::resolve_shots(&mut reg, &mut p);
    assert!(outcome.game_over);
    assert_eq!(p.lives(), 0);
}

// ── Body contact ──────────────────────────────────────────────────────────────

#[test]
fn ramming_an_enemy_is_instant_game_over() {
    let mut reg = Registry::default();
    let mut p = player();
    reg.enemies.add(enemy_at(p.rect.x + 5, p.rect.y + 5));
    reg.enemies.add(enemy_at(10, 10));

    let outcome = collision::resolve_body_contact(&mut reg, &mut p);
    assert!(outcome.game_over);
    assert!(!p.alive);
    assert_eq!(p.lives(), 3);
    assert_eq!(reg.enemies.len(), 1);
    assert_eq!(reg.effects.len(), 1);
}

#[test]
fn no_contact_changes_nothing() {
    let mut reg = Registry::default();
    let mut p = player();
    reg.enemies.add(enemy_at(10, 10));
    let outcome = collision::resolve_body_contact(&mut reg, &mut p);
    assert_eq!(outcome, collision::Outcome::default());
    assert!(p.alive);
}

// ── Escapes ───────────────────────────────────────────────────────────────────

#[test]
fn escaped_enemies_vanish_and_cost_lives() {
    let mut reg = Registry::default();
    let mut p = player();
    reg.enemies.add(enemy_at(100, FIELD_HEIGHT + 10));
    reg.enemies.add(enemy_at(100, FIELD_HEIGHT + 9));

    let outcome = collision::resolve_escapes(&mut reg, &mut p);
    assert_eq!(outcome.lives_lost, 1);
    assert_eq!(p.lives(), 2);
    assert_eq!(reg.enemies.len(), 1);
    assert!(reg.effects.is_empty());
}

#[test]
fn escapes_after_the_ship_is_gone_cost_nothing() {
    let mut reg = Registry::default();
    let mut p = player();
    p.alive = false;
    reg.enemies.add(enemy_at(100, FIELD_HEIGHT + 10));

    let outcome = collision::resolve_escapes(&mut reg, &mut p);
    assert_eq!(outcome, collision::Outcome::default());
    assert_eq!(p.lives(), 3);
    assert!(reg.enemies.is_empty());
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn diagonal_enemy_bounces_off_walls() {
    let mut rng = seeded_rng();
    let mut enemy = spawn_diagonal(30, 100, &mut rng, 0, 0);
    enemy.rect.x = 2;
    enemy.advance();
    assert_eq!(enemy.rect.x, 0);
    assert!(enemy.vx > 0);

    enemy.rect.x = FIELD_WIDTH - enemy.rect.w - 2;
    enemy.advance();
    assert_eq!(enemy.rect.right(), FIELD_WIDTH);
    assert!(enemy.vx < 0);
}

#[test]
fn bullets_leave_through_their_own_edge() {
    let mut up = bullet_at(BulletOwner::Player, 100, 5);
    assert!(!up.advance());
    let mut down = bullet_at(BulletOwner::Enemy, 100, FIELD_HEIGHT - 5);
    assert!(!down.advance());
    let mut fresh = bullet_at(BulletOwner::Enemy, 100, 0);
    assert!(fresh.advance());
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn touching_a_life_power_up_restores_a_life() {
    let mut reg = Registry::default();
    let mut p = player();
    p.lose_life();
    let mut power_up = spawn_power_up(&mut seeded_rng(), PowerUpKind::Life);
    power_up.rect.x = p.rect.x;
    power_up.rect.y = p.rect.y;
    reg.power_ups.add(power_up);

    assert_eq!(collision::collect_power_ups(&mut reg, &mut p), 1);
    assert_eq!(p.lives(), 3);
    assert!(reg.power_ups.is_empty());
}
