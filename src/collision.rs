//! Per-frame overlap tests between groups and their consequences.
//!
//! Every overlapping pair found in a pass is applied; nothing stops at the
//! first hit. The effects of distinct pairs commute, so iteration order does
//! not matter.

use crate::config::AMMO_PER_KILL;
use crate::entities::{Bullet, Enemy, Explosion, PowerUp, PowerUpKind, Rect};
use crate::player::Player;
use crate::registry::Registry;

/// Anything with a hitbox.
pub trait Collidable {
    fn hitbox(&self) -> Rect;

    fn collides_with(&self, other: &impl Collidable) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

impl Collidable for Player {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for Enemy {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for Bullet {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for PowerUp {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

/// What a collision pass did to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub enemies_destroyed: u32,
    pub lives_lost: u32,
    /// Set when this pass ended the game.
    pub game_over: bool,
}

impl Outcome {
    pub fn merge(&mut self, other: Outcome) {
        self.enemies_destroyed += other.enemies_destroyed;
        self.lives_lost += other.lives_lost;
        self.game_over |= other.game_over;
    }
}

/// Player shots against enemies, then enemy shots against the player.
///
/// Each destroyed enemy leaves an explosion, scores one point and refunds
/// `AMMO_PER_KILL` rounds. Each enemy shot that lands costs one life.
pub fn resolve_shots(reg: &mut Registry, player: &mut Player) -> Outcome {
    let mut outcome = Outcome::default();

    let mut bullet_hit = vec![false; reg.player_bullets.len()];
    let mut enemy_hit = vec![false; reg.enemies.len()];
    for (bi, bullet) in reg.player_bullets.iter().enumerate() {
        for (ei, enemy) in reg.enemies.iter().enumerate() {
            if bullet.collides_with(enemy) {
                bullet_hit[bi] = true;
                enemy_hit[ei] = true;
            }
        }
    }
    reg.player_bullets.remove_masked(&bullet_hit);
    for enemy in reg.enemies.remove_masked(&enemy_hit) {
        reg.effects.add(Explosion::at(enemy.rect.center()));
        player.score += 1;
        for _ in 0..AMMO_PER_KILL {
            player.gain_bullet();
        }
        outcome.enemies_destroyed += 1;
    }

    if player.alive {
        let landed = reg.enemy_bullets.remove_where(|b| b.collides_with(&*player));
        for _ in &landed {
            outcome.lives_lost += 1;
            outcome.game_over |= player.lose_life();
        }
    }

    outcome
}

/// Ramming an enemy destroys both ships and ends the game at once,
/// whatever lives remain.
pub fn resolve_body_contact(reg: &mut Registry, player: &mut Player) -> Outcome {
    let mut outcome = Outcome::default();
    if !player.alive {
        return outcome;
    }
    let rammed = reg.enemies.remove_where(|e| e.collides_with(&*player));
    if rammed.is_empty() {
        return outcome;
    }
    for enemy in &rammed {
        reg.effects.add(Explosion::at(enemy.rect.center()));
    }
    player.alive = false;
    outcome.game_over = true;
    outcome
}

/// Enemies that slipped past the bottom vanish quietly but cost a life each.
/// A dead ship has no lives left to lose.
pub fn resolve_escapes(reg: &mut Registry, player: &mut Player) -> Outcome {
    let mut outcome = Outcome::default();
    let escaped = reg.enemies.remove_where(Enemy::below_field);
    if !player.alive {
        return outcome;
    }
    for _ in escaped {
        outcome.lives_lost += 1;
        outcome.game_over |= player.lose_life();
    }
    outcome
}

/// Applies and removes every power-up the player is touching. Returns how
/// many were collected.
pub fn collect_power_ups(reg: &mut Registry, player: &mut Player) -> usize {
    if !player.alive {
        return 0;
    }
    let collected = reg.power_ups.remove_where(|p| p.collides_with(&*player));
    for power_up in &collected {
        match power_up.kind {
            PowerUpKind::Life => {
                player.gain_life();
            }
        }
    }
    collected.len()
}
