//! The player's ship: movement, firing and the ammo/life bookkeeping.
//!
//! Ammo and lives are private so the HUD stacks can never drift out of step
//! with the counters they mirror. Every change goes through the gain/lose
//! methods below.

use crate::assets::Visual;
use crate::config::{
    FIELD_HEIGHT, FIELD_WIDTH, MAX_AMMO, PLAYER_START, WRAP_BOTTOM_GAP,
};
use crate::entities::{Bullet, BulletOwner, Drift, Heart, Rect, ShipProfile};
use crate::input::{InputSnapshot, Key};

// ── Firing patterns ──────────────────────────────────────────────────────────

/// Offset of one barrel relative to the ship's top-centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Muzzle {
    pub dx: i32,
    pub dy: i32,
    pub drift: Drift,
}

const fn muzzle(dx: i32, dy: i32, drift: Drift) -> Muzzle {
    Muzzle { dx, dy, drift }
}

const SINGLE: &[Muzzle] = &[muzzle(0, 0, Drift::None)];
const FORKED: &[Muzzle] = &[muzzle(-25, 0, Drift::Left), muzzle(25, 0, Drift::Right)];
const TWIN: &[Muzzle] = &[muzzle(-35, 0, Drift::None), muzzle(35, 0, Drift::None)];
const TRIDENT: &[Muzzle] = &[
    muzzle(0, 0, Drift::None),
    muzzle(-35, 25, Drift::Left),
    muzzle(35, 25, Drift::Right),
];

/// Barrels fired by one trigger pull of the given ship.
pub fn firing_pattern(ship_id: &str) -> &'static [Muzzle] {
    match ship_id {
        "SHIP3" => FORKED,
        "SHIP4" => TWIN,
        "SHIP5" => TRIDENT,
        _ => SINGLE,
    }
}

// ── HUD slots ─────────────────────────────────────────────────────────────────

const HEARTS_PER_ROW: usize = 3;
const AMMO_PER_COLUMN: usize = 6;

fn heart_slot(i: usize) -> Heart {
    Heart {
        x: 450 + (i % HEARTS_PER_ROW) as i32 * 100,
        y: 65 + (i / HEARTS_PER_ROW) as i32 * 30,
    }
}

fn ammo_indicator(i: usize) -> Bullet {
    let x = 465 + (i / AMMO_PER_COLUMN) as i32 * 40;
    let y = 470 + (i % AMMO_PER_COLUMN) as i32 * 15;
    let (w, h) = Visual::AmmoIndicator.size();
    Bullet {
        rect: Rect::centered(x, y, w, h),
        speed: 0,
        owner: BulletOwner::Indicator,
        drift: Drift::None,
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub ship_id: String,
    pub ship_index: usize,
    pub profile: ShipProfile,
    pub rect: Rect,
    /// Units moved per frame on each held axis.
    pub speed: i32,
    pub bullet_speed: i32,
    pub fire_cooldown_ms: u64,
    pub last_shot_ms: u64,
    pub score: u32,
    pub max_lives: u32,
    /// Cleared when the ship is destroyed; a dead ship neither moves nor collides.
    pub alive: bool,
    ammo: u32,
    lives: u32,
    heart_stack: Vec<Heart>,
    bullet_stack: Vec<Bullet>,
}

impl Player {
    /// Builds a fresh ship from its profile, HUD stacks included.
    pub fn new(ship_id: &str, ship_index: usize, profile: &ShipProfile, now_ms: u64) -> Self {
        let (w, h) = Visual::Ship(ship_index).size();
        let ammo = profile.ammo.min(MAX_AMMO);
        let lives = profile.lives;
        Self {
            ship_id: ship_id.to_owned(),
            ship_index,
            profile: profile.clone(),
            rect: Rect::centered(PLAYER_START.0, PLAYER_START.1, w, h),
            speed: profile.speed / 10,
            bullet_speed: profile.bullet_speed,
            fire_cooldown_ms: profile.fire_rate * 10,
            last_shot_ms: now_ms,
            score: 0,
            max_lives: lives,
            alive: true,
            ammo,
            lives,
            heart_stack: (0..lives as usize).map(heart_slot).collect(),
            bullet_stack: (0..ammo as usize).map(ammo_indicator).collect(),
        }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.heart_stack
    }

    pub fn ammo_indicators(&self) -> &[Bullet] {
        &self.bullet_stack
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    /// Applies the held movement keys. With `wrapping` the ship re-enters from
    /// the opposite side once it has fully left the field; holding up at that
    /// moment drops it near the bottom.
    pub fn steer(&mut self, input: &InputSnapshot, wrapping: bool) {
        let up = input.is_held(Key::Up);
        let bottom_row = FIELD_HEIGHT - (self.rect.h + WRAP_BOTTOM_GAP);

        if input.is_held(Key::Left) {
            self.rect.x -= self.speed;
            if wrapping {
                if self.rect.right() < 0 {
                    self.rect.x = FIELD_WIDTH;
                    if up {
                        self.rect.y = bottom_row;
                    }
                }
            } else if self.rect.x < 0 {
                self.rect.x = 0;
            }
        }

        if input.is_held(Key::Right) {
            self.rect.x += self.speed;
            if wrapping {
                if self.rect.x > FIELD_WIDTH {
                    self.rect.x = -self.rect.w;
                    if up {
                        self.rect.y = bottom_row;
                    }
                }
            } else if self.rect.right() > FIELD_WIDTH {
                self.rect.x = FIELD_WIDTH - self.rect.w;
            }
        }

        if up {
            self.rect.y -= self.speed;
        }
        if input.is_held(Key::Down) {
            self.rect.y += self.speed;
        }
        self.rect.y = self.rect.y.clamp(0, FIELD_HEIGHT - self.rect.h);
    }

    // ── Firing ───────────────────────────────────────────────────────────────

    /// Fires one volley if the trigger is held, ammo remains and the cooldown
    /// has passed. A volley costs one round however many barrels it uses.
    pub fn try_fire(&mut self, input: &InputSnapshot, now_ms: u64) -> Vec<Bullet> {
        if !input.is_held(Key::Fire) || self.ammo == 0 {
            return Vec::new();
        }
        if now_ms.saturating_sub(self.last_shot_ms) <= self.fire_cooldown_ms {
            return Vec::new();
        }
        self.last_shot_ms = now_ms;

        let (cx, _) = self.rect.center();
        let volley = firing_pattern(&self.ship_id)
            .iter()
            .map(|m| {
                let (w, h) = Visual::PlayerBullet(m.drift).size();
                Bullet {
                    rect: Rect::centered(cx + m.dx, self.rect.y + m.dy, w, h),
                    speed: self.bullet_speed,
                    owner: BulletOwner::Player,
                    drift: m.drift,
                }
            })
            .collect();
        self.lose_bullet();
        volley
    }

    // ── Stacks ───────────────────────────────────────────────────────────────

    /// Adds one round, up to `MAX_AMMO`. Returns whether anything changed.
    pub fn gain_bullet(&mut self) -> bool {
        if self.ammo >= MAX_AMMO {
            return false;
        }
        self.ammo += 1;
        self.bullet_stack.push(ammo_indicator(self.bullet_stack.len()));
        true
    }

    pub fn lose_bullet(&mut self) -> bool {
        if self.bullet_stack.pop().is_none() {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// Restores one life, up to the ship's maximum.
    pub fn gain_life(&mut self) -> bool {
        if self.lives >= self.max_lives {
            return false;
        }
        self.lives += 1;
        self.heart_stack = (0..self.lives as usize).map(heart_slot).collect();
        true
    }

    /// Removes one life. Returns `true` only for the loss that empties the
    /// stack; once at zero further calls change nothing.
    pub fn lose_life(&mut self) -> bool {
        if self.heart_stack.pop().is_none() {
            return false;
        }
        self.lives -= 1;
        self.lives == 0
    }
}
