//! Per-category spawn and update rules for everything except the player.
//!
//! All randomness comes through the injected `Rng` so callers control
//! determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::assets::{
    Visual, DIAGONAL_ALIEN_FRAMES, EXPLOSION_FRAMES, PLANET_IMAGES, STANDARD_ALIEN_FRAMES,
};
use crate::config::{DESPAWN_MARGIN, FIELD_HEIGHT, FIELD_WIDTH, WAVES_PER_SPEEDUP};
use crate::entities::{
    Bullet, BulletOwner, Drift, Enemy, EnemyKind, Explosion, Planet, PowerUp, PowerUpKind, Rect,
};
use crate::timers::PauseRecord;

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Speed bonus applied to enemies spawned after `waves_completed` waves.
pub fn speed_bonus(waves_completed: u32) -> i32 {
    (waves_completed / WAVES_PER_SPEEDUP) as i32
}

const STANDARD_SPAWN_Y: i32 = -500;
const ENEMY_BULLET_SPEED: i32 = 6;
const DIAGONAL_SPEED: i32 = 2;
const DIAGONAL_DRIFT: i32 = 5;
const DIAGONAL_SHOOT_MS: u64 = 1200;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// A standard enemy above the field at a random column.
pub fn spawn_standard(rng: &mut impl Rng, now_ms: u64, waves_completed: u32) -> Enemy {
    let bonus = speed_bonus(waves_completed);
    let frame = rng.gen_range(0..STANDARD_ALIEN_FRAMES);
    let (w, h) = Visual::StandardAlien(frame).size();
    let speed = rng.gen_range(2..=4);
    let cx = rng.gen_range(30..=370);
    let interval = rng.gen_range(850..=1100);
    Enemy {
        kind: EnemyKind::Standard,
        rect: Rect::centered(cx, STANDARD_SPAWN_Y, w, h),
        speed: speed + bonus,
        vx: 0,
        bullet_speed: ENEMY_BULLET_SPEED + bonus,
        shoot_interval_ms: interval,
        next_shot_ms: now_ms + interval,
        frame,
    }
}

/// A diagonal enemy centred on `(cx, cy)`, initially drifting left.
pub fn spawn_diagonal(
    cx: i32,
    cy: i32,
    rng: &mut impl Rng,
    now_ms: u64,
    waves_completed: u32,
) -> Enemy {
    let bonus = speed_bonus(waves_completed);
    let frame = rng.gen_range(0..DIAGONAL_ALIEN_FRAMES);
    let (w, h) = Visual::DiagonalAlien(frame).size();
    Enemy {
        kind: EnemyKind::Diagonal,
        rect: Rect::centered(cx, cy, w, h),
        speed: DIAGONAL_SPEED + bonus,
        vx: -DIAGONAL_DRIFT,
        bullet_speed: ENEMY_BULLET_SPEED + bonus,
        shoot_interval_ms: DIAGONAL_SHOOT_MS,
        next_shot_ms: now_ms + DIAGONAL_SHOOT_MS,
        frame,
    }
}

impl Enemy {
    /// Moves one frame. Diagonal enemies bounce off the side walls and are
    /// clamped to the wall they hit.
    pub fn advance(&mut self) {
        self.rect.y += self.speed;
        if self.kind != EnemyKind::Diagonal {
            return;
        }
        self.rect.x += self.vx;
        if self.rect.x < 0 {
            self.rect.x = 0;
            self.vx = self.vx.abs();
        } else if self.rect.right() > FIELD_WIDTH {
            self.rect.x = FIELD_WIDTH - self.rect.w;
            self.vx = -self.vx.abs();
        }
    }

    pub fn below_field(&self) -> bool {
        self.rect.y >= FIELD_HEIGHT + DESPAWN_MARGIN
    }

    /// Checks the fire timer, first absorbing any outstanding pause credit.
    pub fn ready_to_fire(&mut self, now_ms: u64, pause: &mut PauseRecord) -> bool {
        let credit = pause.take_credit();
        if credit > 0 {
            self.next_shot_ms += credit;
            tracing::trace!(credit, next_shot_ms = self.next_shot_ms, "pause credit applied");
        }
        now_ms >= self.next_shot_ms
    }

    /// Emits a bullet from the bottom centre and schedules the next shot.
    pub fn fire(&mut self, now_ms: u64) -> Bullet {
        self.next_shot_ms = now_ms + self.shoot_interval_ms;
        let (w, h) = Visual::EnemyBullet.size();
        let (cx, _) = self.rect.center();
        Bullet {
            rect: Rect::new(cx - w / 2, self.rect.bottom(), w, h),
            speed: self.bullet_speed,
            owner: BulletOwner::Enemy,
            drift: Drift::None,
        }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

impl Bullet {
    /// Moves one frame and reports whether the bullet is still in play.
    /// Player shots leave through the top, enemy shots through the bottom.
    pub fn advance(&mut self) -> bool {
        match self.owner {
            BulletOwner::Player => {
                self.rect.y -= self.speed;
                self.rect.x += self.drift.dx();
                self.rect.y >= 0
            }
            BulletOwner::Enemy => {
                self.rect.y += self.speed;
                self.rect.x += self.drift.dx();
                self.rect.y <= FIELD_HEIGHT
            }
            BulletOwner::Indicator => true,
        }
    }
}

// ── Planets ───────────────────────────────────────────────────────────────────

/// A planet just above the field with fresh random angle, scale and column.
pub fn spawn_planet(rng: &mut impl Rng, image: usize) -> Planet {
    let angle = rng.gen_range(0..=360);
    let scale = rng.gen_range(1.15_f32..1.8);
    let (w, h) = Visual::Planet { image, angle, scale }.size();
    let x = rng.gen_range(-50..=(FIELD_WIDTH - w).max(-50));
    Planet {
        rect: Rect::new(x, -h, w, h),
        angle,
        scale,
        speed: 1,
        image,
    }
}

impl Planet {
    /// Falls one frame; once fully below the field it comes back from the top
    /// as the next image in the set.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        self.rect.y += self.speed;
        if self.rect.y > FIELD_HEIGHT + self.rect.h {
            *self = spawn_planet(rng, (self.image + 1) % PLANET_IMAGES);
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

const POWER_UP_SPEED: i32 = 7;
const PULSE_STEP: u8 = 10;
const PULSE_FLOOR: u8 = 85;

pub fn spawn_power_up(rng: &mut impl Rng, kind: PowerUpKind) -> PowerUp {
    let (w, h) = Visual::LifePowerUp { alpha: u8::MAX }.size();
    let cx = rng.gen_range(0..=FIELD_WIDTH);
    PowerUp {
        kind,
        rect: Rect::centered(cx, -50, w, h),
        speed: POWER_UP_SPEED,
        alpha: u8::MAX,
        fading: true,
    }
}

impl PowerUp {
    /// Steps the opacity between `PULSE_FLOOR` and full.
    pub fn pulse(&mut self) {
        if self.fading {
            self.alpha = self.alpha.saturating_sub(PULSE_STEP);
            if self.alpha <= PULSE_FLOOR {
                self.fading = false;
            }
        } else {
            self.alpha = self.alpha.saturating_add(PULSE_STEP);
            if self.alpha == u8::MAX {
                self.fading = true;
            }
        }
    }

    pub fn advance(&mut self) {
        self.rect.y += self.speed;
    }

    pub fn below_field(&self) -> bool {
        self.rect.y >= FIELD_HEIGHT + DESPAWN_MARGIN
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// Ticks each explosion frame stays on screen.
pub const EXPLOSION_FRAME_TICKS: u32 = 5;

impl Explosion {
    pub fn at(center: (i32, i32)) -> Self {
        let (w, h) = Visual::Explosion(0).size();
        Self {
            rect: Rect::centered(center.0, center.1, w, h),
            frame: 0,
            timer: 0,
            finished: false,
        }
    }

    /// Advances the animation clock; returns `false` once the last frame is done.
    pub fn advance(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= EXPLOSION_FRAME_TICKS {
            self.timer = 0;
            self.frame += 1;
            if self.frame >= EXPLOSION_FRAMES {
                self.finished = true;
            }
        }
        !self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn difficulty_scales_every_four_waves() {
        let mut rng = StdRng::seed_from_u64(7);
        let early = spawn_diagonal(100, 0, &mut rng, 0, 3);
        let later = spawn_diagonal(100, 0, &mut rng, 0, 8);
        assert_eq!(early.speed, 2);
        assert_eq!(later.speed, 4);
        assert_eq!(later.bullet_speed, 8);
    }

    #[test]
    fn standard_spawns_above_the_field() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let e = spawn_standard(&mut rng, 1000, 0);
            let (cx, cy) = e.rect.center();
            assert!((30..=370).contains(&cx));
            assert_eq!(cy, -500);
            assert!((2..=4).contains(&e.speed));
            assert!((1850..=2100).contains(&e.next_shot_ms));
        }
    }

    #[test]
    fn pulse_oscillates_between_floor_and_full() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = spawn_power_up(&mut rng, PowerUpKind::Life);
        let mut seen_floor = false;
        for _ in 0..40 {
            p.pulse();
            assert!(p.alpha >= PULSE_FLOOR);
            seen_floor |= p.alpha == PULSE_FLOOR;
        }
        assert!(seen_floor);
    }

    #[test]
    fn explosion_runs_all_frames_then_finishes() {
        let mut e = Explosion::at((50, 50));
        let ticks = (0..).take_while(|_| e.advance()).count() + 1;
        assert_eq!(ticks as u32, EXPLOSION_FRAMES as u32 * EXPLOSION_FRAME_TICKS);
    }

    #[test]
    fn planet_cycles_image_when_it_leaves() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut p = spawn_planet(&mut rng, 3);
        p.rect.y = FIELD_HEIGHT + p.rect.h;
        p.advance(&mut rng);
        assert_eq!(p.image, 0);
        assert_eq!(p.rect.y, -p.rect.h);
    }

    #[test]
    fn enemy_bullet_leaves_through_the_bottom() {
        let mut b = Bullet {
            rect: Rect::new(10, FIELD_HEIGHT - 3, 8, 12),
            speed: 6,
            owner: BulletOwner::Enemy,
            drift: Drift::None,
        };
        assert!(!b.advance());
    }
}
