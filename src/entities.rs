//! All game entity types: pure data, no logic beyond geometry helpers.
//!
//! Coordinates are logical pixels of the 400 × 600 play field; `y` grows
//! downward and the origin is the top-left corner.

use serde::Deserialize;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned hitbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose centre sits on `(cx, cy)`.
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

// ── Ship data ─────────────────────────────────────────────────────────────────

/// One row of the external ship table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ShipProfile {
    pub speed: i32,
    pub ammo: u32,
    pub lives: u32,
    #[serde(rename = "type")]
    pub kind: String,
    /// Cooldown between shots in hundredths of a second.
    #[serde(rename = "fire rate")]
    pub fire_rate: u64,
    #[serde(rename = "bullet speed")]
    pub bullet_speed: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
    /// Zero-speed ammo counter shown in the HUD. Never moves or collides.
    Indicator,
}

/// Constant sideways motion of an angled shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Drift {
    #[default]
    None,
    /// North-west: two units left per frame.
    Left,
    /// North-east: two units right per frame.
    Right,
}

impl Drift {
    pub const fn dx(self) -> i32 {
        match self {
            Drift::None => 0,
            Drift::Left => -2,
            Drift::Right => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: i32,
    pub owner: BulletOwner,
    pub drift: Drift,
}

/// Life counter shown in the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heart {
    pub x: i32,
    pub y: i32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Falls straight down.
    Standard,
    /// Falls while bouncing between the side walls.
    Diagonal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    /// Downward speed per frame.
    pub speed: i32,
    /// Signed horizontal speed per frame (zero for standard enemies).
    pub vx: i32,
    pub bullet_speed: i32,
    pub shoot_interval_ms: u64,
    pub next_shot_ms: u64,
    /// Sprite frame picked at spawn.
    pub frame: usize,
}

// ── Decoration & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub rect: Rect,
    pub angle: i32,
    pub scale: f32,
    pub speed: i32,
    /// Index into the planet image set.
    pub image: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores one life, bounded by the ship's maximum.
    Life,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub speed: i32,
    pub alpha: u8,
    pub fading: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub rect: Rect,
    pub frame: usize,
    pub timer: u32,
    /// Set once the last frame has been shown.
    pub finished: bool,
}
