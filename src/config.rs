//! Tunables and the user-facing configuration flags.

// ── Play field & viewports ────────────────────────────────────────────────────

/// Width of the area the ship and enemies live in. The HUD is drawn to the
/// right of it when enabled.
pub const FIELD_WIDTH: i32 = 400;
pub const FIELD_HEIGHT: i32 = 600;

pub const MENU_WIDTH: i32 = 400;
pub const HUD_WIDTH: i32 = 700;
pub const ARMOURY_WIDTH: i32 = 800;
pub const HELP_WIDTH: i32 = 610;

/// Target frame rate of the main loop.
pub const FRAME_RATE: u64 = 60;

// ── Timers ────────────────────────────────────────────────────────────────────

pub const WAVE_TICK_MS: u64 = 1000;
pub const POWER_UP_TICK_MS: u64 = 5000;
/// Gap between spawns inside an interval wave.
pub const SPAWN_INTERVAL_MS: u64 = 1700;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_START: (i32, i32) = (200, 500);
pub const MAX_AMMO: u32 = 30;
/// Ammo restored for every enemy shot down.
pub const AMMO_PER_KILL: u32 = 2;
/// Life power-ups only drop while the player is below this many lives.
pub const LIFE_DROP_BELOW: u32 = 3;
/// Vertical gap kept under the ship when a wrap relocates it to the bottom.
pub const WRAP_BOTTOM_GAP: i32 = 15;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Completed waves needed for each +1 of enemy speed and bullet speed.
pub const WAVES_PER_SPEEDUP: u32 = 4;
/// Enemies further than this below the field are despawned.
pub const DESPAWN_MARGIN: i32 = 10;

// ── High score ────────────────────────────────────────────────────────────────

/// Scores at or above this value are never persisted.
pub const HIGH_SCORE_CEILING: u32 = 99_999;

// ── Flags ─────────────────────────────────────────────────────────────────────

/// How the pause duration is credited back to enemy fire timers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PauseCredit {
    /// One shared credit, consumed whole by the first enemy that checks its
    /// fire timer after resume.
    #[default]
    Shared,
    /// Every live enemy is shifted by the paused duration on resume.
    PerEntity,
}

/// Toggles exposed on the options screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub music: bool,
    pub sound: bool,
    pub hud: bool,
    pub wrapping: bool,
    pub pause_credit: PauseCredit,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            music: true,
            sound: true,
            hud: true,
            wrapping: false,
            pause_credit: PauseCredit::Shared,
        }
    }
}

/// Names of the options-screen toggles, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Music,
    Sound,
    Hud,
    Wrapping,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Music, Flag::Sound, Flag::Hud, Flag::Wrapping];

    pub const fn name(self) -> &'static str {
        match self {
            Flag::Music => "music",
            Flag::Sound => "sound",
            Flag::Hud => "HUD",
            Flag::Wrapping => "wrapping",
        }
    }
}

impl GameConfig {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Music => self.music,
            Flag::Sound => self.sound,
            Flag::Hud => self.hud,
            Flag::Wrapping => self.wrapping,
        }
    }

    /// Flips `flag` and returns its new value.
    pub fn toggle(&mut self, flag: Flag) -> bool {
        let slot = match flag {
            Flag::Music => &mut self.music,
            Flag::Sound => &mut self.sound,
            Flag::Hud => &mut self.hud,
            Flag::Wrapping => &mut self.wrapping,
        };
        *slot = !*slot;
        *slot
    }

    /// Label shown on the options screen, e.g. `"wrapping disabled"`.
    pub fn label(&self, flag: Flag) -> String {
        let state = if self.get(flag) { "enabled" } else { "disabled" };
        format!("{} {}", flag.name(), state)
    }
}
