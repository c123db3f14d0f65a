//! Timed wave controller driven by the one-second wave tick.

use rand::Rng;

use crate::behavior::{spawn_diagonal, spawn_standard};
use crate::config::SPAWN_INTERVAL_MS;
use crate::entities::{Enemy, EnemyKind};
use crate::registry::Group;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaveKind {
    /// One enemy every `interval_ms` of wall-clock time until the duration runs out.
    Interval { enemy: EnemyKind, interval_ms: u64 },
    /// Two diagonal lines of `per_group` enemies spawned once, starting at
    /// each anchor and stepping by `step`. Ends early once the field is clear.
    Formation {
        anchors: [(i32, i32); 2],
        per_group: usize,
        step: (i32, i32),
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveDef {
    /// Length in wave ticks (seconds).
    pub duration: u32,
    pub kind: WaveKind,
}

/// The built-in rotation: a 15 s stream of standard enemies followed by a
/// 30 s diagonal formation.
pub fn default_waves() -> Vec<WaveDef> {
    vec![
        WaveDef {
            duration: 15,
            kind: WaveKind::Interval {
                enemy: EnemyKind::Standard,
                interval_ms: SPAWN_INTERVAL_MS,
            },
        },
        WaveDef {
            duration: 30,
            kind: WaveKind::Formation {
                anchors: [(30, 50), (200, -250)],
                per_group: 3,
                step: (85, -100),
            },
        },
    ]
}

#[derive(Clone, Debug)]
pub struct WaveSpawner {
    pub waves: Vec<WaveDef>,
    pub current_wave: usize,
    /// Ticks elapsed in the current wave.
    pub wave_timer: u32,
    pub wave_duration: u32,
    pub in_wave: bool,
    pub enemies_spawned: bool,
    /// Feeds enemy speed scaling; survives wave rotation.
    pub total_waves_completed: u32,
    pub last_spawn_ms: u64,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self::new(default_waves())
    }
}

impl WaveSpawner {
    pub fn new(waves: Vec<WaveDef>) -> Self {
        Self {
            waves,
            current_wave: 0,
            wave_timer: 0,
            wave_duration: 0,
            in_wave: false,
            enemies_spawned: false,
            total_waves_completed: 0,
            last_spawn_ms: 0,
        }
    }

    /// Back to the first wave. The completed-wave count survives, so enemy
    /// speed keeps the difficulty reached before the restart.
    pub fn reset(&mut self) {
        let total = self.total_waves_completed;
        *self = Self::new(std::mem::take(&mut self.waves));
        self.total_waves_completed = total;
    }

    /// Handles one wave tick. Returns `true` when the current wave finished
    /// on this tick.
    pub fn tick(&mut self, enemies: &mut Group<Enemy>, rng: &mut impl Rng, now_ms: u64) -> bool {
        self.wave_timer += 1;

        if !self.in_wave && self.current_wave < self.waves.len() {
            self.in_wave = true;
            self.wave_timer = 0;
            self.enemies_spawned = false;
            self.last_spawn_ms = now_ms;
            tracing::info!(wave = self.current_wave + 1, "wave started");
        }
        if !self.in_wave {
            return false;
        }

        if !self.step(enemies, rng, now_ms) {
            return false;
        }

        tracing::info!(
            wave = self.current_wave + 1,
            total = self.total_waves_completed + 1,
            "wave complete"
        );
        self.in_wave = false;
        self.current_wave += 1;
        self.total_waves_completed += 1;
        if self.current_wave >= self.waves.len() {
            self.current_wave = 0;
        }
        true
    }

    fn step(&mut self, enemies: &mut Group<Enemy>, rng: &mut impl Rng, now_ms: u64) -> bool {
        let def = self.waves[self.current_wave].clone();
        if self.wave_timer == 0 {
            self.wave_duration = def.duration;
        }
        let bonus_from = self.total_waves_completed;

        match def.kind {
            WaveKind::Interval { enemy, interval_ms } => {
                if now_ms.saturating_sub(self.last_spawn_ms) >= interval_ms {
                    let spawned = match enemy {
                        EnemyKind::Standard => spawn_standard(rng, now_ms, bonus_from),
                        EnemyKind::Diagonal => {
                            let cx = rng.gen_range(30..=370);
                            spawn_diagonal(cx, -500, rng, now_ms, bonus_from)
                        }
                    };
                    enemies.add(spawned);
                    self.last_spawn_ms = now_ms;
                }
                if self.wave_timer < self.wave_duration {
                    return false;
                }
                // Stragglers that never reached the field go with the wave.
                enemies.retain(|e| e.rect.y >= 0);
                true
            }
            WaveKind::Formation { anchors, per_group, step } => {
                if !self.enemies_spawned {
                    for (x0, y0) in anchors {
                        for i in 0..per_group as i32 {
                            let cx = x0 + i * step.0;
                            let cy = y0 + i * step.1;
                            enemies.add(spawn_diagonal(cx, cy, rng, now_ms, bonus_from));
                        }
                    }
                    self.enemies_spawned = true;
                }
                enemies.is_empty() || self.wave_timer >= self.wave_duration
            }
        }
    }
}
