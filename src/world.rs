//! Gameplay context: every piece of state the PLAY screen mutates, passed
//! explicitly instead of living in a global.

use rand::rngs::StdRng;

use crate::behavior::{spawn_planet, spawn_power_up};
use crate::collision::{self, Outcome};
use crate::config::{GameConfig, PauseCredit, LIFE_DROP_BELOW};
use crate::entities::PowerUpKind;
use crate::highscore::HighScore;
use crate::input::InputSnapshot;
use crate::player::Player;
use crate::registry::Registry;
use crate::timers::PauseRecord;
use crate::waves::WaveSpawner;

const INITIAL_PLANETS: usize = 1;

#[derive(Debug)]
pub struct World {
    pub registry: Registry,
    pub player: Player,
    pub waves: WaveSpawner,
    pub pause: PauseRecord,
    pub game_over: bool,
    pub rng: StdRng,
}

impl World {
    pub fn new(player: Player, rng: StdRng) -> Self {
        let mut world = Self {
            registry: Registry::default(),
            player,
            waves: WaveSpawner::default(),
            pause: PauseRecord::default(),
            game_over: false,
            rng,
        };
        world.seed_planets();
        world
    }

    fn seed_planets(&mut self) {
        for _ in 0..INITIAL_PLANETS {
            let planet = spawn_planet(&mut self.rng, 0);
            self.registry.planets.add(planet);
        }
    }

    /// Swaps in a freshly built ship, e.g. after an armoury selection.
    pub fn replace_player(&mut self, player: Player) {
        self.player = player;
    }

    /// Clears every group and rebuilds the current ship from scratch. The
    /// wave rotation starts over; the difficulty reached so far is kept.
    pub fn reset(&mut self, now_ms: u64) {
        self.game_over = false;
        self.waves.reset();
        self.registry.clear();
        self.pause.abandon();
        let p = &self.player;
        self.player = Player::new(&p.ship_id, p.ship_index, &p.profile, now_ms);
        self.seed_planets();
        tracing::debug!(ship = %self.player.ship_id, "gameplay reset");
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    /// One PLAY frame: every group updates in order and collisions resolve.
    pub fn step(
        &mut self,
        input: &InputSnapshot,
        now_ms: u64,
        config: &GameConfig,
        high_score: &mut HighScore,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        let reg = &mut self.registry;

        for planet in reg.planets.iter_mut() {
            planet.advance(&mut self.rng);
        }

        outcome.merge(collision::resolve_body_contact(reg, &mut self.player));
        outcome.merge(collision::resolve_escapes(reg, &mut self.player));
        let firing_allowed = !(self.game_over || outcome.game_over);
        let mut volleys = Vec::new();
        for enemy in reg.enemies.iter_mut() {
            if enemy.ready_to_fire(now_ms, &mut self.pause) && firing_allowed {
                volleys.push(enemy.fire(now_ms));
            }
            enemy.advance();
        }
        reg.enemy_bullets.extend(volleys);

        reg.player_bullets.update(|b| b.advance());
        reg.enemy_bullets.update(|b| b.advance());
        outcome.merge(collision::resolve_shots(reg, &mut self.player));

        if self.player.alive && !self.game_over && !outcome.game_over {
            self.player.steer(input, config.wrapping);
            let shots = self.player.try_fire(input, now_ms);
            reg.player_bullets.extend(shots);
        }

        collision::collect_power_ups(reg, &mut self.player);
        reg.power_ups.update(|p| {
            p.pulse();
            if p.below_field() {
                return false;
            }
            p.advance();
            true
        });

        reg.effects.update(|e| e.advance());

        if outcome.enemies_destroyed > 0 {
            high_score.record(self.player.score);
        }
        if outcome.game_over && !self.game_over {
            self.game_over = true;
            tracing::info!(score = self.player.score, "game over");
        }
        if self.game_over {
            self.player.alive = false;
        }
        outcome
    }

    // ── Timed events ─────────────────────────────────────────────────────────

    pub fn on_wave_tick(&mut self, now_ms: u64) {
        if self.game_over {
            return;
        }
        self.waves.tick(&mut self.registry.enemies, &mut self.rng, now_ms);
    }

    pub fn on_power_up_tick(&mut self) {
        if self.game_over || self.player.lives() >= LIFE_DROP_BELOW {
            return;
        }
        let power_up = spawn_power_up(&mut self.rng, PowerUpKind::Life);
        self.registry.power_ups.add(power_up);
    }

    // ── Pause ────────────────────────────────────────────────────────────────

    pub fn begin_pause(&mut self, now_ms: u64) {
        self.pause.begin(now_ms);
    }

    /// Ends the pause and credits its length back to the enemy fire timers
    /// according to `policy`.
    pub fn resume(&mut self, now_ms: u64, policy: PauseCredit) {
        let elapsed = self.pause.resume(now_ms);
        tracing::debug!(elapsed, ?policy, "resumed");
        if policy == PauseCredit::PerEntity {
            let credit = self.pause.take_credit();
            for enemy in self.registry.enemies.iter_mut() {
                enemy.next_shot_ms += credit;
            }
        }
    }
}
