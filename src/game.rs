//! Top-level controller: owns the screen state and picks the update/event
//! handler pair that runs each frame.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::Assets;
use crate::config::{GameConfig, FIELD_HEIGHT, POWER_UP_TICK_MS, WAVE_TICK_MS};
use crate::highscore::{HighScore, HighScoreStore};
use crate::input::{InputSnapshot, Key};
use crate::player::Player;
use crate::state::{GameEvent, State};
use crate::timers::Periodic;
use crate::ui::{self, Action};
use crate::world::World;

/// Per-frame update of a screen.
pub type UpdateFn = fn(&mut Game, &InputSnapshot, u64);
/// Event handler of a screen.
pub type HandleFn = fn(&mut Game, GameEvent, u64);

#[derive(Clone, Copy)]
pub struct Handlers {
    pub update: UpdateFn,
    pub handle: HandleFn,
}

/// The dispatch table. Every state maps to exactly one pair.
pub fn handlers(state: State) -> Handlers {
    match state {
        State::Menu => Handlers { update: Game::menu, handle: Game::ignore_event },
        State::Play => Handlers { update: Game::play, handle: Game::play_event },
        State::Options => Handlers { update: Game::options, handle: Game::ignore_event },
        State::Armoury => Handlers { update: Game::armoury, handle: Game::ignore_event },
        State::Help => Handlers { update: Game::help, handle: Game::ignore_event },
        State::Pause => Handlers { update: Game::pause, handle: Game::pause_event },
    }
}

const BACKDROP_SCROLL: f32 = 0.5;
const BACKDROP_START: f32 = -900.0;

#[derive(Debug)]
pub struct Game {
    pub state: State,
    pub config: GameConfig,
    pub assets: Assets,
    pub world: World,
    pub high_score: HighScore,
    /// Current display surface size `(w, h)`.
    pub viewport: (i32, i32),
    pub cursor: (i32, i32),
    /// Ship whose profile the armoury is showing.
    pub hovered_ship: Option<usize>,
    pub backdrop_y: f32,
    wave_clock: Periodic,
    power_up_clock: Periodic,
}

impl Game {
    /// Starts on the menu with the first ship of the table selected.
    pub fn new(
        assets: Assets,
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        seed: u64,
        now_ms: u64,
    ) -> Self {
        let (id, profile) = assets.ships.first();
        let player = Player::new(id, 0, profile, now_ms);
        let world = World::new(player, StdRng::seed_from_u64(seed));
        let state = State::Menu;
        Self {
            viewport: (state.viewport_width(&config), FIELD_HEIGHT),
            state,
            config,
            assets,
            world,
            high_score: HighScore::new(store),
            cursor: (0, 0),
            hovered_ship: None,
            backdrop_y: BACKDROP_START,
            wave_clock: Periodic::new(WAVE_TICK_MS, now_ms),
            power_up_clock: Periodic::new(POWER_UP_TICK_MS, now_ms),
        }
    }

    /// Runs one frame: delivers key edges and timer events to the active
    /// handler, then the active update.
    pub fn frame(&mut self, input: &InputSnapshot, now_ms: u64) {
        let mut events: Vec<GameEvent> =
            input.pressed().iter().map(|&k| GameEvent::KeyDown(k)).collect();
        if self.wave_clock.poll(now_ms) {
            events.push(GameEvent::WaveTick);
        }
        if self.power_up_clock.poll(now_ms) {
            events.push(GameEvent::PowerUpTick);
        }
        for event in events {
            (handlers(self.state).handle)(self, event, now_ms);
        }

        self.cursor = input.cursor;
        (handlers(self.state).update)(self, input, now_ms);

        if !self.state.solid_background() {
            self.backdrop_y += BACKDROP_SCROLL;
            if self.backdrop_y >= 0.0 {
                self.backdrop_y = BACKDROP_START;
            }
        }
        self.fit_viewport();
    }

    fn fit_viewport(&mut self) {
        let width = self.state.viewport_width(&self.config);
        if width != self.viewport.0 {
            tracing::debug!(from = self.viewport.0, to = width, "viewport resized");
            self.viewport.0 = width;
        }
    }

    fn transition(&mut self, to: State) {
        tracing::info!(from = self.state.title(), to = to.title(), "screen change");
        self.state = to;
    }

    /// Rebuilds the player from the ship at `index`. Only indices offered by
    /// the armoury are expected; anything else is logged and ignored.
    pub fn select_ship(&mut self, index: usize, now_ms: u64) {
        let Some((id, profile)) = self.assets.ships.entry(index) else {
            tracing::error!(index, "ship selection out of range");
            return;
        };
        tracing::info!(ship = id, kind = %profile.kind, "ship selected");
        self.world.replace_player(Player::new(id, index, profile, now_ms));
    }

    /// Applies the button under the cursor, if the frame carries a click.
    fn click(&mut self, buttons: &[ui::Button], input: &InputSnapshot, now_ms: u64) {
        if !input.click {
            return;
        }
        let Some(action) = ui::hit(buttons, input.cursor).map(|b| b.action) else {
            return;
        };
        match action {
            Action::Goto(state) => self.transition(state),
            Action::Toggle(flag) => {
                let value = self.config.toggle(flag);
                tracing::info!(flag = flag.name(), value, "option toggled");
            }
            Action::SelectShip(index) => self.select_ship(index, now_ms),
        }
    }

    // ── Screens ──────────────────────────────────────────────────────────────

    fn ignore_event(&mut self, _event: GameEvent, _now_ms: u64) {}

    fn menu(&mut self, input: &InputSnapshot, now_ms: u64) {
        self.click(&ui::menu_buttons(), input, now_ms);
    }

    fn options(&mut self, input: &InputSnapshot, now_ms: u64) {
        let mut buttons = ui::option_buttons(&self.config);
        buttons.push(ui::back_button());
        self.click(&buttons, input, now_ms);
    }

    fn armoury(&mut self, input: &InputSnapshot, now_ms: u64) {
        let mut buttons = ui::ship_buttons(&self.assets.ships);
        self.hovered_ship = ui::hit(&buttons, input.cursor).and_then(|b| match b.action {
            Action::SelectShip(i) => Some(i),
            _ => None,
        });
        buttons.push(ui::back_button());
        self.click(&buttons, input, now_ms);
    }

    fn help(&mut self, input: &InputSnapshot, now_ms: u64) {
        self.click(&[ui::back_button()], input, now_ms);
    }

    fn play(&mut self, input: &InputSnapshot, now_ms: u64) {
        self.world.step(input, now_ms, &self.config, &mut self.high_score);
    }

    fn play_event(&mut self, event: GameEvent, now_ms: u64) {
        match event {
            GameEvent::KeyDown(Key::Exit) if self.world.game_over => {
                self.world.reset(now_ms);
                self.transition(State::Menu);
            }
            GameEvent::KeyDown(Key::Fire) if self.world.game_over => {
                self.world.reset(now_ms);
            }
            GameEvent::KeyDown(Key::Pause) if !self.world.game_over => {
                self.world.begin_pause(now_ms);
                self.transition(State::Pause);
            }
            GameEvent::WaveTick => self.world.on_wave_tick(now_ms),
            GameEvent::PowerUpTick => self.world.on_power_up_tick(),
            GameEvent::KeyDown(_) => {}
        }
    }

    fn pause(&mut self, _input: &InputSnapshot, now_ms: u64) {
        self.world.begin_pause(now_ms);
    }

    fn pause_event(&mut self, event: GameEvent, now_ms: u64) {
        match event {
            GameEvent::KeyDown(Key::Pause) => {
                self.world.resume(now_ms, self.config.pause_credit);
                self.transition(State::Play);
            }
            GameEvent::KeyDown(Key::Exit) => {
                self.world.reset(now_ms);
                self.transition(State::Menu);
            }
            _ => {}
        }
    }
}
