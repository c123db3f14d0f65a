//! Screen states and the events delivered to their handlers.

use crate::config::{
    GameConfig, ARMOURY_WIDTH, FIELD_WIDTH, HELP_WIDTH, HUD_WIDTH, MENU_WIDTH,
};
use crate::input::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Menu,
    Play,
    Options,
    Armoury,
    Help,
    Pause,
}

impl State {
    pub const fn title(self) -> &'static str {
        match self {
            State::Menu => "MENU",
            State::Play => "PLAY",
            State::Options => "OPTIONS",
            State::Armoury => "ARMOURY",
            State::Help => "HELP",
            State::Pause => "PAUSE",
        }
    }

    /// Width the display surface must have while this state is active.
    pub fn viewport_width(self, config: &GameConfig) -> i32 {
        match self {
            State::Play if config.hud => HUD_WIDTH,
            State::Play => FIELD_WIDTH,
            State::Armoury => ARMOURY_WIDTH,
            State::Help => HELP_WIDTH,
            State::Menu | State::Options | State::Pause => MENU_WIDTH,
        }
    }

    /// Screens drawn on a flat colour instead of the scrolling backdrop.
    pub const fn solid_background(self) -> bool {
        matches!(self, State::Armoury | State::Help)
    }
}

/// Discrete happenings routed to the active state's handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    KeyDown(Key),
    /// One-second wave clock.
    WaveTick,
    /// Five-second power-up clock.
    PowerUpTick,
}
