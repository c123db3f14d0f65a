//! Clickable regions of the menu screens. Only their geometry and the
//! transition each one triggers matter to the engine; how they look is up to
//! the render sink.

use crate::assets::{ShipTable, Visual};
use crate::config::{Flag, GameConfig};
use crate::entities::Rect;
use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Large,
    Medium,
    Small,
}

impl Font {
    /// Glyph height, also used as the advance of a glyph.
    pub const fn size(self) -> i32 {
        match self {
            Font::Large => 32,
            Font::Medium => 28,
            Font::Small => 18,
        }
    }

    pub fn text_rect(self, text: &str, at: (i32, i32)) -> Rect {
        Rect::new(at.0, at.1, text.chars().count() as i32 * self.size(), self.size())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Goto(State),
    Toggle(Flag),
    SelectShip(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub font: Font,
    pub action: Action,
}

impl Button {
    fn text(label: impl Into<String>, font: Font, at: (i32, i32), action: Action) -> Self {
        let label = label.into();
        let rect = font.text_rect(&label, at);
        Self { label, rect, font, action }
    }
}

pub fn menu_buttons() -> Vec<Button> {
    vec![
        Button::text("PLAY", Font::Medium, (140, 300), Action::Goto(State::Play)),
        Button::text("OPTIONS", Font::Medium, (110, 375), Action::Goto(State::Options)),
        Button::text("ARMOURY", Font::Medium, (95, 450), Action::Goto(State::Armoury)),
        Button::text("HELP", Font::Medium, (140, 525), Action::Goto(State::Help)),
    ]
}

pub fn back_button() -> Button {
    Button::text("BACK", Font::Medium, (10, 530), Action::Goto(State::Menu))
}

/// One toggle per flag; labels reflect the current configuration.
pub fn option_buttons(config: &GameConfig) -> Vec<Button> {
    Flag::ALL
        .iter()
        .enumerate()
        .map(|(i, &flag)| {
            let at = (10, 100 + i as i32 * 40);
            Button::text(config.label(flag), Font::Small, at, Action::Toggle(flag))
        })
        .collect()
}

const SHIP_SPACING: i32 = 130;

pub fn ship_buttons(ships: &ShipTable) -> Vec<Button> {
    ships
        .iter()
        .enumerate()
        .map(|(i, (id, _))| {
            let (w, h) = Visual::ShipIcon(i).size();
            Button {
                label: id.to_owned(),
                rect: Rect::new(i as i32 * SHIP_SPACING, 130, w, h),
                font: Font::Small,
                action: Action::SelectShip(i),
            }
        })
        .collect()
}

/// Topmost button under the cursor.
pub fn hit(buttons: &[Button], cursor: (i32, i32)) -> Option<&Button> {
    buttons.iter().find(|b| b.rect.contains(cursor.0, cursor.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_buttons_do_not_overlap() {
        let buttons = menu_buttons();
        for (i, a) in buttons.iter().enumerate() {
            for b in &buttons[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.label, b.label);
            }
        }
    }

    #[test]
    fn option_labels_track_config() {
        let mut config = GameConfig::default();
        config.toggle(Flag::Wrapping);
        let labels: Vec<String> = option_buttons(&config).into_iter().map(|b| b.label).collect();
        assert_eq!(labels, ["music enabled", "sound enabled", "HUD enabled", "wrapping enabled"]);
    }
}
