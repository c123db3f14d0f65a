//! Translates engine state into draw requests. How a request is rasterised
//! is the sink's business.

use crate::assets::Visual;
use crate::config::{Flag, FIELD_WIDTH};
use crate::entities::{
    Bullet, BulletOwner, Enemy, EnemyKind, Explosion, Heart, Planet, PowerUp, Rect,
};
use crate::game::Game;
use crate::player::Player;
use crate::state::State;
use crate::ui::{self, Button, Font};
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
}

/// Receiver of draw requests, in viewport coordinates.
pub trait RenderSink {
    fn sprite(&mut self, visual: Visual, at: Rect);
    fn text(&mut self, text: &str, font: Font, color: Color, at: (i32, i32));
    /// Darkens the whole viewport; `alpha` 0 is transparent, 255 opaque.
    fn overlay(&mut self, alpha: u8);
}

pub trait Drawable {
    fn draw(&self, sink: &mut dyn RenderSink);
}

impl Drawable for Player {
    fn draw(&self, sink: &mut dyn RenderSink) {
        sink.sprite(Visual::Ship(self.ship_index), self.rect);
    }
}

impl Drawable for Enemy {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let visual = match self.kind {
            EnemyKind::Standard => Visual::StandardAlien(self.frame),
            EnemyKind::Diagonal => Visual::DiagonalAlien(self.frame),
        };
        sink.sprite(visual, self.rect);
    }
}

impl Drawable for Bullet {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let visual = match self.owner {
            BulletOwner::Player => Visual::PlayerBullet(self.drift),
            BulletOwner::Enemy => Visual::EnemyBullet,
            BulletOwner::Indicator => Visual::AmmoIndicator,
        };
        sink.sprite(visual, self.rect);
    }
}

impl Drawable for Planet {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let visual = Visual::Planet { image: self.image, angle: self.angle, scale: self.scale };
        sink.sprite(visual, self.rect);
    }
}

impl Drawable for PowerUp {
    fn draw(&self, sink: &mut dyn RenderSink) {
        sink.sprite(Visual::LifePowerUp { alpha: self.alpha }, self.rect);
    }
}

impl Drawable for Explosion {
    fn draw(&self, sink: &mut dyn RenderSink) {
        sink.sprite(Visual::Explosion(self.frame), self.rect);
    }
}

impl Drawable for Heart {
    fn draw(&self, sink: &mut dyn RenderSink) {
        let (w, h) = Visual::Heart.size();
        sink.sprite(Visual::Heart, Rect::centered(self.x, self.y, w, h));
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

/// Emits every draw request for the current frame.
pub fn render(game: &Game, sink: &mut dyn RenderSink) {
    if !game.state.solid_background() {
        let (w, h) = Visual::Backdrop.size();
        sink.sprite(Visual::Backdrop, Rect::new(-w / 3, game.backdrop_y as i32, w, h));
    }
    if !matches!(game.state, State::Menu | State::Play | State::Pause) {
        sink.text(game.state.title(), Font::Large, Color::White, (10, 20));
    }

    match game.state {
        State::Menu => draw_menu(game, sink),
        State::Play => draw_play(game, sink),
        State::Options => draw_options(game, sink),
        State::Armoury => draw_armoury(game, sink),
        State::Help => draw_help(game, sink),
        State::Pause => draw_pause(game, sink),
    }
}

fn draw_buttons(
    buttons: &[Button],
    cursor: (i32, i32),
    sink: &mut dyn RenderSink,
    base: impl Fn(&Button) -> Color,
) {
    for button in buttons {
        let hovered = button.rect.contains(cursor.0, cursor.1);
        let color = if hovered { Color::Yellow } else { base(button) };
        sink.text(&button.label, button.font, color, (button.rect.x, button.rect.y));
    }
}

fn draw_menu(game: &Game, sink: &mut dyn RenderSink) {
    sink.text("COSMIC CONFLICT", Font::Medium, Color::Yellow, (8, 30));
    let best = format!("HIGH SCORE {}", game.high_score.best());
    sink.text(&best, Font::Small, Color::White, (100, 100));
    draw_buttons(&ui::menu_buttons(), game.cursor, sink, |_| Color::White);
}

fn draw_field(world: &World, sink: &mut dyn RenderSink) {
    let reg = &world.registry;
    reg.planets.iter().for_each(|p| p.draw(sink));
    reg.enemies.iter().for_each(|e| e.draw(sink));
    reg.player_bullets.iter().for_each(|b| b.draw(sink));
    reg.enemy_bullets.iter().for_each(|b| b.draw(sink));
    if world.player.alive {
        world.player.draw(sink);
    }
    reg.power_ups.iter().for_each(|p| p.draw(sink));
    reg.effects.iter().for_each(|e| e.draw(sink));
}

fn draw_hud(game: &Game, sink: &mut dyn RenderSink) {
    let player = &game.world.player;
    let (w, h) = Visual::HudOverlay.size();
    sink.sprite(Visual::HudOverlay, Rect::new(FIELD_WIDTH, 0, w, h));
    sink.text("LIVES", Font::Small, Color::White, (512, 15));
    sink.text("HI SCORE", Font::Small, Color::White, (485, 215));
    sink.text(&game.high_score.best().to_string(), Font::Large, Color::Orange, (567, 260));
    sink.text(&player.score.to_string(), Font::Small, Color::White, (575, 330));
    sink.text("AMMO", Font::Small, Color::White, (500, 420));
    player.hearts().iter().for_each(|heart| heart.draw(sink));
    player.ammo_indicators().iter().for_each(|b| b.draw(sink));
}

fn draw_play(game: &Game, sink: &mut dyn RenderSink) {
    draw_field(&game.world, sink);
    if game.config.get(Flag::Hud) {
        draw_hud(game, sink);
    }
    if game.world.game_over {
        sink.overlay(90);
        sink.text("GAME OVER", Font::Large, Color::Yellow, (55, 80));
        sink.text("Play Again ( SPACE )", Font::Small, Color::White, (55, 150));
        sink.text("Exit ( ESC )", Font::Small, Color::White, (115, 185));
    }
}

fn draw_pause(game: &Game, sink: &mut dyn RenderSink) {
    draw_field(&game.world, sink);
    sink.overlay(150);
    sink.text("PAUSED", Font::Large, Color::Yellow, (105, 165));
    sink.text("RESUME ( P )", Font::Medium, Color::White, (55, 325));
    sink.text("EXIT ( ESC )", Font::Medium, Color::White, (65, 400));
}

fn draw_options(game: &Game, sink: &mut dyn RenderSink) {
    let config = &game.config;
    draw_buttons(&ui::option_buttons(config), game.cursor, sink, |b| match b.action {
        ui::Action::Toggle(flag) if config.get(flag) => Color::Green,
        _ => Color::Red,
    });
    draw_buttons(&[ui::back_button()], game.cursor, sink, |_| Color::White);
}

fn draw_armoury(game: &Game, sink: &mut dyn RenderSink) {
    sink.text("select ship", Font::Small, Color::White, (10, 80));
    draw_buttons(&[ui::back_button()], game.cursor, sink, |_| Color::White);
    for button in ui::ship_buttons(&game.assets.ships) {
        if let ui::Action::SelectShip(i) = button.action {
            sink.sprite(Visual::ShipIcon(i), button.rect);
        }
    }

    let Some((id, profile)) = game.hovered_ship.and_then(|i| game.assets.ships.entry(i)) else {
        return;
    };
    let lines = [
        format!("ship  {id}"),
        format!("speed  {}", profile.speed),
        format!("ammo  {}", profile.ammo),
        format!("lives  {}", profile.lives),
        format!("type  {}", profile.kind),
        format!("fire rate  {}", profile.fire_rate),
        format!("bullet speed  {}", profile.bullet_speed),
    ];
    for (i, line) in lines.iter().enumerate() {
        sink.text(line, Font::Small, Color::White, (10, 300 + i as i32 * 30));
    }
}

fn draw_help(game: &Game, sink: &mut dyn RenderSink) {
    draw_buttons(&[ui::back_button()], game.cursor, sink, |_| Color::White);
    let mut y = 65;
    for section in &game.assets.help {
        sink.text(&section.title, Font::Medium, Color::Yellow, (10, y));
        y += 40;
        for line in &section.content {
            sink.text(line, Font::Small, Color::Green, (20, y));
            y += 30;
        }
        y += 20;
    }
}
