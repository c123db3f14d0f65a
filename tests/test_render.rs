use cosmic_conflict::assets::{Assets, Visual};
use cosmic_conflict::config::GameConfig;
use cosmic_conflict::entities::Rect;
use cosmic_conflict::game::Game;
use cosmic_conflict::highscore::MemoryHighScore;
use cosmic_conflict::input::{InputSnapshot, Key};
use cosmic_conflict::render::{render, Color, RenderSink};
use cosmic_conflict::state::State;
use cosmic_conflict::ui::Font;

/// Records every draw request in order.
#[derive(Default)]
struct Recorder {
    sprites: Vec<(Visual, Rect)>,
    texts: Vec<(String, Color)>,
    overlays: Vec<u8>,
}

impl RenderSink for Recorder {
    fn sprite(&mut self, visual: Visual, at: Rect) {
        self.sprites.push((visual, at));
    }

    fn text(&mut self, text: &str, _font: Font, color: Color, _at: (i32, i32)) {
        self.texts.push((text.to_owned(), color));
    }

    fn overlay(&mut self, alpha: u8) {
        self.overlays.push(alpha);
    }
}

impl Recorder {
    fn has_text(&self, wanted: &str) -> bool {
        self.texts.iter().any(|(t, _)| t == wanted)
    }

    fn count(&self, pred: impl Fn(&Visual) -> bool) -> usize {
        self.sprites.iter().filter(|(v, _)| pred(v)).count()
    }
}

fn new_game(config: GameConfig) -> Game {
    let assets = Assets::embedded().expect("embedded assets parse");
    Game::new(assets, config, Box::new(MemoryHighScore { value: 321, commits: 0 }), 7, 0)
}

fn draw(game: &Game) -> Recorder {
    let mut sink = Recorder::default();
    render(game, &mut sink);
    sink
}

fn start(game: &mut Game) {
    game.frame(&InputSnapshot::new().click_at(150, 310), 10);
    assert_eq!(game.state, State::Play);
}

#[test]
fn menu_shows_title_and_high_score() {
    let game = new_game(GameConfig::default());
    let frame = draw(&game);
    assert!(frame.has_text("COSMIC CONFLICT"));
    assert!(frame.has_text("HIGH SCORE 321"));
    assert!(frame.has_text("PLAY"));
    assert_eq!(frame.count(|v| *v == Visual::Backdrop), 1);
}

#[test]
fn hovered_button_is_highlighted() {
    let mut game = new_game(GameConfig::default());
    game.frame(&InputSnapshot::new().cursor_at(150, 310), 10);
    let frame = draw(&game);
    let play = frame.texts.iter().find(|(t, _)| t == "PLAY").expect("PLAY drawn");
    assert_eq!(play.1, Color::Yellow);
}

#[test]
fn play_draws_hud_with_hearts_and_ammo() {
    let mut game = new_game(GameConfig::default());
    start(&mut game);
    let frame = draw(&game);
    assert!(frame.has_text("LIVES"));
    assert!(frame.has_text("321"));
    assert_eq!(frame.count(|v| *v == Visual::Heart), 3);
    assert_eq!(frame.count(|v| *v == Visual::AmmoIndicator), 15);
    assert_eq!(frame.count(|v| matches!(v, Visual::Ship(0))), 1);
}

#[test]
fn hud_can_be_switched_off() {
    let mut game = new_game(GameConfig { hud: false, ..GameConfig::default() });
    start(&mut game);
    let frame = draw(&game);
    assert!(!frame.has_text("LIVES"));
    assert_eq!(frame.count(|v| *v == Visual::HudOverlay), 0);
}

#[test]
fn game_over_overlay_hides_the_ship() {
    let mut game = new_game(GameConfig::default());
    start(&mut game);
    game.world.game_over = true;
    game.world.player.alive = false;
    let frame = draw(&game);
    assert!(frame.has_text("GAME OVER"));
    assert!(frame.has_text("Play Again ( SPACE )"));
    assert_eq!(frame.overlays.len(), 1);
    assert_eq!(frame.count(|v| matches!(v, Visual::Ship(_))), 0);
}

#[test]
fn pause_screen_has_resume_and_exit() {
    let mut game = new_game(GameConfig::default());
    start(&mut game);
    game.frame(&InputSnapshot::new().press(Key::Pause), 100);
    let frame = draw(&game);
    assert!(frame.has_text("PAUSED"));
    assert!(frame.has_text("RESUME ( P )"));
    assert!(frame.has_text("EXIT ( ESC )"));
    assert!(!frame.has_text("LIVES"));
}

#[test]
fn armoury_describes_hovered_ship() {
    let mut game = new_game(GameConfig::default());
    game.frame(&InputSnapshot::new().click_at(100, 460), 10);
    game.frame(&InputSnapshot::new().cursor_at(150, 180), 20);
    let frame = draw(&game);
    assert!(frame.has_text("ARMOURY"));
    assert!(frame.has_text("ship  SHIP2"));
    assert!(frame.has_text("type  Gunship"));
    assert_eq!(frame.count(|v| matches!(v, Visual::ShipIcon(_))), 6);
    assert_eq!(frame.count(|v| *v == Visual::Backdrop), 0);
}

#[test]
fn options_colour_reflects_flag_state() {
    let mut game = new_game(GameConfig::default());
    game.frame(&InputSnapshot::new().click_at(120, 385), 10);
    let frame = draw(&game);
    let colour = |label: &str| frame.texts.iter().find(|(t, _)| t == label).map(|(_, c)| *c);
    assert_eq!(colour("music enabled"), Some(Color::Green));
    assert_eq!(colour("wrapping disabled"), Some(Color::Red));
}

#[test]
fn help_lists_every_section() {
    let mut game = new_game(GameConfig::default());
    game.frame(&InputSnapshot::new().click_at(150, 535), 10);
    let frame = draw(&game);
    for section in &game.assets.help {
        assert!(frame.has_text(&section.title));
    }
}
