mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use cosmic_conflict::assets::Assets;
use cosmic_conflict::config::{GameConfig, PauseCredit, FRAME_RATE};
use cosmic_conflict::game::Game;
use cosmic_conflict::highscore::FileHighScore;
use cosmic_conflict::input::{InputSnapshot, Key};

const FRAME: Duration = Duration::from_millis(1000 / FRAME_RATE);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CreditArg {
    Shared,
    PerEntity,
}

impl From<CreditArg> for PauseCredit {
    fn from(arg: CreditArg) -> Self {
        match arg {
            CreditArg::Shared => PauseCredit::Shared,
            CreditArg::PerEntity => PauseCredit::PerEntity,
        }
    }
}

/// Vertical-scrolling arcade shooter for the terminal.
#[derive(Debug, Parser)]
#[command(name = "cosmic_conflict", version, about)]
struct Args {
    /// Start with horizontal screen wrapping enabled.
    #[arg(long)]
    wrap: bool,
    /// Start with the HUD column hidden.
    #[arg(long)]
    no_hud: bool,
    #[arg(long)]
    no_music: bool,
    #[arg(long)]
    no_sound: bool,
    /// How paused time is credited back to enemy fire timers.
    #[arg(long, value_enum, default_value_t = CreditArg::Shared)]
    pause_credit: CreditArg,
    /// Ship table to use instead of the built-in one.
    #[arg(long)]
    ship_data: Option<PathBuf>,
    /// Defaults to `$HOME/.cosmic_conflict_score`.
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    /// Write logs here. Filtered with `RUST_LOG`, `info` by default.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Seed for enemy and planet placement.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            music: !self.no_music,
            sound: !self.no_sound,
            hud: !self.no_hud,
            wrapping: self.wrap,
            pause_credit: self.pause_credit.into(),
        }
    }
}

// ── Simultaneous-input handling ───────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<Key, u64>, key: Key, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Esc => Some(Key::Exit),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs frames until the player quits.
///
/// Keys are tracked in a `key_frame` map holding the frame each key was last
/// seen. A press counts as an edge only when the key was not already held, so
/// OS key-repeat on classic terminals does not re-trigger pause or restart.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let clock = Instant::now();
    let mut grid = terminal::size()?;
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut pointer: (u16, u16) = (0, 0);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut pressed = Vec::new();
        let mut click = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                        return Ok(());
                    }
                    let Some(key) = map_key(code) else { continue };
                    match kind {
                        KeyEventKind::Press => {
                            if !is_held(&key_frame, key, frame) {
                                pressed.push(key);
                            }
                            key_frame.insert(key, frame);
                        }
                        KeyEventKind::Repeat => {
                            key_frame.insert(key, frame);
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&key);
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    pointer = (column, row);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        click = true;
                    }
                }
                Event::Resize(cols, rows) => grid = (cols, rows),
                _ => {}
            }
        }

        // ── Build this frame's snapshot ───────────────────────────────────────
        let (x, y) = display::cell_to_logical(pointer.0, pointer.1, grid, game.viewport);
        let mut input = InputSnapshot::new().cursor_at(x, y);
        for (&key, _) in key_frame.iter().filter(|&(&k, _)| is_held(&key_frame, k, frame)) {
            input = input.hold(key);
        }
        for key in pressed {
            input = input.press(key);
        }
        if click {
            input = input.click_at(x, y);
        }

        game.frame(&input, clock.elapsed().as_millis() as u64);
        display::render(out, game, grid)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let assets = match &args.ship_data {
        Some(path) => Assets::with_ship_file(path),
        None => Assets::embedded(),
    }
    .context("loading game assets")?;
    let score_path = args.high_score_file.clone().unwrap_or_else(FileHighScore::default_path);
    let store = FileHighScore::open(score_path);
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, ships = assets.ships.len(), "starting");

    let mut game = Game::new(assets, args.config(), Box::new(store), seed, 0);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking event reads live on their own thread so the loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(best = game.high_score.best(), "exiting");
    result
}
