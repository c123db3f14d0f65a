/// Terminal rendering layer. All terminal I/O lives here.
///
/// The engine speaks in logical viewport coordinates; this module scales
/// them onto whatever cell grid the terminal currently has and picks a glyph
/// for every visual handle.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use cosmic_conflict::assets::{Visual, PLANET_IMAGES};
use cosmic_conflict::entities::{Drift, Rect};
use cosmic_conflict::game::Game;
use cosmic_conflict::render::{self, Color as Tint, RenderSink};
use cosmic_conflict::ui::Font;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ALIEN_STANDARD: Color = Color::Green;
const C_ALIEN_DIAGONAL: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HEART: Color = Color::Red;
const C_POWER_UP: Color = Color::Magenta;
const C_POWER_UP_DIM: Color = Color::DarkMagenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_PLANETS: [Color; PLANET_IMAGES] =
    [Color::DarkBlue, Color::DarkYellow, Color::DarkCyan, Color::DarkRed];

const EXPLOSION_GLYPHS: [&str; 4] = ["*", "✶", "✷", "✸"];

/// Overlays at least this opaque hide the field underneath.
const OPAQUE_OVERLAY: u8 = 128;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Scales a logical point to a terminal cell. `None` when it falls outside.
pub fn logical_to_cell(
    x: i32,
    y: i32,
    grid: (u16, u16),
    viewport: (i32, i32),
) -> Option<(u16, u16)> {
    if x < 0 || y < 0 || x >= viewport.0 || y >= viewport.1 {
        return None;
    }
    let col = x as i64 * grid.0 as i64 / viewport.0 as i64;
    let row = y as i64 * grid.1 as i64 / viewport.1 as i64;
    Some((col as u16, row as u16))
}

/// Maps a terminal cell back to the logical point at its centre.
pub fn cell_to_logical(col: u16, row: u16, grid: (u16, u16), viewport: (i32, i32)) -> (i32, i32) {
    let scale = |cell: u16, cells: u16, span: i32| {
        let cells = cells.max(1) as i64;
        ((cell as i64 * 2 + 1) * span as i64 / (cells * 2)) as i32
    };
    (scale(col, grid.0, viewport.0), scale(row, grid.1, viewport.1))
}

// ── Sink ──────────────────────────────────────────────────────────────────────

/// Queues crossterm commands for each draw request. The first I/O error is
/// kept and reported by [`TerminalSink::finish`].
struct TerminalSink<'a, W: Write> {
    out: &'a mut W,
    grid: (u16, u16),
    viewport: (i32, i32),
    error: Option<io::Error>,
}

impl<'a, W: Write> TerminalSink<'a, W> {
    fn put(&mut self, at: (i32, i32), glyph: &str, color: Color) {
        let Some((col, row)) = logical_to_cell(at.0, at.1, self.grid, self.viewport) else {
            return;
        };
        let room = self.grid.0.saturating_sub(col) as usize;
        let clipped: String = glyph.chars().take(room).collect();
        self.queue(|out| {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(clipped))?;
            Ok(())
        });
    }

    fn queue(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = f(self.out) {
            self.error = Some(err);
        }
    }

    fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn draw_backdrop(&mut self, top: i32) {
        // Star rows are keyed on their logical row so the field scrolls.
        let rows = self.grid.1.max(1) as i32;
        let step = (self.viewport.1 / rows).max(1);
        for row in 0..rows {
            let y = row * step;
            let star_row = (y - top) / step;
            if star_row % 3 != 0 {
                continue;
            }
            let x = (star_row * 37 + 11).rem_euclid(self.viewport.0.max(1));
            self.put((x, y), ".", C_STAR);
        }
    }

    fn draw_hud_border(&mut self, left: i32) {
        let rows = self.grid.1.max(1) as i32;
        let step = (self.viewport.1 / rows).max(1);
        for row in 0..rows {
            self.put((left, row * step), "│", C_BORDER);
        }
    }
}

fn tint(color: Tint) -> Color {
    match color {
        Tint::White => Color::White,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Yellow => Color::Yellow,
        Tint::Orange => Color::DarkYellow,
    }
}

impl<'a, W: Write> RenderSink for TerminalSink<'a, W> {
    fn sprite(&mut self, visual: Visual, at: Rect) {
        let (glyph, color) = match visual {
            Visual::Backdrop => return self.draw_backdrop(at.y + at.h),
            Visual::HudOverlay => return self.draw_hud_border(at.x),
            Visual::Ship(_) | Visual::ShipIcon(_) => ("/▲\\", C_PLAYER),
            Visual::StandardAlien(_) => ("«▼»", C_ALIEN_STANDARD),
            Visual::DiagonalAlien(_) => ("(◎)", C_ALIEN_DIAGONAL),
            Visual::PlayerBullet(Drift::None) => ("║", C_BULLET_PLAYER),
            Visual::PlayerBullet(Drift::Left) => ("\\", C_BULLET_PLAYER),
            Visual::PlayerBullet(Drift::Right) => ("/", C_BULLET_PLAYER),
            Visual::EnemyBullet => ("↓", C_BULLET_ENEMY),
            Visual::AmmoIndicator => ("▮", C_BULLET_PLAYER),
            Visual::Heart => ("♥", C_HEART),
            Visual::LifePowerUp { alpha } if alpha < 170 => ("♥", C_POWER_UP_DIM),
            Visual::LifePowerUp { .. } => ("♥", C_POWER_UP),
            Visual::Planet { image, .. } => ("●", C_PLANETS[image % PLANET_IMAGES]),
            Visual::Explosion(frame) => {
                (EXPLOSION_GLYPHS[(frame / 2).min(EXPLOSION_GLYPHS.len() - 1)], C_EXPLOSION)
            }
        };
        // Glyphs are centred on the sprite's hitbox.
        let (cx, cy) = at.center();
        let half = glyph.chars().count() as i32 / 2;
        let cell_w = (self.viewport.0 / self.grid.0.max(1) as i32).max(1);
        self.put((cx - half * cell_w, cy), glyph, color);
    }

    fn text(&mut self, text: &str, font: Font, color: Tint, at: (i32, i32)) {
        if font == Font::Large {
            self.queue(|out| out.queue(style::SetAttribute(Attribute::Bold)).map(|_| ()));
        }
        self.put(at, text, tint(color));
        if font == Font::Large {
            self.queue(|out| {
                out.queue(style::SetAttribute(Attribute::NormalIntensity)).map(|_| ())
            });
        }
    }

    fn overlay(&mut self, alpha: u8) {
        if alpha >= OPAQUE_OVERLAY {
            self.queue(|out| out.queue(terminal::Clear(terminal::ClearType::All)).map(|_| ()));
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `grid` of terminal cells.
pub fn render<W: Write>(out: &mut W, game: &Game, grid: (u16, u16)) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut sink = TerminalSink { out: &mut *out, grid, viewport: game.viewport, error: None };
    render::render(game, &mut sink);
    sink.finish()?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
