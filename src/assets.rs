//! Asset phase: parses the ship table and help text once and exposes
//! immutable visual handles. Nothing here is touched again after startup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::{Drift, ShipProfile};

const EMBEDDED_SHIPS: &str = include_str!("../data/ship_data.json");
const EMBEDDED_TEXT: &str = include_str!("../data/game_text.json");

pub const STANDARD_ALIEN_FRAMES: usize = 6;
pub const DIAGONAL_ALIEN_FRAMES: usize = 1;
pub const PLANET_IMAGES: usize = 4;
pub const EXPLOSION_FRAMES: usize = 8;

/// Base planet sprite edge before scaling.
pub const PLANET_BASE: i32 = 64;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ship table: {0}")]
    ShipTable(#[source] serde_json::Error),
    #[error("malformed game text: {0}")]
    GameText(#[source] serde_json::Error),
    #[error("ship table is empty")]
    NoShips,
}

// ── Visual handles ────────────────────────────────────────────────────────────

/// Handle naming one image the render sink knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    /// In-game player ship, by ship-table index.
    Ship(usize),
    /// Armoury preview of a ship, by ship-table index.
    ShipIcon(usize),
    StandardAlien(usize),
    DiagonalAlien(usize),
    PlayerBullet(Drift),
    EnemyBullet,
    AmmoIndicator,
    Heart,
    LifePowerUp { alpha: u8 },
    Planet { image: usize, angle: i32, scale: f32 },
    Explosion(usize),
    /// Panel behind the HUD column.
    HudOverlay,
    /// Scrolling star field.
    Backdrop,
}

impl Visual {
    /// Unscaled sprite size `(w, h)` used to build hitboxes.
    pub fn size(self) -> (i32, i32) {
        match self {
            Visual::Ship(_) => (48, 48),
            Visual::ShipIcon(_) => (100, 100),
            Visual::StandardAlien(_) => (40, 36),
            Visual::DiagonalAlien(_) => (44, 40),
            Visual::PlayerBullet(_) => (6, 18),
            Visual::EnemyBullet => (8, 12),
            Visual::AmmoIndicator => (6, 12),
            Visual::Heart | Visual::LifePowerUp { .. } => (30, 26),
            Visual::Planet { scale, .. } => {
                let edge = (PLANET_BASE as f32 * scale).round() as i32;
                (edge, edge)
            }
            Visual::Explosion(_) => (48, 48),
            Visual::HudOverlay => (300, 600),
            Visual::Backdrop => (1200, 1800),
        }
    }
}

// ── Ship table ────────────────────────────────────────────────────────────────

/// Ship profiles in identifier order (`SHIP1`, `SHIP2`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipTable {
    entries: Vec<(String, ShipProfile)>,
}

impl ShipTable {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let map: BTreeMap<String, ShipProfile> =
            serde_json::from_str(json).map_err(AssetError::ShipTable)?;
        if map.is_empty() {
            return Err(AssetError::NoShips);
        }
        Ok(Self { entries: map.into_iter().collect() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default ship. Tables are never empty, `from_json` rejects them.
    pub fn first(&self) -> (&str, &ShipProfile) {
        let (id, profile) = &self.entries[0];
        (id, profile)
    }

    pub fn entry(&self, index: usize) -> Option<(&str, &ShipProfile)> {
        self.entries.get(index).map(|(k, p)| (k.as_str(), p))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShipProfile)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }
}

// ── Help text ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HelpSection {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Deserialize)]
struct GameText {
    help_text: Vec<HelpSection>,
}

// ── Bundle ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Assets {
    pub ships: ShipTable,
    pub help: Vec<HelpSection>,
}

impl Assets {
    /// Ship table and help text compiled into the binary.
    pub fn embedded() -> Result<Self, AssetError> {
        Self::from_json(EMBEDDED_SHIPS)
    }

    pub fn from_json(ship_json: &str) -> Result<Self, AssetError> {
        let text: GameText = serde_json::from_str(EMBEDDED_TEXT).map_err(AssetError::GameText)?;
        Ok(Self {
            ships: ShipTable::from_json(ship_json)?,
            help: text.help_text,
        })
    }

    /// Embedded help text with a ship table read from `path`.
    pub fn with_ship_file(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
