//! Cosmic Conflict: a vertical-scrolling arcade shooter engine.
//!
//! The engine is deterministic given an RNG seed and a millisecond clock the
//! caller supplies. Drawing goes through [`render::RenderSink`], so the same
//! engine drives the terminal front end and the tests.

pub mod assets;
pub mod behavior;
pub mod collision;
pub mod config;
pub mod entities;
pub mod game;
pub mod highscore;
pub mod input;
pub mod player;
pub mod registry;
pub mod render;
pub mod state;
pub mod timers;
pub mod ui;
pub mod waves;
pub mod world;
