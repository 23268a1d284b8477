#![warn(clippy::all, missing_docs)]

//! Core game logic for MatchGrid, a memory-matching card game.
//!
//! This crate hosts the deck, card, grid and timer models, the session
//! controller that ties them together, configuration handling and the
//! render/input messages exchanged with whatever front-end draws the game.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod grid;
pub mod render;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod timer;

pub use card::{Card, Face};
pub use config::{AppConfig, SessionConfig, Theme, TimingConfig};
pub use error::{GameError, GameResult};
pub use grid::{Grid, Selection, MATCH_REWARD, MAX_GRID_SIDE};
pub use render::{InputEvent, Outcome, RenderCommand, ResultDialog};
pub use session::{Phase, Session};
pub use settings::{SettingChange, SettingsPanel};
pub use timer::{Timer, TimerEvent};
