//! Core types: cards, symbols, RNG, configuration, errors.
//!
//! These are the building blocks shared by the deck and the engine.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{Card, CardId, Symbol};
pub use config::{
    GameConfig, GameConfigBuilder, DEFAULT_FLIP_BACK_DELAY, DEFAULT_SYMBOLS, DEFAULT_TICK_INTERVAL,
};
pub use error::{ConfigError, DeckError};
pub use rng::{GameRng, GameRngState};
