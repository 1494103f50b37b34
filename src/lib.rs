//! # memory-match
//!
//! A memory-matching ("concentration") card game engine.
//!
//! A grid of face-down cards is revealed two at a time. Matching pairs
//! stay revealed, mismatches flip back after a delay, and the game tracks
//! moves, elapsed time, and completion.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine produces snapshots and events.
//!    Rendering and input capture belong to the host.
//!
//! 2. **Virtual Time**: Nothing sleeps or spawns. The host feeds elapsed
//!    time in with `GameEngine::advance`, so games are deterministic and
//!    tests never wait.
//!
//! 3. **Silent Rejection**: Clicks on face-up, matched, or unknown cards
//!    and clicks during a mismatch are ignored, not errors.
//!
//! ## Modules
//!
//! - `core`: Cards, symbols, RNG, configuration, errors
//! - `deck`: Dealing and pairing invariants
//! - `timers`: Virtual-clock scheduler
//! - `engine`: Game engine, turn phases, events, snapshots

pub mod core;
pub mod deck;
pub mod engine;
pub mod timers;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, Symbol,
    GameRng, GameRngState,
    GameConfig, GameConfigBuilder,
    ConfigError, DeckError,
};

pub use crate::deck::Deck;

pub use crate::timers::{Scheduler, TimerId};

pub use crate::engine::{
    CardView, Face, GameEngine, GameEvent, GameSnapshot, Selection, Status, TurnPhase,
};
