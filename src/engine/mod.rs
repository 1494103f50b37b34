//! Game engine: turn state machine, timers, events, and snapshots.
//!
//! ## Key Types
//!
//! - `GameEngine`: Owns the deck and counters, accepts input and time
//! - `TurnPhase`: Where the current pair attempt stands
//! - `GameEvent`: Record of each committed change
//! - `GameSnapshot`: Read-only state for the render layer

pub mod event;
pub mod game;
pub mod snapshot;
pub mod turn;

pub use event::GameEvent;
pub use game::GameEngine;
pub use snapshot::{CardView, Face, GameSnapshot, Status};
pub use turn::{Selection, TurnPhase};
