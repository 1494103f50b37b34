//! Deck system: dealing paired cards and checking the pairing invariants.
//!
//! ## Invariants
//!
//! - A deck of `K` symbols holds `2K` cards
//! - Every symbol appears on exactly two cards
//! - Card IDs equal deck positions
//!
//! Cards are never removed during play, so these hold from deal to restart.

pub mod board;

pub use board::Deck;
