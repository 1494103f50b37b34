//! Error types for game setup.
//!
//! Gameplay itself has no failure modes: rejected clicks are ignored, not
//! reported. Errors only arise when a configuration or a dealt deck breaks
//! the pairing rules.

use thiserror::Error;

use super::card::{CardId, Symbol};

/// Invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one symbol is needed to deal a pair.
    #[error("a game needs at least one symbol")]
    TooFewSymbols,

    /// Each symbol must be distinct, otherwise it would appear four times.
    #[error("symbol {0} is listed more than once")]
    DuplicateSymbol(Symbol),

    /// Mismatched cards must stay visible for a non-zero time.
    #[error("flip-back delay must be greater than zero")]
    ZeroDelay,

    /// A zero tick interval would fire forever within one `advance`.
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// A deck that violates the pairing invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    /// A symbol appears some number of times other than two.
    #[error("symbol {symbol} appears {count} times, expected 2")]
    WrongSymbolCount { symbol: Symbol, count: usize },

    /// Card IDs must equal their deck position.
    #[error("card at position {index} has id {id}")]
    IdOutOfOrder { index: usize, id: CardId },
}
