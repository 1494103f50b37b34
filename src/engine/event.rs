//! Game events.
//!
//! Every card or turn change the engine commits is also recorded as a
//! `GameEvent`. Elapsed time is not: read it from `Status`. Hosts drain
//! the queue after each input or `advance` to drive animations and sounds
//! without diffing snapshots.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Symbol};

/// Something that happened in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh deck was dealt and all counters reset.
    NewGame { pairs: usize },

    /// The first card was picked and the elapsed-time clock started.
    GameStarted,

    /// A card was turned face-up.
    CardRevealed { card: CardId },

    /// Two picked cards share a symbol and stay revealed.
    PairMatched {
        first: CardId,
        second: CardId,
        symbol: Symbol,
    },

    /// Two picked cards differ; they flip back after the delay.
    PairMismatched { first: CardId, second: CardId },

    /// A mismatched pair was turned face-down again.
    CardsHidden { first: CardId, second: CardId },

    /// The last pair was matched.
    GameCompleted { moves: u32, elapsed_seconds: u64 },
}
