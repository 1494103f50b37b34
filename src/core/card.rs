//! Card identification and runtime card state.
//!
//! ## ID Layout
//!
//! Card IDs are dense: a deck of `N` cards uses IDs `0..N`, assigned in
//! deck order after shuffling. An ID is therefore also the card's position
//! in the grid.
//!
//! ```
//! use memory_match::core::{Card, CardId, Symbol};
//!
//! let card = Card::new(CardId(3), Symbol::new("🐶"));
//! assert!(card.is_selectable());
//! assert_eq!(card.id.index(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this card in the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The face value shown when a card is revealed.
///
/// Symbols are opaque tokens compared by equality. The default set is
/// eight emoji, but any distinct strings work.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a symbol from any string-like token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card on the board.
///
/// Cards are created in pairs when a deck is generated and are only ever
/// flagged afterwards, never removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position and identity within the deck.
    pub id: CardId,

    /// Face value. Exactly one other card in the deck shares it.
    pub symbol: Symbol,

    /// Currently showing its symbol.
    pub face_up: bool,

    /// Permanently revealed after its pair was found.
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    /// Can this card be picked by the player?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    /// Do two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }
}
