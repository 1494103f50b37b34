//! Read-only views of a game for rendering.
//!
//! A `GameSnapshot` is taken after any committed change and handed to the
//! render layer. It shares deck storage with the engine, so taking one
//! per frame is cheap.

use serde::{Deserialize, Serialize};

use super::turn::{Selection, TurnPhase};
use crate::core::{Card, CardId, Symbol};
use crate::deck::Deck;

/// Which side of a card the render layer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face<'a> {
    /// Face-down: draw the card back.
    Hidden,
    /// Face-up or matched: draw the symbol.
    Shown(&'a Symbol),
}

/// Per-card render data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CardView<'a> {
    pub id: CardId,
    pub face_up: bool,
    pub matched: bool,
    pub symbol: &'a Symbol,
}

impl<'a> CardView<'a> {
    /// The side to draw.
    #[must_use]
    pub fn face(&self) -> Face<'a> {
        if self.face_up || self.matched {
            Face::Shown(self.symbol)
        } else {
            Face::Hidden
        }
    }
}

impl<'a> From<&'a Card> for CardView<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            id: card.id,
            face_up: card.face_up,
            matched: card.matched,
            symbol: &card.symbol,
        }
    }
}

/// Counters for the status readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub elapsed_seconds: u64,
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

impl Status {
    /// All pairs found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time: {}s | Moves: {} | Pairs: {}/{}",
            self.elapsed_seconds, self.moves, self.matched_pairs, self.total_pairs
        )
    }
}

/// Everything the render layer needs, frozen at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub deck: Deck,
    pub status: Status,
    pub running: bool,
    pub phase: TurnPhase,
    pub selection: Selection,
}

impl GameSnapshot {
    /// Render data for every card, in grid order.
    pub fn cards(&self) -> impl Iterator<Item = CardView<'_>> {
        self.deck.iter().map(CardView::from)
    }

    /// Render data for one card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<CardView<'_>> {
        self.deck.get(id).map(CardView::from)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}
