//! Deck storage, dealing, and invariant checks.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, CardId, Symbol};
use crate::core::error::DeckError;
use crate::core::rng::GameRng;

/// An ordered deck of paired cards.
///
/// Backed by `im::Vector`, so cloning a deck for a snapshot shares
/// structure with the live deck instead of copying every card.
///
/// ## Usage
///
/// ```
/// use memory_match::core::{GameRng, Symbol};
/// use memory_match::deck::Deck;
///
/// let symbols = [Symbol::from("A"), Symbol::from("B")];
/// let deck = Deck::deal(&symbols, &mut GameRng::new(1));
///
/// assert_eq!(deck.len(), 4);
/// assert_eq!(deck.pair_count(), 2);
/// assert!(deck.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal a shuffled deck with two cards per symbol.
    ///
    /// IDs are assigned after shuffling, so `id == position`.
    #[must_use]
    pub fn deal(symbols: &[Symbol], rng: &mut GameRng) -> Self {
        let mut faces: Vec<&Symbol> = symbols.iter().chain(symbols.iter()).collect();
        rng.shuffle(&mut faces);

        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| Card::new(CardId(index as u32), symbol.clone()))
            .collect();

        Self { cards }
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a mutable card by ID.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (`K`).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Number of cards already matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    /// IDs of cards showing their symbol without being matched.
    pub fn face_up_unmatched(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards
            .iter()
            .filter(|c| c.face_up && !c.matched)
            .map(|c| c.id)
    }

    /// Check the pairing invariants.
    ///
    /// - Every symbol appears exactly twice
    /// - Every card's ID equals its position
    pub fn validate(&self) -> Result<(), DeckError> {
        for (index, card) in self.cards.iter().enumerate() {
            if card.id.index() != index {
                return Err(DeckError::IdOutOfOrder { index, id: card.id });
            }
        }

        let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(&card.symbol).or_insert(0) += 1;
        }

        // Report in deck order so the error is deterministic
        for card in &self.cards {
            let count = counts[&card.symbol];
            if count != 2 {
                return Err(DeckError::WrongSymbolCount {
                    symbol: card.symbol.clone(),
                    count,
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_SYMBOLS;

    /// A deck in a fixed, possibly invalid, order.
    fn deck_of(cards: impl IntoIterator<Item = Card>) -> Deck {
        Deck {
            cards: cards.into_iter().collect(),
        }
    }

    fn default_symbols() -> Vec<Symbol> {
        DEFAULT_SYMBOLS.iter().map(|&s| Symbol::from(s)).collect()
    }

    #[test]
    fn test_deal_default_deck() {
        let deck = Deck::deal(&default_symbols(), &mut GameRng::new(42));

        assert_eq!(deck.len(), 16);
        assert_eq!(deck.pair_count(), 8);
        assert!(deck.validate().is_ok());
        assert!(deck.iter().all(|c| !c.face_up && !c.matched));
    }

    #[test]
    fn test_ids_follow_position() {
        let deck = Deck::deal(&default_symbols(), &mut GameRng::new(3));

        for (index, card) in deck.iter().enumerate() {
            assert_eq!(card.id, CardId(index as u32));
            assert_eq!(deck.get(card.id), Some(card));
        }
        assert!(deck.get(CardId(16)).is_none());
    }

    #[test]
    fn test_same_seed_same_deck() {
        let a = Deck::deal(&default_symbols(), &mut GameRng::new(77));
        let b = Deck::deal(&default_symbols(), &mut GameRng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_is_shuffled() {
        let symbols = default_symbols();
        let deck = Deck::deal(&symbols, &mut GameRng::new(42));

        let unshuffled: Vec<&Symbol> = symbols.iter().chain(symbols.iter()).collect();
        let dealt: Vec<&Symbol> = deck.iter().map(|c| &c.symbol).collect();
        assert_ne!(dealt, unshuffled);
    }

    #[test]
    fn test_validate_rejects_triple() {
        let deck = deck_of([
            Card::new(CardId(0), Symbol::from("a")),
            Card::new(CardId(1), Symbol::from("a")),
            Card::new(CardId(2), Symbol::from("a")),
            Card::new(CardId(3), Symbol::from("b")),
        ]);

        assert_eq!(
            deck.validate(),
            Err(DeckError::WrongSymbolCount {
                symbol: Symbol::from("a"),
                count: 3,
            })
        );
    }

    #[test]
    fn test_validate_rejects_misplaced_id() {
        let deck = deck_of([
            Card::new(CardId(1), Symbol::from("a")),
            Card::new(CardId(0), Symbol::from("a")),
        ]);

        assert_eq!(
            deck.validate(),
            Err(DeckError::IdOutOfOrder {
                index: 0,
                id: CardId(1),
            })
        );
    }

    #[test]
    fn test_flags_and_counts() {
        let mut deck = Deck::deal(&default_symbols(), &mut GameRng::new(1));

        deck.get_mut(CardId(0)).unwrap().face_up = true;
        deck.get_mut(CardId(1)).unwrap().matched = true;
        deck.get_mut(CardId(1)).unwrap().face_up = true;

        assert_eq!(deck.matched_count(), 1);
        assert_eq!(deck.face_up_unmatched().collect::<Vec<_>>(), vec![CardId(0)]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut deck = Deck::deal(&default_symbols(), &mut GameRng::new(1));
        let before = deck.clone();

        deck.get_mut(CardId(4)).unwrap().face_up = true;

        assert!(!before.get(CardId(4)).unwrap().face_up);
        assert!(deck.get(CardId(4)).unwrap().face_up);
    }
}
