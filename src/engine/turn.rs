//! Turn phases for a single pair attempt.
//!
//! ```text
//! Empty --select--> OneChosen --select--> (compare)
//!   ^                                      |   |
//!   |<------------- match -----------------+   |
//!   |<-- flip-back fires -- Resolving <- mismatch
//! ```
//!
//! Two selected cards are compared synchronously, so "two chosen" is never
//! an observable phase. `Complete` is terminal until the next deal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CardId;

/// Cards picked in the current attempt, in pick order. Never more than two.
pub type Selection = SmallVec<[CardId; 2]>;

/// Where the current pair attempt stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the first card of a pair.
    Empty,
    /// One card is face-up, waiting for its partner.
    OneChosen,
    /// A mismatched pair is visible until its flip-back fires.
    /// All selections are ignored meanwhile.
    Resolving,
    /// Every pair is matched.
    Complete,
}

impl TurnPhase {
    /// Does this phase accept card selections?
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, TurnPhase::Empty | TurnPhase::OneChosen)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::Empty => "empty",
            TurnPhase::OneChosen => "one chosen",
            TurnPhase::Resolving => "resolving",
            TurnPhase::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_input() {
        assert!(TurnPhase::Empty.accepts_input());
        assert!(TurnPhase::OneChosen.accepts_input());
        assert!(!TurnPhase::Resolving.accepts_input());
        assert!(!TurnPhase::Complete.accepts_input());
    }

    #[test]
    fn test_selection_stays_inline() {
        let mut selection = Selection::new();
        selection.push(CardId(1));
        selection.push(CardId(2));
        assert!(!selection.spilled());
    }
}
