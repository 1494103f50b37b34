//! The game engine: deck, turn state, counters, and timers.

use std::time::Duration;

use log::{debug, info, trace};

use super::event::GameEvent;
use super::snapshot::{GameSnapshot, Status};
use super::turn::{Selection, TurnPhase};
use crate::core::{Card, CardId, ConfigError, GameConfig, GameRng, GameRngState};
use crate::deck::Deck;
use crate::timers::{Fired, Scheduler, TimerId};

/// Timer payloads the engine schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineTimer {
    /// Count one elapsed-time interval.
    Tick,
    /// Turn a mismatched pair face-down.
    FlipBack { first: CardId, second: CardId },
}

/// A memory-matching game.
///
/// The engine is single-threaded and never blocks. Input arrives as
/// `select_card` and `restart` calls; time arrives as `advance` calls
/// from the host's event loop. After either, `snapshot` reflects the
/// latest committed state and `drain_events` lists what changed.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use memory_match::GameEngine;
///
/// let mut game = GameEngine::with_seed(42);
///
/// // Find two cards with different symbols
/// let first = game.deck().iter().next().unwrap().clone();
/// let other = game.deck().iter().find(|c| c.symbol != first.symbol).unwrap().clone();
///
/// assert!(game.select_card(first.id));
/// assert!(game.select_card(other.id));
/// assert_eq!(game.moves(), 1);
/// assert!(game.is_resolving());
///
/// // One second later the pair flips back
/// game.advance(Duration::from_secs(1));
/// assert!(!game.card(first.id).unwrap().face_up);
/// assert!(!game.card(other.id).unwrap().face_up);
/// assert_eq!(game.elapsed_seconds(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    deck: Deck,
    selection: Selection,

    moves: u32,
    matched_pairs: usize,
    elapsed_seconds: u64,
    running: bool,

    scheduler: Scheduler<EngineTimer>,
    /// Repeating elapsed-time timer, armed while running.
    tick: Option<TimerId>,
    /// Pending revert of a mismatched pair.
    flip_back: Option<TimerId>,

    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine and deal the first deck.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Default symbols and timings with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    fn from_valid_config(config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let mut engine = Self {
            config,
            rng,
            deck: Deck::default(),
            selection: Selection::new(),
            moves: 0,
            matched_pairs: 0,
            elapsed_seconds: 0,
            running: false,
            scheduler: Scheduler::new(),
            tick: None,
            flip_back: None,
            events: Vec::new(),
        };
        engine.new_game();
        engine
    }

    // === Commands ===

    /// Deal a fresh deck and reset every counter.
    ///
    /// Cancels the elapsed-time tick and any pending flip-back, so nothing
    /// scheduled for the previous deck can touch the new one.
    pub fn new_game(&mut self) {
        self.scheduler.cancel_all();
        self.tick = None;
        self.flip_back = None;

        self.deck = Deck::deal(&self.config.symbols, &mut self.rng);
        self.selection.clear();
        self.moves = 0;
        self.matched_pairs = 0;
        self.elapsed_seconds = 0;
        self.running = false;

        info!("dealt new game with {} pairs", self.total_pairs());
        self.events.push(GameEvent::NewGame {
            pairs: self.total_pairs(),
        });
    }

    /// Start over with a new deck. Same as `new_game`.
    pub fn restart(&mut self) {
        self.new_game();
    }

    /// Pick a card.
    ///
    /// Ignored (returns `false`) when the card does not exist, is already
    /// face-up or matched, or a mismatched pair is still resolving.
    /// Otherwise the card turns face-up, the clock starts on the first
    /// pick, and a second pick is compared immediately.
    pub fn select_card(&mut self, id: CardId) -> bool {
        if self.flip_back.is_some() {
            trace!("ignoring {} while a mismatch resolves", id);
            return false;
        }

        let Some(card) = self.deck.get_mut(id) else {
            trace!("ignoring unknown {}", id);
            return false;
        };
        if !card.is_selectable() {
            trace!("ignoring {}: face_up={} matched={}", id, card.face_up, card.matched);
            return false;
        }
        card.face_up = true;

        if !self.running {
            self.start_clock();
        }

        debug!("revealed {}", id);
        self.events.push(GameEvent::CardRevealed { card: id });
        self.selection.push(id);

        if self.selection.len() == 2 {
            self.moves += 1;
            self.resolve_pair();
        }

        true
    }

    /// Advance the virtual clock by `elapsed`, firing every timer that
    /// comes due in deadline order.
    ///
    /// The clock saturates at `Duration::MAX`. Returns the number of
    /// timer firings; a tick that catches up on several periods counts once.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut fired = 0;

        while let Some(timer) = self.scheduler.pop_due(until) {
            self.fire(timer);
            fired += 1;
        }
        self.scheduler.advance_to(until);

        fired
    }

    /// Take all events recorded since the last drain.
    ///
    /// Only input and turn resolution record events, so the queue stays
    /// bounded by the number of clicks even if it is never drained.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Internal Transitions ===

    fn start_clock(&mut self) {
        self.running = true;
        self.tick = Some(
            self.scheduler
                .schedule_repeating(self.config.tick_interval, EngineTimer::Tick),
        );

        debug!("clock started at {:?}", self.scheduler.now());
        self.events.push(GameEvent::GameStarted);
    }

    fn stop_clock(&mut self) {
        self.running = false;
        if let Some(tick) = self.tick.take() {
            self.scheduler.cancel(tick);
        }
    }

    fn resolve_pair(&mut self) {
        let (first, second) = (self.selection[0], self.selection[1]);

        let symbol = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) if a.pairs_with(b) => Some(a.symbol.clone()),
            _ => None,
        };

        match symbol {
            Some(symbol) => {
                for id in [first, second] {
                    if let Some(card) = self.deck.get_mut(id) {
                        card.matched = true;
                    }
                }
                self.matched_pairs += 1;
                self.selection.clear();

                debug!("matched {} and {} ({})", first, second, symbol);
                self.events.push(GameEvent::PairMatched { first, second, symbol });

                if self.matched_pairs == self.total_pairs() {
                    self.complete();
                }
            }
            None => {
                let timer = self.scheduler.schedule_once(
                    self.config.flip_back_delay,
                    EngineTimer::FlipBack { first, second },
                );
                self.flip_back = Some(timer);

                debug!("mismatch {} and {}, flipping back via {}", first, second, timer);
                self.events.push(GameEvent::PairMismatched { first, second });
            }
        }
    }

    fn complete(&mut self) {
        self.stop_clock();

        info!(
            "game complete: {} moves in {}s",
            self.moves, self.elapsed_seconds
        );
        self.events.push(GameEvent::GameCompleted {
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
        });
    }

    fn fire(&mut self, timer: Fired<EngineTimer>) {
        match timer.kind {
            EngineTimer::Tick => {
                if !self.running {
                    return;
                }
                // Not recorded as an event: `status()` carries elapsed time
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(timer.count);
                trace!("elapsed {}s at {:?}", self.elapsed_seconds, timer.at);
            }
            EngineTimer::FlipBack { first, second } => {
                if self.flip_back != Some(timer.id) {
                    trace!("dropping stale {}", timer.id);
                    return;
                }
                self.flip_back = None;

                for id in [first, second] {
                    if let Some(card) = self.deck.get_mut(id) {
                        card.face_up = false;
                    }
                }
                self.selection.clear();

                debug!("hid {} and {}", first, second);
                self.events.push(GameEvent::CardsHidden { first, second });
            }
        }
    }

    // === Queries ===

    /// Game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The live deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Get a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id)
    }

    /// Cards picked in the current attempt.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Completed two-card attempts, matched or not.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Number of pairs in the deck (`K`).
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.pair_count()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Is the elapsed-time clock counting?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Are all pairs matched?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    /// Is a mismatched pair waiting to flip back?
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.flip_back.is_some()
    }

    /// Current turn phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.is_complete() {
            TurnPhase::Complete
        } else if self.is_resolving() {
            TurnPhase::Resolving
        } else if self.selection.len() == 1 {
            TurnPhase::OneChosen
        } else {
            TurnPhase::Empty
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until a pending mismatch flips back.
    #[must_use]
    pub fn flip_back_remaining(&self) -> Option<Duration> {
        self.flip_back.and_then(|id| self.scheduler.remaining(id))
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// RNG position, for reproducing the next deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Counters for the status readout.
    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            elapsed_seconds: self.elapsed_seconds,
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
        }
    }

    /// Freeze the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            deck: self.deck.clone(),
            status: self.status(),
            running: self.running,
            phase: self.phase(),
            selection: self.selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Symbol;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    /// Two IDs sharing a symbol.
    fn pair_of(game: &GameEngine, symbol: &Symbol) -> (CardId, CardId) {
        let ids: Vec<_> = game
            .deck()
            .iter()
            .filter(|c| &c.symbol == symbol)
            .map(|c| c.id)
            .collect();
        (ids[0], ids[1])
    }

    /// Two IDs with different symbols.
    fn mismatch_of(game: &GameEngine) -> (CardId, CardId) {
        let first = game.deck().iter().next().unwrap();
        let other = game
            .deck()
            .iter()
            .find(|c| c.symbol != first.symbol)
            .unwrap();
        (first.id, other.id)
    }

    #[test]
    fn test_initial_state() {
        let game = GameEngine::with_seed(42);

        assert_eq!(game.deck().len(), 16);
        assert_eq!(game.total_pairs(), 8);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.matched_pairs(), 0);
        assert_eq!(game.elapsed_seconds(), 0);
        assert!(!game.is_running());
        assert!(!game.is_complete());
        assert_eq!(game.phase(), TurnPhase::Empty);
        assert_eq!(game.pending_timers(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            symbols: vec![],
            ..GameConfig::default()
        };
        assert_eq!(GameEngine::new(config).unwrap_err(), ConfigError::TooFewSymbols);
    }

    #[test]
    fn test_first_pick_starts_clock() {
        let mut game = GameEngine::with_seed(42);

        assert!(game.select_card(CardId(0)));
        assert!(game.is_running());
        assert_eq!(game.phase(), TurnPhase::OneChosen);
        assert_eq!(game.selection(), &[CardId(0)]);
        assert_eq!(game.pending_timers(), 1);
    }

    #[test]
    fn test_reselecting_face_up_card_is_noop() {
        let mut game = GameEngine::with_seed(42);
        game.select_card(CardId(0));
        let before = game.snapshot();

        assert!(!game.select_card(CardId(0)));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_unknown_card_is_noop() {
        let mut game = GameEngine::with_seed(42);

        assert!(!game.select_card(CardId(99)));
        assert!(!game.is_running());
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut game = GameEngine::with_seed(42);
        let symbol = game.deck().iter().next().unwrap().symbol.clone();
        let (a, b) = pair_of(&game, &symbol);

        game.select_card(a);
        game.select_card(b);

        assert!(game.card(a).unwrap().matched);
        assert!(game.card(b).unwrap().matched);
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.moves(), 1);
        assert!(game.selection().is_empty());
        assert!(!game.is_resolving());
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut game = GameEngine::with_seed(42);
        let (a, b) = mismatch_of(&game);

        game.select_card(a);
        game.select_card(b);
        assert_eq!(game.phase(), TurnPhase::Resolving);
        assert_eq!(game.flip_back_remaining(), Some(secs(1)));

        game.advance(Duration::from_millis(999));
        assert!(game.card(a).unwrap().face_up);
        assert!(game.card(b).unwrap().face_up);

        game.advance(Duration::from_millis(1));
        assert!(!game.card(a).unwrap().face_up);
        assert!(!game.card(b).unwrap().face_up);
        assert!(game.selection().is_empty());
        assert_eq!(game.phase(), TurnPhase::Empty);
    }

    #[test]
    fn test_clicks_ignored_while_resolving() {
        let mut game = GameEngine::with_seed(42);
        let (a, b) = mismatch_of(&game);
        game.select_card(a);
        game.select_card(b);

        let third = game
            .deck()
            .iter()
            .find(|c| c.id != a && c.id != b)
            .unwrap()
            .id;

        assert!(!game.select_card(third));
        assert!(!game.card(third).unwrap().face_up);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_restart_cancels_pending_flip_back() {
        let mut game = GameEngine::with_seed(42);
        let (a, b) = mismatch_of(&game);
        game.select_card(a);
        game.select_card(b);

        game.restart();
        assert_eq!(game.pending_timers(), 0);

        game.select_card(a);
        game.advance(secs(2));

        // The old revert never fired, so the new pick is still face-up
        assert!(game.card(a).unwrap().face_up);
        assert_eq!(game.selection(), &[a]);
    }

    #[test]
    fn test_elapsed_counts_while_running() {
        let mut game = GameEngine::with_seed(42);

        game.advance(secs(5));
        assert_eq!(game.elapsed_seconds(), 0);

        game.select_card(CardId(0));
        game.advance(Duration::from_millis(3500));
        assert_eq!(game.elapsed_seconds(), 3);
    }

    #[test]
    fn test_advance_to_end_of_time() {
        let mut game = GameEngine::with_seed(42);
        game.select_card(CardId(0));
        game.advance(secs(1));
        assert_eq!(game.elapsed_seconds(), 1);

        // Catches up on every remaining second in one firing
        assert_eq!(game.advance(Duration::MAX), 1);
        assert_eq!(game.now(), Duration::MAX);
        assert_eq!(game.elapsed_seconds(), u64::MAX);

        assert_eq!(game.advance(secs(1)), 0);
        assert_eq!(game.elapsed_seconds(), u64::MAX);

        // A fresh game still deals and accepts input at the end of time
        game.restart();
        assert!(game.select_card(CardId(0)));
        assert_eq!(game.elapsed_seconds(), 0);
    }

    #[test]
    fn test_advance_to_end_of_time_while_idle() {
        let mut game = GameEngine::with_seed(42);
        game.advance(secs(1));

        assert_eq!(game.advance(Duration::MAX), 0);
        assert_eq!(game.now(), Duration::MAX);
        assert_eq!(game.elapsed_seconds(), 0);
    }

    #[test]
    fn test_idle_clock_records_no_events() {
        let mut game = GameEngine::with_seed(42);
        game.select_card(CardId(0));

        for _ in 0..3600 {
            game.advance(secs(1));
        }

        assert_eq!(game.elapsed_seconds(), 3600);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::NewGame { pairs: 8 },
                GameEvent::GameStarted,
                GameEvent::CardRevealed { card: CardId(0) },
            ]
        );
    }

    #[test]
    fn test_events_are_drained() {
        let mut game = GameEngine::with_seed(42);
        assert_eq!(game.drain_events(), vec![GameEvent::NewGame { pairs: 8 }]);

        game.select_card(CardId(3));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::GameStarted, GameEvent::CardRevealed { card: CardId(3) }]
        );
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_single_pair_game_completes() {
        let config = GameConfig::builder().symbols(["only"]).seed(1).build().unwrap();
        let mut game = GameEngine::new(config).unwrap();

        game.select_card(CardId(0));
        game.advance(secs(2));
        game.select_card(CardId(1));

        assert!(game.is_complete());
        assert!(!game.is_running());
        assert_eq!(game.phase(), TurnPhase::Complete);
        assert_eq!(game.elapsed_seconds(), 2);
        assert_eq!(game.pending_timers(), 0);

        game.advance(secs(10));
        assert_eq!(game.elapsed_seconds(), 2);
    }
}
