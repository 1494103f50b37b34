//! Game configuration.
//!
//! A game is configured once, at construction:
//! - Which symbols are dealt (each becomes one pair)
//! - How long a mismatched pair stays visible
//! - How often the elapsed-time counter ticks
//! - An optional seed for reproducible decks
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::GameConfig;
//!
//! let config = GameConfig::builder()
//!     .symbols(["A", "B", "C"])
//!     .flip_back_delay(Duration::from_millis(500))
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.pair_count(), 3);
//! ```

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::Symbol;
use super::error::ConfigError;

/// Symbols dealt when no custom set is configured.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["😀", "🎉", "🐶", "🍕", "🌈", "🚀", "🏀", "🎵"];

/// How long a mismatched pair stays face-up by default.
pub const DEFAULT_FLIP_BACK_DELAY: Duration = Duration::from_secs(1);

/// Elapsed-time counter resolution by default.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Distinct symbols, one pair per symbol.
    pub symbols: Vec<Symbol>,

    /// Delay before a mismatched pair flips back face-down.
    pub flip_back_delay: Duration,

    /// Interval between elapsed-time increments.
    pub tick_interval: Duration,

    /// Seed for deck shuffling. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|&s| Symbol::from(s)).collect(),
            flip_back_delay: DEFAULT_FLIP_BACK_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::new()
    }

    /// Number of pairs in a deck (`K`).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Check that the configuration can produce a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::TooFewSymbols);
        }

        let mut seen = FxHashSet::default();
        for symbol in &self.symbols {
            if !seen.insert(symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.flip_back_delay.is_zero() {
            return Err(ConfigError::ZeroDelay);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }
}

/// Builder for `GameConfig`.
#[derive(Clone, Debug, Default)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the symbol set.
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.config.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn flip_back_delay(mut self, delay: Duration) -> Self {
        self.config.flip_back_delay = delay;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
