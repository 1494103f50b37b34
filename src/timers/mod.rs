//! Timers on a virtual clock.
//!
//! The engine never sleeps or spawns. Hosts feed elapsed time in with
//! `GameEngine::advance`, and the scheduler reports which timers came due
//! so the engine can apply them in order. Two kinds of timer exist in a
//! game:
//!
//! - A repeating tick that counts elapsed seconds while the game runs
//! - A one-shot flip-back per mismatched pair

pub mod scheduler;

pub use scheduler::{Fired, Scheduler, TimerId};
