//! Virtual-clock timer queue.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    /// Handle of the timer. Repeating timers keep the same handle.
    pub id: TimerId,
    /// Payload given at scheduling time.
    pub kind: K,
    /// Virtual time of the last period covered.
    pub at: Duration,
    /// Periods covered by this firing. Always 1 for one-shot timers; a
    /// repeating timer that fell several intervals behind fires once with
    /// the number of periods it caught up on.
    pub count: u64,
}

#[derive(Clone, Debug)]
struct Pending<K> {
    id: TimerId,
    deadline: Duration,
    interval: Option<Duration>,
    /// Scheduling order, breaks deadline ties.
    sequence: u64,
    kind: K,
}

/// Timer queue driven by a virtual clock.
///
/// Nothing fires on its own: the owner calls `pop_due` with a target time
/// and handles each due timer in deadline order, then `advance_to` to
/// settle the clock. Timers with equal deadlines fire in the order they
/// were scheduled.
///
/// ```
/// use std::time::Duration;
/// use memory_match::timers::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule_once(Duration::from_secs(1), "flip");
/// let tick = scheduler.schedule_repeating(Duration::from_millis(400), "tick");
///
/// let until = Duration::from_secs(1);
/// let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(until))
///     .map(|f| (f.kind, f.count))
///     .collect();
/// scheduler.advance_to(until);
///
/// // Both ticks before the flip are reported together
/// assert_eq!(fired, vec![("tick", 2), ("flip", 1)]);
/// assert!(scheduler.is_pending(tick));
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    now: Duration,
    next_id: u64,
    next_sequence: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_sequence: 0,
            pending: Vec::new(),
        }
    }
}

impl<K: Clone> Scheduler<K> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire once, `delay` after now.
    pub fn schedule_once(&mut self, delay: Duration, kind: K) -> TimerId {
        self.push(delay, None, kind)
    }

    /// Fire every `interval`, first at `interval` after now.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero. `GameConfig::validate` rejects a zero
    /// tick interval, so the engine never schedules one.
    pub fn schedule_repeating(&mut self, interval: Duration, kind: K) -> TimerId {
        assert!(!interval.is_zero(), "Repeating timer interval must be non-zero");
        self.push(interval, Some(interval), kind)
    }

    fn push(&mut self, delay: Duration, interval: Option<Duration>, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let sequence = self.bump_sequence();

        self.pending.push(Pending {
            id,
            deadline: self.now.saturating_add(delay),
            interval,
            sequence,
            kind,
        });
        id
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    /// Cancel a timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending timer. The clock keeps its current time.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Is this timer still waiting to fire?
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time left until a pending timer fires.
    #[must_use]
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.pending
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.deadline.saturating_sub(self.now))
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Moves the clock to the timer's deadline. A repeating timer is
    /// re-armed at `deadline + interval`, so ticks never drift. When it is
    /// several periods behind, the missed periods are reported through
    /// `Fired::count` in one call, up to (not including) the next deadline
    /// of any other timer, so firing order across timers is unchanged.
    /// A repeating timer whose next deadline would pass `Duration::MAX`
    /// is dropped.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<K>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.sequence))
            .map(|(i, _)| i)?;

        let timer = self.pending.swap_remove(index);

        let (count, last) = match timer.interval {
            Some(interval) => {
                let next_other = self.pending.iter().map(|p| p.deadline).min();
                let count = catch_up_periods(timer.deadline, interval, until, next_other);
                let last = timer
                    .deadline
                    .saturating_add(periods_span(interval, count - 1));
                (count, last)
            }
            None => (1, timer.deadline),
        };
        self.now = self.now.max(last);

        if let Some(next) = timer.interval.and_then(|interval| last.checked_add(interval)) {
            let sequence = self.bump_sequence();
            self.pending.push(Pending {
                id: timer.id,
                deadline: next,
                interval: timer.interval,
                sequence,
                kind: timer.kind.clone(),
            });
        }

        Some(Fired {
            id: timer.id,
            kind: timer.kind,
            at: last,
            count,
        })
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    /// Call after draining `pop_due(until)`. The clock never moves back.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Periods of a repeating timer due at `deadline` that fire before `until`
/// and strictly before `next_other`. At least 1.
fn catch_up_periods(
    deadline: Duration,
    interval: Duration,
    until: Duration,
    next_other: Option<Duration>,
) -> u64 {
    let step = interval.as_nanos();
    let by_until = until.saturating_sub(deadline).as_nanos() / step;

    let extra = match next_other {
        Some(other) if other > deadline => {
            by_until.min((other - deadline).as_nanos().saturating_sub(1) / step)
        }
        Some(_) => 0,
        None => by_until,
    };

    u64::try_from(extra).map_or(u64::MAX, |extra| extra.saturating_add(1))
}

/// `interval * periods`, saturating at `Duration::MAX`.
fn periods_span(interval: Duration, periods: u64) -> Duration {
    interval
        .as_nanos()
        .checked_mul(u128::from(periods))
        .and_then(|nanos| {
            let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
            Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
        })
        .unwrap_or(Duration::MAX)
}
