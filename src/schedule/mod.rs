//! Fixed-rate sampling of a continuous embedding stream.
//!
//! Embeddings arrive at whatever rate the capture side produces them; the
//! engine classifies at a fixed tick rate and only ever looks at the newest
//! sample. There is no queueing and no backpressure: for a live gesture
//! stream only the latest frame matters.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::embedding::Embedding;


/// Default classification rate, ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 5;

/// A capability producing, on demand, the most recent embedding.
///
/// `latest` consumes: a second call without a new arrival returns `None`,
/// which the engine treats as a skipped tick. Implementations must never
/// block.
pub trait EmbeddingSource {
    /// Takes the most recent embedding, if one arrived since the last call.
    fn latest(&mut self) -> Option<Embedding>;
}

impl<F> EmbeddingSource for F
where
    F: FnMut() -> Option<Embedding>,
{
    fn latest(&mut self) -> Option<Embedding> {
        self()
    }
}

/// Single-slot, last-value-wins embedding mailbox.
///
/// The capture side calls [`LatestSlot::publish`] from its own thread; each
/// publish overwrites whatever the engine has not yet consumed. Clones share
/// the slot.
///
/// # Examples
///
/// ```
/// use gesto::embedding::Embedding;
/// use gesto::schedule::{EmbeddingSource, LatestSlot};
///
/// let mut slot = LatestSlot::new();
/// slot.publish(Embedding::from_slice(&[1.0]));
/// slot.publish(Embedding::from_slice(&[2.0]));
/// assert_eq!(slot.latest(), Some(Embedding::from_slice(&[2.0])));
/// assert_eq!(slot.latest(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LatestSlot {
    inner: Arc<Mutex<Option<Embedding>>>,
}

impl LatestSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an embedding, replacing any unconsumed one.
    pub fn publish(&self, embedding: Embedding) {
        *self.lock() = Some(embedding);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Embedding>> {
        // A panicked publisher cannot leave the slot in a torn state; the
        // value is replaced or taken atomically either way.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EmbeddingSource for LatestSlot {
    fn latest(&mut self) -> Option<Embedding> {
        self.lock().take()
    }
}

/// Wall-clock gate deciding when a classification tick is due.
///
/// Replaces ad hoc frame-interval arithmetic: the engine asks
/// [`Throttle::tick_due`] once per poll and classifies only when it answers
/// true. The first poll after construction (or [`Throttle::reset`]) is always
/// due.
#[derive(Debug, Clone)]
pub struct Throttle {
    period: Duration,
    last_tick: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle at the default rate of 5 ticks per second.
    #[must_use]
    pub fn new() -> Self {
        Self::per_second(DEFAULT_TICK_RATE)
    }

    /// Creates a throttle ticking `rate` times per second. A zero rate is
    /// clamped to one tick per second.
    #[must_use]
    pub fn per_second(rate: u32) -> Self {
        let rate = rate.max(1);
        Self {
            period: Duration::from_secs(1) / rate,
            last_tick: None,
        }
    }

    /// Creates a throttle with an explicit tick period.
    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            last_tick: None,
        }
    }

    /// Returns the tick period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true when a tick is due at `now`, and records it.
    ///
    /// The schedule stays phase-locked: a late poll does not shift every
    /// subsequent tick, only the fractional remainder carries over.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                true
            }
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if elapsed >= self.period {
                    let periods = elapsed.as_nanos() / self.period.as_nanos().max(1);
                    self.last_tick = Some(last + self.period * periods as u32);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Forgets the last tick; the next poll is due immediately.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new()
    }
}
