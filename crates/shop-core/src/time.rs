//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter, advanced only by the
//! store's clock driver.  Every actor reads it (to act at most once per tick)
//! and sleeps in multiples of the tick duration.
//!
//! Actors never call `std::thread::sleep` directly; they go through the
//! [`Clock`] trait so tests can substitute a [`ManualClock`] whose sleeps
//! return immediately.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// The time source every actor is built against.
///
/// `advance` belongs to the clock driver alone; actors only read and sleep.
pub trait Clock: Send + Sync {
    /// The current tick.
    fn now(&self) -> Tick;

    /// Move to the next tick and return it.
    fn advance(&self) -> Tick;

    /// Wall-clock length of one tick.
    fn tick_duration(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);

    /// Block the calling thread for `ticks` ticks' worth of time.
    fn sleep_ticks(&self, ticks: u64) {
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.sleep(self.tick_duration().saturating_mul(ticks));
    }
}

// ── StoreClock ────────────────────────────────────────────────────────────────

/// The real clock: an atomic tick counter plus real sleeps.
#[derive(Debug)]
pub struct StoreClock {
    tick:          AtomicU64,
    tick_duration: Duration,
}

impl StoreClock {
    pub fn new(tick_duration: Duration) -> Self {
        Self {
            tick: AtomicU64::new(0),
            tick_duration,
        }
    }

    /// Convenience constructor from the config's `TICK_TIME` in milliseconds.
    pub fn from_millis(tick_time_ms: u64) -> Self {
        Self::new(Duration::from_millis(tick_time_ms))
    }
}

impl Clock for StoreClock {
    #[inline]
    fn now(&self) -> Tick {
        Tick(self.tick.load(Ordering::Acquire))
    }

    fn advance(&self) -> Tick {
        Tick(self.tick.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A clock for tests: ticks move only when told to, and sleeps return at once.
///
/// Time "spent" sleeping is accumulated so tests can assert on simulated
/// delays without waiting for them.
#[derive(Debug, Default)]
pub struct ManualClock {
    tick:        AtomicU64,
    slept_nanos: AtomicU64,
    tick_nanos:  u64,
}

impl ManualClock {
    /// A manual clock whose ticks are `tick_duration` long.
    pub fn new(tick_duration: Duration) -> Self {
        Self {
            tick:        AtomicU64::new(0),
            slept_nanos: AtomicU64::new(0),
            tick_nanos:  u64::try_from(tick_duration.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Jump straight to `tick`.
    pub fn set(&self, tick: Tick) {
        self.tick.store(tick.0, Ordering::Release);
    }

    /// Total time requested through [`Clock::sleep`] so far.
    pub fn slept(&self) -> Duration {
        Duration::from_nanos(self.slept_nanos.load(Ordering::Acquire))
    }

    /// Total requested sleep expressed in whole ticks (rounded down).
    pub fn slept_ticks(&self) -> u64 {
        match self.tick_nanos {
            0 => 0,
            n => self.slept_nanos.load(Ordering::Acquire) / n,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        Tick(self.tick.load(Ordering::Acquire))
    }

    fn advance(&self) -> Tick {
        Tick(self.tick.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn tick_duration(&self) -> Duration {
        Duration::from_nanos(self.tick_nanos)
    }

    fn sleep(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.slept_nanos.fetch_add(nanos, Ordering::AcqRel);
        std::thread::yield_now();
    }
}
