//! # Fair mutex.
//!
//! A blocking mutex that grants the lock strictly in request order.
//!
//! Each call to [`FairMutex::lock`] draws a ticket from a turnstile and
//! sleeps on a condition variable until its ticket is being served.
//! Releasing the lock serves the next ticket and wakes the sleepers; only the
//! one whose number came up proceeds.  A late arrival can therefore never
//! overtake a thread that asked earlier, and every thread that keeps asking
//! gets the lock after a bounded number of hand-offs.
//!
//! |                  | `parking_lot::Mutex`   | `FairMutex`               |
//! |------------------|------------------------|---------------------------|
//! | Admission order  | unspecified (barging)  | FIFO by request           |
//! | Starvation       | possible in theory     | impossible                |
//! | Uncontended cost | one CAS                | two short internal locks  |
//!
//! The protected value lives in an inner `parking_lot::Mutex` that only the
//! ticket holder ever locks, so it is effectively uncontended.

use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::{Condvar, Mutex, MutexGuard};

/// Ticket counters.  `now_serving == next_ticket` means unlocked.
struct Turnstile {
    next_ticket: u64,
    now_serving: u64,
}

/// A mutual exclusion primitive with FIFO admission.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use shop_sync::FairMutex;
///
/// let stock = Arc::new(FairMutex::new(0));
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let stock = Arc::clone(&stock);
///         thread::spawn(move || *stock.lock() += 1)
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(*stock.lock(), 4);
/// ```
pub struct FairMutex<T> {
    turnstile: Mutex<Turnstile>,
    turn:      Condvar,
    data:      Mutex<T>,
}

impl<T> FairMutex<T> {
    /// Creates a new mutex in an unlocked state.
    pub const fn new(value: T) -> FairMutex<T> {
        FairMutex {
            turnstile: Mutex::new(Turnstile { next_ticket: 0, now_serving: 0 }),
            turn:      Condvar::new(),
            data:      Mutex::new(value),
        }
    }

    /// Acquires the mutex, blocking until every earlier requester has had
    /// its turn.
    ///
    /// Locking a mutex the calling thread already holds never returns.
    pub fn lock(&self) -> FairMutexGuard<'_, T> {
        let mut turnstile = self.turnstile.lock();
        let ticket = turnstile.next_ticket;
        turnstile.next_ticket += 1;
        while turnstile.now_serving != ticket {
            self.turn.wait(&mut turnstile);
        }
        drop(turnstile);
        FairMutexGuard { mutex: self, data: self.data.lock() }
    }

    /// `true` while some thread holds the lock.
    pub fn is_locked(&self) -> bool {
        let turnstile = self.turnstile.lock();
        turnstile.next_ticket != turnstile.now_serving
    }

    /// Number of threads blocked in [`lock`](Self::lock), not counting the holder.
    #[cfg(test)]
    pub(crate) fn queued(&self) -> usize {
        let turnstile = self.turnstile.lock();
        let outstanding = turnstile.next_ticket - turnstile.now_serving;
        outstanding.saturating_sub(1) as usize
    }

    fn release(&self) {
        let mut turnstile = self.turnstile.lock();
        turnstile.now_serving += 1;
        drop(turnstile);
        self.turn.notify_all();
    }
}

impl<T: Default> Default for FairMutex<T> {
    fn default() -> FairMutex<T> {
        FairMutex::new(T::default())
    }
}

impl<T> fmt::Debug for FairMutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turnstile = self.turnstile.lock();
        f.debug_struct("FairMutex")
            .field("locked", &(turnstile.next_ticket != turnstile.now_serving))
            .field("next_ticket", &turnstile.next_ticket)
            .field("now_serving", &turnstile.now_serving)
            .finish_non_exhaustive()
    }
}

// ── Guard ─────────────────────────────────────────────────────────────────────

/// Scoped ownership of a [`FairMutex`].
///
/// Dropping the guard (or calling [`unlock`](Self::unlock)) passes the lock
/// to the next thread in line.
pub struct FairMutexGuard<'a, T> {
    mutex: &'a FairMutex<T>,
    data:  MutexGuard<'a, T>,
}

impl<T> FairMutexGuard<'_, T> {
    /// Releases the lock.  Equivalent to dropping the guard, but reads better
    /// at call sites where the release point matters.
    pub fn unlock(self) {
        drop(self);
    }
}

impl<T> Deref for FairMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for FairMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T> Drop for FairMutexGuard<'_, T> {
    fn drop(&mut self) {
        // The next ticket holder may briefly wait on `data` until this
        // guard's inner lock is released right after this returns.
        self.mutex.release();
    }
}

impl<T: fmt::Debug> fmt::Debug for FairMutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.data, f)
    }
}
