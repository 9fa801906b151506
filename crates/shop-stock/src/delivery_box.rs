//! The shared delivery box.
//!
//! One coarse lock guards every category's queue: the assistant's selection
//! heuristic compares counts across categories and needs them to be
//! mutually consistent while it picks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use shop_core::{Category, Item, PerCategory};
use shop_sync::{FairMutex, FairMutexGuard};

/// Items delivered to the store but not yet shelved.
#[derive(Default)]
pub struct DeliveryBox {
    queues:      FairMutex<PerCategory<VecDeque<Item>>>,
    pending:     AtomicUsize,
    count_hints: PerCategory<AtomicUsize>,
}

impl DeliveryBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait (FIFO) for exclusive access to the box.
    pub fn lock(&self) -> BoxGuard<'_> {
        BoxGuard { owner: self, queues: self.queues.lock() }
    }

    /// `true` while an actor holds the box lock.
    pub fn is_locked(&self) -> bool {
        self.queues.is_locked()
    }

    /// Aggregate pending items, read without the lock.
    ///
    /// Good for skipping work when the box is certainly empty; re-check under
    /// the lock before acting on a non-zero value.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Pending items of `category` as of the last mutation.  For status
    /// reporting only.
    #[inline]
    pub fn count_hint(&self, category: Category) -> usize {
        self.count_hints[category].load(Ordering::Acquire)
    }
}

// ── BoxGuard ──────────────────────────────────────────────────────────────────

/// Exclusive access to the delivery box.  Dropping it releases the lock.
pub struct BoxGuard<'a> {
    owner:  &'a DeliveryBox,
    queues: FairMutexGuard<'a, PerCategory<VecDeque<Item>>>,
}

impl BoxGuard<'_> {
    /// Put a delivered item in its category's queue.
    pub fn add(&mut self, item: Item) {
        let category = item.category();
        self.queues[category].push_back(item);
        self.owner.pending.fetch_add(1, Ordering::AcqRel);
        self.sync_hint(category);
    }

    /// Take the oldest item of `category`, or `None` if there is none.
    pub fn take(&mut self, category: Category) -> Option<Item> {
        let item = self.queues[category].pop_front()?;
        self.owner.pending.fetch_sub(1, Ordering::AcqRel);
        self.sync_hint(category);
        Some(item)
    }

    #[inline]
    pub fn count_of(&self, category: Category) -> usize {
        self.queues[category].len()
    }

    /// A consistent snapshot of every category's count.
    pub fn counts(&self) -> PerCategory<usize> {
        PerCategory::from_fn(|c| self.count_of(c))
    }

    /// Aggregate pending count.  Exact while the guard is held.
    #[inline]
    pub fn pending(&self) -> usize {
        self.owner.pending()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Release the lock.
    pub fn unlock(self) {
        drop(self);
    }

    fn sync_hint(&self, category: Category) {
        self.owner.count_hints[category].store(self.queues[category].len(), Ordering::Release);
    }
}
