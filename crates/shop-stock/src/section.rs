//! Per-category store sections.

use std::sync::atomic::{AtomicUsize, Ordering};

use shop_core::{Category, Item, PerCategory};
use shop_sync::{FairMutex, FairMutexGuard};

use crate::{StockError, StockResult};

/// The store's sections, one per category.
pub type Sections = PerCategory<Section>;

/// Open one section per category, each stocked with `initial_items` items.
pub fn open_sections(initial_items: usize) -> Sections {
    PerCategory::from_fn(|category| Section::new(category, initial_items))
}

/// A shelf holding stock of a single category, plus the count of customers
/// waiting for it to be restocked.
///
/// Stock is reached through [`lock`](Self::lock).  The waiting counter is an
/// atomic of its own; customers register and deregister without the stock
/// lock, so a customer never sleeps while holding it.
pub struct Section {
    category:   Category,
    shelf:      FairMutex<Vec<Item>>,
    waiting:    AtomicUsize,
    stock_hint: AtomicUsize,
}

impl Section {
    /// A section of `category` pre-filled with `initial_items` items.
    pub fn new(category: Category, initial_items: usize) -> Self {
        Self {
            category,
            shelf:      FairMutex::new(vec![Item::new(category); initial_items]),
            waiting:    AtomicUsize::new(0),
            stock_hint: AtomicUsize::new(initial_items),
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Wait (FIFO) for exclusive access to the stock.
    pub fn lock(&self) -> ShelfGuard<'_> {
        ShelfGuard { section: self, items: self.shelf.lock() }
    }

    /// `true` while an actor holds this section's lock.
    pub fn is_locked(&self) -> bool {
        self.shelf.is_locked()
    }

    /// Register one more waiting customer.  Returns the new count.
    pub fn add_waiting_customer(&self) -> usize {
        self.waiting.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Deregister a waiting customer.  Returns the new count.
    ///
    /// Saturates at zero: an unmatched call leaves the counter at zero
    /// rather than wrapping.
    pub fn remove_waiting_customer(&self) -> usize {
        match self
            .waiting
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(previous) => previous - 1,
            Err(_) => {
                debug_assert!(false, "unmatched remove_waiting_customer on {}", self.category);
                0
            }
        }
    }

    /// Customers currently waiting for stock.  May be stale.
    #[inline]
    pub fn waiting_customers(&self) -> usize {
        self.waiting.load(Ordering::Acquire)
    }

    /// Stock count as of the last mutation, readable without the lock.
    /// For status reporting only.
    #[inline]
    pub fn stock_hint(&self) -> usize {
        self.stock_hint.load(Ordering::Acquire)
    }
}

// ── ShelfGuard ────────────────────────────────────────────────────────────────

/// Exclusive access to one section's stock.  Dropping it releases the lock.
pub struct ShelfGuard<'a> {
    section: &'a Section,
    items:   FairMutexGuard<'a, Vec<Item>>,
}

impl ShelfGuard<'_> {
    #[inline]
    pub fn category(&self) -> Category {
        self.section.category
    }

    /// Current stock.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Shelve an item.  Rejects items of any other category.
    pub fn add_item(&mut self, item: Item) -> StockResult<()> {
        if item.category() != self.section.category {
            return Err(StockError::WrongCategory {
                expected: self.section.category,
                got:      item.category(),
            });
        }
        self.items.push(item);
        self.sync_hint();
        Ok(())
    }

    /// Take one item off the shelf, or `None` if the shelf is empty.
    ///
    /// Which item is unspecified; items of one category are interchangeable.
    pub fn remove_item(&mut self) -> Option<Item> {
        let item = self.items.pop()?;
        self.sync_hint();
        Some(item)
    }

    /// Release the lock.
    pub fn unlock(self) {
        drop(self);
    }

    fn sync_hint(&self) {
        self.section.stock_hint.store(self.items.len(), Ordering::Release);
    }
}
