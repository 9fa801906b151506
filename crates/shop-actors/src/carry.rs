//! The items an assistant is carrying.

use std::collections::VecDeque;

use shop_core::{Category, Item};

/// A bounded FIFO of carried items.
///
/// Items leave in the order they were picked up, one category at a time:
/// the front item decides which section the assistant walks to next, and
/// every carried item of that category is shelved there.
#[derive(Clone, Debug)]
pub struct CarrySet {
    items:    VecDeque<Item>,
    capacity: usize,
}

impl CarrySet {
    pub fn new(capacity: usize) -> Self {
        Self { items: VecDeque::with_capacity(capacity), capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Pick up one item.  Hands it back if the carry-set is full.
    pub fn push(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Pick up items from `source` until full or `source` runs dry.
    /// Returns how many were picked up.
    pub fn fill_from<F>(&mut self, mut source: F) -> usize
    where
        F: FnMut() -> Option<Item>,
    {
        let mut taken = 0;
        while !self.is_full() {
            let Some(item) = source() else { break };
            self.items.push_back(item);
            taken += 1;
        }
        taken
    }

    /// Category of the oldest carried item.
    pub fn front_category(&self) -> Option<Category> {
        self.items.front().map(|item| item.category())
    }

    /// Remove every carried item of `category`, keeping the rest in order.
    pub fn drain_category(&mut self, category: Category) -> Vec<Item> {
        let (matching, rest): (VecDeque<Item>, VecDeque<Item>) =
            self.items.drain(..).partition(|item| item.category() == category);
        self.items = rest;
        matching.into()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
