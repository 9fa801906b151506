//! Plain data row types written by output backends.

use shop_core::{EventKind, StoreEvent};

/// One actor event, flattened.  Status snapshots are written as
/// [`StatusRow`]s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:         u64,
    /// `store`, `assistant-N` or `customer-N`.
    pub actor:        String,
    /// [`EventKind::label`].
    pub event:        &'static str,
    /// Upper-case category name, when the event concerns one.
    pub category:     Option<&'static str>,
    /// The event's main quantity: items taken, shelved, carried or
    /// delivered, or the length of a break.
    pub count:        Option<u64>,
    pub waited_ticks: Option<u64>,
}

impl EventRow {
    pub fn from_event(event: &StoreEvent) -> Self {
        let count = match &event.kind {
            EventKind::DeliveryReceived { counts } => Some(counts.total() as u64),
            EventKind::BreakStarted { ticks } => Some(*ticks),
            EventKind::ItemsTaken { count, .. } => Some(*count as u64),
            EventKind::PullFinished { taken, .. } => Some(*taken as u64),
            EventKind::WalkingToSection { carried, .. } => Some(*carried as u64),
            EventKind::RestockFinished { added, .. } => Some(*added as u64),
            _ => None,
        };
        let waited_ticks = match event.kind {
            EventKind::Bought { waited_ticks, .. } => Some(waited_ticks),
            _ => None,
        };
        Self {
            tick: event.tick.0,
            actor: event.actor.to_string(),
            event: event.kind.label(),
            category: event.kind.category().map(|c| c.name()),
            count,
            waited_ticks,
        }
    }
}

/// One section's state at a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRow {
    pub tick:     u64,
    pub category: &'static str,
    pub stock:    usize,
    pub waiting:  usize,
    /// Items of this category still in the delivery box.
    pub boxed:    usize,
}

impl StatusRow {
    /// One row per category for a `TickStatus` event; empty for anything
    /// else.
    pub fn from_event(event: &StoreEvent) -> Vec<Self> {
        let EventKind::TickStatus { stock, waiting, boxed } = &event.kind else {
            return Vec::new();
        };
        stock
            .iter()
            .map(|(category, &n)| StatusRow {
                tick:     event.tick.0,
                category: category.name(),
                stock:    n,
                waiting:  waiting[category],
                boxed:    boxed[category],
            })
            .collect()
    }
}
