//! Structured events emitted by the store and its actors.
//!
//! The core never formats or writes anything.  Every observable step is
//! reported as a [`StoreEvent`] to an [`EventSink`] chosen by the
//! application: log it, write it to CSV, or record it for a test.
//!
//! Sinks are called concurrently from every actor thread, sometimes while the
//! caller holds a section or delivery-box lock, so implementations must be
//! `Send + Sync` and must not block on store resources.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ActorId, Category, PerCategory, Tick};

/// Why an assistant picked a category during its pull phase.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PickReason {
    /// The category had the most waiting customers.
    WaitingCustomers,
    /// Nobody eligible was waiting; the category had the largest backlog in
    /// the delivery box.
    LargestBacklog,
}

/// What happened.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventKind {
    /// The actor's thread entered its loop.
    ActorStarted,
    /// The actor's thread left its loop after a shutdown request.
    ActorStopped,

    // ── Store ──────────────────────────────────────────────────────────────
    /// Per-tick snapshot: stock and waiting customers per section, pending
    /// items per category in the delivery box.  Counts may be slightly stale.
    TickStatus {
        stock:   PerCategory<usize>,
        waiting: PerCategory<usize>,
        boxed:   PerCategory<usize>,
    },
    /// A delivery was added to the delivery box.
    DeliveryReceived { counts: PerCategory<usize> },

    // ── Assistant ──────────────────────────────────────────────────────────
    BreakStarted { ticks: u64 },
    /// The assistant found the delivery box non-empty under its lock.
    BoxNoticed,
    CustomersWaitingSeen { category: Category },
    ItemsTaken { category: Category, count: usize, reason: PickReason },
    PullFinished { taken: usize, carried: usize },
    WalkingToSection { category: Category, carried: usize },
    RestockStarted { category: Category },
    ItemShelved { category: Category },
    RestockFinished { category: Category, added: usize },
    WalkingToDeliveryArea,

    // ── Customer ───────────────────────────────────────────────────────────
    BuyDecided { category: Category },
    WaitingStarted { category: Category },
    Buying { category: Category },
    Bought { category: Category, waited_ticks: u64 },
}

impl EventKind {
    /// Short snake_case label, stable across releases (used as a CSV column).
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::ActorStarted               => "actor_started",
            EventKind::ActorStopped               => "actor_stopped",
            EventKind::TickStatus { .. }           => "tick_status",
            EventKind::DeliveryReceived { .. }     => "delivery_received",
            EventKind::BreakStarted { .. }         => "break_started",
            EventKind::BoxNoticed                 => "box_noticed",
            EventKind::CustomersWaitingSeen { .. } => "customers_waiting_seen",
            EventKind::ItemsTaken { .. }           => "items_taken",
            EventKind::PullFinished { .. }         => "pull_finished",
            EventKind::WalkingToSection { .. }     => "walking_to_section",
            EventKind::RestockStarted { .. }       => "restock_started",
            EventKind::ItemShelved { .. }          => "item_shelved",
            EventKind::RestockFinished { .. }      => "restock_finished",
            EventKind::WalkingToDeliveryArea      => "walking_to_delivery_area",
            EventKind::BuyDecided { .. }           => "buy_decided",
            EventKind::WaitingStarted { .. }       => "waiting_started",
            EventKind::Buying { .. }               => "buying",
            EventKind::Bought { .. }               => "bought",
        }
    }

    /// The category the event concerns, if any.
    pub fn category(&self) -> Option<Category> {
        match *self {
            EventKind::CustomersWaitingSeen { category }
            | EventKind::ItemsTaken { category, .. }
            | EventKind::WalkingToSection { category, .. }
            | EventKind::RestockStarted { category }
            | EventKind::ItemShelved { category }
            | EventKind::RestockFinished { category, .. }
            | EventKind::BuyDecided { category }
            | EventKind::WaitingStarted { category }
            | EventKind::Buying { category }
            | EventKind::Bought { category, .. } => Some(category),
            _ => None,
        }
    }
}

/// One event, stamped with the tick it was observed at and its producer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StoreEvent {
    pub tick:  Tick,
    pub actor: ActorId,
    pub kind:  EventKind,
}

// ── Sinks ─────────────────────────────────────────────────────────────────────

/// Receives every event produced by a running store.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StoreEvent);
}

/// An [`EventSink`] that discards everything.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: StoreEvent) {}
}

/// An [`EventSink`] that keeps every event in memory, in arrival order.
///
/// Intended for tests and short runs; it grows without bound.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<StoreEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Number of recorded events matching `pred`.
    pub fn count<F: Fn(&StoreEvent) -> bool>(&self, pred: F) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: StoreEvent) {
        self.events.lock().push(event);
    }
}

/// Fan-out: both sinks see every event, `A` first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&self, event: StoreEvent) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: StoreEvent) {
        (**self).emit(event);
    }
}
