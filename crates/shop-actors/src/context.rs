//! State shared by every actor thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shop_core::{ActorId, Clock, EventKind, EventSink, PerCategory, StoreEvent, Tick};
use shop_stock::{DeliveryBox, Sections};

/// The store as seen by its actors.
///
/// Built once per run and shared behind an `Arc`.  The clock and the event
/// sink are injected so tests can drive time by hand and record events.
pub struct StoreContext {
    pub sections:     Sections,
    pub delivery_box: DeliveryBox,
    clock:            Arc<dyn Clock>,
    sink:             Arc<dyn EventSink>,
    shutdown:         AtomicBool,
}

impl StoreContext {
    pub fn new(
        sections:     Sections,
        delivery_box: DeliveryBox,
        clock:        Arc<dyn Clock>,
        sink:         Arc<dyn EventSink>,
    ) -> Self {
        Self { sections, delivery_box, clock, sink, shutdown: AtomicBool::new(false) }
    }

    #[inline]
    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    /// The current store tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Report `kind` on behalf of `actor`, stamped with the current tick.
    pub fn emit(&self, actor: ActorId, kind: EventKind) {
        self.sink.emit(StoreEvent { tick: self.clock.now(), actor, kind });
    }

    /// Ask every actor to stop at its next lock-free checkpoint.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Waiting customers per section, read without any lock.
    pub fn waiting_snapshot(&self) -> PerCategory<usize> {
        self.sections.map(|_, s| s.waiting_customers())
    }

    /// Stock per section as of each section's last mutation.
    pub fn stock_snapshot(&self) -> PerCategory<usize> {
        self.sections.map(|_, s| s.stock_hint())
    }

    /// Delivery-box backlog per category as of the last mutation.
    pub fn boxed_snapshot(&self) -> PerCategory<usize> {
        PerCategory::from_fn(|c| self.delivery_box.count_hint(c))
    }
}
