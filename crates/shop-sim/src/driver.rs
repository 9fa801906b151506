//! The store clock: advances time and receives deliveries.

use std::sync::Arc;

use shop_actors::StoreContext;
use shop_core::{ActorId, ActorRng, EventKind, Item, PerCategory, StoreConfig, Tick};
use tracing::debug;

/// The slice of [`StoreConfig`] the clock driver needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// A delivery arrives with probability `1 / delivery_interval` per tick.
    pub delivery_interval:  u32,
    pub items_per_delivery: usize,
}

impl From<&StoreConfig> for DriverConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            delivery_interval:  config.delivery_interval,
            items_per_delivery: config.items_per_delivery,
        }
    }
}

/// Totals over the driver's whole run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DriverStats {
    pub ticks:      u64,
    pub deliveries: usize,
    pub delivered:  usize,
}

/// Owner of the store's tick counter.
///
/// The only component that calls [`Clock::advance`](shop_core::Clock::advance).
pub struct ClockDriver {
    ctx:    Arc<StoreContext>,
    config: DriverConfig,
    rng:    ActorRng,
    stats:  DriverStats,
}

impl ClockDriver {
    pub fn new(ctx: Arc<StoreContext>, config: DriverConfig, rng: ActorRng) -> Self {
        Self { ctx, config, rng, stats: DriverStats::default() }
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Sleep a tick, then [`tick`](Self::tick), until shutdown is requested.
    pub fn run(mut self) -> DriverStats {
        self.emit(EventKind::ActorStarted);
        while !self.ctx.is_shutting_down() {
            self.ctx.clock().sleep_ticks(1);
            self.tick();
        }
        self.emit(EventKind::ActorStopped);
        self.stats
    }

    /// Advance the clock, report store status, and maybe take a delivery.
    pub fn tick(&mut self) -> Tick {
        let now = self.ctx.clock().advance();
        self.stats.ticks += 1;

        self.emit(EventKind::TickStatus {
            stock:   self.ctx.stock_snapshot(),
            waiting: self.ctx.waiting_snapshot(),
            boxed:   self.ctx.boxed_snapshot(),
        });

        if self.rng.one_in(self.config.delivery_interval) {
            self.receive_delivery();
        }
        now
    }

    /// Put `items_per_delivery` random items into the delivery box.
    /// Returns how many of each category arrived.
    pub fn receive_delivery(&mut self) -> PerCategory<usize> {
        let mut counts = PerCategory::<usize>::default();
        let mut guard = self.ctx.delivery_box.lock();
        for _ in 0..self.config.items_per_delivery {
            let category = self.rng.category();
            guard.add(Item::new(category));
            counts[category] += 1;
        }
        guard.unlock();

        self.stats.deliveries += 1;
        self.stats.delivered += counts.total();
        debug!(items = counts.total(), pending = self.ctx.delivery_box.pending(), "delivery received");
        self.emit(EventKind::DeliveryReceived { counts: counts.clone() });
        counts
    }

    fn emit(&self, kind: EventKind) {
        self.ctx.emit(ActorId::Store, kind);
    }
}
