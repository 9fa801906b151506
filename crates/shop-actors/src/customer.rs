//! The purchasing customer.

use std::sync::Arc;
use std::time::Duration;

use shop_core::{ActorId, ActorRng, Category, CustomerId, EventKind, Item, StoreConfig, Tick};

use crate::{IDLE_PAUSE, StoreContext};

/// Time spent at the shelf paying for an item, section lock held.
pub const TIME_TO_BUY: Duration = Duration::from_millis(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerConfig {
    /// A customer decides to buy with probability `1 / buy_interval` per tick.
    pub buy_interval: u32,
}

impl From<&StoreConfig> for CustomerConfig {
    fn from(config: &StoreConfig) -> Self {
        Self { buy_interval: config.buy_interval }
    }
}

/// A completed purchase.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Purchase {
    pub item:         Item,
    /// Ticks spent waiting for the section to be restocked.
    pub waited_ticks: u64,
}

/// What one pass through the customer loop did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Step {
    /// Same tick as last time, or the customer decided not to buy.
    Idle,
    Bought(Purchase),
    /// The store shut down while the customer waited for `Category`.
    Abandoned(Category),
}

/// Totals over a customer's whole run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CustomerStats {
    pub purchases:    usize,
    pub waited_ticks: u64,
    /// Purchases given up because the store shut down mid-wait.
    pub abandoned:    usize,
}

pub struct Customer {
    id:        CustomerId,
    ctx:       Arc<StoreContext>,
    config:    CustomerConfig,
    rng:       ActorRng,
    last_tick: Tick,
}

impl Customer {
    pub fn new(
        id:     CustomerId,
        ctx:    Arc<StoreContext>,
        config: CustomerConfig,
        rng:    ActorRng,
    ) -> Self {
        Self { id, ctx, config, rng, last_tick: Tick::ZERO }
    }

    #[inline]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Loop until shutdown is requested.
    pub fn run(mut self) -> CustomerStats {
        self.emit(EventKind::ActorStarted);
        let mut stats = CustomerStats::default();
        while !self.ctx.is_shutting_down() {
            match self.step() {
                Step::Bought(purchase) => {
                    stats.purchases += 1;
                    stats.waited_ticks += purchase.waited_ticks;
                }
                Step::Abandoned(_) => stats.abandoned += 1,
                Step::Idle => {}
            }
            self.ctx.clock().sleep(IDLE_PAUSE);
        }
        self.emit(EventKind::ActorStopped);
        stats
    }

    /// One loop iteration: at most one buying decision per tick.
    pub fn step(&mut self) -> Step {
        let now = self.ctx.now();
        if now == self.last_tick {
            return Step::Idle;
        }
        self.last_tick = now;

        if !self.rng.one_in(self.config.buy_interval) {
            return Step::Idle;
        }
        let category = self.rng.category();
        self.emit(EventKind::BuyDecided { category });
        match self.buy(category) {
            Some(purchase) => Step::Bought(purchase),
            None => Step::Abandoned(category),
        }
    }

    /// Buy one item of `category`, waiting for a restock if the section is
    /// empty.
    ///
    /// While waiting the customer is registered, once, in the section's
    /// waiting counter and retries every tick without holding the lock.
    /// Returns `None` only if the store shuts down during the wait.
    pub fn buy(&self, category: Category) -> Option<Purchase> {
        let section = &self.ctx.sections[category];
        let mut registered = false;
        let mut waited_ticks = 0;

        let mut shelf = loop {
            let shelf = section.lock();
            if shelf.count() > 0 {
                break shelf;
            }
            shelf.unlock();

            if self.ctx.is_shutting_down() {
                if registered {
                    section.remove_waiting_customer();
                }
                return None;
            }
            if !registered {
                registered = true;
                section.add_waiting_customer();
                self.emit(EventKind::WaitingStarted { category });
            }
            self.ctx.clock().sleep_ticks(1);
            waited_ticks += 1;
        };

        if registered {
            section.remove_waiting_customer();
        }
        self.emit(EventKind::Buying { category });
        self.ctx.clock().sleep(TIME_TO_BUY);
        let item = shelf.remove_item()?;
        self.emit(EventKind::Bought { category, waited_ticks });
        shelf.unlock();

        Some(Purchase { item, waited_ticks })
    }

    fn emit(&self, kind: EventKind) {
        self.ctx.emit(ActorId::Customer(self.id), kind);
    }
}
