//! The restocking assistant.
//!
//! An assistant cycles through three phases:
//!
//! 1. **Break**: once per new tick, with probability `1 / break_interval`,
//!    rest for `break_time` ticks.
//! 2. **Pull**: holding the delivery-box lock, take up to
//!    `max_carried_sections` categories' worth of items (bounded by
//!    `max_carried_items`), choosing each category with [`pick_category`].
//! 3. **Distribute**: walk to the section of the oldest carried item, shelve
//!    every carried item of that category, repeat until empty hands, then walk
//!    back to the delivery area.
//!
//! Walking and resting happen with no lock held.  Shelving holds the section
//! lock for one tick per item.

use std::sync::Arc;

use shop_core::{
    ActorId, ActorRng, AssistantId, Category, EventKind, PerCategory, PickReason, StoreConfig,
    Tick,
};
use shop_stock::{BoxGuard, Sections, StockResult};

use crate::{CarrySet, IDLE_PAUSE, StoreContext, pick_category};

/// Ticks to walk from the delivery area to any section, before the
/// per-carried-item surcharge.
pub const TIME_TO_SECTION: u64 = 10;

/// Ticks to walk from a section back to the delivery area.
pub const TIME_TO_DELIVERY_AREA: u64 = 10;

/// The slice of [`StoreConfig`] an assistant needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantConfig {
    pub max_carried_items:    usize,
    pub max_carried_sections: usize,
    pub break_interval:       u32,
    pub break_time:           u64,
}

impl From<&StoreConfig> for AssistantConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            max_carried_items:    config.max_carried_items,
            max_carried_sections: config.max_carried_sections,
            break_interval:       config.break_interval,
            break_time:           config.break_time,
        }
    }
}

/// One category taken during a pull phase.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Pick {
    pub category: Category,
    pub count:    usize,
    pub reason:   PickReason,
}

/// What a single [`Assistant::cycle`] did.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CycleReport {
    pub took_break: bool,
    pub picks:      Vec<Pick>,
    pub shelved:    PerCategory<usize>,
}

impl CycleReport {
    /// Items taken from the delivery box this cycle.
    pub fn taken(&self) -> usize {
        self.picks.iter().map(|p| p.count).sum()
    }

    /// Items put on shelves this cycle.
    pub fn shelved_total(&self) -> usize {
        self.shelved.total()
    }
}

/// Totals over an assistant's whole run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AssistantStats {
    pub cycles:  u64,
    pub breaks:  u64,
    pub taken:   usize,
    pub shelved: usize,
}

impl AssistantStats {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.breaks += u64::from(report.took_break);
        self.taken += report.taken();
        self.shelved += report.shelved_total();
    }
}

/// Fill `carry` from the delivery box.
///
/// Visits at most `max_sections` categories, each chosen by
/// [`pick_category`] against the box counts under `guard` and the current
/// waiting-customer counters.  Each visit takes items of the chosen category
/// until the category runs out or `carry` is full.  Stops early when the box
/// is empty or no category qualifies.
pub fn pull_batch(
    guard:        &mut BoxGuard<'_>,
    sections:     &Sections,
    carry:        &mut CarrySet,
    max_sections: usize,
) -> Vec<Pick> {
    let mut picks = Vec::new();
    while picks.len() < max_sections && !guard.is_empty() && !carry.is_full() {
        let waiting = sections.map(|_, s| s.waiting_customers());
        let Some((category, reason)) = pick_category(&guard.counts(), &waiting) else {
            break;
        };
        let count = carry.fill_from(|| guard.take(category));
        picks.push(Pick { category, count, reason });
    }
    picks
}

// ── Assistant ─────────────────────────────────────────────────────────────────

pub struct Assistant {
    id:        AssistantId,
    ctx:       Arc<StoreContext>,
    config:    AssistantConfig,
    rng:       ActorRng,
    carry:     CarrySet,
    last_tick: Tick,
}

impl Assistant {
    pub fn new(
        id:     AssistantId,
        ctx:    Arc<StoreContext>,
        config: AssistantConfig,
        rng:    ActorRng,
    ) -> Self {
        let carry = CarrySet::new(config.max_carried_items);
        Self { id, ctx, config, rng, carry, last_tick: Tick::ZERO }
    }

    #[inline]
    pub fn id(&self) -> AssistantId {
        self.id
    }

    /// Loop until shutdown is requested.
    ///
    /// The flag is checked only between cycles, and a cycle always ends with
    /// empty hands, so no item taken from the box is lost.
    pub fn run(mut self) -> StockResult<AssistantStats> {
        self.emit(EventKind::ActorStarted);
        let mut stats = AssistantStats::default();
        while !self.ctx.is_shutting_down() {
            let report = self.cycle()?;
            stats.record(&report);
            self.ctx.clock().sleep(IDLE_PAUSE);
        }
        self.emit(EventKind::ActorStopped);
        Ok(stats)
    }

    /// Run one break-pull-distribute cycle.
    pub fn cycle(&mut self) -> StockResult<CycleReport> {
        let mut report = CycleReport { took_break: self.maybe_take_break(), ..Default::default() };

        if !self.carry.is_full() {
            report.picks = self.take_from_delivery_box();
        }

        if !self.carry.is_empty() {
            report.shelved = self.distribute()?;
            self.walk_to_delivery_area();
        }
        Ok(report)
    }

    fn maybe_take_break(&mut self) -> bool {
        let now = self.ctx.now();
        if now == self.last_tick {
            return false;
        }
        self.last_tick = now;

        if !self.rng.one_in(self.config.break_interval) {
            return false;
        }
        self.emit(EventKind::BreakStarted { ticks: self.config.break_time });
        self.ctx.clock().sleep_ticks(self.config.break_time);
        true
    }

    fn take_from_delivery_box(&mut self) -> Vec<Pick> {
        // Nothing delivered: don't queue for the lock.
        if self.ctx.delivery_box.is_empty() {
            return Vec::new();
        }

        let ctx = Arc::clone(&self.ctx);
        let mut guard = ctx.delivery_box.lock();
        if guard.is_empty() {
            return Vec::new();
        }
        self.emit(EventKind::BoxNoticed);

        let picks = pull_batch(
            &mut guard,
            &ctx.sections,
            &mut self.carry,
            self.config.max_carried_sections,
        );
        for pick in &picks {
            if pick.reason == PickReason::WaitingCustomers {
                self.emit(EventKind::CustomersWaitingSeen { category: pick.category });
            }
            self.emit(EventKind::ItemsTaken {
                category: pick.category,
                count:    pick.count,
                reason:   pick.reason,
            });
        }
        self.emit(EventKind::PullFinished {
            taken:   picks.iter().map(|p| p.count).sum(),
            carried: self.carry.len(),
        });
        guard.unlock();
        picks
    }

    /// Shelve everything carried, one section visit per category.
    fn distribute(&mut self) -> StockResult<PerCategory<usize>> {
        let mut shelved = PerCategory::<usize>::default();
        while let Some(category) = self.carry.front_category() {
            self.walk_to_section(category);
            shelved[category] += self.restock(category)?;
        }
        Ok(shelved)
    }

    fn walk_to_section(&self, category: Category) {
        let carried = self.carry.len();
        self.emit(EventKind::WalkingToSection { category, carried });
        self.ctx.clock().sleep_ticks(TIME_TO_SECTION + carried as u64);
    }

    fn restock(&mut self, category: Category) -> StockResult<usize> {
        let ctx = Arc::clone(&self.ctx);
        let mut shelf = ctx.sections[category].lock();
        self.emit(EventKind::RestockStarted { category });

        let items = self.carry.drain_category(category);
        let added = items.len();
        for item in items {
            shelf.add_item(item)?;
            self.emit(EventKind::ItemShelved { category });
            self.ctx.clock().sleep_ticks(1);
        }

        self.emit(EventKind::RestockFinished { category, added });
        shelf.unlock();
        Ok(added)
    }

    fn walk_to_delivery_area(&self) {
        self.emit(EventKind::WalkingToDeliveryArea);
        self.ctx.clock().sleep_ticks(TIME_TO_DELIVERY_AREA);
    }

    fn emit(&self, kind: EventKind) {
        self.ctx.emit(ActorId::Assistant(self.id), kind);
    }
}
