//! A built store and its running threads.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use shop_actors::{Assistant, AssistantStats, Customer, CustomerStats, StoreContext};
use shop_core::{AssistantId, CustomerId, PerCategory, StoreConfig, Tick};
use shop_stock::StockResult;
use tracing::{debug, error, info};

use crate::{ClockDriver, DriverStats, SimError, SimResult};

/// Thread name of the clock driver.
pub const CLOCK_THREAD: &str = "store-clock";

/// A fully built store whose threads have not started yet.
///
/// Create via [`StoreBuilder`][crate::StoreBuilder].
pub struct Store {
    pub(crate) config:     StoreConfig,
    pub(crate) ctx:        Arc<StoreContext>,
    pub(crate) assistants: Vec<Assistant>,
    pub(crate) customers:  Vec<Customer>,
    pub(crate) driver:     ClockDriver,
}

impl Store {
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<StoreContext> {
        &self.ctx
    }

    /// Start one thread per assistant, one per customer, and the clock.
    ///
    /// If any thread fails to spawn, the ones already running are stopped
    /// and joined before the error is returned.
    pub fn open(self) -> SimResult<StoreHandle> {
        let Store { config, ctx, assistants, customers, driver } = self;
        info!(
            assistants = config.assistants,
            customers = config.customers,
            initial_items = config.initial_items,
            tick_ms = config.tick_time_ms,
            seed = config.seed,
            "opening store"
        );

        let mut handle = StoreHandle {
            ctx:        Arc::clone(&ctx),
            opened_at:  ctx.now(),
            driver:     None,
            assistants: Vec::with_capacity(assistants.len()),
            customers:  Vec::with_capacity(customers.len()),
        };

        for assistant in assistants {
            let id = assistant.id();
            match spawn(id.to_string(), move || assistant.run()) {
                Ok(h) => handle.assistants.push((id, h)),
                Err(e) => return Err(handle.abort(e)),
            }
        }
        for customer in customers {
            let id = customer.id();
            match spawn(id.to_string(), move || customer.run()) {
                Ok(h) => handle.customers.push((id, h)),
                Err(e) => return Err(handle.abort(e)),
            }
        }
        match spawn(CLOCK_THREAD.to_string(), move || driver.run()) {
            Ok(h) => handle.driver = Some(h),
            Err(e) => return Err(handle.abort(e)),
        }

        Ok(handle)
    }
}

fn spawn<T, F>(name: String, f: F) -> SimResult<JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    debug!(thread = %name, "spawning");
    thread::Builder::new()
        .name(name.clone())
        .spawn(f)
        .map_err(|source| SimError::Spawn { name, source })
}

// ── StoreHandle ───────────────────────────────────────────────────────────────

/// What happened over one run of the store.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Clock reading when the last thread stopped.
    pub final_tick:   Tick,
    pub ticks:        u64,
    pub deliveries:   usize,
    /// Items brought in by deliveries.
    pub delivered:    usize,
    /// Items assistants took out of the delivery box.
    pub taken:        usize,
    /// Items assistants put on shelves.
    pub shelved:      usize,
    pub breaks:       u64,
    pub bought:       usize,
    /// Purchases cut short by shutdown.
    pub abandoned:    usize,
    pub waited_ticks: u64,
    /// Stock per section after every thread stopped.
    pub final_stock:  PerCategory<usize>,
    /// Delivery-box backlog after every thread stopped.
    pub boxed:        PerCategory<usize>,
}

/// A running store.
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown) leaves
/// the threads running.
pub struct StoreHandle {
    ctx:        Arc<StoreContext>,
    opened_at:  Tick,
    driver:     Option<JoinHandle<DriverStats>>,
    assistants: Vec<(AssistantId, JoinHandle<StockResult<AssistantStats>>)>,
    customers:  Vec<(CustomerId, JoinHandle<CustomerStats>)>,
}

impl StoreHandle {
    pub fn context(&self) -> &Arc<StoreContext> {
        &self.ctx
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.ctx.now()
    }

    /// Block until the clock has moved `ticks` past opening time, then shut
    /// down.
    ///
    /// Threads only exit on shutdown, so a thread that has already finished
    /// has failed; the wait ends early and [`shutdown`](Self::shutdown)
    /// reports the failure.
    pub fn run_for(self, ticks: u64) -> SimResult<RunSummary> {
        let until = self.opened_at.offset(ticks);
        let clock = self.ctx.clock();
        while clock.now() < until {
            if let Some(name) = self.stopped_thread() {
                error!(thread = %name, tick = %clock.now(), "thread stopped early");
                break;
            }
            clock.sleep(clock.tick_duration());
        }
        self.shutdown()
    }

    /// Name of some thread that has already exited, if any.
    fn stopped_thread(&self) -> Option<String> {
        if self.driver.as_ref().is_some_and(JoinHandle::is_finished) {
            return Some(CLOCK_THREAD.to_string());
        }
        let assistant = self
            .assistants
            .iter()
            .find(|(_, h)| h.is_finished())
            .map(|(id, _)| id.to_string());
        assistant.or_else(|| {
            self.customers.iter().find(|(_, h)| h.is_finished()).map(|(id, _)| id.to_string())
        })
    }

    /// Stop every actor and join its thread.
    ///
    /// Assistants finish shelving whatever they carry; waiting customers give
    /// up.  Every thread is joined even if one failed; the first failure is
    /// returned.
    pub fn shutdown(mut self) -> SimResult<RunSummary> {
        self.ctx.request_shutdown();
        info!(tick = %self.ctx.now(), "closing store");

        let mut first_error: Option<SimError> = None;
        let mut summary = RunSummary::default();

        if let Some(driver) = self.driver.take() {
            match join(CLOCK_THREAD.to_string(), driver) {
                Ok(stats) => {
                    summary.ticks = stats.ticks;
                    summary.deliveries = stats.deliveries;
                    summary.delivered = stats.delivered;
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        for (id, h) in self.assistants.drain(..) {
            match join(id.to_string(), h).and_then(|r| r.map_err(SimError::from)) {
                Ok(stats) => {
                    summary.taken += stats.taken;
                    summary.shelved += stats.shelved;
                    summary.breaks += stats.breaks;
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        for (id, h) in self.customers.drain(..) {
            match join(id.to_string(), h) {
                Ok(stats) => {
                    summary.bought += stats.purchases;
                    summary.abandoned += stats.abandoned;
                    summary.waited_ticks += stats.waited_ticks;
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        summary.final_tick = self.ctx.now();
        summary.final_stock = self.ctx.sections.map(|_, s| s.lock().count());
        summary.boxed = self.ctx.delivery_box.lock().counts();

        if let Some(e) = first_error {
            return Err(e);
        }
        info!(
            ticks = summary.ticks,
            delivered = summary.delivered,
            shelved = summary.shelved,
            bought = summary.bought,
            "store closed"
        );
        Ok(summary)
    }

    /// Stop whatever already started after a failed spawn.
    fn abort(self, cause: SimError) -> SimError {
        error!(error = %cause, "store failed to open");
        if let Err(e) = self.shutdown() {
            error!(error = %e, "cleanup after failed open");
        }
        cause
    }
}

fn join<T>(name: String, handle: JoinHandle<T>) -> SimResult<T> {
    handle.join().map_err(|_| {
        error!(thread = %name, "actor thread panicked");
        SimError::ActorPanicked { name }
    })
}
