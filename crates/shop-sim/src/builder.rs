//! Fluent builder for constructing a [`Store`].

use std::sync::Arc;

use shop_actors::{Assistant, AssistantConfig, Customer, CustomerConfig, StoreContext};
use shop_core::{
    ActorId, ActorRng, AssistantId, Clock, ConfigError, CustomerId, EventSink, NoopSink,
    StoreClock, StoreConfig,
};
use shop_stock::{DeliveryBox, open_sections};

use crate::{ClockDriver, DriverConfig, SimResult, Store};

/// Fluent builder for [`Store`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                            |
/// |---------------|----------------------------------------------------|
/// | `.clock(c)`   | `StoreClock` ticking every `config.tick_time_ms`   |
/// | `.sink(s)`    | `NoopSink`                                         |
///
/// # Example
///
/// ```rust,ignore
/// let store = StoreBuilder::new(StoreConfig::from_dir(Path::new("config"))?)
///     .sink(Arc::new(TracingSink))
///     .build()?;
/// let summary = store.open()?.run_for(1_000)?;
/// ```
pub struct StoreBuilder {
    config: StoreConfig,
    clock:  Option<Arc<dyn Clock>>,
    sink:   Option<Arc<dyn EventSink>>,
}

impl StoreBuilder {
    pub fn new(config: StoreConfig) -> Self {
        Self { config, clock: None, sink: None }
    }

    /// Drive the store with `clock` instead of a real-time [`StoreClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Deliver every event to `sink`.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the configuration, stock the sections, and create every
    /// actor with its own RNG stream.  No thread is started.
    pub fn build(self) -> SimResult<Store> {
        self.config.validate()?;
        let config = self.config;
        let assistant_ids = actor_ids::<AssistantId>("ASSISTANTS", config.assistants)?;
        let customer_ids = actor_ids::<CustomerId>("CUSTOMERS", config.customers)?;

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(StoreClock::new(config.tick_duration())));
        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopSink));

        let ctx = Arc::new(StoreContext::new(
            open_sections(config.initial_items),
            DeliveryBox::new(),
            clock,
            sink,
        ));

        let assistant_config = AssistantConfig::from(&config);
        let assistants = assistant_ids
            .into_iter()
            .map(|id| {
                Assistant::new(
                    id,
                    Arc::clone(&ctx),
                    assistant_config.clone(),
                    ActorRng::new(config.seed, ActorId::Assistant(id)),
                )
            })
            .collect();

        let customer_config = CustomerConfig::from(&config);
        let customers = customer_ids
            .into_iter()
            .map(|id| {
                Customer::new(
                    id,
                    Arc::clone(&ctx),
                    customer_config.clone(),
                    ActorRng::new(config.seed, ActorId::Customer(id)),
                )
            })
            .collect();

        let driver = ClockDriver::new(
            Arc::clone(&ctx),
            DriverConfig::from(&config),
            ActorRng::new(config.seed, ActorId::Store),
        );

        Ok(Store { config, ctx, assistants, customers, driver })
    }
}

/// Ids `0..count`, or `OutOfRange` if the last one does not fit the id type.
fn actor_ids<I: TryFrom<usize>>(key: &'static str, count: usize) -> SimResult<Vec<I>> {
    let out_of_range = || ConfigError::OutOfRange {
        key,
        value: i64::try_from(count).unwrap_or(i64::MAX),
    };
    // Fail before allocating.
    I::try_from(count.saturating_sub(1)).map_err(|_| out_of_range())?;
    (0..count)
        .map(|i| I::try_from(i).map_err(|_| out_of_range().into()))
        .collect()
}
