//! `shop-sim`: wires the store together and runs it.
//!
//! # Threads
//!
//! ```text
//! store-clock    sleep 1 tick → advance → TickStatus → maybe deliver → …
//! assistant-N    break? → pull from delivery box → shelve → walk back → …
//! customer-N     new tick? → buy? → wait for stock → buy → …
//! ```
//!
//! Every thread shares one `Arc<StoreContext>`.  [`StoreHandle::shutdown`]
//! raises the context's shutdown flag and joins them all.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shop_core::StoreConfig;
//! use shop_sim::StoreBuilder;
//!
//! let summary = StoreBuilder::new(StoreConfig::default())
//!     .build()?
//!     .open()?
//!     .run_for(500)?;
//! assert_eq!(summary.taken, summary.shelved);
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod store;


pub use builder::StoreBuilder;
pub use driver::{ClockDriver, DriverConfig, DriverStats};
pub use error::{SimError, SimResult};
pub use store::{RunSummary, Store, StoreHandle};
