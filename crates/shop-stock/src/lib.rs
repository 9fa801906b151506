//! `shop-stock`: the shared resources actors contend for.
//!
//! | Module             | Contents                                              |
//! |--------------------|-------------------------------------------------------|
//! | [`section`]        | `Section`, `ShelfGuard`, `Sections`, `open_sections`  |
//! | [`delivery_box`]   | `DeliveryBox`, `BoxGuard`                             |
//! | [`error`]          | `StockError`, `StockResult<T>`                        |
//!
//! # Locking model
//!
//! Stock mutations are only reachable through a guard (`ShelfGuard`,
//! `BoxGuard`) obtained by locking the resource's [`FairMutex`].  The guard
//! *is* the proof that the caller holds the lock.
//!
//! Three counters are readable without any lock and may be stale by the time
//! the caller acts on them:
//!
//! | Counter                              | Mutated by                    |
//! |--------------------------------------|-------------------------------|
//! | `Section::waiting_customers`         | customers, atomically         |
//! | `DeliveryBox::pending`               | `BoxGuard`, under the box lock |
//! | the store clock's tick               | the clock driver              |
//!
//! Anything used to *decide* a mutation is re-read under the lock.
//!
//! [`FairMutex`]: shop_sync::FairMutex

pub mod delivery_box;
pub mod error;
pub mod section;


pub use delivery_box::{BoxGuard, DeliveryBox};
pub use error::{StockError, StockResult};
pub use section::{Section, Sections, ShelfGuard, open_sections};
