//! `shop-core`: foundational types for the thrift store simulation.
//!
//! This crate is a dependency of every other `shop-*` crate.  It has no
//! `shop-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`category`]    | `Category` (closed, ordered), `PerCategory<T>`        |
//! | [`item`]        | `Item`, a category tag and nothing else               |
//! | [`ids`]         | `AssistantId`, `CustomerId`, `ActorId`                |
//! | [`time`]        | `Tick`, the `Clock` trait, `StoreClock`, `ManualClock` |
//! | [`rng`]         | `ActorRng` (one per actor, seeded from the run seed)  |
//! | [`config`]      | `StoreConfig` and its TOML / `.config` loader         |
//! | [`event`]       | `StoreEvent`, `EventKind`, the `EventSink` trait      |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |

pub mod category;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod item;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::{Category, PerCategory};
pub use config::StoreConfig;
pub use error::{ConfigError, ConfigResult};
pub use event::{EventKind, EventSink, NoopSink, PickReason, RecordingSink, StoreEvent};
pub use ids::{ActorId, AssistantId, CustomerId};
pub use item::Item;
pub use rng::ActorRng;
pub use time::{Clock, ManualClock, StoreClock, Tick};
