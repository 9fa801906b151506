//! `shop-actors`: the store's assistants and customers.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`context`]    | `StoreContext`, everything the actors share                  |
//! | [`carry`]      | `CarrySet`, the bounded queue of items an assistant carries  |
//! | [`heuristic`]  | `pick_category`, which category an assistant pulls next      |
//! | [`assistant`]  | `Assistant`, `pull_batch`, `CycleReport`                     |
//! | [`customer`]   | `Customer`, `Purchase`, `Step`                               |
//!
//! # Actor loops
//!
//! Each actor owns its thread, its RNG and its private state (carry-set or
//! wait-state).  Everything else is reached through an `Arc<StoreContext>`.
//! Both loops act at most once per observed tick value and pause for
//! [`IDLE_PAUSE`] between iterations.
//!
//! An actor holds at most one store lock at a time and checks the shutdown
//! flag only while it holds none.

use std::time::Duration;

pub mod assistant;
pub mod carry;
pub mod context;
pub mod customer;
pub mod heuristic;


pub use assistant::{Assistant, AssistantConfig, AssistantStats, CycleReport, Pick, pull_batch};
pub use carry::CarrySet;
pub use context::StoreContext;
pub use customer::{Customer, CustomerConfig, CustomerStats, Purchase, Step};
pub use heuristic::pick_category;

/// Pause between two iterations of an actor loop.
pub const IDLE_PAUSE: Duration = Duration::from_millis(1);
