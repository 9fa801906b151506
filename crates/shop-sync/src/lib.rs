//! `shop-sync`: the one synchronization primitive the store is built on.
//!
//! | Module          | Contents                                   |
//! |-----------------|--------------------------------------------|
//! | [`fair_mutex`]  | `FairMutex<T>`, `FairMutexGuard<'_, T>`    |
//!
//! # Rules of use
//!
//! Every shared store resource (each section, the delivery box) sits behind
//! its own [`FairMutex`].  Two rules keep the store deadlock-free:
//!
//! - never lock the same `FairMutex` twice from one thread (it is not
//!   reentrant and will block forever);
//! - never hold two `FairMutex` guards at the same time.

pub mod fair_mutex;

#[cfg(test)]
mod tests;

pub use fair_mutex::{FairMutex, FairMutexGuard};
