//! Structured logging of store events through `tracing`.
//!
//! | Level   | Events                                                        |
//! |---------|---------------------------------------------------------------|
//! | `info`  | deliveries, actor start and stop                              |
//! | `debug` | tick status, breaks, pulls, walks, restocks, purchases        |
//! | `trace` | single items shelved, purchase decisions, `box_noticed`       |

use shop_core::{EventKind, EventSink, StoreEvent};
use tracing::{debug, info, trace};

/// An [`EventSink`] that logs every event with `tracing`.
///
/// Each log record carries `tick` and `actor` fields, plus the event's own
/// fields.  Filtering is left to the installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: StoreEvent) {
        let tick = event.tick.0;
        let actor = event.actor.to_string();
        match event.kind {
            EventKind::ActorStarted => info!(tick, %actor, "started"),
            EventKind::ActorStopped => info!(tick, %actor, "stopped"),
            EventKind::TickStatus { stock, waiting, boxed } => debug!(
                tick,
                stock = ?stock.values().collect::<Vec<_>>(),
                waiting = ?waiting.values().collect::<Vec<_>>(),
                boxed = ?boxed.values().collect::<Vec<_>>(),
                "status"
            ),
            EventKind::DeliveryReceived { counts } => info!(
                tick,
                total = counts.total(),
                counts = %format_counts(&counts),
                "delivery received"
            ),
            EventKind::BreakStarted { ticks } => debug!(tick, %actor, ticks, "taking a break"),
            EventKind::BoxNoticed => trace!(tick, %actor, "delivery box is not empty"),
            EventKind::CustomersWaitingSeen { category } => {
                debug!(tick, %actor, %category, "customers waiting")
            }
            EventKind::ItemsTaken { category, count, reason } => {
                debug!(tick, %actor, %category, count, ?reason, "took items from delivery box")
            }
            EventKind::PullFinished { taken, carried } => {
                debug!(tick, %actor, taken, carried, "finished pulling")
            }
            EventKind::WalkingToSection { category, carried } => {
                debug!(tick, %actor, %category, carried, "walking to section")
            }
            EventKind::RestockStarted { category } => debug!(tick, %actor, %category, "restocking"),
            EventKind::ItemShelved { category } => trace!(tick, %actor, %category, "shelved 1 item"),
            EventKind::RestockFinished { category, added } => {
                debug!(tick, %actor, %category, added, "finished restocking")
            }
            EventKind::WalkingToDeliveryArea => debug!(tick, %actor, "walking to delivery area"),
            EventKind::BuyDecided { category } => trace!(tick, %actor, %category, "decided to buy"),
            EventKind::WaitingStarted { category } => {
                debug!(tick, %actor, %category, "waiting for stock")
            }
            EventKind::Buying { category } => trace!(tick, %actor, %category, "buying"),
            EventKind::Bought { category, waited_ticks } => {
                debug!(tick, %actor, %category, waited_ticks, "bought 1 item")
            }
        }
    }
}

/// `ELECTRONICS:3 CLOTHING:0 …`
pub fn format_counts(counts: &shop_core::PerCategory<usize>) -> String {
    counts
        .iter()
        .map(|(category, n)| format!("{category}:{n}"))
        .collect::<Vec<_>>()
        .join(" ")
}
