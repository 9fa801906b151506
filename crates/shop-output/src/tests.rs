//! Integration tests for shop-output.

use shop_core::{
    ActorId, AssistantId, Category, CustomerId, EventKind, PerCategory, PickReason, StoreEvent,
    Tick,
};

fn event(tick: u64, actor: ActorId, kind: EventKind) -> StoreEvent {
    StoreEvent { tick: Tick(tick), actor, kind }
}

fn status(tick: u64) -> StoreEvent {
    event(
        tick,
        ActorId::Store,
        EventKind::TickStatus {
            stock:   PerCategory::from([5, 4, 3, 2, 1, 0]),
            waiting: PerCategory::from([0, 0, 0, 0, 0, 2]),
            boxed:   PerCategory::from([1, 0, 0, 0, 0, 0]),
        },
    )
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::{EventRow, StatusRow};

    #[test]
    fn items_taken_row() {
        let row = EventRow::from_event(&event(
            7,
            ActorId::Assistant(AssistantId(1)),
            EventKind::ItemsTaken {
                category: Category::Toys,
                count:    4,
                reason:   PickReason::LargestBacklog,
            },
        ));
        assert_eq!(row.tick, 7);
        assert_eq!(row.actor, "assistant-1");
        assert_eq!(row.event, "items_taken");
        assert_eq!(row.category, Some("TOYS"));
        assert_eq!(row.count, Some(4));
        assert_eq!(row.waited_ticks, None);
    }

    #[test]
    fn bought_row_carries_wait() {
        let row = EventRow::from_event(&event(
            9,
            ActorId::Customer(CustomerId(3)),
            EventKind::Bought { category: Category::SportingGoods, waited_ticks: 12 },
        ));
        assert_eq!(row.actor, "customer-3");
        assert_eq!(row.category, Some("SPORTING_GOODS"));
        assert_eq!(row.count, None);
        assert_eq!(row.waited_ticks, Some(12));
    }

    #[test]
    fn delivery_row_counts_total() {
        let row = EventRow::from_event(&event(
            2,
            ActorId::Store,
            EventKind::DeliveryReceived { counts: PerCategory::from([1, 2, 3, 0, 0, 4]) },
        ));
        assert_eq!(row.actor, "store");
        assert_eq!(row.category, None);
        assert_eq!(row.count, Some(10));
    }

    #[test]
    fn status_rows_one_per_category() {
        let rows = StatusRow::from_event(&status(3));
        assert_eq!(rows.len(), Category::COUNT);
        assert_eq!(rows[0].category, "ELECTRONICS");
        assert_eq!(rows[0].stock, 5);
        assert_eq!(rows[0].boxed, 1);
        assert_eq!(rows[5].category, "BOOKS");
        assert_eq!(rows[5].waiting, 2);
        assert!(rows.iter().all(|r| r.tick == 3));
    }

    #[test]
    fn status_rows_empty_for_other_events() {
        assert!(StatusRow::from_event(&event(1, ActorId::Store, EventKind::ActorStarted)).is_empty());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use shop_core::EventSink;
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{EVENTS_FILE, STATUS_FILE};
    use crate::{CsvWriter, EventWriter, OutputSink};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "actor", "event", "category", "count", "waited_ticks"]);

        let mut rdr = csv::Reader::from_path(dir.path().join(STATUS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "category", "stock", "waiting", "boxed"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn sink_routes_events_to_the_right_file() {
        let dir = tmp();
        let sink = OutputSink::new(CsvWriter::new(dir.path()).unwrap());

        sink.emit(status(1));
        sink.emit(event(
            1,
            ActorId::Customer(CustomerId(0)),
            EventKind::WaitingStarted { category: Category::Books },
        ));
        sink.emit(event(
            4,
            ActorId::Customer(CustomerId(0)),
            EventKind::Bought { category: Category::Books, waited_ticks: 3 },
        ));
        sink.finish().unwrap();
        assert!(sink.take_error().is_none());

        let events = records(&dir, EVENTS_FILE);
        assert_eq!(events.len(), 2);
        assert_eq!(&events[0][2], "waiting_started");
        assert_eq!(&events[0][4], "");
        assert_eq!(&events[1][0], "4");
        assert_eq!(&events[1][1], "customer-0");
        assert_eq!(&events[1][3], "BOOKS");
        assert_eq!(&events[1][5], "3");

        let status = records(&dir, STATUS_FILE);
        assert_eq!(status.len(), Category::COUNT);
        assert_eq!(&status[1][1], "CLOTHING");
        assert_eq!(&status[1][2], "4");
    }
}

// ── Error capture ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use shop_core::EventSink;

    use super::*;
    use crate::{EventRow, EventWriter, OutputError, OutputResult, OutputSink, StatusRow};

    /// Fails every write after the first `ok` rows.
    #[derive(Default)]
    struct Flaky {
        ok:      usize,
        written: Arc<AtomicUsize>,
    }

    impl EventWriter for Flaky {
        fn write_event(&mut self, _row: &EventRow) -> OutputResult<()> {
            if self.written.load(Ordering::SeqCst) >= self.ok {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.written.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn write_status(&mut self, _rows: &[StatusRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let written = Arc::new(AtomicUsize::new(0));
        let sink = OutputSink::new(Flaky { ok: 1, written: Arc::clone(&written) });
        for tick in 0..3 {
            sink.emit(event(tick, ActorId::Store, EventKind::ActorStarted));
        }
        let err = sink.take_error().unwrap();
        assert!(err.to_string().contains("disk full"));
        assert!(sink.take_error().is_none());
        assert_eq!(written.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn finish_reports_stored_error() {
        let sink = OutputSink::new(Flaky::default());
        sink.emit(event(0, ActorId::Store, EventKind::ActorStopped));
        assert!(sink.finish().is_err());
        assert!(sink.finish().is_ok());
    }

    #[test]
    fn tracing_sink_accepts_every_event() {
        let sink = crate::TracingSink;
        sink.emit(status(1));
        sink.emit(event(
            1,
            ActorId::Assistant(AssistantId(0)),
            EventKind::RestockFinished { category: Category::Furniture, added: 2 },
        ));
        assert_eq!(
            crate::format_counts(&PerCategory::from([1, 0, 0, 0, 0, 2])),
            "ELECTRONICS:1 CLOTHING:0 FURNITURE:0 TOYS:0 SPORTING_GOODS:0 BOOKS:2"
        );
    }
}
