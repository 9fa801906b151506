//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `tick_status.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult, StatusRow};

pub const EVENTS_FILE: &str = "events.csv";
pub const STATUS_FILE: &str = "tick_status.csv";

/// Writes store events to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    status:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["tick", "actor", "event", "category", "count", "waited_ticks"])?;

        let mut status = Writer::from_path(dir.join(STATUS_FILE))?;
        status.write_record(["tick", "category", "stock", "waiting", "boxed"])?;

        Ok(Self { events, status, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl EventWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.actor.clone(),
            row.event.to_string(),
            opt(row.category),
            opt(row.count),
            opt(row.waited_ticks),
        ])?;
        Ok(())
    }

    fn write_status(&mut self, rows: &[StatusRow]) -> OutputResult<()> {
        for row in rows {
            self.status.write_record(&[
                row.tick.to_string(),
                row.category.to_string(),
                row.stock.to_string(),
                row.waiting.to_string(),
                row.boxed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.status.flush()?;
        Ok(())
    }
}
