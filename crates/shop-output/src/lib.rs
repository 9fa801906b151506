//! `shop-output`: event sinks for the thrift store simulation.
//!
//! | Sink              | Destination                                            |
//! |-------------------|--------------------------------------------------------|
//! | [`TracingSink`]   | the installed `tracing` subscriber                     |
//! | [`OutputSink<W>`] | any [`EventWriter`]; [`CsvWriter`] writes `events.csv` and `tick_status.csv` |
//!
//! Sinks compose with the tuple fan-out from `shop-core`:
//!
//! ```rust,ignore
//! use shop_output::{CsvWriter, OutputSink, TracingSink};
//!
//! let csv = Arc::new(OutputSink::new(CsvWriter::new(Path::new("./output"))?));
//! let store = StoreBuilder::new(config)
//!     .sink(Arc::new((TracingSink, Arc::clone(&csv))))
//!     .build()?;
//! store.open()?.run_for(1_000)?;
//! csv.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod log;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use log::{TracingSink, format_counts};
pub use row::{EventRow, StatusRow};
pub use sink::OutputSink;
pub use writer::EventWriter;
