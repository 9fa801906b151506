//! `OutputSink<W>`: bridges `EventSink` to an `EventWriter`.

use parking_lot::Mutex;
use shop_core::{EventKind, EventSink, StoreEvent};

use crate::row::{EventRow, StatusRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

struct State<W> {
    writer:     W,
    last_error: Option<OutputError>,
}

/// An [`EventSink`] that writes every event to any [`EventWriter`] backend.
///
/// Actor threads emit concurrently; writes are serialized behind a mutex.
/// Errors from the writer are stored because [`EventSink::emit`] has no
/// return value.  After the store shuts down, check for errors with
/// [`take_error`][Self::take_error].
pub struct OutputSink<W: EventWriter> {
    state: Mutex<State<W>>,
}

impl<W: EventWriter> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { state: Mutex::new(State { writer, last_error: None }) }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.state.lock().last_error.take()
    }

    /// Flush the writer.  Returns the first error seen during the run, if
    /// any, otherwise the result of flushing.
    pub fn finish(&self) -> OutputResult<()> {
        let mut state = self.state.lock();
        let flushed = state.writer.finish();
        match state.last_error.take() {
            Some(e) => Err(e),
            None => flushed,
        }
    }
}

impl<W: EventWriter> EventSink for OutputSink<W> {
    fn emit(&self, event: StoreEvent) {
        let mut state = self.state.lock();
        let result = match event.kind {
            EventKind::TickStatus { .. } => state.writer.write_status(&StatusRow::from_event(&event)),
            _ => state.writer.write_event(&EventRow::from_event(&event)),
        };
        if let Err(e) = result {
            // Keep only the first error.
            state.last_error.get_or_insert(e);
        }
    }
}
