//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use jam_core::Tick;
use jam_sim::{SimObserver, SimReport, Termination, TickSummary};

use crate::row::{HistoryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{IoError, IoResult, VertexIds};

/// A [`SimObserver`] that streams tick summaries to any [`OutputWriter`] and
/// writes per-agent histories once the run is over.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, call
/// [`write_report`][Self::write_report], which surfaces the first stored
/// error, or check with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    ids:        VertexIds,
    last_error: Option<IoError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.  `ids` translates dense vertex
    /// ids back to file ids in the written paths.
    pub fn new(writer: W, ids: VertexIds) -> Self {
        Self {
            writer,
            ids,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<IoError> {
        self.last_error.take()
    }

    /// Write every agent's outcome and close the writer.
    ///
    /// # Errors
    ///
    /// The first error stored during the run, else any error from writing
    /// the histories or finishing.
    pub fn write_report(&mut self, report: &SimReport) -> IoResult<()> {
        if let Some(e) = self.take_error() {
            return Err(e);
        }
        let rows: Vec<HistoryRow> = report
            .outcomes
            .iter()
            .map(|o| HistoryRow::from_outcome(o, &self.ids))
            .collect();
        self.writer.write_histories(&rows)?;
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: IoResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, final_tick: Tick, termination: Termination) {
        log::debug!("output observer closed at {final_tick} ({termination})");
    }
}
