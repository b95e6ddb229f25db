//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `histories.csv` — one row per agent; `path` is space-separated vertex ids
//! - `tick_summaries.csv` — one row per tick

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{HistoryRow, IoResult, TickSummaryRow};

pub const HISTORIES_FILE: &str = "histories.csv";
pub const TICK_SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    histories: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let mut histories = Writer::from_path(dir.join(HISTORIES_FILE))?;
        histories.write_record(["agent_id", "status", "replans", "waits", "path"])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARIES_FILE))?;
        summaries.write_record([
            "tick", "active", "advanced", "waiting", "replanned", "arrived", "stuck", "max_load",
        ])?;

        Ok(Self {
            histories,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> IoResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active.to_string(),
            row.advanced.to_string(),
            row.waiting.to_string(),
            row.replanned.to_string(),
            row.arrived.to_string(),
            row.stuck.to_string(),
            row.max_load.to_string(),
        ])?;
        Ok(())
    }

    fn write_histories(&mut self, rows: &[HistoryRow]) -> IoResult<()> {
        for row in rows {
            let path = row
                .path
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            self.histories.write_record(&[
                row.agent_id.to_string(),
                row.status.to_string(),
                row.replans.to_string(),
                row.waits.to_string(),
                path,
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.histories.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
