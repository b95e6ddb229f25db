//! `jam-io` — problem loading and result writing for the jam router.
//!
//! | File                 | Direction | Contents                                   |
//! |----------------------|-----------|--------------------------------------------|
//! | `vertices.csv`       | in        | `id,x,y`                                   |
//! | `edges.csv`          | in        | `from,to,capacity[,cost]`                  |
//! | `cars.csv`           | in        | `origin,destination`                       |
//! | `histories.csv`      | out       | `agent_id,status,replans,waits,path`       |
//! | `tick_summaries.csv` | out       | per-tick counters and peak edge load       |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `jam_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jam_io::{load_problem_dir, CsvWriter, SimOutputObserver};
//!
//! let (problem, ids) = load_problem_dir(Path::new("./problem"))?;
//! let mut sim = SimBuilder::from_config(config, problem).build()?;
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./out"))?, ids);
//! let report = sim.run(&mut obs);
//! obs.write_report(&report)?;
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{IoError, IoResult};
pub use loader::{load_cars_reader, load_graph_readers, load_problem_dir, load_problem_readers, VertexIds};
pub use observer::SimOutputObserver;
pub use row::{HistoryRow, TickSummaryRow};
pub use writer::OutputWriter;
