//! Report assembly and the CSV sink.
mod csv;


pub use csv::write_csv;

use chrono::{DateTime, Local};

use crate::config::types::RunConfig;
use crate::metrics::{self, FetchRecord};

/// One report cell; rows mix text, integer and float fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Int(u64),
    Float(f64),
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Text(value) => f.write_str(value),
            Field::Int(value) => write!(f, "{}", value),
            Field::Float(value) => write!(f, "{}", value),
        }
    }
}

pub type Row = Vec<Field>;

/// Number of summary rows before the per-request data rows.
pub const HEADER_ROWS: usize = 12;

fn text(value: &str) -> Field {
    Field::Text(value.to_owned())
}

/// Assembles the full report: summary header rows followed by one row per
/// request, in collection order (completion order carries no meaning).
#[must_use]
pub fn assemble(records: &[FetchRecord], config: &RunConfig) -> Vec<Row> {
    let summary = metrics::summarize(records);
    let mut rows = Vec::with_capacity(HEADER_ROWS + records.len());

    rows.push(vec![text("WMS load test results")]);
    rows.push(Vec::new());
    rows.push(vec![
        text("Concurrent workers"),
        Field::Int(config.workers.get() as u64),
    ]);
    rows.push(vec![
        text("Map image size"),
        Field::Text(format!("{} x {}", config.image.width, config.image.height)),
        text("pixels"),
    ]);
    rows.push(Vec::new());
    rows.push(vec![text("Map requests"), Field::Int(summary.requests)]);
    rows.push(Vec::new());
    rows.push(vec![
        text("Successful requests"),
        Field::Int(summary.successes),
    ]);
    rows.push(vec![
        text("Average time"),
        Field::Float(summary.average_seconds),
        text("seconds"),
    ]);
    rows.push(vec![text("Failed requests"), Field::Int(summary.failures)]);
    rows.push(Vec::new());
    rows.push(vec![text("Time_seconds"), text("Image_bytes"), text("URL")]);

    for record in records {
        rows.push(vec![
            Field::Float(record.seconds),
            Field::Int(record.bytes),
            Field::Text(record.url.clone()),
        ]);
    }

    rows
}

/// Report file name for `base`: `<base>_YYYY_MM_DD_HH_MM_SS.csv`.
#[must_use]
pub fn timestamped_name(base: &str, timestamp: DateTime<Local>) -> String {
    format!("{}_{}.csv", base, timestamp.format("%Y_%m_%d_%H_%M_%S"))
}
