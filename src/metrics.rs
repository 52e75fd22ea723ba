//! Per-request records and summary statistics.

/// Outcome of one map fetch. A zero byte length marks a failed request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRecord {
    pub seconds: f64,
    pub bytes: u64,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub average_seconds: f64,
}

/// Computes the aggregate statistics for a completed run.
///
/// The average is taken over successful requests only and is 0.0 when every
/// request failed.
#[must_use]
pub fn summarize(records: &[FetchRecord]) -> Summary {
    let mut successes: u64 = 0;
    let mut total_seconds = 0.0;
    for record in records {
        if record.bytes > 0 {
            successes += 1;
            total_seconds += record.seconds;
        }
    }

    let requests = records.len() as u64;
    let average_seconds = if successes > 0 {
        total_seconds / successes as f64
    } else {
        0.0
    };

    Summary {
        requests,
        successes,
        failures: requests - successes,
        average_seconds,
    }
}
