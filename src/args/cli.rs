use clap::Parser;

use super::types::{PositiveU64, PositiveUsize};

/// Fires randomized WMS GetMap requests at a map service from a fixed pool
/// of concurrent workers and writes a timestamped CSV report.
#[derive(Parser, Debug, Clone)]
#[command(name = "wmsload", version, about)]
pub struct LoadArgs {
    /// Path to a wmsload.toml or wmsload.json config file.
    #[arg(short = 'c', long, env = "WMSLOAD_CONFIG")]
    pub config: Option<String>,

    /// Total number of GetMap requests to issue.
    #[arg(short = 'n', long)]
    pub requests: Option<PositiveU64>,

    /// Number of concurrent fetch workers.
    #[arg(short = 'w', long)]
    pub workers: Option<PositiveUsize>,

    /// Service endpoint, overriding [service].url from the config.
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// HTTP/HTTPS proxy for all map requests.
    #[arg(long)]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<PositiveU64>,

    /// Base name for the timestamped CSV report.
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Print this many sampled GetMap URLs and exit without fetching.
    #[arg(long, value_name = "COUNT")]
    pub dump_urls: Option<PositiveU64>,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
