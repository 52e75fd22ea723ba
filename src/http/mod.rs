//! HTTP client construction, map fetching and the worker pool.
mod client;
mod fetch;
pub mod pool;


pub use client::build_client;
pub use fetch::fetch_map;
