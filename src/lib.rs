//! Core library for the `wmsload` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, the randomized GetMap workload,
//! request execution across the worker pool, metrics aggregation, and the
//! CSV report sink. The primary user-facing interface is the `wmsload`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod workload;
