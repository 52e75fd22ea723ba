//! CLI argument surface.
mod cli;
mod types;

pub use cli::LoadArgs;
pub use types::{PositiveU64, PositiveUsize};
