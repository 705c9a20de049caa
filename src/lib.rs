//
// lib.rs
// split-comment
//
// Library entry that re-exports modules so the binary and the integration tests share the
// filter state machine, CLI options, input scanning and the batch driver.
//
// Thales Matheus Mendonça Santos - October 2026
//
pub mod cli;
pub mod comment;
pub mod diff;
pub mod error;
pub mod filter;
pub mod scanner;
pub mod split;
pub mod utils;

pub use cli::{build_options, Args, Options};
pub use comment::{Mode, OutputMode};
pub use error::SplitError;
pub use filter::{filter_bytes, filter_str, next_state, FilterOptions, FilterStats, State};
pub use scanner::{collect_targets, Target};
pub use split::{run_split, Counters};
