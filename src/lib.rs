//! Commit activity of a git repository as terminal bar charts.
//!
//! Log lines go through `bars::extract`, `bars::bucketize`, `bars::score_buckets`
//! and finally `bars::render`.

pub mod bars;
pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod util;
