pub mod aggregate;
pub mod exec;
pub mod extract;
pub mod output;
pub mod score;

pub use aggregate::{author_matches, bucketize};
pub use exec::{exec, ChartRequest};
pub use extract::{extract, fill_gaps, parse_line, ExtractOptions};
pub use output::{print_chart, render, summary_line, write_chart, RenderOptions};
pub use score::{normalize, score_buckets};
