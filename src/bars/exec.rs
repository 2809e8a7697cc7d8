use super::{bucketize, extract, print_chart, score_buckets, ExtractOptions, RenderOptions};
use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{FillBounds, Periodicity};
use anyhow::Context;

/// Chart settings beyond where the commits come from.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub periodicity: Periodicity,
    pub author: String,
    pub reverse: bool,
    pub fill: bool,
    pub fill_bounds: FillBounds,
    pub render: RenderOptions,
}

pub fn exec(common: &CommonArgs, request: &ChartRequest) -> anyhow::Result<()> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let range = repo
        .resolve_range(common.after.as_deref(), common.before.as_deref())
        .context("Failed to resolve date range")?;

    let lines = repo
        .log_lines(!common.no_merges)
        .context("Failed to read the commit log")?;

    let options = ExtractOptions {
        range,
        reverse: request.reverse,
        fill: request.fill,
        fill_bounds: request.fill_bounds,
    };
    let records = extract(&lines, &options).context("Failed to parse the commit log")?;

    let buckets = bucketize(&records, request.periodicity, &request.author);
    let scored = score_buckets(&buckets);

    print_chart(&buckets, &scored, request.periodicity, &request.render)
        .context("Failed to write chart")?;

    Ok(())
}
