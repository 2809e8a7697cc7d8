use crate::error::{GitBarsError, Result};
use crate::model::{BucketMap, ScoredBucket};

/// Normalize a count to 0-1 given the min and max of its set.
pub fn normalize(x: u64, min: u64, max: u64) -> Result<f64> {
    if max == min {
        return Err(GitBarsError::DegenerateNormalization { count: max });
    }
    Ok((x.saturating_sub(min)) as f64 / (max - min) as f64)
}

/// Scores every bucket against a scale that always includes zero. A set with
/// nothing to tell apart scores 0 throughout.
pub fn score_buckets(buckets: &BucketMap) -> Vec<ScoredBucket> {
    let counts: Vec<u64> = buckets
        .iter()
        .map(|b| b.commit_count)
        .chain(std::iter::once(0))
        .collect();
    let min = counts.iter().copied().min().unwrap_or(0);
    let max = counts.iter().copied().max().unwrap_or(0);

    buckets
        .iter()
        .map(|bucket| {
            let score = match normalize(bucket.commit_count, min, max) {
                Ok(score) => score,
                Err(err) => {
                    tracing::debug!(label = %bucket.label, "{err}, scoring 0");
                    0.0
                }
            };
            ScoredBucket {
                bucket: bucket.clone(),
                score,
            }
        })
        .collect()
}
