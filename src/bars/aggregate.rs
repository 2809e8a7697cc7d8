use crate::model::{BucketMap, CommitRecord, Periodicity};
use crate::util::period_key;

/// Whether `author` passes the substring filter. An empty filter lets everything through.
pub fn author_matches(author: &str, filter: &str) -> bool {
    filter.is_empty() || author.contains(filter)
}

/// Groups records into buckets in the order their labels are first seen.
/// Gap-fill placeholders have no real author, so any non-empty filter drops them.
pub fn bucketize(records: &[CommitRecord], periodicity: Periodicity, author: &str) -> BucketMap {
    let mut buckets = BucketMap::new();

    for record in records {
        if record.is_placeholder() && !author.is_empty() {
            continue;
        }
        if !author_matches(&record.author, author) {
            continue;
        }

        let label = period_key(&record.timestamp, periodicity);
        // Weekend highlighting only makes sense for single days.
        let is_weekend = periodicity == Periodicity::Day && record.is_weekend;
        buckets.add_record(label, record, is_weekend);
    }

    tracing::debug!(
        buckets = buckets.len(),
        periodicity = %periodicity,
        "bucketized commit records"
    );
    buckets
}
