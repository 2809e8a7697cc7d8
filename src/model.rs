use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt;

/// Author recorded on gap-fill placeholders.
pub const PLACEHOLDER_AUTHOR: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Periodicity {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Periodicity {
    pub fn as_str(self) -> &'static str {
        match self {
            Periodicity::Day => "day",
            Periodicity::Week => "week",
            Periodicity::Month => "month",
            Periodicity::Year => "year",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far gap-filling reaches when a date range is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FillBounds {
    /// Only between the first and last observed commit.
    #[default]
    Observed,
    /// Out to the `after`/`before` dates as well.
    Range,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub author: String,
    pub is_weekend: bool,
    pub commit_count: u64,
}

impl CommitRecord {
    pub fn new(timestamp: DateTime<FixedOffset>, author: impl Into<String>) -> Self {
        Self {
            is_weekend: crate::util::is_weekend(&timestamp.date_naive()),
            timestamp,
            author: author.into(),
            commit_count: 1,
        }
    }

    pub fn placeholder(timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            commit_count: 0,
            ..Self::new(timestamp, PLACEHOLDER_AUTHOR)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.commit_count == 0 && self.author == PLACEHOLDER_AUTHOR
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub representative_timestamp: DateTime<FixedOffset>,
    pub commit_count: u64,
    pub is_weekend: bool,
}

/// Buckets keyed by label, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct BucketMap {
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the record's count to the bucket for `label`, creating the bucket on first sight.
    pub fn add_record(&mut self, label: String, record: &CommitRecord, is_weekend: bool) {
        if let Some(&i) = self.index.get(&label) {
            self.buckets[i].commit_count += record.commit_count;
            return;
        }
        self.index.insert(label.clone(), self.buckets.len());
        self.buckets.push(Bucket {
            label,
            representative_timestamp: record.timestamp,
            commit_count: record.commit_count,
            is_weekend,
        });
    }

    pub fn get(&self, label: &str) -> Option<&Bucket> {
        self.index.get(label).map(|&i| &self.buckets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> + '_ {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_commits(&self) -> u64 {
        self.buckets.iter().map(|b| b.commit_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBucket {
    pub bucket: Bucket,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub after: Option<DateTime<FixedOffset>>,
    pub before: Option<DateTime<FixedOffset>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { after: None, before: None }
    }

    pub fn with_after(mut self, after: DateTime<FixedOffset>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn with_before(mut self, before: DateTime<FixedOffset>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        if let Some(after) = self.after {
            if timestamp < &after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if timestamp > &before {
                return false;
            }
        }
        true
    }
}
