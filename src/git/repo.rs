use crate::error::{GitBarsError, Result};
use crate::model::DateRange;
use crate::util::{parse_date_bound, BoundKind};
use chrono::{DateTime, FixedOffset, Utc};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Timestamp layout of a log line, `git log --pretty=%ai`.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_range(&self, after: Option<&str>, before: Option<&str>) -> Result<DateRange> {
        let mut range = DateRange::new();

        let after_dt = match after.filter(|s| !s.trim().is_empty()) {
            Some(a) => Some(self.parse_commit_or_date(a, BoundKind::After)?),
            None => None,
        };
        let before_dt = match before.filter(|s| !s.trim().is_empty()) {
            Some(b) => Some(self.parse_commit_or_date(b, BoundKind::Before)?),
            None => None,
        };

        if let (Some(a), Some(b)) = (after_dt, before_dt) {
            if a > b {
                return Err(GitBarsError::InvalidDate(format!(
                    "Invalid range: after ({a}) is later than before ({b})"
                )));
            }
        }

        if let Some(a) = after_dt {
            range = range.with_after(a);
        }
        if let Some(b) = before_dt {
            range = range.with_before(b);
        }

        Ok(range)
    }

    fn parse_commit_or_date(&self, input: &str, kind: BoundKind) -> Result<DateTime<FixedOffset>> {
        if let Some(dt) = parse_date_bound(input, kind)? {
            return Ok(dt);
        }

        // Fallback to a revision
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| GitBarsError::InvalidDate(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| GitBarsError::InvalidDate(format!("Not a commit: {input}")))?;

        to_timestamp(commit.author()?.time()?)
    }

    /// Walks every commit reachable from HEAD and renders it as a
    /// `<author-date>|<author-email>` log line.
    pub fn log_lines(&self, include_merges: bool) -> Result<Vec<String>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut lines = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} ({pos})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading commit log...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if include_merges || parents.len() <= 1 {
                let author = commit.author()?;
                let timestamp = to_timestamp(author.time()?)?;
                lines.push(format!(
                    "{}|{}",
                    timestamp.format(LOG_TIME_FORMAT),
                    author.email
                ));
                pb.inc(1);
            }

            for pid in parents {
                stack.push_back(pid);
            }
        }

        pb.finish_and_clear();
        tracing::debug!(commits = lines.len(), repo = %self.path.display(), "read commit log");
        Ok(lines)
    }
}

fn to_timestamp(time: gix::date::Time) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset)
        .ok_or_else(|| GitBarsError::InvalidDate(format!("Invalid UTC offset: {}", time.offset)))?;
    let utc = DateTime::<Utc>::from_timestamp(time.seconds, 0)
        .ok_or_else(|| GitBarsError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?;
    Ok(utc.with_timezone(&offset))
}
