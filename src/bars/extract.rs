use crate::error::{GitBarsError, Result};
use crate::git::LOG_TIME_FORMAT;
use crate::model::{CommitRecord, DateRange, FillBounds};
use crate::util::{day_gap, shift_days};
use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub range: DateRange,
    pub reverse: bool,
    pub fill: bool,
    pub fill_bounds: FillBounds,
}

/// Parses one `<timestamp>|<author>` line. `line_no` is 1-based and only used for errors.
pub fn parse_line(line_no: usize, line: &str) -> Result<CommitRecord> {
    let (ts, author) = line
        .split_once('|')
        .ok_or_else(|| GitBarsError::malformed(line_no, line, "missing '|' separator"))?;

    let timestamp = DateTime::parse_from_str(ts.trim(), LOG_TIME_FORMAT)
        .map_err(|e| GitBarsError::malformed(line_no, line, format!("bad timestamp: {e}")))?;

    Ok(CommitRecord::new(timestamp, author.trim()))
}

/// Turns raw log lines into ordered commit records: newest first, or oldest
/// first when `reverse` is set. Any malformed line aborts the whole run.
pub fn extract<I, S>(lines: I, options: &ExtractOptions) -> Result<Vec<CommitRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(i + 1, line)?;
        if options.range.contains(&record.timestamp) {
            records.push(record);
        }
    }

    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    if options.fill {
        let bounds = match options.fill_bounds {
            FillBounds::Observed => (None, None),
            FillBounds::Range => (
                options.range.after.map(|t| t.date_naive()),
                options.range.before.map(|t| t.date_naive()),
            ),
        };
        records = fill_gaps(records, bounds);
    }

    if !options.reverse {
        records.reverse();
    }

    tracing::debug!(
        records = records.len(),
        reverse = options.reverse,
        fill = options.fill,
        "extracted commit records"
    );
    Ok(records)
}

/// Inserts zero-commit placeholders so no two neighbours of an oldest-first
/// sequence are more than one calendar day apart. With `bounds`, the fill also
/// reaches back to the first date and forward to the last one.
pub fn fill_gaps(
    records: Vec<CommitRecord>,
    bounds: (Option<NaiveDate>, Option<NaiveDate>),
) -> Vec<CommitRecord> {
    if records.is_empty() {
        return records;
    }
    let first = records[0].timestamp;
    let last = records[records.len() - 1].timestamp;

    let mut out = Vec::with_capacity(records.len());

    if let Some(start) = bounds.0 {
        let lead = (first.date_naive() - start).num_days();
        for back in (1..=lead).rev() {
            out.push(CommitRecord::placeholder(shift_days(&first, -back)));
        }
    }

    let mut iter = records.into_iter().peekable();
    while let Some(record) = iter.next() {
        let gap = iter
            .peek()
            .map(|next| day_gap(&record.timestamp, &next.timestamp))
            .unwrap_or(0);
        let anchor = record.timestamp;
        out.push(record);
        for step in 1..gap {
            out.push(CommitRecord::placeholder(shift_days(&anchor, step)));
        }
    }

    if let Some(end) = bounds.1 {
        let trail = (end - last.date_naive()).num_days();
        for step in 1..=trail {
            out.push(CommitRecord::placeholder(shift_days(&last, step)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PLACEHOLDER_AUTHOR;
    use pretty_assertions::assert_eq;

    fn days(records: &[CommitRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.timestamp.format("%Y-%m-%d").to_string())
            .collect()
    }

    fn line(date: &str) -> String {
        format!("{date} 10:00:00 +0000|dev@example.com")
    }

    #[test]
    fn parses_a_log_line() {
        let r = parse_line(1, "2024-01-06 09:15:00 +0530|alice@x.com").unwrap();
        assert_eq!(r.author, "alice@x.com");
        assert_eq!(r.commit_count, 1);
        assert!(r.is_weekend);
        assert_eq!(r.timestamp.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn author_may_contain_separator() {
        let r = parse_line(1, "2024-01-01 09:00:00 +0000|odd|name@x.com").unwrap();
        assert_eq!(r.author, "odd|name@x.com");
    }

    #[test]
    fn malformed_lines_are_fatal() {
        let err = extract(
            vec![line("2024-01-01"), "not a log line".to_string()],
            &ExtractOptions::default(),
        )
        .unwrap_err();
        match err {
            GitBarsError::MalformedRecord { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "not a log line");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse_line(1, "2024-13-01 10:00:00 +0000|a@x.com").is_err());
        assert!(parse_line(1, "2024-01-01 10:00:00|a@x.com").is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = extract(vec![line("2024-01-01"), String::new()], &ExtractOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn default_order_is_newest_first() {
        let input = vec![line("2024-01-02"), line("2024-01-01"), line("2024-01-03")];
        let records = extract(&input, &ExtractOptions::default()).unwrap();
        assert_eq!(days(&records), ["2024-01-03", "2024-01-02", "2024-01-01"]);

        let options = ExtractOptions { reverse: true, ..Default::default() };
        let records = extract(&input, &options).unwrap();
        assert_eq!(days(&records), ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn fill_inserts_missing_days() {
        let input = vec![line("2024-01-04"), line("2024-01-01")];
        let options = ExtractOptions { reverse: true, fill: true, ..Default::default() };
        let records = extract(&input, &options).unwrap();

        assert_eq!(days(&records), ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(records[1].commit_count, 0);
        assert_eq!(records[1].author, PLACEHOLDER_AUTHOR);
        assert_eq!(records[2].commit_count, 0);
        assert_eq!(records.iter().map(|r| r.commit_count).sum::<u64>(), 2);
    }

    #[test]
    fn fill_keeps_newest_first_order() {
        let input = vec![line("2024-01-01"), line("2024-01-04")];
        let options = ExtractOptions { fill: true, ..Default::default() };
        let records = extract(&input, &options).unwrap();
        assert_eq!(days(&records), ["2024-01-04", "2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn fill_classifies_weekends_of_placeholders() {
        // 2024-01-05 is a Friday, 2024-01-08 a Monday.
        let input = vec![line("2024-01-05"), line("2024-01-08")];
        let options = ExtractOptions { reverse: true, fill: true, ..Default::default() };
        let records = extract(&input, &options).unwrap();
        let weekend: Vec<bool> = records.iter().map(|r| r.is_weekend).collect();
        assert_eq!(weekend, [false, true, true, false]);
    }

    #[test]
    fn fill_ignores_same_and_adjacent_days() {
        let input = vec![
            "2024-01-01 23:00:00 +0000|a@x.com".to_string(),
            "2024-01-02 01:00:00 +0000|a@x.com".to_string(),
            "2024-01-02 05:00:00 +0000|a@x.com".to_string(),
        ];
        let options = ExtractOptions { fill: true, ..Default::default() };
        assert_eq!(extract(&input, &options).unwrap().len(), 3);
    }

    #[test]
    fn range_filters_records() {
        let input = vec![line("2024-01-01"), line("2024-01-05"), line("2024-01-09")];
        let range = DateRange::new()
            .with_after(DateTime::parse_from_rfc3339("2024-01-02T00:00:00Z").unwrap())
            .with_before(DateTime::parse_from_rfc3339("2024-01-05T10:00:00Z").unwrap());
        let options = ExtractOptions { range, ..Default::default() };
        assert_eq!(days(&extract(&input, &options).unwrap()), ["2024-01-05"]);
    }

    #[test]
    fn fill_bounds_observed_stops_at_commits() {
        let input = vec![line("2024-01-03"), line("2024-01-04")];
        let range = DateRange::new()
            .with_after(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap())
            .with_before(DateTime::parse_from_rfc3339("2024-01-06T23:59:59Z").unwrap());
        let options = ExtractOptions {
            range,
            reverse: true,
            fill: true,
            fill_bounds: FillBounds::Observed,
        };
        assert_eq!(days(&extract(&input, &options).unwrap()), ["2024-01-03", "2024-01-04"]);
    }

    #[test]
    fn fill_bounds_range_reaches_the_bounds() {
        let input = vec![line("2024-01-03"), line("2024-01-04")];
        let range = DateRange::new()
            .with_after(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap())
            .with_before(DateTime::parse_from_rfc3339("2024-01-06T23:59:59Z").unwrap());
        let options = ExtractOptions {
            range,
            reverse: true,
            fill: true,
            fill_bounds: FillBounds::Range,
        };
        let records = extract(&input, &options).unwrap();
        assert_eq!(
            days(&records),
            ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06"]
        );
        assert_eq!(records.iter().map(|r| r.commit_count).sum::<u64>(), 2);
    }

    #[test]
    fn fill_of_nothing_is_nothing() {
        let options = ExtractOptions {
            fill: true,
            fill_bounds: FillBounds::Range,
            range: DateRange::new()
                .with_after(DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap()),
            ..Default::default()
        };
        assert!(extract(Vec::<String>::new(), &options).unwrap().is_empty());
    }
}
