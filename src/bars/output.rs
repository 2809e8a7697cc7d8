use crate::model::{BucketMap, Periodicity, ScoredBucket};
use crate::util::{is_weekend, weekday_name};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use console::{Color, Style};
use std::collections::HashMap;
use std::io::{self, BufWriter, Write};

pub const BLOCK: &str = "\u{2580}";
pub const DEFAULT_WIDTH: usize = 50;
const COUNT_WIDTH: usize = 5;

/// Line colours for `--colorize`, Monday first.
const WEEKDAY_COLORS: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub colorize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            colorize: false,
        }
    }
}

fn weekend_style() -> Style {
    Style::new().blue().bright().force_styling(true)
}

fn weekday_style(day: Weekday) -> Style {
    Style::new()
        .fg(WEEKDAY_COLORS[day.num_days_from_monday() as usize])
        .bold()
        .force_styling(true)
}

struct Row {
    label: String,
    date: Option<NaiveDate>,
    commits: u64,
    score: f64,
    is_weekend: bool,
}

impl From<&ScoredBucket> for Row {
    fn from(scored: &ScoredBucket) -> Self {
        Self {
            label: scored.bucket.label.clone(),
            date: None,
            commits: scored.bucket.commit_count,
            score: scored.score,
            is_weekend: scored.bucket.is_weekend,
        }
    }
}

pub fn summary_line(buckets: &BucketMap, periodicity: Periodicity) -> String {
    format!(
        "{} commits over {} {}(s)",
        buckets.total_commits(),
        buckets.len(),
        periodicity
    )
}

/// Every calendar day between the first and last bucket, walking in the same
/// direction as the buckets. Days without a bucket come out empty.
fn calendar_rows(scored: &[ScoredBucket]) -> Vec<Row> {
    let by_date: HashMap<NaiveDate, &ScoredBucket> = scored
        .iter()
        .map(|s| (s.bucket.representative_timestamp.date_naive(), s))
        .collect();

    let (Some(start), Some(end)) = (by_date.keys().min(), by_date.keys().max()) else {
        return Vec::new();
    };
    let descending = match (scored.first(), scored.last()) {
        (Some(first), Some(last)) => {
            first.bucket.representative_timestamp > last.bucket.representative_timestamp
        }
        _ => false,
    };

    let span = (*end - *start).num_days();
    let mut rows = Vec::with_capacity(span as usize + 1);
    for offset in 0..=span {
        let date = if descending {
            *end - Duration::days(offset)
        } else {
            *start + Duration::days(offset)
        };
        let row = match by_date.get(&date) {
            Some(s) => Row {
                date: Some(date),
                ..Row::from(*s)
            },
            None => Row {
                label: date.format("%Y-%m-%d").to_string(),
                date: Some(date),
                commits: 0,
                score: 0.0,
                is_weekend: is_weekend(&date),
            },
        };
        rows.push(row);
    }
    rows
}

/// Renders one line per bucket. Day charts cover the whole calendar span and
/// get a blank line after each Sunday.
pub fn render(scored: &[ScoredBucket], periodicity: Periodicity, options: &RenderOptions) -> Vec<String> {
    let by_day = periodicity == Periodicity::Day;
    let rows: Vec<Row> = if by_day {
        calendar_rows(scored)
    } else {
        scored.iter().map(Row::from).collect()
    };

    let name_width = rows
        .iter()
        .filter_map(|r| r.date.as_ref())
        .map(|d| weekday_name(d).len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut text = format!("{}  ", row.label);
        if let Some(date) = &row.date {
            text.push_str(&format!("{:<name_width$}  ", weekday_name(date)));
        }
        text.push_str(&format!("{:<width$}", row.commits, width = COUNT_WIDTH));

        let line_style = match row.date {
            Some(date) if options.colorize => Some(weekday_style(date.weekday())),
            _ => None,
        };

        let bar = BLOCK.repeat((row.score * options.width as f64).floor() as usize);
        let bar = if row.is_weekend {
            weekend_style().apply_to(bar).to_string()
        } else if let Some(style) = &line_style {
            style.apply_to(bar).to_string()
        } else {
            bar
        };

        let text = match &line_style {
            Some(style) => style.apply_to(text).to_string(),
            None => text,
        };
        lines.push(format!("{text}{bar}"));

        if by_day && row.date.map(|d| d.weekday()) == Some(Weekday::Sun) {
            lines.push(String::new());
        }
    }
    lines
}

pub fn write_chart<W: Write>(
    out: &mut W,
    buckets: &BucketMap,
    scored: &[ScoredBucket],
    periodicity: Periodicity,
    options: &RenderOptions,
) -> io::Result<()> {
    if buckets.is_empty() {
        writeln!(out, "No commits to plot")?;
        return Ok(());
    }

    writeln!(out, "{}", summary_line(buckets, periodicity))?;
    for line in render(scored, periodicity, options) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn print_chart(
    buckets: &BucketMap,
    scored: &[ScoredBucket],
    periodicity: Periodicity,
    options: &RenderOptions,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_chart(&mut out, buckets, scored, periodicity, options)?;
    out.flush()
}
