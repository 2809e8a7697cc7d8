use git_bars::bars::{
    bucketize, extract, render, score_buckets, summary_line, write_chart, ExtractOptions,
    RenderOptions,
};
use git_bars::model::Periodicity;
use pretty_assertions::assert_eq;

const LOG: &[&str] = &[
    "2024-01-02 09:00:00 +0000|b@x.com",
    "2024-01-01 11:00:00 +0000|a@x.com",
    "2024-01-01 10:00:00 +0000|a@x.com",
];

#[test]
fn end_to_end_by_day() {
    let records = extract(LOG, &ExtractOptions::default()).unwrap();
    let buckets = bucketize(&records, Periodicity::Day, "");

    let counts: Vec<(&str, u64)> = buckets
        .iter()
        .map(|b| (b.label.as_str(), b.commit_count))
        .collect();
    assert_eq!(counts, [("2024-01-02", 1), ("2024-01-01", 2)]);
    assert_eq!(summary_line(&buckets, Periodicity::Day), "3 commits over 2 day(s)");

    let scored = score_buckets(&buckets);
    let lines = render(&scored, Periodicity::Day, &RenderOptions::default());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2024-01-02  Tuesday  1    "));
    assert!(lines[1].starts_with("2024-01-01  Monday   2    "));
}

#[test]
fn bucket_total_matches_filtered_records_even_with_fill() {
    let log = [
        "2024-01-01 10:00:00 +0000|alice@x.com",
        "2024-01-04 10:00:00 +0000|bob@x.com",
        "2024-01-09 10:00:00 +0000|alice@x.com",
        "2024-01-09 12:00:00 +0000|alice@x.com",
    ];
    let options = ExtractOptions { fill: true, ..Default::default() };
    let records = extract(log, &options).unwrap();
    assert_eq!(records.len(), 10);

    assert_eq!(bucketize(&records, Periodicity::Day, "").total_commits(), 4);
    assert_eq!(bucketize(&records, Periodicity::Day, "alice").total_commits(), 3);
    assert_eq!(bucketize(&records, Periodicity::Week, "bob").total_commits(), 1);
}

#[test]
fn scores_are_bounded() {
    let log = [
        "2024-01-01 10:00:00 +0000|a@x.com",
        "2024-02-01 10:00:00 +0000|a@x.com",
        "2024-02-02 10:00:00 +0000|a@x.com",
        "2024-03-01 10:00:00 +0000|a@x.com",
        "2024-03-02 10:00:00 +0000|a@x.com",
        "2024-03-03 10:00:00 +0000|a@x.com",
    ];
    let records = extract(log, &ExtractOptions::default()).unwrap();
    let scored = score_buckets(&bucketize(&records, Periodicity::Month, ""));

    assert!(scored.iter().all(|s| (0.0..=1.0).contains(&s.score)));
    let max = scored.iter().max_by_key(|s| s.bucket.commit_count).unwrap();
    assert_eq!(max.score, 1.0);
}

#[test]
fn filtered_out_everything_prints_message() {
    let records = extract(LOG, &ExtractOptions::default()).unwrap();
    let buckets = bucketize(&records, Periodicity::Month, "nobody");
    let scored = score_buckets(&buckets);

    let mut out = Vec::new();
    write_chart(&mut out, &buckets, &scored, Periodicity::Month, &RenderOptions::default()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "No commits to plot\n");
}
