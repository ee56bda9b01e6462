// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::json;
use std::path::PathBuf;
use chrono::FixedOffset;
use tabsplit::commands::feed::Viewer;
use tabsplit::commands::{exporter, feed, impact};
use tabsplit::config::Settings;
use tabsplit::days::Zone;
use tabsplit::impact::Impact;
use tabsplit::models::{Expense, Membership};
use tabsplit::{SplitError, cli};
use tempfile::{TempDir, tempdir};

fn write_expenses(dir: &TempDir, v: serde_json::Value) -> PathBuf {
    let path = dir.path().join("expenses.json");
    std::fs::write(&path, serde_json::to_string(&v).unwrap()).unwrap();
    path
}

fn sample() -> serde_json::Value {
    json!([
        {"id": 2, "title": "Movie Night", "amount": 40.0, "currency": "EUR",
         "created_at": "2024-04-12T08:00:00", "group_id": 1,
         "balances": [{"owner": 7, "amount": "-20.00"}, {"owner": 8, "amount": "20.00"}]},
        {"id": 1, "title": "Groceries", "amount": "102.00", "currency": "EUR",
         "created_at": "2024-04-13T08:00:00", "group_id": 1,
         "balances": [{"owner": 7, "amount": "68.00"}, {"owner": 8, "amount": "-34.00"}]},
        {"id": 3, "title": "Dinner Out", "amount": "75", "currency": "EUR",
         "created_at": "2024-04-12T21:00:00", "group_id": 1,
         "balances": null},
        {"id": 9, "title": "Other group", "amount": "5", "currency": "EUR",
         "created_at": "2024-04-12T10:00:00", "group_id": 2,
         "balances": [{"owner": 7, "amount": "1"}]}
    ])
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    let (_, sub) = matches.subcommand().expect("subcommand");
    sub.clone()
}

#[test]
fn feed_groups_by_day_with_viewer_impact() {
    let dir = tempdir().unwrap();
    let path = write_expenses(&dir, sample());
    let path = path.to_string_lossy().to_string();

    let m = sub_matches(&[
        "tabsplit", "feed", "--file", &path, "--group", "1", "--member", "7", "--tz", "utc",
    ]);
    let feed = feed::query_feed(&Settings::default(), &m).unwrap();

    let labels: Vec<&str> = feed.labels().collect();
    assert_eq!(labels, vec!["Apr 12, 2024", "Apr 13, 2024"]);
    assert_eq!(feed.total(), 3);

    let apr12 = feed.get("Apr 12, 2024").unwrap();
    assert_eq!(apr12.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(apr12[0].impact, "-20".parse::<Decimal>().unwrap());
    assert_eq!(apr12[0].direction, Impact::Owes);
    assert_eq!(apr12[1].impact, Decimal::ZERO);
    assert_eq!(apr12[1].direction, Impact::Settled);

    let apr13 = feed.get("Apr 13, 2024").unwrap();
    assert_eq!(apr13[0].direction, Impact::Owed);

    let rows = feed::table_rows(&feed);
    assert_eq!(rows[0][0], "Apr 12, 2024");
    assert_eq!(rows[1][0], "");
    assert_eq!(rows[0][3], "- EUR 20.00");
    assert_eq!(rows[2][3], "+ EUR 68.00");
}

#[test]
fn feed_without_viewer_shows_zero_and_search_filters() {
    let dir = tempdir().unwrap();
    let path = write_expenses(&dir, sample());
    let path = path.to_string_lossy().to_string();

    let m = sub_matches(&[
        "tabsplit", "feed", "--file", &path, "--search", "(?i)^(movie|groceries)",
    ]);
    let feed = feed::query_feed(&Settings::default(), &m).unwrap();
    assert_eq!(feed.total(), 2);
    for (_, rows) in feed.iter() {
        for r in rows {
            assert_eq!(r.impact, Decimal::ZERO);
        }
    }
}

#[test]
fn memberships_pick_the_viewer_per_group() {
    let expenses: Vec<Expense> = serde_json::from_value(sample()).unwrap();
    let viewer = Viewer::Memberships(vec![
        Membership { id: 8, group_id: 1 },
        Membership { id: 7, group_id: 2 },
    ]);
    assert_eq!(viewer.member_for(1), Some(8));
    assert_eq!(viewer.member_for(3), None);

    let utc = Zone::Fixed(FixedOffset::east_opt(0).unwrap());
    let feed = feed::build_feed(&expenses, &viewer, utc, None).unwrap();
    assert_eq!(feed.total(), 4);

    let d = |s: &str| s.parse::<Decimal>().unwrap();
    let impacts: Vec<(i64, Decimal)> = feed
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|r| (r.id, r.impact)))
        .collect();
    assert_eq!(
        impacts,
        vec![(2, d("20")), (3, Decimal::ZERO), (9, d("1")), (1, d("-34"))]
    );
}

#[test]
fn feed_reports_bad_timestamp() {
    let dir = tempdir().unwrap();
    let path = write_expenses(
        &dir,
        json!([{"id": 5, "amount": "1", "created_at": "soon", "group_id": 1, "balances": []}]),
    );
    let path = path.to_string_lossy().to_string();

    let m = sub_matches(&["tabsplit", "feed", "--file", &path]);
    let err = feed::query_feed(&Settings::default(), &m).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SplitError>(),
        Some(&SplitError::InvalidTimestamp {
            id: 5,
            value: "soon".into()
        })
    );
}

#[test]
fn feed_rejects_duplicate_balance_owner() {
    let dir = tempdir().unwrap();
    let path = write_expenses(
        &dir,
        json!([{"id": 5, "amount": "1", "created_at": "2024-04-13", "group_id": 1,
                "balances": [{"owner": 1, "amount": "1"}, {"owner": 1, "amount": "-1"}]}]),
    );
    let path = path.to_string_lossy().to_string();

    let m = sub_matches(&["tabsplit", "feed", "--file", &path]);
    let err = feed::query_feed(&Settings::default(), &m).unwrap_err();
    assert!(err.to_string().contains("more than one balance entry"));
}

#[test]
fn feed_needs_a_source() {
    let m = sub_matches(&["tabsplit", "feed"]);
    let err = feed::query_feed(&Settings::default(), &m).unwrap_err();
    assert!(err.to_string().contains("--group"));
}

#[test]
fn impact_for_single_expense() {
    let dir = tempdir().unwrap();
    let path = write_expenses(&dir, sample());
    let path = path.to_string_lossy().to_string();

    let m = sub_matches(&[
        "tabsplit", "impact", "--file", &path, "--expense", "1", "--member", "8",
    ]);
    let row = impact::query_impact(&Settings::default(), &m).unwrap();
    assert_eq!(row.title, "Groceries");
    assert_eq!(row.member, Some(8));
    assert_eq!(row.impact, "-34".parse::<Decimal>().unwrap());

    let m = sub_matches(&["tabsplit", "impact", "--file", &path, "--expense", "42"]);
    let err = impact::query_impact(&Settings::default(), &m).unwrap_err();
    assert!(err.to_string().contains("Expense 42 not found"));
}

#[test]
fn export_feed_as_json_and_csv() {
    let dir = tempdir().unwrap();
    let path = write_expenses(&dir, sample());
    let path = path.to_string_lossy().to_string();
    let json_out = dir.path().join("feed.json").to_string_lossy().to_string();
    let csv_out = dir.path().join("feed.csv").to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "tabsplit", "export", "feed", "--format", "json", "--out", &json_out, "--file", &path,
        "--group", "1", "--member", "7",
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&Settings::default(), export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_out).unwrap()).unwrap();
    let days = parsed.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["day"], "Apr 12, 2024");
    assert_eq!(days[0]["items"][0]["id"], 2);
    assert_eq!(days[0]["items"][0]["direction"], "owes");
    assert_eq!(days[1]["items"][0]["title"], "Groceries");

    let matches = cli::build_cli().get_matches_from([
        "tabsplit", "export", "feed", "--format", "csv", "--out", &csv_out, "--file", &path,
        "--group", "1", "--member", "7",
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&Settings::default(), export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
    let mut rdr = csv::Reader::from_path(&csv_out).unwrap();
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 3);
    assert_eq!(&recs[0][0], "Apr 12, 2024");
    assert_eq!(&recs[0][5], "-20.00");
    assert_eq!(&recs[2][2], "Groceries");
    assert_eq!(&recs[2][5], "68.00");
}

#[test]
fn export_rounds_amounts_to_cents() {
    let dir = tempdir().unwrap();
    let path = write_expenses(
        &dir,
        json!([
            {"id": 1, "title": "Odd split", "amount": "12.345", "currency": "EUR",
             "created_at": "2024-04-13T08:00:00", "group_id": 1,
             "balances": [{"owner": 7, "amount": "0.005"}]},
            {"id": 2, "title": "Rounding dust", "amount": "0.01", "currency": "EUR",
             "created_at": "2024-04-13T09:00:00", "group_id": 1,
             "balances": [{"owner": 7, "amount": "-0.004"}]}
        ]),
    );
    let path = path.to_string_lossy().to_string();
    let csv_out = dir.path().join("feed.csv").to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "tabsplit", "export", "feed", "--format", "csv", "--out", &csv_out, "--file", &path,
        "--member", "7",
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&Settings::default(), export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }
    let mut rdr = csv::Reader::from_path(&csv_out).unwrap();
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 2);
    assert_eq!(&recs[0][3], "12.35");
    assert_eq!(&recs[0][5], "0.01");
    assert_eq!(&recs[0][6], "owed");
    assert_eq!(&recs[1][5], "0.00");
    assert_eq!(&recs[1][6], "settled");
}

#[test]
fn export_rejects_unknown_format() {
    let r = cli::build_cli().try_get_matches_from([
        "tabsplit", "export", "feed", "--format", "xml", "--out", "x.xml", "--file", "in.json",
    ]);
    assert!(r.is_err());
}
