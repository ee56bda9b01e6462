// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backend::Backend;
use crate::config::Settings;
use crate::days::{DayBuckets, Zone, bucket_by_day_zoned};
use crate::impact::{Impact, fmt_impact, resolve_impact, viewer_member_for};
use crate::models::{Expense, MemberId, Membership};
use crate::utils::{
    fmt_money, maybe_print_json, parse_search, parse_zone, pretty_table, read_expenses,
};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let feed = query_feed(settings, m)?;
    if !maybe_print_json(json_flag, jsonl_flag, &feed)? {
        if feed.is_empty() {
            println!("No expenses yet");
            return Ok(());
        }
        println!(
            "{}",
            pretty_table(&["Day", "Title", "Total", "Your impact"], table_rows(&feed))
        );
    }
    Ok(())
}

/// Whose impact to show.
#[derive(Debug, Clone, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    Member(MemberId),
    Memberships(Vec<Membership>),
}

impl Viewer {
    pub fn member_for(&self, group_id: i64) -> Option<MemberId> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Member(id) => Some(*id),
            Viewer::Memberships(ms) => viewer_member_for(ms, group_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRow {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub currency: String,
    pub created_at: String,
    pub impact: Decimal,
    pub direction: Impact,
}

/// Buckets `expenses` by day and attaches the viewer's impact to each one.
pub fn build_feed(
    expenses: &[Expense],
    viewer: &Viewer,
    zone: Zone,
    search: Option<&Regex>,
) -> Result<DayBuckets<FeedRow>> {
    let kept = expenses
        .iter()
        .filter(|e| search.is_none_or(|re| re.is_match(&e.title)));
    let buckets = bucket_by_day_zoned(kept, zone).context("Failed to load expenses")?;
    tracing::debug!(days = buckets.len(), expenses = buckets.total(), ?zone, "built feed");
    Ok(buckets.map(|e| {
        let impact = resolve_impact(e, viewer.member_for(e.group_id));
        FeedRow {
            id: e.id,
            title: e.title.clone(),
            amount: e.amount,
            currency: e.currency.clone(),
            created_at: e.created_at.clone(),
            impact,
            direction: Impact::shown(impact),
        }
    }))
}

pub fn table_rows(feed: &DayBuckets<FeedRow>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (day, items) in feed.iter() {
        for (i, r) in items.iter().enumerate() {
            let day = if i == 0 { day.to_string() } else { String::new() };
            rows.push(vec![
                day,
                r.title.clone(),
                fmt_money(&r.amount, &r.currency),
                fmt_impact(r.impact, &r.currency),
            ]);
        }
    }
    rows
}

pub fn query_feed(settings: &Settings, m: &clap::ArgMatches) -> Result<DayBuckets<FeedRow>> {
    let zone = parse_zone(m.get_one::<String>("tz").map(String::as_str).unwrap_or("local"))?;
    let search = m
        .get_one::<String>("search")
        .map(|s| parse_search(s))
        .transpose()?;
    let (expenses, viewer) = load_source(settings, m)?;
    build_feed(&expenses, &viewer, zone, search.as_ref())
}

/// Expenses from `--file` (optionally narrowed by `--group`) or from the
/// backend for `--group`, plus the viewer they should be seen by.
pub fn load_source(settings: &Settings, m: &clap::ArgMatches) -> Result<(Vec<Expense>, Viewer)> {
    let group = m.get_one::<i64>("group").copied();
    let mut backend = None;
    let expenses = match (m.get_one::<String>("file"), group) {
        (Some(path), _) => {
            let mut all = read_expenses(Path::new(path))?;
            if let Some(g) = group {
                all.retain(|e| e.group_id == g);
            }
            all
        }
        (None, Some(g)) => {
            let b = Backend::from_settings(settings)?;
            let list = b.fetch_expenses(g)?;
            backend = Some(b);
            list
        }
        (None, None) => return Err(anyhow!("Pass --group <id> or --file <path>")),
    };

    let profile = m
        .get_one::<String>("profile")
        .cloned()
        .or_else(|| settings.profile_id.clone());
    let viewer = match (m.get_one::<i64>("member"), profile) {
        (Some(id), _) => Viewer::Member(*id),
        (None, Some(p)) => {
            let b = match backend {
                Some(b) => b,
                None => Backend::from_settings(settings)?,
            };
            Viewer::Memberships(b.fetch_profile(&p)?.members)
        }
        (None, None) => Viewer::Anonymous,
    };
    Ok((expenses, viewer))
}
