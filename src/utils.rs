// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::days::Zone;
use crate::models::{Expense, GroupSummary};

const UA: &str = concat!(
    "tabsplit/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/tabsplit)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_zone(s: &str) -> Result<Zone> {
    Zone::parse(s).ok_or_else(|| {
        anyhow!(
            "Invalid time zone '{}', expected local, utc, a name like Europe/Rome or an offset like +02:00",
            s
        )
    })
}

pub fn parse_search(s: &str) -> Result<Regex> {
    Regex::new(s).with_context(|| format!("Invalid regex pattern '{}'", s))
}

/// Round to cents, half away from zero. A result of zero loses its sign.
pub fn round_money(d: Decimal) -> Decimal {
    let r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if r.is_zero() { Decimal::ZERO } else { r }
}

/// `12.345` -> `12.35`, always two places.
pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", round_money(*d))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, fmt_amount(d))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Read expenses previously exported from the backend as a JSON array.
/// Every record must satisfy the one-balance-per-owner rule.
pub fn read_expenses(path: &Path) -> Result<Vec<Expense>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Open expenses file {}", path.display()))?;
    let expenses: Vec<Expense> = serde_json::from_str(&raw)
        .with_context(|| format!("Parse expenses file {}", path.display()))?;
    for e in &expenses {
        e.check_balances()?;
    }
    tracing::debug!(count = expenses.len(), path = %path.display(), "loaded expenses");
    Ok(expenses)
}

pub fn read_groups(path: &Path) -> Result<Vec<GroupSummary>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Open groups file {}", path.display()))?;
    let groups: Vec<GroupSummary> = serde_json::from_str(&raw)
        .with_context(|| format!("Parse groups file {}", path.display()))?;
    Ok(groups)
}
