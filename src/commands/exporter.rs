// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::commands::feed::query_feed;
use crate::config::Settings;
use crate::utils::fmt_amount;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("feed", sub)) => export_feed(settings, sub),
        _ => Ok(()),
    }
}

fn export_feed(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let feed = query_feed(settings, sub)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        wtr.write_record([
            "day", "id", "title", "amount", "currency", "impact", "direction", "created_at",
        ])?;
        for (day, items) in feed.iter() {
            for r in items {
                wtr.write_record([
                    day.to_string(),
                    r.id.to_string(),
                    r.title.clone(),
                    fmt_amount(&r.amount),
                    r.currency.clone(),
                    fmt_amount(&r.impact),
                    r.direction.as_str().to_string(),
                    r.created_at.clone(),
                ])?;
            }
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&feed)?)
            .with_context(|| format!("Write {}", out))?;
    }
    tracing::info!(days = feed.len(), expenses = feed.total(), out = %out, "exported feed");
    println!("Exported {} expenses over {} days to {}", feed.total(), feed.len(), out);
    Ok(())
}
