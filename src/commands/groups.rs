// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use crate::anchors::{AnchorSet, sections};
use crate::backend::Backend;
use crate::config::{self, Settings};
use crate::models::GroupSummary;
use crate::utils::{maybe_print_json, pretty_table, read_groups};

pub fn handle(settings: &Settings, settings_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(settings, sub)?,
        Some(("anchor", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if set_anchor(settings_path, id, true)? {
                println!("Anchored group {}", id);
            } else {
                println!("Group {} is already anchored", id);
            }
        }
        Some(("unanchor", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if set_anchor(settings_path, id, false)? {
                println!("Unanchored group {}", id);
            } else {
                println!("Group {} was not anchored", id);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Persists the anchor change; returns whether anything changed.
pub fn set_anchor(settings_path: &Path, id: i64, anchored: bool) -> Result<bool> {
    let mut s = config::load_from(settings_path)?;
    let changed = if anchored {
        s.anchored_groups.anchor(id)
    } else {
        s.anchored_groups.unanchor(id)
    };
    if changed {
        config::save_to(settings_path, &s)?;
    }
    Ok(changed)
}

fn list(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let groups = match sub.get_one::<String>("file") {
        Some(path) => read_groups(Path::new(path))?,
        None => Backend::from_settings(settings)?.fetch_groups()?,
    };
    let rows = section_rows(&groups, &settings.anchored_groups);
    let secs = sections(&groups, &settings.anchored_groups);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &secs)? {
        println!(
            "{}",
            pretty_table(&["Section", "Group", "Members", "Expenses", "Status"], rows)
        );
    }
    Ok(())
}

pub fn section_rows(groups: &[GroupSummary], anchors: &AnchorSet) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for sec in sections(groups, anchors) {
        for (i, g) in sec.groups.iter().enumerate() {
            let title = if i == 0 { sec.title } else { "" };
            let status = if g.is_settled() { "Settled" } else { "Not Settled" };
            rows.push(vec![
                title.to_string(),
                g.title.clone(),
                g.member_count.to_string(),
                g.expense_count.to_string(),
                status.to_string(),
            ]);
        }
    }
    rows
}
