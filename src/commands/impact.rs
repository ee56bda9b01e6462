// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::feed::load_source;
use crate::config::Settings;
use crate::impact::{Impact, fmt_impact, resolve_impact};
use crate::utils::{fmt_money, maybe_print_json};

#[derive(Debug, Serialize)]
pub struct ImpactRow {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub currency: String,
    pub member: Option<i64>,
    pub impact: Decimal,
    pub direction: Impact,
}

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let row = query_impact(settings, m)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &row)? {
        println!(
            "{} (total {}): {}",
            row.title,
            fmt_money(&row.amount, &row.currency),
            fmt_impact(row.impact, &row.currency)
        );
    }
    Ok(())
}

pub fn query_impact(settings: &Settings, m: &clap::ArgMatches) -> Result<ImpactRow> {
    let expense_id = *m.get_one::<i64>("expense").unwrap();
    let (expenses, viewer) = load_source(settings, m)?;
    let expense = expenses
        .iter()
        .find(|e| e.id == expense_id)
        .ok_or_else(|| anyhow!("Expense {} not found", expense_id))?;
    let member = viewer.member_for(expense.group_id);
    let impact = resolve_impact(expense, member);
    Ok(ImpactRow {
        id: expense.id,
        title: expense.title.clone(),
        amount: expense.amount,
        currency: expense.currency.clone(),
        member,
        impact,
        direction: Impact::shown(impact),
    })
}
