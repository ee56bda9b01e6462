// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, MemberId, Membership};
use crate::utils::{fmt_money, round_money};

/// Signed effect of `expense` on the viewer: positive when the viewer is owed,
/// negative when the viewer owes, zero when the viewer is not a member of the
/// group or not part of the expense.
pub fn resolve_impact(expense: &Expense, viewer: Option<MemberId>) -> Decimal {
    let Some(member_id) = viewer else {
        return Decimal::ZERO;
    };
    match expense.balances.iter().find(|b| b.owner == member_id) {
        Some(b) => b.amount,
        None => Decimal::ZERO,
    }
}

/// The viewer's membership id in `group_id`, if any.
pub fn viewer_member_for(memberships: &[Membership], group_id: i64) -> Option<MemberId> {
    memberships
        .iter()
        .find(|m| m.group_id == group_id)
        .map(|m| m.id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Owed,
    Owes,
    Settled,
}

impl Impact {
    pub fn of(amount: Decimal) -> Impact {
        if amount.is_sign_positive() && !amount.is_zero() {
            Impact::Owed
        } else if amount.is_sign_negative() && !amount.is_zero() {
            Impact::Owes
        } else {
            Impact::Settled
        }
    }

    /// Classification of the amount as it is displayed, to the cent.
    pub fn shown(amount: Decimal) -> Impact {
        Impact::of(round_money(amount))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Owed => "owed",
            Impact::Owes => "owes",
            Impact::Settled => "settled",
        }
    }
}

/// `+ EUR 12.50`, `- EUR 12.50` or `EUR 0.00`.
pub fn fmt_impact(amount: Decimal, ccy: &str) -> String {
    let amount = round_money(amount);
    match Impact::of(amount) {
        Impact::Owed => format!("+ {}", fmt_money(&amount, ccy)),
        Impact::Owes => format!("- {}", fmt_money(&amount.abs(), ccy)),
        Impact::Settled => fmt_money(&Decimal::ZERO, ccy),
    }
}
