// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SplitError};

/// Identifier of a membership record within one group.
pub type MemberId = i64;

/// Anything with an id and a creation timestamp can be placed on the day feed.
pub trait Activity {
    fn id(&self) -> i64;
    fn created_at(&self) -> &str;
}

impl<T: Activity + ?Sized> Activity for &T {
    fn id(&self) -> i64 {
        (**self).id()
    }

    fn created_at(&self) -> &str {
        (**self).created_at()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub owner: MemberId,
    pub amount: Decimal, // signed, viewer currency
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub created_at: String,
    pub group_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub balances: Vec<Balance>,
}

impl Expense {
    /// Checks that every balance owner appears at most once.
    pub fn check_balances(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for b in &self.balances {
            if !seen.insert(b.owner) {
                return Err(SplitError::DuplicateBalanceOwner {
                    expense_id: self.id,
                    owner: b.owner,
                });
            }
        }
        Ok(())
    }
}

impl Activity for Expense {
    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MemberId,
    pub group_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub members: Vec<Membership>,
}

/// One row of the group overview. Counts arrive from the backend as
/// `[{"count": n}]` aggregates and are flattened on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        rename = "members",
        alias = "member_count",
        default,
        deserialize_with = "aggregate_count"
    )]
    pub member_count: u64,
    #[serde(
        rename = "expenses",
        alias = "expense_count",
        default,
        deserialize_with = "aggregate_count"
    )]
    pub expense_count: u64,
}

impl GroupSummary {
    pub fn is_settled(&self) -> bool {
        self.status.as_deref() == Some("settled")
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn null_as_empty<'de, D, T>(d: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

fn aggregate_count<'de, D>(d: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Count {
        count: u64,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Plain(u64),
        Aggregate(Vec<Count>),
    }

    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Plain(n)) => n,
        Some(Raw::Aggregate(v)) => v.first().map(|c| c.count).unwrap_or(0),
        None => 0,
    })
}
