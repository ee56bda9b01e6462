// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only client for the hosted backend's REST interface.

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::error::SplitError;
use crate::models::{Expense, GroupSummary, Profile};
use crate::utils::http_client;

const EXPENSE_COLUMNS: &str = "id,title,amount,currency,created_at,group_id,balances(amount,owner)";
const GROUP_COLUMNS: &str = "id,status,title,members(count),expenses(count)";
const PROFILE_COLUMNS: &str = "id,members(id,group_id)";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct Backend {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl Backend {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).with_context(|| format!("Invalid backend url '{}'", base_url))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: http_client()?,
        })
    }

    pub fn from_settings(s: &Settings) -> Result<Self> {
        let url = s.backend_url.as_deref().ok_or_else(|| {
            SplitError::Config(
                "No backend configured; run `tabsplit config set --backend-url ...` or pass --file"
                    .into(),
            )
        })?;
        let key = s.api_key.as_deref().ok_or_else(|| {
            SplitError::Config("No API key configured; run `tabsplit config set --api-key ...`".into())
        })?;
        Backend::new(url, key)
    }

    fn table_url(&self, table: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{}", table))
            .with_context(|| format!("Build url for {}", table))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    pub fn expenses_url(&self, group_id: i64) -> Result<Url> {
        self.table_url(
            "expenses",
            &[
                ("select", EXPENSE_COLUMNS.to_string()),
                ("group_id", format!("eq.{}", group_id)),
            ],
        )
    }

    pub fn groups_url(&self) -> Result<Url> {
        self.table_url("groups", &[("select", GROUP_COLUMNS.to_string())])
    }

    pub fn profile_url(&self, profile_id: &str) -> Result<Url> {
        self.table_url(
            "profiles",
            &[
                ("select", PROFILE_COLUMNS.to_string()),
                ("id", format!("eq.{}", profile_id)),
            ],
        )
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "backend request");
        let res = self
            .http
            .get(url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .with_context(|| format!("Request {}", url.path()))?;
        let status = res.status();
        if status.is_success() {
            return res
                .json::<T>()
                .with_context(|| format!("Decode response from {}", url.path()));
        }
        let message = res
            .json::<ErrorBody>()
            .map(|b| b.message)
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::warn!(status = status.as_u16(), %message, "backend refused request");
        Err(SplitError::Backend {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    pub fn fetch_expenses(&self, group_id: i64) -> Result<Vec<Expense>> {
        let expenses: Vec<Expense> = self.get(self.expenses_url(group_id)?)?;
        for e in &expenses {
            e.check_balances()?;
        }
        tracing::info!(group_id, count = expenses.len(), "fetched expenses");
        Ok(expenses)
    }

    pub fn fetch_groups(&self) -> Result<Vec<GroupSummary>> {
        let groups: Vec<GroupSummary> = self.get(self.groups_url()?)?;
        tracing::info!(count = groups.len(), "fetched groups");
        Ok(groups)
    }

    pub fn fetch_profile(&self, profile_id: &str) -> Result<Profile> {
        let mut rows: Vec<Profile> = self.get(self.profile_url(profile_id)?)?;
        if rows.is_empty() {
            return Err(anyhow!("Profile '{}' not found", profile_id));
        }
        Ok(rows.swap_remove(0))
    }
}
