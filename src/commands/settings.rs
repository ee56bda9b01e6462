// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};

use crate::config::{self, Settings};
use crate::utils::pretty_table;

pub fn handle(settings: &Settings, settings_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(settings, settings_path),
        Some(("set", sub)) => set(settings_path, sub),
        _ => Ok(()),
    }
}

fn show(settings: &Settings, settings_path: &Path) -> Result<()> {
    let none = || "(not set)".to_string();
    let anchored = settings
        .anchored_groups
        .ids()
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let rows = vec![
        vec!["file".into(), settings_path.display().to_string()],
        vec![
            "backend_url".into(),
            settings.backend_url.clone().unwrap_or_else(none),
        ],
        vec![
            "api_key".into(),
            settings.masked_api_key().unwrap_or_else(none),
        ],
        vec![
            "profile_id".into(),
            settings.profile_id.clone().unwrap_or_else(none),
        ],
        vec!["anchored_groups".into(), anchored],
    ];
    println!("{}", pretty_table(&["Key", "Value"], rows));
    Ok(())
}

/// Applies `config set` flags to the stored file; env overrides are not persisted.
pub fn set(settings_path: &Path, sub: &clap::ArgMatches) -> Result<()> {
    let arg = |k: &str| {
        sub.get_one::<String>(k)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let backend_url = arg("backend-url");
    let api_key = arg("api-key");
    let profile = arg("profile");
    if backend_url.is_none() && api_key.is_none() && profile.is_none() {
        bail!("Nothing to set; pass --backend-url, --api-key or --profile");
    }

    let mut s = config::load_from(settings_path)?;
    if let Some(v) = backend_url {
        s.backend_url = Some(v);
    }
    if let Some(v) = api_key {
        s.api_key = Some(v);
    }
    if let Some(v) = profile {
        s.profile_id = Some(v);
    }
    config::save_to(settings_path, &s)?;
    println!("Saved settings to {}", settings_path.display());
    Ok(())
}
