// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::anchors::AnchorSet;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tabsplit", "tabsplit"));

pub const ENV_BACKEND_URL: &str = "TABSPLIT_BACKEND_URL";
pub const ENV_API_KEY: &str = "TABSPLIT_API_KEY";
pub const ENV_PROFILE_ID: &str = "TABSPLIT_PROFILE_ID";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
    pub profile_id: Option<String>,
    pub anchored_groups: AnchorSet,
}

impl Settings {
    /// Values from the environment win over the file.
    pub fn with_env_overrides(mut self) -> Self {
        let var = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
        if let Some(v) = var(ENV_BACKEND_URL) {
            self.backend_url = Some(v);
        }
        if let Some(v) = var(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = var(ENV_PROFILE_ID) {
            self.profile_id = Some(v);
        }
        self
    }

    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|k| {
            let n = k.chars().count();
            if n <= 4 {
                return "****".to_string();
            }
            let tail: String = k.chars().skip(n - 4).collect();
            format!("****{}", tail)
        })
    }
}

/// Where the settings file lives. Nothing is created until [`save_to`].
pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Like [`load_from`], but a platform without a config dir yields defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(p) => load_from(p),
        None => {
            tracing::warn!("no platform config dir, using default settings");
            Ok(Settings::default())
        }
    }
}

/// A missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("Read settings {}", path.display()))?;
    let s: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parse settings {}", path.display()))?;
    Ok(s)
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Create settings dir {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(settings)?)
        .with_context(|| format!("Write settings {}", path.display()))?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}
