// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tabsplit::{cli, commands, config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TABSPLIT_LOG")
                .unwrap_or_else(|_| EnvFilter::new("tabsplit=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings_path = config::config_path().ok();
    let settings = config::load_or_default(settings_path.as_deref())?.with_env_overrides();
    let require_path = || {
        settings_path
            .as_deref()
            .context("Could not determine platform-specific config dir")
    };

    match matches.subcommand() {
        Some(("feed", sub)) => commands::feed::handle(&settings, sub)?,
        Some(("impact", sub)) => commands::impact::handle(&settings, sub)?,
        Some(("groups", sub)) => commands::groups::handle(&settings, require_path()?, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&settings, sub)?,
        Some(("config", sub)) => commands::settings::handle(&settings, require_path()?, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
