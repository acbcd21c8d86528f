// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use kakei::store::{CachedStore, SqliteStore};
use kakei::{cli, commands};

/// Staleness bound for the read-through cache within one invocation.
const STORE_TTL: Duration = Duration::from_secs(60);

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let inner = match matches.get_one::<String>("db") {
        Some(path) => SqliteStore::open(&PathBuf::from(path))?,
        None => SqliteStore::open_default()?,
    };
    let store = CachedStore::new(inner, STORE_TTL);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized at {}", SqliteStore::data_path()?.display());
        }
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, sub)?,
        Some(("journal", sub)) => commands::journal::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("advice", sub)) => commands::advice::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("auth", sub)) => commands::auth::handle(sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
