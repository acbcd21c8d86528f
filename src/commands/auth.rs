// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::utils::check_passphrase;

/// The configured secret, read from the environment like the advice
/// endpoint settings. Unset means the gate is not configured.
pub const PASSPHRASE_VAR: &str = "KAKEI_PASSPHRASE";

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let submitted = sub.get_one::<String>("passphrase").unwrap();
    let configured = std::env::var(PASSPHRASE_VAR).unwrap_or_default();
    if configured.is_empty() {
        println!("No passphrase configured ({} is unset)", PASSPHRASE_VAR);
    } else if check_passphrase(submitted, &configured) {
        println!("ok");
    } else {
        println!("denied");
        std::process::exit(1);
    }
    Ok(())
}
