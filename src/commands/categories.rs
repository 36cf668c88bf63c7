// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::taxonomy::{ALIASES, Category};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let mut data = Vec::new();
            for cat in Category::ALL {
                data.push(vec![cat.tag().to_string(), cat.tag().to_string(), "canonical".into()]);
            }
            for (alias, cat) in ALIASES {
                data.push(vec![alias.to_string(), cat.tag().to_string(), "legacy alias".into()]);
            }
            println!("{}", pretty_table(&["Tag", "Resolves To", "Status"], data));
        }
        _ => {}
    }
    Ok(())
}
