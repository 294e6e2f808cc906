// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::summary::category_usage;
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let desc = sub
                .get_one::<String>("description")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            store::add_category(conn, name, desc)?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let cats = store::list_categories(conn)?;
            let txs = store::all_transactions(conn)?;
            let usage = category_usage(&txs, &cats);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &usage)? {
                let rows = usage
                    .into_iter()
                    .map(|u| {
                        vec![
                            u.name,
                            u.kind.to_string(),
                            u.income_count.to_string(),
                            u.expense_count.to_string(),
                            u.description.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Category", "Used as", "Income tx", "Expense tx", "Description"],
                        rows
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let new_name = sub.get_one::<String>("new-name").map(|s| s.trim());
            let desc = sub
                .get_one::<String>("description")
                .map(|s| Some(s.trim()).filter(|s| !s.is_empty()));
            if new_name.is_none() && desc.is_none() {
                bail!("Nothing to change (use --new-name and/or --description)");
            }
            let id = id_for_category(conn, name)?;
            store::update_category(conn, id, new_name, desc)?;
            println!("Updated category '{}'", new_name.unwrap_or(name));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let id = id_for_category(conn, name)?;
            let moved = store::remove_category(conn, id)?;
            println!(
                "Removed category '{}' ({} transactions now uncategorized)",
                name, moved
            );
        }
        _ => {}
    }
    Ok(())
}
