// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    fmt_money, get_currency, get_initial_balance, maybe_print_json, parse_decimal, pretty_table,
    set_currency, set_initial_balance,
};
use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let initial = get_initial_balance(conn)?;
    let v = json!({ "currency": ccy, "initial_balance": initial });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        println!(
            "{}",
            pretty_table(
                &["Setting", "Value"],
                vec![
                    vec!["currency".into(), ccy.clone()],
                    vec!["initial_balance".into(), fmt_money(&initial, &ccy)],
                ],
            )
        );
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let balance = sub.get_one::<String>("initial-balance");
    let ccy = sub.get_one::<String>("currency");
    if balance.is_none() && ccy.is_none() {
        bail!("Nothing to set (use --initial-balance and/or --currency)");
    }
    if let Some(b) = balance {
        let amount = parse_decimal(b)?;
        set_initial_balance(conn, amount)?;
        println!("Initial balance set to {}", amount);
    }
    if let Some(c) = ccy {
        let c = c.trim();
        if c.is_empty() {
            bail!("Currency must not be empty");
        }
        set_currency(conn, c)?;
        println!("Currency set to {}", c.to_uppercase());
    }
    Ok(())
}
