// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::daily_allocation;
use crate::models::{
    NewTransaction, Transaction, TransactionMode, TransactionType, UNCATEGORIZED,
};
use crate::store::{self, ModeChange, TransactionFilter, TransactionPatch};
use crate::utils::{
    fmt_money, get_currency, id_for_category, maybe_print_json, parse_date, parse_days,
    parse_decimal, parse_id, pretty_table, round_money, today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            store::delete_transaction(conn, id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn mode_from_args(sub: &clap::ArgMatches) -> Result<Option<ModeChange>> {
    if let Some(c) = sub.get_one::<String>("cycle-days") {
        return Ok(Some(ModeChange::Recurring {
            cycle_days: parse_days(c)?,
        }));
    }
    if let Some(n) = sub.get_one::<String>("duration-days") {
        return Ok(Some(ModeChange::Continuous {
            duration_days: parse_days(n)?,
        }));
    }
    Ok(None)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ty = sub.get_one::<String>("type").unwrap().parse::<TransactionType>()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(conn, name)?),
        None => None,
    };
    let mut tx = NewTransaction::single(ty, amount, date).with_category(category_id);
    if let Some(d) = sub.get_one::<String>("description") {
        tx = tx.with_description(d.trim());
    }
    match mode_from_args(sub)? {
        Some(ModeChange::Recurring { cycle_days }) => {
            tx.transaction_mode = TransactionMode::Recurring;
            tx.cycle_days = Some(cycle_days);
        }
        Some(ModeChange::Continuous { duration_days }) => {
            tx.transaction_mode = TransactionMode::Continuous;
            tx.duration_days = Some(duration_days);
        }
        Some(ModeChange::Single) | None => {}
    }

    let stored = store::insert_transaction(conn, &tx)?;
    println!(
        "Recorded {} {} of {} starting {} (id {})",
        stored.transaction_mode,
        stored.transaction_type,
        stored.amount,
        stored.start_date,
        stored.id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub start_date: String,
    pub transaction_type: String,
    pub transaction_mode: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub cycle_days: Option<i64>,
    pub duration_days: Option<i64>,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        category_id: sub
            .get_one::<String>("category")
            .map(|s| id_for_category(conn, s))
            .transpose()?,
        transaction_type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    store::list_transactions(conn, &filter)
}

fn category_names(conn: &Connection) -> Result<HashMap<i64, String>> {
    Ok(store::list_categories(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

fn to_row(t: &Transaction, names: &HashMap<i64, String>) -> TransactionRow {
    TransactionRow {
        id: t.id,
        start_date: t.start_date.to_string(),
        transaction_type: t.transaction_type.to_string(),
        transaction_mode: t.transaction_mode.to_string(),
        amount: format!("{:.2}", round_money(t.amount)),
        category: t
            .category_id
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        description: t.description.clone().unwrap_or_default(),
        cycle_days: t.cycle_days,
        duration_days: t.duration_days,
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let names = category_names(conn)?;
    let data: Vec<TransactionRow> = query_rows(conn, sub)?
        .iter()
        .map(|t| to_row(t, &names))
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                let days = r
                    .cycle_days
                    .or(r.duration_days)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                vec![
                    r.id.to_string(),
                    r.start_date,
                    r.transaction_type,
                    r.transaction_mode,
                    days,
                    r.amount,
                    r.category,
                    r.description,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Start", "Type", "Mode", "Days", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let t = store::get_transaction(conn, id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let names = category_names(conn)?;
    let row = to_row(&t, &names);
    let mut rows = vec![
        vec!["ID".to_string(), row.id.to_string()],
        vec!["Type".to_string(), row.transaction_type],
        vec!["Mode".to_string(), row.transaction_mode],
        vec!["Amount".to_string(), fmt_money(&t.amount, &ccy)],
        vec!["Start".to_string(), row.start_date],
        vec!["Category".to_string(), row.category],
        vec!["Description".to_string(), row.description],
        vec![
            "Created".to_string(),
            t.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    ];
    if let Some(c) = t.cycle_days {
        rows.push(vec!["Cycle (days)".to_string(), c.to_string()]);
    }
    if let Some(n) = t.duration_days {
        rows.push(vec!["Duration (days)".to_string(), n.to_string()]);
    }
    if let Some(end) = t.end_date() {
        rows.push(vec!["Ends before".to_string(), end.to_string()]);
    }
    if let Some(per_day) = daily_allocation(&t)? {
        rows.push(vec!["Daily allocation".to_string(), fmt_money(&per_day, &ccy)]);
    }
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

pub fn patch_from_args(conn: &Connection, sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    let mut patch = TransactionPatch {
        amount: sub.get_one::<String>("amount").map(|s| parse_decimal(s)).transpose()?,
        transaction_type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()?,
        start_date: sub.get_one::<String>("date").map(|s| parse_date(s)).transpose()?,
        description: sub
            .get_one::<String>("description")
            .map(|s| Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        category_id: None,
        mode: mode_from_args(sub)?,
    };
    if sub.get_flag("uncategorize") {
        patch.category_id = Some(None);
    } else if let Some(name) = sub.get_one::<String>("category") {
        patch.category_id = Some(Some(id_for_category(conn, name)?));
    }
    if sub.get_flag("single") {
        patch.mode = Some(ModeChange::Single);
    }
    Ok(patch)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let patch = patch_from_args(conn, sub)?;
    let t = store::update_transaction(conn, id, &patch)?;
    println!(
        "Updated transaction {}: {} {} of {} starting {}",
        t.id, t.transaction_mode, t.transaction_type, t.amount, t.start_date
    );
    Ok(())
}
