// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::balances;
use crate::capacity::{day_capacity, period_summary, trend};
use crate::models::{CategoryBreakdown, DayCapacityPoint};
use crate::store;
use crate::summary::monthly_category_report;
use crate::utils::{
    fmt_money, get_currency, get_initial_balance, maybe_print_json, parse_date, parse_month,
    pretty_table, round_money, today,
};
use anyhow::Result;
use log::debug;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("capacity", sub)) => capacity(conn, sub)?,
        Some(("trend", sub)) => trend_report(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("balance", sub)) => balance(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn date_or_today(sub: &clap::ArgMatches, key: &str) -> Result<chrono::NaiveDate> {
    match sub.get_one::<String>(key) {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

fn capacity(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub, "date")?;
    let txs = store::all_transactions(conn)?;
    let cap = round_money(day_capacity(&txs, date)?);
    let v = json!({ "date": date, "day_capacity": cap });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        println!("Day capacity on {}: {}", date, fmt_money(&cap, &get_currency(conn)?));
    }
    Ok(())
}

fn trend_rows(points: &[DayCapacityPoint]) -> Vec<Vec<String>> {
    points
        .iter()
        .map(|p| vec![p.date.to_string(), format!("{:.2}", p.day_capacity)])
        .collect()
}

fn trend_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let txs = store::all_transactions(conn)?;
    let points: Vec<DayCapacityPoint> = trend(&txs, from, to)?
        .into_iter()
        .map(|p| DayCapacityPoint {
            date: p.date,
            day_capacity: round_money(p.day_capacity),
        })
        .collect();
    debug!("trend {}..={} has {} points", from, to, points.len());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        println!("{}", pretty_table(&["Date", "Day capacity"], trend_rows(&points)));
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let txs = store::all_transactions(conn)?;
    let s = period_summary(&txs, from, to)?.rounded();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let ccy = get_currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["Period", "Income", "Expense", "Net change"],
                vec![vec![
                    format!("{} .. {}", s.start_date, s.end_date),
                    fmt_money(&s.total_income, &ccy),
                    fmt_money(&s.total_expense, &ccy),
                    fmt_money(&s.net_change, &ccy),
                ]],
            )
        );
        println!(
            "{}",
            pretty_table(&["Date", "Day capacity"], trend_rows(&s.day_capacity_trend))
        );
    }
    Ok(())
}

fn breakdown_rows(items: &[CategoryBreakdown]) -> Vec<Vec<String>> {
    let mut items: Vec<&CategoryBreakdown> = items.iter().collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    items
        .into_iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.count.to_string(),
                format!("{:.2}", c.amount),
                format!("{:.2}%", c.percentage),
            ]
        })
        .collect()
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let txs = store::all_transactions(conn)?;
    let cats = store::list_categories(conn)?;
    let report = monthly_category_report(&txs, &cats, year, month)?.rounded();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let headers = ["Category", "Count", "Amount", "Share"];
        println!("Income {}-{:02} (total {:.2})", year, month, report.total_income);
        println!("{}", pretty_table(&headers, breakdown_rows(&report.income_categories)));
        println!("Expense {}-{:02} (total {:.2})", year, month, report.total_expense);
        println!("{}", pretty_table(&headers, breakdown_rows(&report.expense_categories)));
    }
    Ok(())
}

fn balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let as_of = date_or_today(sub, "as-of")?;
    let txs = store::all_transactions(conn)?;
    let b = balances(get_initial_balance(conn)?, &txs, as_of)?;
    let v = json!({
        "as_of": b.as_of,
        "initial_balance": round_money(b.initial_balance),
        "current_total_balance": round_money(b.current_total_balance),
        "long_term_balance": round_money(b.long_term_balance),
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        let ccy = get_currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["As of", "Initial", "Current total", "Long term"],
                vec![vec![
                    b.as_of.to_string(),
                    fmt_money(&b.initial_balance, &ccy),
                    fmt_money(&b.current_total_balance, &ccy),
                    fmt_money(&b.long_term_balance, &ccy),
                ]],
            )
        );
    }
    Ok(())
}
