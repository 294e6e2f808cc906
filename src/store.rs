// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed transaction and category store.
//!
//! Every write goes through `allocation::validate`, so rows written by this
//! module always satisfy the mode/type/day-count invariant. Readers return
//! owned snapshots; the allocation core never sees the connection.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::allocation;
use crate::models::{Category, NewTransaction, Transaction, TransactionMode, TransactionType};

const TX_COLUMNS: &str = "id, amount, transaction_type, transaction_mode, description, category_id, start_date, cycle_days, duration_days, created_at";

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub transaction_type: Option<TransactionType>,
    pub limit: Option<usize>,
}

/// New mode for an edited transaction, carrying its day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Single,
    Recurring { cycle_days: i64 },
    Continuous { duration_days: i64 },
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub transaction_type: Option<TransactionType>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub start_date: Option<NaiveDate>,
    pub mode: Option<ModeChange>,
}

impl TransactionPatch {
    pub fn apply(&self, base: &Transaction) -> NewTransaction {
        let mut tx = NewTransaction::from(base);
        if let Some(a) = self.amount {
            tx.amount = a;
        }
        if let Some(ty) = self.transaction_type {
            tx.transaction_type = ty;
        }
        if let Some(d) = &self.description {
            tx.description = d.clone();
        }
        if let Some(c) = self.category_id {
            tx.category_id = c;
        }
        if let Some(s) = self.start_date {
            tx.start_date = s;
        }
        match self.mode {
            Some(ModeChange::Single) => {
                tx.transaction_mode = TransactionMode::Single;
                tx.cycle_days = None;
                tx.duration_days = None;
            }
            Some(ModeChange::Recurring { cycle_days }) => {
                tx.transaction_mode = TransactionMode::Recurring;
                tx.cycle_days = Some(cycle_days);
                tx.duration_days = None;
            }
            Some(ModeChange::Continuous { duration_days }) => {
                tx.transaction_mode = TransactionMode::Continuous;
                tx.cycle_days = None;
                tx.duration_days = Some(duration_days);
            }
            None => {}
        }
        tx
    }
}

/// Stored row before its text columns are parsed.
#[derive(Debug, Clone)]
pub struct RawTransaction {
    pub id: i64,
    pub amount: String,
    pub transaction_type: String,
    pub transaction_mode: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub start_date: NaiveDate,
    pub cycle_days: Option<i64>,
    pub duration_days: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl RawTransaction {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawTransaction {
            id: r.get(0)?,
            amount: r.get(1)?,
            transaction_type: r.get(2)?,
            transaction_mode: r.get(3)?,
            description: r.get(4)?,
            category_id: r.get(5)?,
            start_date: r.get(6)?,
            cycle_days: r.get(7)?,
            duration_days: r.get(8)?,
            created_at: r.get(9)?,
        })
    }

    pub fn parse(self) -> Result<Transaction> {
        let amount = self
            .amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' on transaction {}", self.amount, self.id))?;
        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .with_context(|| format!("Transaction {}", self.id))?;
        let transaction_mode = self
            .transaction_mode
            .parse::<TransactionMode>()
            .with_context(|| format!("Transaction {}", self.id))?;
        Ok(Transaction {
            id: self.id,
            amount,
            transaction_type,
            transaction_mode,
            category_id: self.category_id,
            description: self.description,
            start_date: self.start_date,
            cycle_days: self.cycle_days,
            duration_days: self.duration_days,
            created_at: self.created_at,
        })
    }
}

pub fn insert_transaction(conn: &Connection, tx: &NewTransaction) -> Result<Transaction> {
    allocation::validate(tx)?;
    conn.execute(
        "INSERT INTO transactions(amount, transaction_type, transaction_mode, description, category_id, start_date, cycle_days, duration_days)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.amount.to_string(),
            tx.transaction_type.as_str(),
            tx.transaction_mode.as_str(),
            tx.description,
            tx.category_id,
            tx.start_date,
            tx.cycle_days,
            tx.duration_days
        ],
    )
    .context("Insert transaction")?;
    let id = conn.last_insert_rowid();
    info!(
        "stored {} {} transaction {} ({})",
        tx.transaction_mode, tx.transaction_type, id, tx.amount
    );
    get_transaction(conn, id)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let sql = format!("SELECT {} FROM transactions WHERE id=?1", TX_COLUMNS);
    let raw = conn
        .query_row(&sql, params![id], RawTransaction::from_row)
        .optional()?
        .ok_or_else(|| anyhow!("Transaction {} not found", id))?;
    raw.parse()
}

pub fn update_transaction(
    conn: &Connection,
    id: i64,
    patch: &TransactionPatch,
) -> Result<Transaction> {
    let current = get_transaction(conn, id)?;
    let next = patch.apply(&current);
    allocation::validate(&next)?;
    conn.execute(
        "UPDATE transactions SET amount=?1, transaction_type=?2, transaction_mode=?3, description=?4,
             category_id=?5, start_date=?6, cycle_days=?7, duration_days=?8
         WHERE id=?9",
        params![
            next.amount.to_string(),
            next.transaction_type.as_str(),
            next.transaction_mode.as_str(),
            next.description,
            next.category_id,
            next.start_date,
            next.cycle_days,
            next.duration_days,
            id
        ],
    )
    .with_context(|| format!("Update transaction {}", id))?;
    debug!("updated transaction {}", id);
    get_transaction(conn, id)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    info!("deleted transaction {}", id);
    Ok(())
}

pub fn list_raw(conn: &Connection) -> Result<Vec<RawTransaction>> {
    let sql = format!("SELECT {} FROM transactions ORDER BY id", TX_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], RawTransaction::from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_transactions(conn: &Connection, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
    let mut sql = format!("SELECT {} FROM transactions WHERE 1=1", TX_COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(from) = filter.from {
        sql.push_str(" AND start_date>=?");
        params_vec.push(Box::new(from));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND start_date<=?");
        params_vec.push(Box::new(to));
    }
    if let Some(cat) = filter.category_id {
        sql.push_str(" AND category_id=?");
        params_vec.push(Box::new(cat));
    }
    if let Some(ty) = filter.transaction_type {
        sql.push_str(" AND transaction_type=?");
        params_vec.push(Box::new(ty.as_str()));
    }
    sql.push_str(" ORDER BY start_date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(params_vec.iter().map(|p| &**p)),
        RawTransaction::from_row,
    )?;
    let mut data = Vec::new();
    for r in rows {
        data.push(r?.parse()?);
    }
    Ok(data)
}

/// Full snapshot handed to the allocation core.
pub fn all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    list_raw(conn)?.into_iter().map(RawTransaction::parse).collect()
}

pub fn add_category(conn: &Connection, name: &str, description: Option<&str>) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name must not be empty");
    }
    conn.execute(
        "INSERT INTO categories(name, description) VALUES (?1, ?2)",
        params![name, description],
    )
    .with_context(|| format!("Category '{}' already exists", name))?;
    Ok(conn.last_insert_rowid())
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM categories ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            description: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_category(
    conn: &Connection,
    id: i64,
    new_name: Option<&str>,
    description: Option<Option<&str>>,
) -> Result<()> {
    if let Some(name) = new_name {
        let name = name.trim();
        if name.is_empty() {
            bail!("Category name must not be empty");
        }
        let n = conn
            .execute(
                "UPDATE categories SET name=?1 WHERE id=?2",
                params![name, id],
            )
            .with_context(|| format!("Category '{}' already exists", name))?;
        if n == 0 {
            bail!("Category {} not found", id);
        }
    }
    if let Some(desc) = description {
        let n = conn.execute(
            "UPDATE categories SET description=?1 WHERE id=?2",
            params![desc, id],
        )?;
        if n == 0 {
            bail!("Category {} not found", id);
        }
    }
    debug!("updated category {}", id);
    Ok(())
}

/// Remove a category, moving its transactions to uncategorized first.
/// Returns how many transactions were reassigned.
pub fn remove_category(conn: &mut Connection, id: i64) -> Result<usize> {
    let tx = conn.transaction()?;
    let moved = tx.execute(
        "UPDATE transactions SET category_id=NULL WHERE category_id=?1",
        params![id],
    )?;
    let n = tx.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Category {} not found", id);
    }
    tx.commit()?;
    info!("removed category {} ({} transactions now uncategorized)", id, moved);
    Ok(moved)
}
