// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, info};
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.vela", "Vela", "vela"));

pub const DB_ENV: &str = "VELA_DB";

pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Salary", "Regular employment income"),
    ("Freelance", "Freelance and contract work"),
    ("Investment", "Investment returns"),
    ("Food", "Groceries and dining"),
    ("Housing", "Rent, mortgage, utilities"),
    ("Transportation", "Public transit, car expenses"),
    ("Entertainment", "Movies, games, activities"),
    ("Other", "Miscellaneous expenses"),
];

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("vela.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    open_at(&path)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    debug!("opening database at {}", path.display());
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        transaction_type TEXT NOT NULL CHECK(transaction_type IN ('income','expense')),
        transaction_mode TEXT NOT NULL CHECK(transaction_mode IN ('single','recurring','continuous')),
        description TEXT,
        category_id INTEGER,
        start_date TEXT NOT NULL,
        cycle_days INTEGER,
        duration_days INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_start ON transactions(start_date);
    "#,
    )?;
    seed_default_categories(conn)?;
    Ok(())
}

fn seed_default_categories(conn: &mut Connection) -> Result<()> {
    let seeded: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM settings WHERE key='categories_seeded')",
            [],
            |r| r.get(0),
        )
        .context("Check category seeding")?;
    if seeded {
        return Ok(());
    }
    let tx = conn.transaction()?;
    for (name, description) in DEFAULT_CATEGORIES {
        tx.execute(
            "INSERT OR IGNORE INTO categories(name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
    }
    tx.execute(
        "INSERT INTO settings(key, value) VALUES('categories_seeded', '1')",
        [],
    )?;
    tx.commit()?;
    info!("seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(())
}
