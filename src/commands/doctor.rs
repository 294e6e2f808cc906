// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::allocation::validate;
use crate::models::NewTransaction;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use log::warn;
use rusqlite::Connection;

/// Rows that would be rejected if written today, as (issue, detail) pairs.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    for raw in store::list_raw(conn)? {
        let id = raw.id;
        match raw.parse() {
            Err(e) => rows.push(vec!["unreadable_row".into(), format!("#{}: {:#}", id, e)]),
            Ok(t) => {
                if let Err(e) = validate(&NewTransaction::from(&t)) {
                    rows.push(vec!["invalid_transaction".into(), format!("#{}: {}", id, e)]);
                }
            }
        }
    }

    let mut stmt = conn.prepare(
        "SELECT t.id, t.category_id FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let cat: i64 = r.get(1)?;
        rows.push(vec![
            "dangling_category".into(),
            format!("#{}: category {}", id, cat),
        ]);
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        warn!("doctor found {} issue(s)", rows.len());
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
