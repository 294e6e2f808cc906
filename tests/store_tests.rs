// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::params;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use vela::db;
use vela::models::{NewTransaction, TransactionMode, TransactionType};
use vela::store::{self, ModeChange, TransactionFilter, TransactionPatch};
use vela::utils::id_for_category;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn default_categories_are_seeded_once() {
    let file = NamedTempFile::new().unwrap();
    let mut conn = db::open_at(file.path()).unwrap();
    assert_eq!(store::list_categories(&conn).unwrap().len(), 8);
    let other = id_for_category(&conn, "Other").unwrap();
    store::remove_category(&mut conn, other).unwrap();
    drop(conn);

    // reopening must not bring "Other" back
    let conn = db::open_at(file.path()).unwrap();
    let names: Vec<String> = store::list_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names.len(), 7);
    assert!(!names.contains(&"Other".to_string()));
}

#[test]
fn insert_round_trips_through_sqlite() {
    let conn = db::open_in_memory().unwrap();
    let food = id_for_category(&conn, "Food").unwrap();
    let tx = NewTransaction::continuous_expense(Decimal::new(119999, 2), 12, d("2024-02-01"))
        .with_category(Some(food))
        .with_description("laptop");
    let stored = store::insert_transaction(&conn, &tx).unwrap();
    assert_eq!(NewTransaction::from(&stored), tx);

    let again = store::get_transaction(&conn, stored.id).unwrap();
    assert_eq!(again, stored);
    assert_eq!(again.end_date(), Some(d("2024-02-13")));
}

#[test]
fn invalid_transactions_never_reach_the_table() {
    let conn = db::open_in_memory().unwrap();
    let mut bad = NewTransaction::recurring_income(Decimal::from(100), 30, d("2024-01-01"));
    bad.transaction_type = TransactionType::Expense;
    let err = store::insert_transaction(&conn, &bad).unwrap_err();
    assert!(err.to_string().contains("only valid for income"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn list_filters_by_date_type_and_limit() {
    let conn = db::open_in_memory().unwrap();
    for (i, day) in ["2024-03-01", "2024-03-02", "2024-03-03", "2024-04-01"]
        .iter()
        .enumerate()
    {
        let ty = if i % 2 == 0 {
            TransactionType::Expense
        } else {
            TransactionType::Income
        };
        store::insert_transaction(&conn, &NewTransaction::single(ty, Decimal::from(10), d(day)))
            .unwrap();
    }

    let march = store::list_transactions(
        &conn,
        &TransactionFilter {
            from: Some(d("2024-03-01")),
            to: Some(d("2024-03-31")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(march.len(), 3);
    assert_eq!(march[0].start_date, d("2024-03-03"));

    let expenses = store::list_transactions(
        &conn,
        &TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            limit: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].start_date, d("2024-03-03"));
}

#[test]
fn patch_switches_mode_and_revalidates() {
    let conn = db::open_in_memory().unwrap();
    let t = store::insert_transaction(
        &conn,
        &NewTransaction::single(TransactionType::Expense, Decimal::from(600), d("2024-05-01")),
    )
    .unwrap();

    let updated = store::update_transaction(
        &conn,
        t.id,
        &TransactionPatch {
            mode: Some(ModeChange::Continuous { duration_days: 6 }),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.transaction_mode, TransactionMode::Continuous);
    assert_eq!(updated.duration_days, Some(6));
    assert_eq!(updated.created_at, t.created_at);

    // continuous income is not allowed; the stored row stays as it was
    let err = store::update_transaction(
        &conn,
        t.id,
        &TransactionPatch {
            transaction_type: Some(TransactionType::Income),
            ..Default::default()
        },
    );
    assert!(err.is_err());
    assert_eq!(store::get_transaction(&conn, t.id).unwrap(), updated);
}

#[test]
fn removing_category_keeps_its_transactions() {
    let mut conn = db::open_in_memory().unwrap();
    let food = id_for_category(&conn, "Food").unwrap();
    let t = store::insert_transaction(
        &conn,
        &NewTransaction::single(TransactionType::Expense, Decimal::from(25), d("2024-03-10"))
            .with_category(Some(food)),
    )
    .unwrap();

    let moved = store::remove_category(&mut conn, food).unwrap();
    assert_eq!(moved, 1);
    let after = store::get_transaction(&conn, t.id).unwrap();
    assert_eq!(after.category_id, None);
    assert_eq!(after.amount, Decimal::from(25));
}

#[test]
fn duplicate_category_names_are_rejected() {
    let conn = db::open_in_memory().unwrap();
    store::add_category(&conn, "Gifts", None).unwrap();
    assert!(store::add_category(&conn, " Gifts ", None).is_err());
    assert!(store::add_category(&conn, "   ", None).is_err());
}

#[test]
fn deleting_unknown_transaction_is_an_error() {
    let conn = db::open_in_memory().unwrap();
    assert!(store::delete_transaction(&conn, 42).is_err());
    conn.execute(
        "INSERT INTO transactions(amount, transaction_type, transaction_mode, start_date) VALUES ('5', 'income', 'single', ?1)",
        params!["2024-01-01"],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    store::delete_transaction(&conn, id).unwrap();
    assert!(store::get_transaction(&conn, id).is_err());
}

#[test]
fn category_edit_renames_and_clears_description() {
    let conn = db::open_in_memory().unwrap();
    let id = store::add_category(&conn, "Gifts", Some("birthdays")).unwrap();

    store::update_category(&conn, id, Some(" Presents "), None).unwrap();
    let cat = store::list_categories(&conn)
        .unwrap()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap();
    assert_eq!(cat.name, "Presents");
    assert_eq!(cat.description.as_deref(), Some("birthdays"));

    store::update_category(&conn, id, None, Some(None)).unwrap();
    assert_eq!(id_for_category(&conn, "Presents").unwrap(), id);
    let cat = store::list_categories(&conn)
        .unwrap()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap();
    assert_eq!(cat.description, None);
}

#[test]
fn category_edit_rejects_duplicates_and_unknown_ids() {
    let conn = db::open_in_memory().unwrap();
    let id = store::add_category(&conn, "Gifts", None).unwrap();
    assert!(store::update_category(&conn, id, Some("Food"), None).is_err());
    assert!(store::update_category(&conn, id, Some("  "), None).is_err());
    assert_eq!(id_for_category(&conn, "Gifts").unwrap(), id);

    let err = store::update_category(&conn, 9999, Some("Nowhere"), None).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(store::update_category(&conn, 9999, None, Some(Some("x"))).is_err());
}
