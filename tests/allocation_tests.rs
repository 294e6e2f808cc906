// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use vela::allocation::{daily_allocation, daily_contribution, signed_contribution, validate};
use vela::capacity::day_capacity;
use vela::models::{NewTransaction, Transaction, TransactionMode, TransactionType};
use vela::VelaError;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn stored(id: i64, tx: NewTransaction) -> Transaction {
    tx.into_transaction(id, d("2024-01-01").and_hms_opt(9, 0, 0).unwrap())
}

#[test]
fn single_income_lands_on_start_date_only() {
    let txs = vec![stored(
        1,
        NewTransaction::single(TransactionType::Income, Decimal::from(1000), d("2024-03-01")),
    )];
    assert_eq!(day_capacity(&txs, d("2024-03-01")).unwrap(), Decimal::from(1000));
    assert_eq!(day_capacity(&txs, d("2024-03-02")).unwrap(), Decimal::ZERO);
    assert_eq!(day_capacity(&txs, d("2024-02-29")).unwrap(), Decimal::ZERO);
}

#[test]
fn single_is_nonzero_only_on_its_day() {
    let t = stored(
        1,
        NewTransaction::single(TransactionType::Expense, Decimal::new(4250, 2), d("2024-05-10")),
    );
    for day in d("2024-05-01").iter_days().take(20) {
        let c = daily_contribution(&t, day).unwrap();
        assert_eq!(!c.is_zero(), day == d("2024-05-10"), "day {}", day);
    }
    assert_eq!(
        signed_contribution(&t, d("2024-05-10")).unwrap(),
        Decimal::new(-4250, 2)
    );
}

#[test]
fn recurring_income_contributes_forever() {
    let txs = vec![stored(
        1,
        NewTransaction::recurring_income(Decimal::from(3000), 30, d("2024-01-01")),
    )];
    assert_eq!(day_capacity(&txs, d("2024-01-01")).unwrap(), Decimal::from(100));
    assert_eq!(day_capacity(&txs, d("2024-06-15")).unwrap(), Decimal::from(100));
    assert_eq!(day_capacity(&txs, d("2031-12-31")).unwrap(), Decimal::from(100));
    assert_eq!(day_capacity(&txs, d("2023-12-31")).unwrap(), Decimal::ZERO);
}

#[test]
fn continuous_expense_stops_after_duration() {
    let txs = vec![stored(
        1,
        NewTransaction::continuous_expense(Decimal::from(1200), 12, d("2024-02-01")),
    )];
    assert_eq!(day_capacity(&txs, d("2024-02-05")).unwrap(), Decimal::from(-100));
    assert_eq!(day_capacity(&txs, d("2024-02-12")).unwrap(), Decimal::from(-100));
    assert_eq!(day_capacity(&txs, d("2024-02-13")).unwrap(), Decimal::ZERO);
}

#[test]
fn recurring_income_offsets_installment() {
    let txs = vec![
        stored(
            1,
            NewTransaction::recurring_income(Decimal::from(3000), 30, d("2024-01-01")),
        ),
        stored(
            2,
            NewTransaction::continuous_expense(Decimal::from(1200), 12, d("2024-02-01")),
        ),
    ];
    assert_eq!(day_capacity(&txs, d("2024-02-05")).unwrap(), Decimal::ZERO);
    assert_eq!(day_capacity(&txs, d("2024-02-20")).unwrap(), Decimal::from(100));
}

#[test]
fn uneven_division_keeps_full_precision() {
    let t = stored(
        1,
        NewTransaction::recurring_income(Decimal::from(1000), 3, d("2024-01-01")),
    );
    let per_day = daily_allocation(&t).unwrap().unwrap();
    assert!(per_day.scale() > 2);
    assert_eq!(
        vela::utils::round_money(per_day * Decimal::from(3)),
        Decimal::from(1000)
    );
}

#[test]
fn validate_rejects_mismatched_modes() {
    let mut recurring_expense =
        NewTransaction::recurring_income(Decimal::from(10), 30, d("2024-01-01"));
    recurring_expense.transaction_type = TransactionType::Expense;
    assert!(matches!(
        validate(&recurring_expense),
        Err(VelaError::InvalidConfiguration(_))
    ));

    let mut continuous_income =
        NewTransaction::continuous_expense(Decimal::from(10), 5, d("2024-01-01"));
    continuous_income.transaction_type = TransactionType::Income;
    assert!(validate(&continuous_income).is_err());

    let mut missing_cycle = NewTransaction::recurring_income(Decimal::from(10), 30, d("2024-01-01"));
    missing_cycle.cycle_days = None;
    assert!(validate(&missing_cycle).is_err());

    let mut single_with_days =
        NewTransaction::single(TransactionType::Expense, Decimal::from(10), d("2024-01-01"));
    single_with_days.duration_days = Some(3);
    assert!(validate(&single_with_days).is_err());
}

#[test]
fn validate_rejects_non_positive_values() {
    assert!(validate(&NewTransaction::recurring_income(
        Decimal::from(10),
        0,
        d("2024-01-01")
    ))
    .is_err());
    assert!(validate(&NewTransaction::continuous_expense(
        Decimal::from(10),
        -3,
        d("2024-01-01")
    ))
    .is_err());
    assert!(validate(&NewTransaction::single(
        TransactionType::Income,
        Decimal::ZERO,
        d("2024-01-01")
    ))
    .is_err());
    assert!(validate(&NewTransaction::single(
        TransactionType::Income,
        Decimal::from(5),
        d("2024-01-01")
    ))
    .is_ok());
}

#[test]
fn malformed_transaction_fails_loudly_at_query_time() {
    let mut t = stored(
        1,
        NewTransaction::continuous_expense(Decimal::from(100), 10, d("2024-01-01")),
    );
    t.transaction_mode = TransactionMode::Recurring;
    let err = day_capacity(&[t], d("2024-01-05")).unwrap_err();
    assert!(matches!(err, VelaError::InvalidConfiguration(_)));
}
