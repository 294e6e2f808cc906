// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-day allocation of a single transaction.
//!
//! A single transaction lands entirely on its start date. Recurring income is
//! spread over its cycle and keeps contributing forever; a continuous expense
//! is spread over `duration_days` days and then stops. Contributions are
//! returned unsigned at full precision; callers apply the sign and round.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Result, VelaError};
use crate::models::{NewTransaction, Transaction, TransactionMode, TransactionType};

/// Check the mode/type/day-count invariant of a transaction before it is stored.
pub fn validate(tx: &NewTransaction) -> Result<()> {
    if tx.amount <= Decimal::ZERO {
        return Err(VelaError::config(format!(
            "amount must be positive, got {}",
            tx.amount
        )));
    }
    check_shape(
        tx.transaction_type,
        tx.transaction_mode,
        tx.cycle_days,
        tx.duration_days,
    )?;
    let max_days = (NaiveDate::MAX - tx.start_date).num_days();
    if let Some(n) = tx.cycle_days.or(tx.duration_days).filter(|n| *n > max_days) {
        return Err(VelaError::config(format!(
            "day count {} runs past the last representable date",
            n
        )));
    }
    Ok(())
}

fn check_shape(
    ty: TransactionType,
    mode: TransactionMode,
    cycle_days: Option<i64>,
    duration_days: Option<i64>,
) -> Result<()> {
    match mode {
        TransactionMode::Single => {
            if cycle_days.is_some() || duration_days.is_some() {
                return Err(VelaError::config(
                    "single transactions take neither cycle_days nor duration_days",
                ));
            }
        }
        TransactionMode::Recurring => {
            if ty != TransactionType::Income {
                return Err(VelaError::config("recurring mode is only valid for income"));
            }
            if duration_days.is_some() {
                return Err(VelaError::config(
                    "recurring transactions do not take duration_days",
                ));
            }
            match cycle_days {
                None => return Err(VelaError::config("recurring mode requires cycle_days")),
                Some(c) if c <= 0 => {
                    return Err(VelaError::config(format!(
                        "cycle_days must be positive, got {}",
                        c
                    )));
                }
                Some(_) => {}
            }
        }
        TransactionMode::Continuous => {
            if ty != TransactionType::Expense {
                return Err(VelaError::config(
                    "continuous mode is only valid for expenses",
                ));
            }
            if cycle_days.is_some() {
                return Err(VelaError::config(
                    "continuous transactions do not take cycle_days",
                ));
            }
            match duration_days {
                None => return Err(VelaError::config("continuous mode requires duration_days")),
                Some(n) if n <= 0 => {
                    return Err(VelaError::config(format!(
                        "duration_days must be positive, got {}",
                        n
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

/// Amount a recurring or continuous transaction allocates to each active day.
/// Single transactions have no per-day allocation and yield `None`.
pub fn daily_allocation(tx: &Transaction) -> Result<Option<Decimal>> {
    check_shape(
        tx.transaction_type,
        tx.transaction_mode,
        tx.cycle_days,
        tx.duration_days,
    )?;
    let days = match tx.transaction_mode {
        TransactionMode::Single => return Ok(None),
        TransactionMode::Recurring => tx.cycle_days,
        TransactionMode::Continuous => tx.duration_days,
    };
    // check_shape guarantees the count is present and positive
    let days = days.map(Decimal::from).unwrap_or(Decimal::ONE);
    Ok(Some(tx.amount / days))
}

/// Unsigned contribution of `tx` to `date`.
pub fn daily_contribution(tx: &Transaction, date: NaiveDate) -> Result<Decimal> {
    let per_day = daily_allocation(tx)?;
    if date < tx.start_date {
        return Ok(Decimal::ZERO);
    }
    let value = match tx.transaction_mode {
        TransactionMode::Single => {
            if date == tx.start_date {
                tx.amount
            } else {
                Decimal::ZERO
            }
        }
        TransactionMode::Recurring => per_day.unwrap_or(Decimal::ZERO),
        TransactionMode::Continuous => {
            let offset = (date - tx.start_date).num_days();
            let duration = tx.duration_days.unwrap_or(0);
            if offset < duration {
                per_day.unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            }
        }
    };
    Ok(value)
}

pub(crate) fn checked_add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(VelaError::Overflow(what))
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(VelaError::Overflow(what))
}

/// Contribution of `tx` to `date` with the income/expense sign applied.
pub fn signed_contribution(tx: &Transaction, date: NaiveDate) -> Result<Decimal> {
    Ok(tx.transaction_type.sign() * daily_contribution(tx, date)?)
}
