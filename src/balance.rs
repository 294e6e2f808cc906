// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::allocation::{checked_add, checked_mul};
use crate::error::Result;
use crate::models::{Transaction, TransactionMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balances {
    pub as_of: NaiveDate,
    pub initial_balance: Decimal,
    pub current_total_balance: Decimal,
    pub long_term_balance: Decimal,
}

/// Initial balance plus every single transaction, signed.
pub fn current_total_balance(initial: Decimal, transactions: &[Transaction]) -> Result<Decimal> {
    transactions
        .iter()
        .filter(|t| t.transaction_mode == TransactionMode::Single)
        .try_fold(initial, |acc, t| {
            checked_add(acc, t.transaction_type.sign() * t.amount, "current balance")
        })
}

/// Balance counting recurring income per started cycle and continuous
/// expenses in full once they have begun.
pub fn long_term_balance(
    initial: Decimal,
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> Result<Decimal> {
    let mut balance = initial;
    for t in transactions {
        let sign = t.transaction_type.sign();
        let delta = match t.transaction_mode {
            TransactionMode::Single => sign * t.amount,
            TransactionMode::Recurring => {
                let elapsed = (as_of - t.start_date).num_days();
                match t.cycle_days.filter(|c| *c > 0) {
                    Some(cycle) if elapsed >= 0 => {
                        let cycles = Decimal::from(elapsed / cycle + 1);
                        sign * checked_mul(t.amount, cycles, "long-term balance")?
                    }
                    _ => Decimal::ZERO,
                }
            }
            TransactionMode::Continuous if t.start_date <= as_of => sign * t.amount,
            TransactionMode::Continuous => Decimal::ZERO,
        };
        balance = checked_add(balance, delta, "long-term balance")?;
    }
    Ok(balance)
}

pub fn balances(
    initial: Decimal,
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> Result<Balances> {
    Ok(Balances {
        as_of,
        initial_balance: initial,
        current_total_balance: current_total_balance(initial, transactions)?,
        long_term_balance: long_term_balance(initial, transactions, as_of)?,
    })
}
