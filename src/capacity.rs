// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Day capacity: the signed sum of every transaction's contribution to a day.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::allocation::{checked_add, daily_contribution, signed_contribution};
use crate::error::{Result, VelaError};
use crate::models::{DayCapacityPoint, PeriodSummary, Transaction, TransactionType};

pub fn day_capacity(transactions: &[Transaction], date: NaiveDate) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for t in transactions {
        total = checked_add(total, signed_contribution(t, date)?, "day capacity")?;
    }
    Ok(total)
}

/// Inclusive list of days from `start` to `end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if start > end {
        return Err(VelaError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

pub fn trend(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DayCapacityPoint>> {
    days_in_range(start, end)?
        .into_iter()
        .map(|date| {
            Ok(DayCapacityPoint {
                date,
                day_capacity: day_capacity(transactions, date)?,
            })
        })
        .collect()
}

pub fn period_summary(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PeriodSummary> {
    let days = days_in_range(start, end)?;
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut day_capacity_trend = Vec::with_capacity(days.len());

    for date in days {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for t in transactions {
            let c = daily_contribution(t, date)?;
            match t.transaction_type {
                TransactionType::Income => income = checked_add(income, c, "daily income")?,
                TransactionType::Expense => expense = checked_add(expense, c, "daily expense")?,
            }
        }
        total_income = checked_add(total_income, income, "total income")?;
        total_expense = checked_add(total_expense, expense, "total expense")?;
        day_capacity_trend.push(DayCapacityPoint {
            date,
            day_capacity: checked_add(income, -expense, "day capacity")?,
        });
    }

    Ok(PeriodSummary {
        start_date: start,
        end_date: end,
        total_income,
        total_expense,
        net_change: checked_add(total_income, -total_expense, "net change")?,
        day_capacity_trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_range_has_one_day() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(days_in_range(d, d).unwrap(), vec![d]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            days_in_range(a, b).unwrap_err(),
            VelaError::InvalidRange { start: a, end: b }
        );
    }
}
