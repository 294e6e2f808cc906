// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly category breakdown of single transactions.
//!
//! Recurring and continuous transactions feed day capacity, not the category
//! report, so only `single` rows are bucketed here.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::allocation::checked_add;
use crate::error::{Result, VelaError};
use crate::models::{
    Category, CategoryBreakdown, CategoryKind, CategoryReport, CategoryUsage, Transaction,
    TransactionMode, TransactionType, UNCATEGORIZED,
};

/// First day of the month and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(VelaError::InvalidMonth { year, month })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(VelaError::InvalidMonth { year, month })?;
    Ok((start, next))
}

pub fn monthly_category_report(
    transactions: &[Transaction],
    categories: &[Category],
    year: i32,
    month: u32,
) -> Result<CategoryReport> {
    let (start, next) = month_bounds(year, month)?;
    let names: HashMap<i64, &str> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    // keyed by category id; None sorts first and is the uncategorized bucket
    let mut income: BTreeMap<Option<i64>, (Decimal, usize)> = BTreeMap::new();
    let mut expense: BTreeMap<Option<i64>, (Decimal, usize)> = BTreeMap::new();

    for t in transactions.iter().filter(|t| {
        t.transaction_mode == TransactionMode::Single
            && t.start_date >= start
            && t.start_date < next
    }) {
        // a category id that no longer resolves is treated as uncategorized
        let key = t.category_id.filter(|id| names.contains_key(id));
        let bucket = match t.transaction_type {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expense,
        };
        let entry = bucket.entry(key).or_insert((Decimal::ZERO, 0));
        entry.0 = checked_add(entry.0, t.amount, "category total")?;
        entry.1 += 1;
    }

    let (income_categories, total_income) = breakdown(income, &names)?;
    let (expense_categories, total_expense) = breakdown(expense, &names)?;

    Ok(CategoryReport {
        year: start.year(),
        month: start.month(),
        income_categories,
        expense_categories,
        total_income,
        total_expense,
    })
}

fn breakdown(
    groups: BTreeMap<Option<i64>, (Decimal, usize)>,
    names: &HashMap<i64, &str>,
) -> Result<(Vec<CategoryBreakdown>, Decimal)> {
    let total = groups
        .values()
        .try_fold(Decimal::ZERO, |acc, (amt, _)| checked_add(acc, *amt, "category total"))?;
    let items = groups
        .into_iter()
        .map(|(id, (amount, count))| {
            let name = id
                .and_then(|id| names.get(&id).copied())
                .unwrap_or(UNCATEGORIZED)
                .to_string();
            let percentage = if total.is_zero() {
                Decimal::ZERO
            } else {
                match Decimal::ONE_HUNDRED.checked_mul(amount) {
                    Some(scaled) => scaled / total,
                    None => amount / total * Decimal::ONE_HUNDRED,
                }
            };
            Ok(CategoryBreakdown {
                category_id: id,
                name,
                amount,
                percentage,
                count,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((items, total))
}

/// Classify each category by the types of the transactions posted against it.
pub fn category_usage(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryUsage> {
    let mut counts: HashMap<i64, (usize, usize)> = HashMap::new();
    for t in transactions {
        if let Some(id) = t.category_id {
            let e = counts.entry(id).or_insert((0, 0));
            match t.transaction_type {
                TransactionType::Income => e.0 += 1,
                TransactionType::Expense => e.1 += 1,
            }
        }
    }
    categories
        .iter()
        .map(|c| {
            let (income_count, expense_count) = counts.get(&c.id).copied().unwrap_or((0, 0));
            let kind = match (income_count, expense_count) {
                (0, 0) => CategoryKind::Unused,
                (_, 0) => CategoryKind::Income,
                (0, _) => CategoryKind::Expense,
                _ => CategoryKind::Mixed,
            };
            CategoryUsage {
                category_id: c.id,
                name: c.name.clone(),
                description: c.description.clone(),
                income_count,
                expense_count,
                kind,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn december_rolls_into_next_year() {
        let (s, n) = month_bounds(2024, 12).unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(n, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn month_thirteen_is_invalid() {
        assert_eq!(
            month_bounds(2024, 13).unwrap_err(),
            VelaError::InvalidMonth {
                year: 2024,
                month: 13
            }
        );
    }
}
