// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VelaError;
use crate::utils::round_money;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// +1 for income, -1 for expense.
    pub fn sign(&self) -> Decimal {
        match self {
            TransactionType::Income => Decimal::ONE,
            TransactionType::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = VelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(VelaError::config(format!(
                "unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
    Single,
    Recurring,
    Continuous,
}

impl TransactionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionMode::Single => "single",
            TransactionMode::Recurring => "recurring",
            TransactionMode::Continuous => "continuous",
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionMode {
    type Err = VelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(TransactionMode::Single),
            "recurring" => Ok(TransactionMode::Recurring),
            "continuous" => Ok(TransactionMode::Continuous),
            other => Err(VelaError::config(format!(
                "unknown transaction mode '{}' (use single|recurring|continuous)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub transaction_mode: TransactionMode,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub cycle_days: Option<i64>,
    pub duration_days: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// First day outside the window of a continuous expense.
    pub fn end_date(&self) -> Option<NaiveDate> {
        match (self.transaction_mode, self.duration_days) {
            (TransactionMode::Continuous, Some(n)) => Duration::try_days(n)
                .and_then(|span| self.start_date.checked_add_signed(span)),
            _ => None,
        }
    }
}

/// A transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub transaction_mode: TransactionMode,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub cycle_days: Option<i64>,
    pub duration_days: Option<i64>,
}

impl NewTransaction {
    pub fn single(ty: TransactionType, amount: Decimal, start_date: NaiveDate) -> Self {
        NewTransaction {
            amount,
            transaction_type: ty,
            transaction_mode: TransactionMode::Single,
            category_id: None,
            description: None,
            start_date,
            cycle_days: None,
            duration_days: None,
        }
    }

    pub fn recurring_income(amount: Decimal, cycle_days: i64, start_date: NaiveDate) -> Self {
        NewTransaction {
            transaction_mode: TransactionMode::Recurring,
            cycle_days: Some(cycle_days),
            ..Self::single(TransactionType::Income, amount, start_date)
        }
    }

    pub fn continuous_expense(amount: Decimal, duration_days: i64, start_date: NaiveDate) -> Self {
        NewTransaction {
            transaction_mode: TransactionMode::Continuous,
            duration_days: Some(duration_days),
            ..Self::single(TransactionType::Expense, amount, start_date)
        }
    }

    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn into_transaction(self, id: i64, created_at: NaiveDateTime) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            transaction_mode: self.transaction_mode,
            category_id: self.category_id,
            description: self.description,
            start_date: self.start_date,
            cycle_days: self.cycle_days,
            duration_days: self.duration_days,
            created_at,
        }
    }
}

impl From<&Transaction> for NewTransaction {
    fn from(t: &Transaction) -> Self {
        NewTransaction {
            amount: t.amount,
            transaction_type: t.transaction_type,
            transaction_mode: t.transaction_mode,
            category_id: t.category_id,
            description: t.description.clone(),
            start_date: t.start_date,
            cycle_days: t.cycle_days,
            duration_days: t.duration_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCapacityPoint {
    pub date: NaiveDate,
    pub day_capacity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_change: Decimal,
    pub day_capacity_trend: Vec<DayCapacityPoint>,
}

impl PeriodSummary {
    pub fn rounded(&self) -> PeriodSummary {
        PeriodSummary {
            start_date: self.start_date,
            end_date: self.end_date,
            total_income: round_money(self.total_income),
            total_expense: round_money(self.total_expense),
            net_change: round_money(self.net_change),
            day_capacity_trend: self
                .day_capacity_trend
                .iter()
                .map(|p| DayCapacityPoint {
                    date: p.date,
                    day_capacity: round_money(p.day_capacity),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_id: Option<i64>,
    pub name: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub year: i32,
    pub month: u32,
    pub income_categories: Vec<CategoryBreakdown>,
    pub expense_categories: Vec<CategoryBreakdown>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl CategoryReport {
    pub fn rounded(&self) -> CategoryReport {
        let round_all = |items: &[CategoryBreakdown]| -> Vec<CategoryBreakdown> {
            items
                .iter()
                .map(|c| CategoryBreakdown {
                    amount: round_money(c.amount),
                    percentage: round_money(c.percentage),
                    ..c.clone()
                })
                .collect()
        };
        CategoryReport {
            year: self.year,
            month: self.month,
            income_categories: round_all(&self.income_categories),
            expense_categories: round_all(&self.expense_categories),
            total_income: round_money(self.total_income),
            total_expense: round_money(self.total_expense),
        }
    }
}

/// How a category is used, derived from the transactions posted against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Mixed,
    Unused,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
            CategoryKind::Mixed => "mixed",
            CategoryKind::Unused => "unused",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub income_count: usize,
    pub expense_count: usize,
    pub kind: CategoryKind,
}
