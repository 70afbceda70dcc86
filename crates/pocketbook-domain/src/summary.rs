//! Derived, non-persisted views handed to presentation layers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::month::YearMonth;

/// Expense total for one catalog category within a month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    pub key: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub total_formatted: String,
    /// Rounded share of the month's expenses, e.g. `"83%"`.
    pub percentage: String,
    /// Un-rounded share in `0.0..=1.0`.
    pub share: f64,
}

/// Category breakdown of one month's expenses.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub categories: Vec<CategorySummary>,
    pub total: f64,
    pub total_formatted: String,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Income, expense and net totals across every recorded transaction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BalanceSummary {
    pub income: f64,
    pub income_formatted: String,
    pub expense: f64,
    pub expense_formatted: String,
    pub total: f64,
    pub total_formatted: String,
    pub last_income: Option<DateTime<Utc>>,
    pub last_expense: Option<DateTime<Utc>>,
}
