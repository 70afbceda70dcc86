//! Category aggregation over a loaded transaction snapshot.

use std::collections::HashMap;

use pocketbook_domain::{
    BalanceSummary, CategoryCatalog, CategorySummary, MonthlySummary, TransactionKind,
    TransactionRecord, UnknownCategoryPolicy, YearMonth,
};

use crate::{format::CurrencyFormatter, CoreError};

/// Computes monthly category breakdowns and balance totals.
///
/// The service is stateless and never performs I/O: callers load a fresh snapshot from the
/// store and invoke it again whenever the month or the data changes.
pub struct SummaryService<'a> {
    catalog: &'a CategoryCatalog,
    formatter: &'a dyn CurrencyFormatter,
    policy: UnknownCategoryPolicy,
}

impl<'a> SummaryService<'a> {
    pub fn new(catalog: &'a CategoryCatalog, formatter: &'a dyn CurrencyFormatter) -> Self {
        Self {
            catalog,
            formatter,
            policy: UnknownCategoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Breaks down the expenses dated in `month` by catalog category.
    ///
    /// Summaries follow catalog order and only categories with a positive total are emitted,
    /// so every emitted percentage divides by a positive grand total.
    pub fn monthly_summary(
        &self,
        records: &[TransactionRecord],
        month: YearMonth,
    ) -> Result<MonthlySummary, CoreError> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for record in records
            .iter()
            .filter(|record| record.is_expense() && month.contains(&record.date))
        {
            if !self.catalog.contains(&record.category) {
                match self.policy {
                    UnknownCategoryPolicy::Strict => {
                        return Err(CoreError::UnknownCategory {
                            id: record.id,
                            category: record.category.clone(),
                        });
                    }
                    UnknownCategoryPolicy::Skip => {
                        tracing::warn!(
                            id = %record.id,
                            category = %record.category,
                            "skipping expense with unknown category"
                        );
                        continue;
                    }
                }
            }
            *totals.entry(record.category.as_str()).or_insert(0.0) += record.amount;
        }

        let grand_total: f64 = totals.values().sum();
        let categories: Vec<CategorySummary> = self
            .catalog
            .iter()
            .filter_map(|entry| {
                let total = totals.get(entry.key.as_str()).copied().unwrap_or(0.0);
                if total <= 0.0 {
                    return None;
                }
                let share = total / grand_total;
                Some(CategorySummary {
                    key: entry.key.clone(),
                    name: entry.name.clone(),
                    color: entry.color.clone(),
                    total,
                    total_formatted: self.formatter.format_amount(total),
                    percentage: format!("{}%", (share * 100.0).round() as i64),
                    share,
                })
            })
            .collect();

        tracing::debug!(
            %month,
            categories = categories.len(),
            total = grand_total,
            "summarized month"
        );
        Ok(MonthlySummary {
            month,
            categories,
            total: grand_total,
            total_formatted: self.formatter.format_amount(grand_total),
        })
    }

    /// Income, expense and net balance across every record, with the latest date of each kind.
    pub fn balance(&self, records: &[TransactionRecord]) -> BalanceSummary {
        let mut income = 0.0;
        let mut expense = 0.0;
        let mut total = 0.0;
        let mut last_income = None;
        let mut last_expense = None;
        for record in records {
            let (sum, latest) = match record.kind {
                TransactionKind::Income => (&mut income, &mut last_income),
                TransactionKind::Expense => (&mut expense, &mut last_expense),
            };
            *sum += record.amount;
            total += record.signed_amount();
            if *latest < Some(record.date) {
                *latest = Some(record.date);
            }
        }
        BalanceSummary {
            income,
            income_formatted: self.formatter.format_amount(income),
            expense,
            expense_formatted: self.formatter.format_amount(expense),
            total,
            total_formatted: self.formatter.format_amount(total),
            last_income,
            last_expense,
        }
    }
}
