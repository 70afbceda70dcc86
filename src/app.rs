//! Application facade tying configuration, storage, catalog and formatting together.

use pocketbook_config::Config;
use pocketbook_core::{
    Clock, CurrencyFormatter, KeyValueStore, LocaleCurrencyFormatter, SummaryService,
    SystemClock, TransactionStore,
};
use pocketbook_domain::{
    BalanceSummary, CategoryCatalog, MonthlySummary, TransactionDraft, TransactionRecord,
    YearMonth,
};
use pocketbook_storage_json::JsonFileStore;
use serde::Serialize;

use crate::errors::{PocketbookError, Result};

/// A stored record paired with its presentation strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: TransactionRecord,
    /// Formatted amount, prefixed with `- ` for expenses.
    pub amount_formatted: String,
    pub date_formatted: String,
}

pub struct Pocketbook {
    config: Config,
    store: TransactionStore<Box<dyn KeyValueStore>>,
    catalog: CategoryCatalog,
    formatter: LocaleCurrencyFormatter,
    clock: Box<dyn Clock>,
}

impl Pocketbook {
    /// Opens the JSON file store under the configured data directory.
    pub fn open(config: Config) -> Result<Self> {
        let data_dir = config.resolve_data_dir();
        let storage = JsonFileStore::new(data_dir.clone())?;
        tracing::debug!(data_dir = %data_dir.display(), "opened transaction storage");
        Ok(Self::with_storage(config, Box::new(storage)))
    }

    pub fn with_storage(config: Config, storage: Box<dyn KeyValueStore>) -> Self {
        let store = TransactionStore::new(storage, config.storage_key.clone());
        let formatter = LocaleCurrencyFormatter::new(&config.locale, &config.currency);
        Self {
            config,
            store,
            catalog: CategoryCatalog::standard().clone(),
            formatter,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_catalog(mut self, catalog: CategoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn formatter(&self) -> &LocaleCurrencyFormatter {
        &self.formatter
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.clock.today())
    }

    pub fn register(&self, draft: &TransactionDraft) -> Result<TransactionRecord> {
        Ok(self
            .store
            .register(draft, &self.catalog, self.clock.as_ref())?)
    }

    /// Every stored record in insertion order.
    pub fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.store.load()?)
    }

    /// Stored records newest first, ready for display.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        let mut records = self.transactions()?;
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records
            .into_iter()
            .map(|record| {
                let amount = self.formatter.format_amount(record.amount);
                let amount_formatted = if record.is_expense() {
                    format!("- {amount}")
                } else {
                    amount
                };
                HistoryEntry {
                    date_formatted: record.date.format("%Y-%m-%d").to_string(),
                    amount_formatted,
                    record,
                }
            })
            .collect())
    }

    pub fn monthly_summary(&self, month: YearMonth) -> Result<MonthlySummary> {
        let records = self.transactions()?;
        Ok(self.summary_service().monthly_summary(&records, month)?)
    }

    pub fn balance(&self) -> Result<BalanceSummary> {
        let records = self.transactions()?;
        Ok(self.summary_service().balance(&records))
    }

    /// Erases every stored record. `confirmed` must be set by the caller.
    pub fn clear(&self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(PocketbookError::ClearNotConfirmed);
        }
        self.store.clear()?;
        tracing::info!(key = %self.store.key(), "cleared all transactions");
        Ok(())
    }

    fn summary_service(&self) -> SummaryService<'_> {
        SummaryService::new(&self.catalog, &self.formatter)
            .with_policy(self.config.unknown_category)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pocketbook_core::{FixedClock, MemoryStore};
    use pocketbook_domain::TransactionKind;

    use super::*;

    fn pocketbook_at(day: u32, hour: u32) -> Pocketbook {
        let now = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
        Pocketbook::with_storage(Config::default(), Box::new(MemoryStore::new()))
            .with_clock(Box::new(FixedClock(now)))
    }

    #[test]
    fn history_lists_newest_first_with_signed_amounts() {
        let book = pocketbook_at(5, 9);
        book.register(&TransactionDraft::new("Rent", "900", TransactionKind::Expense, "purchases"))
            .unwrap();
        let book = book.with_clock(Box::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap(),
        )));
        book.register(&TransactionDraft::new("Paycheck", "1500.5", TransactionKind::Income, "salary"))
            .unwrap();

        let history = book.history().unwrap();
        assert_eq!(history[0].record.name, "Paycheck");
        assert_eq!(history[0].amount_formatted, "$1,500.50");
        assert_eq!(history[1].amount_formatted, "- $900.00");
        assert_eq!(history[1].date_formatted, "2024-03-05");
    }

    #[test]
    fn summary_uses_configured_locale_and_policy() {
        let config = Config {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            unknown_category: pocketbook_domain::UnknownCategoryPolicy::Skip,
            ..Config::default()
        };
        let stray = r#"[{"id":"0c3c8a39-7a55-4d2b-a0d8-2c1e6f7b9a10","name":"Gift","amount":40,"type":"negative","category":"gifts","date":"2024-03-03T10:00:00Z"}]"#;
        let storage = MemoryStore::new().with_item(config.storage_key.clone(), stray);
        let book = Pocketbook::with_storage(config, Box::new(storage)).with_clock(Box::new(
            FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()),
        ));
        book.register(&TransactionDraft::new("Bus", "4.5", TransactionKind::Expense, "transport"))
            .unwrap();

        let summary = book.monthly_summary(book.current_month()).unwrap();
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.total_formatted, "R$ 4,50");
    }

    #[test]
    fn custom_catalog_limits_registration() {
        let catalog = CategoryCatalog::new(vec![pocketbook_domain::CategoryCatalogEntry::new(
            "rent", "Rent", "#333333",
        )])
        .unwrap();
        let book = pocketbook_at(2, 10).with_catalog(catalog);

        let err = book
            .register(&TransactionDraft::new("Lunch", "9", TransactionKind::Expense, "food"))
            .expect_err("food is not in this catalog");
        assert!(err.to_string().contains("food"));

        book.register(&TransactionDraft::new("March rent", "700", TransactionKind::Expense, "rent"))
            .unwrap();
        let summary = book.monthly_summary(book.current_month()).unwrap();
        assert_eq!(summary.categories[0].name, "Rent");
        assert_eq!(summary.categories[0].percentage, "100%");
    }

    #[test]
    fn default_config_and_store_agree_on_the_storage_key() {
        let store = TransactionStore::with_default_key(MemoryStore::new());
        assert_eq!(Config::default().storage_key, store.key());
    }

    #[test]
    fn clear_requires_confirmation() {
        let book = pocketbook_at(1, 8);
        book.register(&TransactionDraft::new("Fuel", "60", TransactionKind::Expense, "car"))
            .unwrap();

        assert!(matches!(book.clear(false), Err(PocketbookError::ClearNotConfirmed)));
        assert_eq!(book.transactions().unwrap().len(), 1);

        book.clear(true).unwrap();
        assert!(book.transactions().unwrap().is_empty());
    }
}
