//! Domain models for recorded transactions and the drafts they are created from.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::{CategoryCatalog, UNSET_CATEGORY_KEY},
    common::*,
};

/// Key the transaction collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@pocketbook:transactions";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Direction of a transaction. The stored amount is always a positive magnitude.
pub enum TransactionKind {
    #[serde(rename = "positive", alias = "up")]
    Income,
    #[serde(rename = "negative", alias = "down")]
    Expense,
}

impl TransactionKind {
    /// Sign applied to the magnitude when computing balances.
    pub fn sign(self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// One persisted income or expense event.
///
/// Deserialization goes through [`StoredTransaction`], so a record obtained from
/// stored data always satisfies the record invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredTransaction")]
pub struct TransactionRecord {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl TransactionRecord {
    /// Builds a record from a draft, assigning a fresh id and the supplied creation instant.
    pub fn from_draft(
        draft: &TransactionDraft,
        catalog: &CategoryCatalog,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let amount = draft.validate(catalog)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            amount,
            kind: draft.kind.ok_or(ValidationError::MissingKind)?,
            category: draft.category.trim().to_string(),
            date: now,
        })
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}

impl Displayable for TransactionRecord {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.kind)
    }
}

/// Loose shape of a record as it sits in storage, before any invariant is checked.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredTransaction {
    pub id: String,
    pub name: String,
    pub amount: StoredAmount,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: String,
}

/// Amounts were historically written either as JSON numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredAmount {
    Number(f64),
    Text(String),
}

impl StoredAmount {
    fn to_magnitude(&self) -> Result<f64, DecodeError> {
        let value = match self {
            StoredAmount::Number(value) => *value,
            StoredAmount::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| DecodeError::Amount(raw.clone()))?,
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(DecodeError::Amount(value.to_string()));
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reasons a stored row cannot become a [`TransactionRecord`].
pub enum DecodeError {
    Id(String),
    EmptyName(String),
    Amount(String),
    Category(String),
    Date(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Id(raw) => write!(f, "invalid transaction id `{raw}`"),
            DecodeError::EmptyName(id) => write!(f, "transaction {id} has an empty name"),
            DecodeError::Amount(raw) => write!(f, "invalid transaction amount `{raw}`"),
            DecodeError::Category(id) => write!(f, "transaction {id} has no category"),
            DecodeError::Date(raw) => write!(f, "invalid transaction date `{raw}`"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl TryFrom<StoredTransaction> for TransactionRecord {
    type Error = DecodeError;

    fn try_from(row: StoredTransaction) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(row.id.trim()).map_err(|_| DecodeError::Id(row.id.clone()))?;
        if row.name.trim().is_empty() {
            return Err(DecodeError::EmptyName(id.to_string()));
        }
        let category = row.category.trim();
        if category.is_empty() || category == UNSET_CATEGORY_KEY {
            return Err(DecodeError::Category(id.to_string()));
        }
        Ok(Self {
            id,
            amount: row.amount.to_magnitude()?,
            kind: row.kind,
            category: category.to_string(),
            date: parse_stored_date(&row.date)?,
            name: row.name,
        })
    }
}

/// Accepts RFC 3339 instants and bare `YYYY-MM-DD` dates (read as UTC midnight).
fn parse_stored_date(raw: &str) -> Result<DateTime<Utc>, DecodeError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DecodeError::Date(raw.to_string()))
}

/// Raw input collected by a registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: String,
    pub kind: Option<TransactionKind>,
    pub category: String,
}

impl TransactionDraft {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            kind: Some(kind),
            category: category.into(),
        }
    }

    /// Checks every field and returns the parsed amount.
    pub fn validate(&self, catalog: &CategoryCatalog) -> Result<f64, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        let raw_amount = self.amount.trim();
        if raw_amount.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        if !amount.is_finite() {
            return Err(ValidationError::InvalidAmount(raw_amount.to_string()));
        }
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.kind.is_none() {
            return Err(ValidationError::MissingKind);
        }
        let category = self.category.trim();
        if category.is_empty() || category == UNSET_CATEGORY_KEY {
            return Err(ValidationError::MissingCategory);
        }
        if !catalog.contains(category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_fifth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn record_serializes_with_stored_field_names() {
        let draft = TransactionDraft::new("Lunch", "12.5", TransactionKind::Expense, "food");
        let record =
            TransactionRecord::from_draft(&draft, CategoryCatalog::standard(), march_fifth())
                .expect("valid draft");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "negative");
        assert_eq!(json["amount"], 12.5);
        assert_eq!(json["category"], "food");
        assert_eq!(json["date"], "2024-03-05T14:30:00Z");
        let decoded: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn decodes_string_amounts_and_legacy_type_spellings() {
        let json = r#"{
            "id": "9f1c3f8e-3f2a-4d6b-9a59-2b1f3c4d5e6f",
            "name": "Salary",
            "amount": "2500.00",
            "type": "up",
            "category": "salary",
            "date": "2024-03-01T09:00:00.000Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, 2500.0);
        assert_eq!(record.kind, TransactionKind::Income);
        assert_eq!(record.signed_amount(), 2500.0);
    }

    #[test]
    fn rejects_rows_that_break_record_invariants() {
        let row = |amount: &str, category: &str, date: &str| {
            format!(
                r#"{{"id":"9f1c3f8e-3f2a-4d6b-9a59-2b1f3c4d5e6f","name":"x","amount":{amount},"type":"negative","category":"{category}","date":"{date}"}}"#
            )
        };
        let negative = row("-4", "food", "2024-03-01");
        assert!(serde_json::from_str::<TransactionRecord>(&negative).is_err());
        let unset = row("4", "category", "2024-03-01");
        assert!(serde_json::from_str::<TransactionRecord>(&unset).is_err());
        let bad_date = row("4", "food", "yesterday");
        assert!(serde_json::from_str::<TransactionRecord>(&bad_date).is_err());
        let bare_date = row("\"4\"", "food", "2024-03-01");
        let record: TransactionRecord = serde_json::from_str(&bare_date).unwrap();
        assert_eq!(record.date, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn draft_validation_mirrors_form_rules() {
        let catalog = CategoryCatalog::standard();
        let mut draft = TransactionDraft::new("Bus", "3.20", TransactionKind::Expense, "transport");
        assert_eq!(draft.validate(catalog), Ok(3.2));

        draft.amount = "abc".into();
        assert_eq!(
            draft.validate(catalog),
            Err(ValidationError::InvalidAmount("abc".into()))
        );
        draft.amount = "0".into();
        assert_eq!(draft.validate(catalog), Err(ValidationError::NonPositiveAmount));
        draft.amount = "3.20".into();
        draft.category = UNSET_CATEGORY_KEY.into();
        assert_eq!(draft.validate(catalog), Err(ValidationError::MissingCategory));
        draft.category = "crypto".into();
        assert_eq!(
            draft.validate(catalog),
            Err(ValidationError::UnknownCategory("crypto".into()))
        );
        draft.category = "transport".into();
        draft.kind = None;
        assert_eq!(draft.validate(catalog), Err(ValidationError::MissingKind));
        draft.name = "  ".into();
        assert_eq!(draft.validate(catalog), Err(ValidationError::MissingName));
    }
}
