//! Shared traits and the boundary validation error.

use std::fmt;

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Rejections raised while checking user input before it reaches the store.
pub enum ValidationError {
    MissingName,
    MissingAmount,
    InvalidAmount(String),
    NonPositiveAmount,
    MissingKind,
    MissingCategory,
    UnknownCategory(String),
    EmptyCategoryKey,
    DuplicateCategoryKey(String),
    ReservedCategoryKey(String),
    InvalidMonth(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => f.write_str("name is required"),
            ValidationError::MissingAmount => f.write_str("amount is required"),
            ValidationError::InvalidAmount(raw) => {
                write!(f, "amount `{raw}` is not a number")
            }
            ValidationError::NonPositiveAmount => f.write_str("amount must be positive"),
            ValidationError::MissingKind => f.write_str("transaction type must be selected"),
            ValidationError::MissingCategory => f.write_str("category must be selected"),
            ValidationError::UnknownCategory(key) => write!(f, "unknown category `{key}`"),
            ValidationError::EmptyCategoryKey => f.write_str("category key must not be empty"),
            ValidationError::DuplicateCategoryKey(key) => {
                write!(f, "category key `{key}` is defined more than once")
            }
            ValidationError::ReservedCategoryKey(key) => {
                write!(f, "category key `{key}` is reserved")
            }
            ValidationError::InvalidMonth(raw) => write!(f, "invalid month `{raw}`"),
        }
    }
}

impl std::error::Error for ValidationError {}
