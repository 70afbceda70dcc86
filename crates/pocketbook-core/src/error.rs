use pocketbook_domain::ValidationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Storage read failed: {0}")]
    StorageRead(String),
    #[error("Storage write failed: {0}")]
    StorageWrite(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction {id} references unknown category `{category}`")]
    UnknownCategory { id: Uuid, category: String },
    #[error("Transaction {0} already stored with different content")]
    DuplicateTransaction(Uuid),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
