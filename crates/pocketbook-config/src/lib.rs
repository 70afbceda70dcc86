//! pocketbook-config
//!
//! Persistent user preferences: locale, currency, where transactions live and how
//! aggregation treats unknown categories.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
