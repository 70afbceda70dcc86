//! pocketbook-core
//!
//! Transaction persistence and monthly category aggregation.
//! Depends on pocketbook-domain. No CLI, no terminal I/O; storage media plug in through
//! [`storage::KeyValueStore`].

pub mod error;
pub mod format;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_store;

pub use error::CoreError;
pub use format::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
pub use transaction_store::*;
