#![doc(test(attr(deny(warnings))))]

//! Pocketbook records personal income and expenses and breaks a month's spending down by
//! category.
//!
//! The library crates do the work: `pocketbook-domain` holds the record model,
//! `pocketbook-core` the transaction store and aggregation engine, `pocketbook-storage-json`
//! the on-disk medium and `pocketbook-config` user preferences. This crate wires them into the
//! [`app::Pocketbook`] facade and the `pocketbook_cli` binary.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

pub use app::{HistoryEntry, Pocketbook};
pub use errors::{PocketbookError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("pocketbook tracing initialized");
    });
}
