//! pocketbook-domain
//!
//! Pure domain models (transaction records, drafts, the category catalog, target months and
//! derived summaries). No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod month;
pub mod summary;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use month::*;
pub use summary::*;
pub use transaction::*;
