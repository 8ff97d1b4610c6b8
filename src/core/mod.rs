//! Ledger engine: storage, recurrence, registry and valuation

pub mod config;
pub mod edit;
pub mod error;
pub mod ledger;
pub mod log;
pub mod model;
pub mod recurrence;
pub mod registry;
pub mod snapshot;
pub mod valuation;

// Re-export main types for cleaner imports
pub use edit::LedgerEdit;
pub use error::{LedgerError, LedgerResult};
pub use ledger::{LedgerStore, ProductSeed};
pub use model::{CellKey, Period, ProductId, Quantity, RowKind};
pub use registry::ProductRegistry;
pub use snapshot::{LedgerRow, LedgerSnapshot, ProductRows};
pub use valuation::{PeriodValue, ValuationEngine};
