//! Terminal front end: renders and exports the ledger built from config.

pub mod export;
pub mod setup;
pub mod summary;
pub mod ui;

use crate::core::config::AppConfig;
use crate::core::edit::apply_all;
use crate::core::{LedgerEdit, LedgerStore, ValuationEngine};
use anyhow::{Context, Result};
use tracing::debug;

/// Seeds the ledger from `config` and applies what-if `edits` in order.
pub fn load_ledger(
    config: &AppConfig,
    edits: &[LedgerEdit],
) -> Result<(LedgerStore, ValuationEngine)> {
    let (mut store, mut valuation) = config.build()?;
    debug!(
        products = store.list_products().len(),
        periods = store.period_count(),
        "Built ledger from config"
    );
    apply_all(edits, &mut store, &mut valuation).context("Failed to apply edit")?;
    Ok((store, valuation))
}
