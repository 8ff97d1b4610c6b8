//! Aggregate inventory valuation and the warning threshold.
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::LedgerStore;
use crate::core::model::{CellKey, Period, RowKind, ensure_non_negative};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Threshold used when the configuration does not set one.
pub const DEFAULT_THRESHOLD: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Total holding value of all products in one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodValue {
    pub period: Period,
    pub total_value: Decimal,
}

/// Values the ledger at unit cost and compares the totals against a threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuationEngine {
    threshold: Decimal,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ValuationEngine {
    pub fn new(threshold: Decimal) -> LedgerResult<Self> {
        Ok(Self {
            threshold: ensure_non_negative(threshold)?,
        })
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn set_threshold(&mut self, value: Decimal) -> LedgerResult<()> {
        self.threshold = ensure_non_negative(value)?;
        debug!(threshold = %self.threshold, "Updated warning threshold");
        Ok(())
    }

    /// Sum of `inventory * unit cost` over all products, for every week.
    pub fn value_series(&self, store: &LedgerStore) -> Vec<PeriodValue> {
        store
            .periods()
            .into_iter()
            .map(|period| PeriodValue {
                period,
                total_value: period_total(store, period),
            })
            .collect()
    }

    pub fn total_value(&self, store: &LedgerStore, period: Period) -> LedgerResult<Decimal> {
        check_period(store, period)?;
        Ok(period_total(store, period))
    }

    /// A week is breached when its total value meets or exceeds the threshold.
    pub fn is_breached(&self, store: &LedgerStore, period: Period) -> LedgerResult<bool> {
        Ok(self.total_value(store, period)? >= self.threshold)
    }

    pub fn breaches(&self, store: &LedgerStore) -> Vec<Period> {
        self.value_series(store)
            .into_iter()
            .filter(|v| v.total_value >= self.threshold)
            .map(|v| v.period)
            .collect()
    }
}

fn period_total(store: &LedgerStore, period: Period) -> Decimal {
    store
        .registry()
        .iter()
        .map(|(id, cost)| {
            let qty = store
                .quantity(&CellKey::new(id.clone(), RowKind::Inventory, period))
                .unwrap_or(0);
            Decimal::from(qty).saturating_mul(cost)
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn check_period(store: &LedgerStore, period: Period) -> LedgerResult<()> {
    if period.index() >= store.period_count() {
        return Err(LedgerError::not_found(format!(
            "period '{period}' (ledger has {} weeks)",
            store.period_count()
        )));
    }
    Ok(())
}
