//! Read-only views of the ledger handed to renderers and exporters.
use crate::core::model::{Period, ProductId, Quantity, RowKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// The three rows of one product, as of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRows {
    pub product: ProductId,
    pub unit_cost: Decimal,
    pub supply: Vec<Option<Quantity>>,
    pub demand: Vec<Option<Quantity>>,
    pub inventory: Vec<Quantity>,
    /// Set when any week ends in shortfall, used for row styling.
    pub has_negative_inventory: bool,
}

impl ProductRows {
    pub fn row(&self, kind: RowKind) -> Vec<Option<Quantity>> {
        match kind {
            RowKind::Supply => self.supply.clone(),
            RowKind::Demand => self.demand.clone(),
            RowKind::Inventory => self.inventory.iter().copied().map(Some).collect(),
        }
    }
}

/// A single row tagged by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow<'a> {
    pub product: &'a ProductRows,
    pub kind: RowKind,
    pub cells: Vec<Option<Quantity>>,
}

/// Immutable copy of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub periods: Vec<Period>,
    pub products: Vec<ProductRows>,
}

impl LedgerSnapshot {
    pub fn period_labels(&self) -> Vec<String> {
        self.periods.iter().map(|p| p.label()).collect()
    }

    pub fn product(&self, id: &ProductId) -> Option<&ProductRows> {
        self.products.iter().find(|p| &p.product == id)
    }

    /// All rows in display order: Supply, Demand, Inventory per product.
    pub fn rows(&self) -> impl Iterator<Item = LedgerRow<'_>> + '_ {
        self.products.iter().flat_map(|product| {
            RowKind::ALL.into_iter().map(move |kind| LedgerRow {
                product,
                kind,
                cells: product.row(kind),
            })
        })
    }
}
