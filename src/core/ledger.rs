//! The ledger store: single owner of every Supply, Demand and Inventory cell.
//!
//! Every mutation validates its input before touching any state, then
//! re-derives the Inventory row of the affected product. Callers never see
//! stale Inventory values and a rejected operation leaves the ledger as it was.
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::model::{CellKey, Period, ProductId, Quantity, RowKind, ensure_non_negative};
use crate::core::recurrence::{self, CellTable};
use crate::core::registry::{ProductRegistry, unknown_product};
use crate::core::snapshot::{LedgerSnapshot, ProductRows};
use rust_decimal::Decimal;
use tracing::debug;

/// Initial data for one product. Inventory is always derived, never seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSeed {
    pub id: ProductId,
    pub unit_cost: Decimal,
    pub supply: Vec<Quantity>,
    pub demand: Vec<Quantity>,
}

#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    periods: usize,
    cells: CellTable,
    registry: ProductRegistry,
}

impl LedgerStore {
    /// Creates an empty ledger spanning `periods` weeks.
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            cells: CellTable::new(),
            registry: ProductRegistry::new(),
        }
    }

    /// Builds a ledger from seed rows.
    ///
    /// Rows shorter than `periods` leave the trailing cells empty; those weeks
    /// are skipped by the recurrence until a value is written.
    pub fn from_seed(
        periods: usize,
        seeds: impl IntoIterator<Item = ProductSeed>,
    ) -> LedgerResult<Self> {
        let mut store = Self::new(periods);
        for seed in seeds {
            store.registry.check_register(&seed.id, seed.unit_cost)?;
            for (kind, row) in [(RowKind::Supply, &seed.supply), (RowKind::Demand, &seed.demand)] {
                if row.len() > periods {
                    return Err(LedgerError::validation(format!(
                        "{kind} row of '{}' has {} values but the ledger has {periods} weeks",
                        seed.id,
                        row.len()
                    )));
                }
                for (week, value) in row.iter().enumerate() {
                    store
                        .cells
                        .insert(CellKey::new(seed.id.clone(), kind, Period(week)), *value);
                }
            }
            store.insert_inventory_row(&seed.id);
            store.registry.register(seed.id.clone(), seed.unit_cost)?;
            store.recompute_product(&seed.id);
        }
        debug!(
            products = store.registry.len(),
            periods, "Seeded ledger"
        );
        Ok(store)
    }

    pub fn period_count(&self) -> usize {
        self.periods
    }

    pub fn periods(&self) -> Vec<Period> {
        (0..self.periods).map(Period).collect()
    }

    pub fn list_products(&self) -> Vec<ProductId> {
        self.registry.list_products()
    }

    pub fn contains_product(&self, id: &ProductId) -> bool {
        self.registry.contains(id)
    }

    pub fn unit_cost(&self, id: &ProductId) -> LedgerResult<Decimal> {
        self.registry.unit_cost(id)
    }

    pub(crate) fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    /// Raw cell lookup; `None` when the cell has never been written.
    pub fn quantity(&self, key: &CellKey) -> Option<Quantity> {
        self.cells.get(key).copied()
    }

    pub fn inventory(&self, product: &ProductId, period: Period) -> LedgerResult<Quantity> {
        self.check_cell(product, period)?;
        Ok(self
            .quantity(&CellKey::new(product.clone(), RowKind::Inventory, period))
            .unwrap_or(0))
    }

    /// Overwrites Supply and Demand for one week and re-derives Inventory.
    pub fn set_supply_demand(
        &mut self,
        product: &ProductId,
        period: Period,
        supply: Quantity,
        demand: Quantity,
    ) -> LedgerResult<()> {
        self.check_cell(product, period)?;
        self.write_supply_demand(product, period, supply, demand);
        self.recompute_product(product);
        Ok(())
    }

    /// Writes a single Supply or Demand cell. Inventory cells are derived and
    /// cannot be written.
    pub fn set_quantity(&mut self, key: CellKey, quantity: Quantity) -> LedgerResult<()> {
        if key.kind == RowKind::Inventory {
            return Err(LedgerError::validation(
                "inventory is derived from supply and demand and cannot be set directly",
            ));
        }
        self.check_cell(&key.product, key.period)?;
        debug!(product = %key.product, kind = %key.kind, period = %key.period, quantity, "Setting cell");
        let product = key.product.clone();
        self.cells.insert(key, quantity);
        self.recompute_product(&product);
        Ok(())
    }

    pub fn set_unit_cost(&mut self, product: &ProductId, cost: Decimal) -> LedgerResult<()> {
        self.registry.set_unit_cost(product, cost)?;
        debug!(%product, %cost, "Updated unit cost");
        Ok(())
    }

    /// Updates Supply, Demand and unit cost of one product-week in one step.
    pub fn modify(
        &mut self,
        product: &ProductId,
        period: Period,
        supply: Quantity,
        demand: Quantity,
        cost: Decimal,
    ) -> LedgerResult<()> {
        self.check_cell(product, period)?;
        let cost = ensure_non_negative(cost)?;
        self.registry.set_unit_cost(product, cost)?;
        self.write_supply_demand(product, period, supply, demand);
        self.recompute_product(product);
        Ok(())
    }

    /// Adds a product with all-zero rows for every existing week.
    pub fn add_product(&mut self, id: ProductId, initial_cost: Decimal) -> LedgerResult<()> {
        self.registry.check_register(&id, initial_cost)?;
        for week in 0..self.periods {
            for kind in RowKind::ALL {
                self.cells
                    .insert(CellKey::new(id.clone(), kind, Period(week)), 0);
            }
        }
        self.registry.register(id.clone(), initial_cost)?;
        self.recompute_product(&id);
        debug!(product = %id, cost = %initial_cost, "Added product");
        Ok(())
    }

    /// Drops a product's three rows and its unit cost. Other products are
    /// untouched.
    pub fn remove_product(&mut self, id: &ProductId) -> LedgerResult<()> {
        self.registry.unregister(id)?;
        self.cells.retain(|key, _| &key.product != id);
        debug!(product = %id, "Removed product");
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let products = self
            .registry
            .iter()
            .map(|(id, unit_cost)| {
                let optional_row = |kind| {
                    (0..self.periods)
                        .map(|week| self.quantity(&CellKey::new(id.clone(), kind, Period(week))))
                        .collect::<Vec<_>>()
                };
                let inventory: Vec<Quantity> = optional_row(RowKind::Inventory)
                    .into_iter()
                    .map(|q| q.unwrap_or(0))
                    .collect();
                ProductRows {
                    product: id.clone(),
                    unit_cost,
                    supply: optional_row(RowKind::Supply),
                    demand: optional_row(RowKind::Demand),
                    has_negative_inventory: inventory.iter().any(|q| *q < 0),
                    inventory,
                }
            })
            .collect();

        LedgerSnapshot {
            periods: self.periods(),
            products,
        }
    }

    /// True when every stored Inventory row matches a fresh recompute.
    pub fn is_consistent(&self) -> bool {
        self.registry.iter().all(|(id, _)| {
            let expected = recurrence::recompute(&self.cells, id, self.periods);
            expected.iter().enumerate().all(|(week, value)| {
                self.quantity(&CellKey::new(id.clone(), RowKind::Inventory, Period(week)))
                    == Some(*value)
            })
        })
    }

    fn check_cell(&self, product: &ProductId, period: Period) -> LedgerResult<()> {
        if !self.registry.contains(product) {
            return Err(unknown_product(product));
        }
        if period.index() >= self.periods {
            return Err(LedgerError::not_found(format!(
                "period '{period}' (ledger has {} weeks)",
                self.periods
            )));
        }
        Ok(())
    }

    fn write_supply_demand(
        &mut self,
        product: &ProductId,
        period: Period,
        supply: Quantity,
        demand: Quantity,
    ) {
        debug!(%product, %period, supply, demand, "Setting supply/demand");
        self.cells.insert(
            CellKey::new(product.clone(), RowKind::Supply, period),
            supply,
        );
        self.cells.insert(
            CellKey::new(product.clone(), RowKind::Demand, period),
            demand,
        );
    }

    fn insert_inventory_row(&mut self, product: &ProductId) {
        for week in 0..self.periods {
            self.cells
                .insert(CellKey::new(product.clone(), RowKind::Inventory, Period(week)), 0);
        }
    }

    fn recompute_product(&mut self, product: &ProductId) {
        let inventory = recurrence::recompute(&self.cells, product, self.periods);
        debug!(%product, ?inventory, "Recomputed inventory");
        for (week, value) in inventory.into_iter().enumerate() {
            self.cells.insert(
                CellKey::new(product.clone(), RowKind::Inventory, Period(week)),
                value,
            );
        }
    }
}
