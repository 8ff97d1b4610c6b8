//! Textual ledger edits, as typed on the command line.
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::ledger::LedgerStore;
use crate::core::model::{Period, ProductId, Quantity, parse_amount, parse_quantity};
use crate::core::valuation::ValuationEngine;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// One mutation of the ledger or the valuation threshold.
///
/// Grammar, fields separated by `:`:
/// `add:ID:COST`, `remove:ID`, `cost:ID:COST`, `set:ID:PERIOD:SUPPLY:DEMAND`,
/// `threshold:VALUE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEdit {
    AddProduct {
        product: ProductId,
        cost: Decimal,
    },
    RemoveProduct {
        product: ProductId,
    },
    SetUnitCost {
        product: ProductId,
        cost: Decimal,
    },
    SetSupplyDemand {
        product: ProductId,
        period: Period,
        supply: Quantity,
        demand: Quantity,
    },
    SetThreshold {
        value: Decimal,
    },
}

impl FromStr for LedgerEdit {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').map(str::trim).collect();
        match fields.as_slice() {
            ["add", product, cost] => Ok(LedgerEdit::AddProduct {
                product: product.parse()?,
                cost: parse_amount(cost)?,
            }),
            ["remove", product] => Ok(LedgerEdit::RemoveProduct {
                product: product.parse()?,
            }),
            ["cost", product, cost] => Ok(LedgerEdit::SetUnitCost {
                product: product.parse()?,
                cost: parse_amount(cost)?,
            }),
            ["set", product, period, supply, demand] => Ok(LedgerEdit::SetSupplyDemand {
                product: product.parse()?,
                period: period.parse()?,
                supply: parse_quantity(supply)?,
                demand: parse_quantity(demand)?,
            }),
            ["threshold", value] => Ok(LedgerEdit::SetThreshold {
                value: parse_amount(value)?,
            }),
            _ => Err(LedgerError::validation(format!("invalid edit: {s}"))),
        }
    }
}

impl LedgerEdit {
    pub fn apply(&self, store: &mut LedgerStore, valuation: &mut ValuationEngine) -> LedgerResult<()> {
        debug!(edit = ?self, "Applying edit");
        match self {
            LedgerEdit::AddProduct { product, cost } => store.add_product(product.clone(), *cost),
            LedgerEdit::RemoveProduct { product } => store.remove_product(product),
            LedgerEdit::SetUnitCost { product, cost } => store.set_unit_cost(product, *cost),
            LedgerEdit::SetSupplyDemand {
                product,
                period,
                supply,
                demand,
            } => store.set_supply_demand(product, *period, *supply, *demand),
            LedgerEdit::SetThreshold { value } => valuation.set_threshold(*value),
        }
    }
}

/// Applies edits in order, stopping at the first rejected one.
pub fn apply_all(
    edits: &[LedgerEdit],
    store: &mut LedgerStore,
    valuation: &mut ValuationEngine,
) -> LedgerResult<()> {
    for edit in edits {
        edit.apply(store, valuation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn test_parse_edits() {
        assert_eq!(
            "set:Lobster:Week 3:10:4".parse::<LedgerEdit>().unwrap(),
            LedgerEdit::SetSupplyDemand {
                product: id("Lobster"),
                period: Period(3),
                supply: 10,
                demand: 4,
            }
        );
        assert_eq!(
            "add:Crab:4.5".parse::<LedgerEdit>().unwrap(),
            LedgerEdit::AddProduct {
                product: id("Crab"),
                cost: Decimal::new(45, 1),
            }
        );
        assert_eq!(
            "remove:Salmon".parse::<LedgerEdit>().unwrap(),
            LedgerEdit::RemoveProduct {
                product: id("Salmon")
            }
        );
        assert_eq!(
            "threshold:200".parse::<LedgerEdit>().unwrap(),
            LedgerEdit::SetThreshold {
                value: Decimal::from(200)
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_edits() {
        for bad in [
            "set:Lobster:3:1.5:4",
            "add:X:-1",
            "cost:Lobster",
            "set::3:1:1",
            "move:Lobster",
            "threshold:lots",
        ] {
            assert!(
                matches!(bad.parse::<LedgerEdit>(), Err(LedgerError::Validation(_))),
                "expected validation error for {bad}"
            );
        }
    }

    #[test]
    fn test_apply_all_runs_in_order() {
        let mut store = LedgerStore::new(2);
        let mut valuation = ValuationEngine::default();
        let edits: Vec<LedgerEdit> = ["add:X:3", "set:X:0:5:1", "cost:X:2", "threshold:8"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        apply_all(&edits, &mut store, &mut valuation).unwrap();

        assert_eq!(store.inventory(&id("X"), Period(1)).unwrap(), 4);
        assert_eq!(valuation.breaches(&store), vec![Period(0), Period(1)]);
    }

    #[test]
    fn test_apply_all_stops_at_first_failure() {
        let mut store = LedgerStore::new(1);
        let mut valuation = ValuationEngine::default();
        let edits: Vec<LedgerEdit> = ["add:X:3", "remove:Y", "add:Z:1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let result = apply_all(&edits, &mut store, &mut valuation);

        assert!(matches!(result, Err(LedgerError::NotFound(_))));
        assert_eq!(store.list_products(), vec![id("X")]);
    }
}
