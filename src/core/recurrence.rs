//! Derives the Inventory row of a product from its Supply and Demand rows.
use crate::core::model::{CellKey, Period, ProductId, Quantity, RowKind};
use std::collections::HashMap;
use tracing::debug;

/// Cell storage shared by the store and the recurrence.
pub type CellTable = HashMap<CellKey, Quantity>;

/// Recomputes the Inventory row of `product` over `periods` weeks.
///
/// Week 0 starts from `supply - demand`; every later week adds its net flow
/// to the previous week's inventory. When Supply or Demand is absent for a
/// week, that week's existing Inventory value is carried through unchanged
/// and the following weeks build on it. The function never fails.
pub fn recompute(cells: &CellTable, product: &ProductId, periods: usize) -> Vec<Quantity> {
    let cell = |kind, week| {
        cells
            .get(&CellKey::new(product.clone(), kind, Period(week)))
            .copied()
    };

    let mut inventory = Vec::with_capacity(periods);
    for week in 0..periods {
        let value = match (cell(RowKind::Supply, week), cell(RowKind::Demand, week)) {
            (Some(supply), Some(demand)) => {
                let previous = if week == 0 { 0 } else { inventory[week - 1] };
                net(previous, supply, demand)
            }
            _ => {
                debug!(%product, week, "Skipping week with incomplete supply/demand");
                cell(RowKind::Inventory, week).unwrap_or(0)
            }
        };
        inventory.push(value);
    }
    inventory
}

fn net(previous: Quantity, supply: Quantity, demand: Quantity) -> Quantity {
    previous.saturating_add(supply).saturating_sub(demand)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(product: &ProductId, rows: &[(RowKind, &[Quantity])]) -> CellTable {
        let mut cells = CellTable::new();
        for (kind, values) in rows {
            for (week, value) in values.iter().enumerate() {
                cells.insert(CellKey::new(product.clone(), *kind, Period(week)), *value);
            }
        }
        cells
    }

    #[test]
    fn test_recurrence_accumulates_net_flow() {
        let p = ProductId::new("Lobster").unwrap();
        let cells = table(
            &p,
            &[
                (RowKind::Supply, &[25, 5, 7, 4]),
                (RowKind::Demand, &[10, 8, 8, 8]),
            ],
        );

        assert_eq!(recompute(&cells, &p, 4), vec![15, 12, 11, 7]);
    }

    #[test]
    fn test_recurrence_allows_negative_inventory() {
        let p = ProductId::new("Salmon").unwrap();
        let cells = table(
            &p,
            &[(RowKind::Supply, &[30, 50]), (RowKind::Demand, &[10, 80])],
        );

        assert_eq!(recompute(&cells, &p, 2), vec![20, -10]);
    }

    #[test]
    fn test_recurrence_skips_incomplete_weeks() {
        let p = ProductId::new("Shrimp").unwrap();
        let mut cells = table(
            &p,
            &[
                (RowKind::Supply, &[10, 5, 3]),
                (RowKind::Demand, &[4, 1]),
                (RowKind::Inventory, &[0, 0, 99]),
            ],
        );
        // Week 2 has no demand: its inventory is left alone and feeds week 3.
        cells.insert(CellKey::new(p.clone(), RowKind::Supply, Period(3)), 1);
        cells.insert(CellKey::new(p.clone(), RowKind::Demand, Period(3)), 0);

        assert_eq!(recompute(&cells, &p, 4), vec![6, 10, 99, 100]);
    }

    #[test]
    fn test_recurrence_ignores_other_products() {
        let p = ProductId::new("Lobster").unwrap();
        let q = ProductId::new("Salmon").unwrap();
        let mut cells = table(&p, &[(RowKind::Supply, &[1]), (RowKind::Demand, &[0])]);
        cells.extend(table(&q, &[(RowKind::Supply, &[50]), (RowKind::Demand, &[0])]));

        assert_eq!(recompute(&cells, &p, 1), vec![1]);
    }

    #[test]
    fn test_recurrence_saturates_instead_of_overflowing() {
        let p = ProductId::new("Bulk").unwrap();
        let cells = table(
            &p,
            &[
                (RowKind::Supply, &[Quantity::MAX, 10]),
                (RowKind::Demand, &[0, 0]),
            ],
        );

        assert_eq!(recompute(&cells, &p, 2), vec![Quantity::MAX, Quantity::MAX]);
    }
}
