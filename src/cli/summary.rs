use super::ui;
use crate::core::config::AppConfig;
use crate::core::{LedgerEdit, LedgerSnapshot, PeriodValue, RowKind};
use anyhow::Result;
use comfy_table::Cell;
use rust_decimal::Decimal;
use tracing::warn;

impl LedgerSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        let mut header = vec![ui::header_cell("Product"), ui::header_cell("Item")];
        header.extend(self.period_labels().iter().map(|l| ui::header_cell(l)));
        table.set_header(header);

        for row in self.rows() {
            let mut cells = vec![
                Cell::new(row.product.product.as_str()),
                Cell::new(row.kind.to_string()),
            ];
            match row.kind {
                RowKind::Inventory => cells.extend(row.product.inventory.iter().map(|q| {
                    ui::inventory_cell(*q, row.product.has_negative_inventory)
                })),
                RowKind::Supply | RowKind::Demand => {
                    cells.extend(row.cells.iter().map(|q| ui::quantity_cell(*q)))
                }
            }
            table.add_row(cells);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Weekly Ledger", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output
    }
}

/// Renders the value series with a status column against `threshold`.
pub fn display_valuation(series: &[PeriodValue], threshold: Decimal) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Week"),
        ui::header_cell("Inventory Value"),
        ui::header_cell("Status"),
    ]);

    for value in series {
        table.add_row(vec![
            Cell::new(value.period.label()),
            ui::value_cell(value.total_value),
            ui::status_cell(value.total_value >= threshold),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Inventory Value vs Warning Level", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}: {}",
        ui::style_text("Warning Level", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{threshold:.2}"), ui::StyleType::TotalValue)
    ));
    output
}

pub fn run(config: &AppConfig, edits: &[LedgerEdit]) -> Result<()> {
    let (store, valuation) = super::load_ledger(config, edits)?;
    let snapshot = store.snapshot();
    let series = valuation.value_series(&store);

    println!("{}", snapshot.display_as_table());
    ui::print_separator();
    println!("{}", display_valuation(&series, valuation.threshold()));

    let breaches = valuation.breaches(&store);
    if breaches.is_empty() {
        println!(
            "\n{}",
            ui::style_text("Inventory value stays below the warning level.", ui::StyleType::Subtle)
        );
    } else {
        let weeks: Vec<String> = breaches.iter().map(|p| p.label()).collect();
        warn!(threshold = %valuation.threshold(), ?weeks, "Inventory value breached warning level");
        println!(
            "\n{} {}",
            ui::style_text("Warning level reached in:", ui::StyleType::Warning),
            weeks.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LedgerStore, Period, ProductId, ProductSeed, ValuationEngine};

    fn store() -> LedgerStore {
        LedgerStore::from_seed(
            2,
            [
                ProductSeed {
                    id: ProductId::new("Lobster").unwrap(),
                    unit_cost: Decimal::from(5),
                    supply: vec![4, 0],
                    demand: vec![1, 5],
                },
                ProductSeed {
                    id: ProductId::new("Shrimp").unwrap(),
                    unit_cost: Decimal::from(3),
                    supply: vec![13],
                    demand: vec![3],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ledger_table_lists_every_row() {
        let output = store().snapshot().display_as_table();

        assert!(output.contains("Week 0"));
        assert!(output.contains("Week 1"));
        assert!(output.contains("Lobster"));
        assert!(output.contains("Shrimp"));
        assert_eq!(output.matches("Inventory").count(), 2);
        assert!(output.contains("-2"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_valuation_table_flags_breaches() {
        let store = store();
        let valuation = ValuationEngine::new(Decimal::from(40)).unwrap();
        let series = valuation.value_series(&store);
        // Week 0: 3 * 5 + 10 * 3 = 45, week 1: -2 * 5 + 0 * 3 = -10
        assert_eq!(series[0].total_value, Decimal::from(45));
        assert_eq!(series[1].period, Period(1));

        let output = display_valuation(&series, valuation.threshold());
        assert!(output.contains("45.00"));
        assert!(output.contains("-10.00"));
        assert_eq!(output.matches("WARNING").count(), 1);
        assert!(output.contains("40.00"));
    }
}
