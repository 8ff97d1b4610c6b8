use crate::core::Quantity;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::Decimal;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Warning => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Supply or demand cell. Missing values are displayed as "N/A".
pub fn quantity_cell(value: Option<Quantity>) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(v).set_alignment(CellAlignment::Right),
    )
}

/// Inventory cell, red for the whole row when the product runs short in any
/// week and blue otherwise.
pub fn inventory_cell(value: Quantity, row_has_negative: bool) -> Cell {
    let color = if row_has_negative {
        Color::Red
    } else {
        Color::Blue
    };
    Cell::new(value)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

pub fn value_cell(value: Decimal) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

/// Status cell for a valuation row.
pub fn status_cell(breached: bool) -> Cell {
    if breached {
        Cell::new("WARNING")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("OK").fg(Color::Green)
    }
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
