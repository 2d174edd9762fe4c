use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use carebill_cli::types::RunResult;
use carebill_report::format_yen;

pub fn print_summary(result: &RunResult) {
    println!("Month: {} ({})", result.month, result.month.era_label());
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Facility"),
        header_cell("Billed"),
        header_cell("Total"),
        header_cell("Capped"),
        header_cell("Docs"),
        header_cell("Rollover"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=4 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);

    let mut billed = 0usize;
    let mut total = 0i64;
    let mut documents = 0usize;
    for facility in &result.facilities {
        billed += facility.billed;
        total += facility.billed_total;
        documents += facility.documents;
        table.add_row(vec![
            Cell::new(&facility.display_name),
            Cell::new(facility.billed),
            Cell::new(format_yen(facility.billed_total)),
            count_cell(facility.capped, Color::Blue),
            Cell::new(facility.documents),
            Cell::new(if facility.rollover { "✓" } else { "-" }),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(billed).add_attribute(Attribute::Bold),
        Cell::new(format_yen(total)).add_attribute(Attribute::Bold),
        Cell::new("-").fg(Color::DarkGrey),
        Cell::new(documents).add_attribute(Attribute::Bold),
        Cell::new("-").fg(Color::DarkGrey),
    ]);
    println!("{table}");

    print_unmatched(result);
    print_unknown_set_types(result);
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

/// Usage records no facility matched, for manual reconciliation.
fn print_unmatched(result: &RunResult) {
    if result.unmatched.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Station"),
        header_cell("User"),
        header_cell("Name"),
        header_cell("Durables"),
        header_cell("Consumables"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for unmatched in &result.unmatched {
        table.add_row(vec![
            Cell::new(&unmatched.station_id),
            Cell::new(&unmatched.user_id),
            Cell::new(&unmatched.name).fg(Color::Yellow),
            Cell::new(format_yen(unmatched.totals.durable_goods)),
            Cell::new(format_yen(unmatched.totals.consumables)),
        ]);
    }
    println!();
    println!("Unmatched usage records:");
    println!("{table}");
}

fn print_unknown_set_types(result: &RunResult) {
    let mut codes: Vec<&str> = result
        .facilities
        .iter()
        .flat_map(|facility| facility.unknown_set_types.iter())
        .map(String::as_str)
        .collect();
    codes.sort_unstable();
    codes.dedup();
    if codes.is_empty() {
        return;
    }
    println!();
    println!("Unpriced set types (billed zero): {}", codes.join(", "));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
