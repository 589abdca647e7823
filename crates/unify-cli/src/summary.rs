use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::UnifyResult;

pub fn print_summary(result: &UnifyResult) {
    println!("Output: {}", result.output_path.display());
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    println!("{}", build_summary_table(result));
    if result.summary.has_skipped() {
        eprintln!("Skipped files:");
        for skipped in &result.summary.skipped {
            eprintln!("- {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

pub fn build_summary_table(result: &UnifyResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Worker"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Dates dropped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_rows = 0usize;
    for file in &result.summary.files {
        total_rows += file.rows;
        table.add_row(vec![
            Cell::new(file.path.display()),
            dim_cell(&file.worker),
            Cell::new(file.rows),
            Cell::new(file.columns),
            count_cell(file.dates_dropped, Color::Yellow),
        ]);
    }
    for skipped in &result.summary.skipped {
        table.add_row(vec![
            Cell::new(skipped.path.display()).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("skipped").fg(Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} workers", result.summary.workers)).add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(result.written.columns).add_attribute(Attribute::Bold),
        count_cell(result.summary.dates_dropped(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
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
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
