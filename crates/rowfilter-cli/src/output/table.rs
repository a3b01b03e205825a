//! Filtered table output formatting.

use owo_colors::OwoColorize;
use rowfilter::Table;

use super::helpers::truncate_str;

/// Widest a grid column gets before cells are truncated.
const MAX_CELL_WIDTH: usize = 40;

/// Formats a table as JSON, in the same shape `apply --table` reads.
pub fn format_table_json(table: &Table) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

/// Formats a table as an aligned text grid. Null cells are left blank.
pub fn format_table_text(table: &Table, use_colors: bool) -> String {
    if table.num_columns() == 0 {
        return "No columns.\n".to_string();
    }

    let cells: Vec<Vec<String>> = table
        .columns()
        .iter()
        .map(|column| {
            (0..table.num_rows())
                .map(|row| {
                    column
                        .format_cell(row)
                        .map(|cell| truncate_str(&cell, MAX_CELL_WIDTH))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .zip(&cells)
        .map(|(column, values)| {
            values
                .iter()
                .map(|v| v.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let mut output = String::new();

    let names: Vec<String> = table
        .column_names()
        .map(|name| truncate_str(name, MAX_CELL_WIDTH))
        .collect();
    let header = join_row(names.iter().map(String::as_str), &widths);
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for row in 0..table.num_rows() {
        let line = join_row(cells.iter().map(|column| column[row].as_str()), &widths);
        output.push_str(&line);
        output.push('\n');
    }

    output
}

fn join_row<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(value, width)| format!("{value:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}
