//! Terminal output rendering for run results.

use crate::pipeline::{Diagnostics, RunResult};
use crate::pivot::PivotTable;
use colored::*;

const RULE: &str = "---------------------------------------------------\n";

/// Render a human-readable summary of a run for the terminal
pub fn render_terminal_summary(result: &RunResult) -> String {
    let mut out = String::new();

    out.push_str(&render_header(result));
    out.push_str(&render_lookups(&result.diagnostics));
    out.push_str(&render_pivot(result));
    out.push_str(&render_status(&result.diagnostics));

    out
}

fn render_header(result: &RunResult) -> String {
    let config = &result.config;
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Cache Design-Space Summary".bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out.push_str(&format!("Hierarchy: {}\n", config.hierarchy));
    out.push_str(&format!("Formula:   {}\n", config.formula));
    out.push_str(&format!(
        "Pivot:     {} by {} ({})\n",
        config.pivot.value,
        config.pivot.row_axis.column_name(),
        result.pivot.columns.len()
    ));
    out.push_str(&format!("Rows:      {}\n", result.rows.len()));
    out.push_str(RULE);
    out
}

fn render_lookups(diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    for (level, counts) in &diagnostics.lookups {
        let misses = if counts.misses > 0 {
            counts.misses.to_string().red().to_string()
        } else {
            counts.misses.to_string()
        };
        let ambiguous = if counts.ambiguous > 0 {
            counts.ambiguous.to_string().yellow().to_string()
        } else {
            counts.ambiguous.to_string()
        };
        out.push_str(&format!(
            "  {:<7} {} hit, {} miss, {} ambiguous, {} absent\n",
            level, counts.hits, misses, ambiguous, counts.absent
        ));
    }
    out
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

fn render_table(table: &PivotTable, row_axis: &str) -> String {
    let mut out = String::new();
    let widths: Vec<usize> = table.columns.iter().map(|c| c.len().max(8)).collect();

    out.push_str(&format!("{:>8}", row_axis).bold().to_string());
    for (column, width) in table.columns.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", column, width = *width).bold().to_string());
    }
    out.push('\n');

    for (key, cells) in table.rows.iter().zip(&table.cells) {
        out.push_str(&format!("{:>8}", key));
        for (cell, width) in cells.iter().zip(&widths) {
            let text = format!("  {:>width$}", format_cell(cell.value), width = *width);
            if cell.is_ambiguous() {
                out.push_str(&text.yellow().to_string());
            } else {
                out.push_str(&text);
            }
        }
        out.push('\n');
    }
    out
}

fn render_pivot(result: &RunResult) -> String {
    if result.pivot.is_empty() {
        return "\nPivot table is empty\n".dimmed().to_string();
    }
    format!(
        "\n{}",
        render_table(&result.pivot, result.config.pivot.row_axis.column_name())
    )
}

fn render_status(diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(RULE);
    let status = if diagnostics.is_clean() {
        "STATUS: CLEAN".green().bold()
    } else if diagnostics.has_ambiguity() {
        format!("STATUS: AMBIGUOUS ({})", diagnostics.summary())
            .yellow()
            .bold()
    } else {
        format!("STATUS: INCOMPLETE ({})", diagnostics.summary())
            .yellow()
            .bold()
    };
    out.push_str(&status.to_string());
    out.push('\n');
    out
}
