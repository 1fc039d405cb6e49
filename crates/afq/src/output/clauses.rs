//! Parsed clause output formatting.

use aphfilter::{Dialect, FilterClause};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the parse command.
#[derive(Serialize)]
pub struct ClausesOutput<'a> {
    pub dialect: &'a str,
    pub clauses: &'a [FilterClause],
}

/// Formats parsed clauses as JSON.
pub fn format_clauses_json(
    clauses: &[FilterClause],
    dialect: &Dialect,
) -> Result<String, serde_json::Error> {
    let output = ClausesOutput {
        dialect: dialect.name(),
        clauses,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats parsed clauses as a table.
pub fn format_clauses_table(clauses: &[FilterClause], use_colors: bool) -> String {
    if clauses.is_empty() {
        return "No clauses.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<3} {:<20} {:<5} {:<25} {}", "#", "Field", "Op", "Value", "Then");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (i, clause) in clauses.iter().enumerate() {
        let logic = clause.logic.map(|l| l.keyword()).unwrap_or("");
        let line = format!(
            "{:<3} {:<20} {:<5} {:<25} {}",
            i + 1,
            clause.field,
            clause.operator.symbol(),
            clause.value,
            logic
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
