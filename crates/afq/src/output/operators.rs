//! Operator table output formatting.

use aphfilter::Dialect;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::kind_name;

/// JSON output structure for the operators command.
#[derive(Serialize)]
pub struct OperatorsOutput<'a> {
    pub dialect: &'a str,
    pub keyword: &'a str,
    pub operators: Vec<OperatorOutput>,
}

/// JSON output structure for a single operator.
#[derive(Serialize)]
pub struct OperatorOutput {
    pub symbol: &'static str,
    pub kind: &'static str,
    pub token: &'static str,
}

/// Formats a dialect's operator table as JSON.
pub fn format_operators_json(dialect: &Dialect) -> Result<String, serde_json::Error> {
    let output = OperatorsOutput {
        dialect: dialect.name(),
        keyword: dialect.keyword(),
        operators: dialect
            .operators()
            .map(|(op, token)| OperatorOutput {
                symbol: op.symbol(),
                kind: kind_name(op.kind()),
                token,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a dialect's operator table as a table.
pub fn format_operators_table(dialect: &Dialect, use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!("{:<6} {:<12} {}", "Op", "Kind", "Token");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (op, token) in dialect.operators() {
        let line = format!("{:<6} {:<12} {}", op.symbol(), kind_name(op.kind()), token);
        output.push_str(&line);
        output.push('\n');
    }

    output
}
