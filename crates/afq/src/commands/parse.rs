//! Parse command implementation.
//!
//! Tokenizes a filter expression and prints its clauses.

use aphfilter::FilterParser;

use super::{resolve_dialect, CommandContext, Result};
use crate::cli::DialectArg;
use crate::output::{format_clauses_json, format_clauses_table};

/// Options for the parse command.
#[derive(Debug)]
pub struct ParseOptions {
    pub filter: String,
    pub dialect: Option<DialectArg>,
}

/// Executes the parse command.
///
/// # Errors
///
/// Returns an error if the dialect cannot be resolved or the filter does
/// not parse.
pub fn execute(ctx: &CommandContext, opts: &ParseOptions) -> Result<()> {
    let dialect = resolve_dialect(opts.dialect)?;
    let clauses = FilterParser::parse(&opts.filter, dialect)?;

    if ctx.json_output {
        println!("{}", format_clauses_json(&clauses, dialect)?);
    } else if !ctx.quiet {
        print!("{}", format_clauses_table(&clauses, ctx.use_colors));
    }

    Ok(())
}
