//! Operators command implementation.

use super::{resolve_dialect, CommandContext, Result};
use crate::cli::DialectArg;
use crate::output::{format_operators_json, format_operators_table};

/// Executes the operators command: lists each symbol the dialect accepts
/// and the backend token it compiles to.
pub fn execute(ctx: &CommandContext, dialect: Option<DialectArg>) -> Result<()> {
    let dialect = resolve_dialect(dialect)?;

    if ctx.json_output {
        println!("{}", format_operators_json(dialect)?);
    } else if !ctx.quiet {
        print!("{}", format_operators_table(dialect, ctx.use_colors));
    }

    Ok(())
}
