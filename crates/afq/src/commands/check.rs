//! Check command implementation.
//!
//! Parses a filter and validates its fields without compiling it.

use aphfilter::{validate, FilterParser};
use serde::Serialize;

use super::compile::{base_schema, build_schema};
use super::{resolve_dialect, CommandContext, Result};
use crate::cli::DialectArg;

/// Options for the check command.
#[derive(Debug)]
pub struct CheckOptions {
    pub filter: String,
    pub dialect: Option<DialectArg>,
    pub resource: Option<String>,
    pub allow: Vec<String>,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    valid: bool,
    clauses: usize,
    fields: Vec<&'a str>,
}

/// Executes the check command.
///
/// # Errors
///
/// Returns the first parse or validation error.
pub fn execute(ctx: &CommandContext, opts: &CheckOptions) -> Result<()> {
    let dialect = resolve_dialect(opts.dialect)?;
    let schema = build_schema(base_schema(opts.resource.as_deref())?, &opts.allow, &[]);

    let clauses = FilterParser::parse(&opts.filter, dialect)?;
    validate(&clauses, schema.allowed_fields())?;

    if ctx.json_output {
        let output = CheckOutput {
            valid: true,
            clauses: clauses.len(),
            fields: clauses.iter().map(|c| c.field.as_str()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("ok ({} clauses)", clauses.len());
    }

    Ok(())
}
