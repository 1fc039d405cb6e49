//! Compile command implementation.
//!
//! Validates a filter against a resource allow-list and compiles it into a
//! backend query fragment.

use aphfilter::{CompileMode, FilterQuery, Operator, ResourceSchema};

use super::config::load_config;
use super::{resolve_dialect, CommandContext, CommandError, Result};
use crate::cli::{DialectArg, ModeArg};
use crate::output::{format_compiled_json, format_compiled_text};

/// Options for the compile command.
#[derive(Debug, Default)]
pub struct CompileOptions {
    pub filter: String,
    pub dialect: Option<DialectArg>,
    pub resource: Option<String>,
    pub allow: Vec<String>,
    pub columns: Vec<(String, String)>,
    pub mode: Option<ModeArg>,
    pub deny: Vec<String>,
}

impl From<ModeArg> for CompileMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Inline => CompileMode::Inline,
            ModeArg::Placeholder => CompileMode::Placeholder,
        }
    }
}

/// Executes the compile command.
///
/// # Errors
///
/// Returns an error if the config or resource cannot be loaded, a denied
/// operator symbol is unknown, or the filter fails to parse, validate or
/// compile.
pub fn execute(ctx: &CommandContext, opts: &CompileOptions) -> Result<()> {
    let base = base_schema(opts.resource.as_deref())?;
    let schema = build_schema(base, &opts.allow, &opts.columns);

    let mut dialect = resolve_dialect(opts.dialect)?.clone();
    let denied = parse_denied(&opts.deny)?;
    if !denied.is_empty() {
        dialect = dialect.without(&denied);
    }
    if let Some(mode) = opts.mode {
        dialect = dialect.with_mode(mode.into());
    }

    tracing::debug!(
        dialect = dialect.name(),
        fields = schema.fields.len(),
        denied = denied.len(),
        "compiling filter"
    );
    let compiled = FilterQuery::build(&opts.filter, &schema, &dialect)?;

    if ctx.json_output {
        println!("{}", format_compiled_json(&compiled, &dialect, dialect.mode())?);
    } else if !ctx.quiet {
        print!("{}", format_compiled_text(&compiled, &dialect, ctx.use_colors));
    }

    Ok(())
}

/// Loads the named resource from the config file, or an empty schema.
pub(crate) fn base_schema(resource: Option<&str>) -> Result<ResourceSchema> {
    match resource {
        Some(name) => Ok(load_config()?.resource(name)?.clone()),
        None => Ok(ResourceSchema::new()),
    }
}

/// Extends `base` with extra allowed fields and column mappings.
///
/// A mapped field is allowed too.
pub(crate) fn build_schema(
    base: ResourceSchema,
    allow: &[String],
    columns: &[(String, String)],
) -> ResourceSchema {
    let schema = allow.iter().fold(base, |schema, field| schema.field(field.as_str()));
    columns
        .iter()
        .fold(schema, |schema, (field, column)| {
            schema.mapped_field(field.as_str(), column.as_str())
        })
}

/// Resolves `--deny` symbols to operators.
fn parse_denied(symbols: &[String]) -> Result<Vec<Operator>> {
    symbols
        .iter()
        .map(|s| {
            Operator::from_symbol(s)
                .ok_or_else(|| CommandError::Config(format!("unknown operator '{}'", s)))
        })
        .collect()
}
