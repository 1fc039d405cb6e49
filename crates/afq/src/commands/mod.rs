//! Command implementations for the afq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod compile;
pub mod completions;
pub mod config;
pub mod operators;
pub mod parse;

use aphfilter::Dialect;

use crate::cli::{Cli, DialectArg};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter parsing, validation or compilation error.
    #[error("filter error: {0}")]
    Filter(#[from] aphfilter::FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
        }
    }
}

/// Picks the dialect: explicit flag, then the config file, then PostgreSQL.
pub fn resolve_dialect(arg: Option<DialectArg>) -> Result<&'static Dialect> {
    let name = match arg {
        Some(arg) => arg.name().to_string(),
        None => match config::load_config()?.dialect {
            Some(name) => name,
            None => return Ok(Dialect::postgres()),
        },
    };

    Dialect::by_name(&name)
        .ok_or_else(|| CommandError::Config(format!("unknown dialect '{}'", name)))
}
