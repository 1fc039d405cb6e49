//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the afq CLI.

use clap::{Parser, Subcommand, ValueEnum};

/// afq - compile JSONAPI filter expressions into query clauses
#[derive(Parser, Debug)]
#[command(name = "afq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a filter expression and show its clauses
    #[command(alias = "p")]
    Parse {
        /// Filter expression (e.g., "name==bob;age>30")
        filter: String,

        /// Target backend (default: from config, else postgres)
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,
    },

    /// Check a filter expression against a resource allow-list
    Check {
        /// Filter expression (e.g., "name==bob;age>30")
        filter: String,

        /// Target backend (default: from config, else postgres)
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,

        /// Resource whose allow-list comes from the config file
        #[arg(short, long)]
        resource: Option<String>,

        /// Allow a field (repeatable, adds to the resource's fields)
        #[arg(short, long, action = clap::ArgAction::Append)]
        allow: Vec<String>,
    },

    /// Validate and compile a filter expression into a query fragment
    #[command(alias = "c")]
    Compile {
        /// Filter expression (e.g., "name==bob;age>30")
        filter: String,

        /// Target backend (default: from config, else postgres)
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,

        /// Resource whose allow-list and columns come from the config file
        #[arg(short, long)]
        resource: Option<String>,

        /// Allow a field (repeatable, adds to the resource's fields)
        #[arg(short, long, action = clap::ArgAction::Append)]
        allow: Vec<String>,

        /// Map a field to a column as FIELD=COLUMN (repeatable)
        #[arg(long, action = clap::ArgAction::Append, value_parser = parse_column)]
        column: Vec<(String, String)>,

        /// Override the dialect's compile mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Remove an operator from the dialect's table (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        deny: Vec<String>,
    },

    /// List the operators a dialect understands
    #[command(alias = "ops")]
    Operators {
        /// Target backend (default: from config, else postgres)
        #[arg(short, long, value_enum)]
        dialect: Option<DialectArg>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Query backends
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialectArg {
    /// ArangoDB AQL
    Aql,
    /// PostgreSQL
    Postgres,
}

impl DialectArg {
    /// Returns the dialect name understood by `Dialect::by_name`.
    pub fn name(self) -> &'static str {
        match self {
            DialectArg::Aql => "aql",
            DialectArg::Postgres => "postgres",
        }
    }
}

/// Compile modes
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Literals written into the fragment
    Inline,
    /// Positional placeholders with bind values
    Placeholder,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write a default config file if none exists
    Init,

    /// Print config file path
    Path,
}

/// Parses a `FIELD=COLUMN` pair.
fn parse_column(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, column)) if !field.is_empty() && !column.is_empty() => {
            Ok((field.to_string(), column.to_string()))
        }
        _ => Err(format!("expected FIELD=COLUMN, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command() {
        let cli = Cli::try_parse_from(["afq", "parse", "name==bob", "--dialect", "aql"]).unwrap();
        match cli.command {
            Commands::Parse { filter, dialect } => {
                assert_eq!(filter, "name==bob");
                assert_eq!(dialect, Some(DialectArg::Aql));
            }
            other => panic!("Expected Parse command, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_command_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "afq",
            "--json",
            "compile",
            "name==bob;age>30",
            "--allow",
            "name",
            "-a",
            "age",
            "--column",
            "name=full_name",
            "--mode",
            "inline",
            "--deny",
            "~",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Compile {
                allow,
                column,
                mode,
                deny,
                resource,
                ..
            } => {
                assert_eq!(allow, vec!["name", "age"]);
                assert_eq!(column, vec![("name".to_string(), "full_name".to_string())]);
                assert_eq!(mode, Some(ModeArg::Inline));
                assert_eq!(deny, vec!["~"]);
                assert!(resource.is_none());
            }
            other => panic!("Expected Compile command, got {:?}", other),
        }
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from(["afq", "check", "a==1", "-r", "gene", "-a", "b"]).unwrap();
        match cli.command {
            Commands::Check {
                filter,
                resource,
                allow,
                dialect,
            } => {
                assert_eq!(filter, "a==1");
                assert_eq!(resource.as_deref(), Some("gene"));
                assert_eq!(allow, vec!["b"]);
                assert!(dialect.is_none());
            }
            other => panic!("Expected Check command, got {:?}", other),
        }
    }

    #[test]
    fn test_column_requires_pair() {
        assert!(parse_column("name").is_err());
        assert!(parse_column("=col").is_err());
        assert!(parse_column("name=").is_err());
        assert_eq!(
            parse_column("a=b").unwrap(),
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["afq", "-q", "-v", "operators"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["afq", "operators", "--json", "--no-color"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["afq", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: Some(ConfigCommands::Path)
            }
        ));
    }
}
