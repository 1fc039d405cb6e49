use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::check::CheckOptions;
use commands::compile::CompileOptions;
use commands::parse::ParseOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("{error_json}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Parse { filter, dialect } => {
            let opts = ParseOptions {
                filter: filter.clone(),
                dialect: *dialect,
            };
            commands::parse::execute(&ctx, &opts)
        }
        Commands::Check {
            filter,
            dialect,
            resource,
            allow,
        } => {
            let opts = CheckOptions {
                filter: filter.clone(),
                dialect: *dialect,
                resource: resource.clone(),
                allow: allow.clone(),
            };
            commands::check::execute(&ctx, &opts)
        }
        Commands::Compile {
            filter,
            dialect,
            resource,
            allow,
            column,
            mode,
            deny,
        } => {
            let opts = CompileOptions {
                filter: filter.clone(),
                dialect: *dialect,
                resource: resource.clone(),
                allow: allow.clone(),
                columns: column.clone(),
                mode: *mode,
                deny: deny.clone(),
            };
            commands::compile::execute(&ctx, &opts)
        }
        Commands::Operators { dialect } => commands::operators::execute(&ctx, *dialect),
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Init) => commands::config::execute_init(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
        },
        Commands::Completions { shell } => {
            commands::completions::execute(shell)?;
            Ok(())
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(err) => err.code(),
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
