mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::io;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;
use tally_client::ClientError;

const LOG_ENV_VAR: &str = "TALLY_LOG";

const ROOT_HELP: &str = "Tally - ask plain-English questions about your transactions

Usage:
  tally <command>

Start here:
  tally import <path>              Load transactions from a CSV file
  tally items                      List the item names queries can match
  tally query \"sales last month\"   Ask a question

Run `tally <command> --help` for command usage.
";

fn main() -> ExitCode {
    init_logging();
    let raw_args = std::env::args().collect::<Vec<String>>();
    run(&raw_args)
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(raw_args: &[String]) -> ExitCode {
    if raw_args.len() == 1 || is_top_level_help_request(raw_args) {
        return exit_after_write(write_stdout_text(ROOT_HELP), ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse_from(raw_args) {
        Ok(value) => value,
        Err(err) if is_informational(err.kind()) => {
            return exit_after_write(write_stdout_text(&err.to_string()), ExitCode::SUCCESS);
        }
        Err(err) => {
            let parse_error = ClientError::invalid_argument_for_command(
                &strip_clap_boilerplate(&err.to_string()),
                command_from_args(raw_args),
            );
            let mode = requested_output_mode(raw_args);
            return exit_after_write(output::print_failure(&parse_error, mode), ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => exit_after_write(output::print_success(&success, mode), ExitCode::SUCCESS),
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            let code = if error.is_internal() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            };
            exit_after_write(output::print_failure(&error, mode), code)
        }
    }
}

/// A failed stdout write overrides the command's own exit code.
fn exit_after_write(written: io::Result<()>, code: ExitCode) -> ExitCode {
    match written {
        Ok(()) => code,
        Err(_) => ExitCode::from(2),
    }
}

fn is_informational(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Cuts clap's trailing usage and "For more information" lines; recovery
/// steps carry that guidance instead.
fn strip_clap_boilerplate(message: &str) -> String {
    let cut = ["\n\nUsage:", "\nFor more information"]
        .iter()
        .filter_map(|marker| message.find(marker))
        .min()
        .unwrap_or(message.len());
    message[..cut].trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    match raw_args.get(1).map(String::as_str) {
        Some("query") => Some("query"),
        Some("items") => Some("items"),
        Some("import") => Some("import"),
        _ => None,
    }
}

fn requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        output::OutputMode::Json
    } else {
        output::OutputMode::Text
    }
}
