//! prgate CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Pull request does not satisfy its policies
//! - 4: Invalid policy configuration

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use prgate_github::GitHubError;
use prgate_policy::PolicyError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const POLICY_FAILURE: u8 = 3;
    pub const CONFIG_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Rules(args) => commands::rules::execute(args).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::from(ExitCodes::SUCCESS),
        Ok(false) => ExitCode::from(ExitCodes::POLICY_FAILURE),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Logs go to stderr so that JSON output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [
        format!("prgate_cli={}", level),
        format!("prgate_policy={}", level),
        format!("prgate_github={}", level),
        "warn".to_string(),
    ] {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.is::<PolicyError>()) {
        ExitCodes::CONFIG_ERROR
    } else if e.chain().any(|cause| cause.is::<GitHubError>()) {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_policy_error() {
        let result: Result<(), PolicyError> =
            Err(PolicyError::DuplicateManualCheck("A".to_string()));
        let err = result.context("Invalid policy configuration").unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::CONFIG_ERROR);
    }

    #[test]
    fn test_categorize_snapshot_error() {
        let result: Result<(), GitHubError> =
            Err(GitHubError::UnsupportedFormat("toml".to_string()));
        let err = result.context("Failed to load snapshot").unwrap_err();
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_other_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(categorize_error(&err), ExitCodes::GENERAL_ERROR);
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["prgate", "-v", "check", "--snapshot", "pr.yaml"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
