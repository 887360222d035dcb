//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod check;
pub mod rules;

/// prgate - merge-gating policies for pull requests
#[derive(Parser)]
#[command(name = "prgate")]
#[command(version, about = "prgate - merge-gating policies for pull requests")]
#[command(long_about = r#"
prgate evaluates the bot's automatic and manual checks against a pull request
and explains, as a tree, why each check passed or failed.

COMMANDS:
  check   → Evaluate every check against a recorded pull request
  rules   → List the configured checks

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Pull request does not satisfy its policies
  4 - Invalid policy configuration
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Set logging level to debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the checks against a pull request snapshot
    Check(check::CheckArgs),

    /// List the configured checks
    Rules(rules::RulesArgs),
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
