//! Rules command - List the configured checks.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use prgate_github::{GitHubClient, PullRequest, Snapshot, SnapshotGitHub};
use prgate_policy::default_registry;

use super::OutputFormat;

#[derive(Args)]
pub struct RulesArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn execute(args: RulesArgs) -> Result<()> {
    // Building the registry only captures the client; nothing is queried.
    let gh: Arc<dyn GitHubClient> =
        Arc::new(SnapshotGitHub::new(Snapshot::new(PullRequest::default())));
    let registry = default_registry(gh).context("Invalid policy configuration")?;

    match args.format {
        OutputFormat::Json => {
            let automatic: Vec<_> = registry
                .automatic()
                .iter()
                .map(|check| json!({ "description": check.description }))
                .collect();
            let manual: Vec<_> = registry
                .manual()
                .iter()
                .map(|check| json!({ "description": check.description, "teams": check.teams }))
                .collect();
            let output = json!({ "automatic": automatic, "manual": manual });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize rules")?
            );
        }
        OutputFormat::Text => {
            println!("Automatic checks:");
            for check in registry.automatic() {
                println!("  - {}", check.description);
            }
            println!();
            println!("Manual checks:");
            for check in registry.manual() {
                if check.teams.is_empty() {
                    println!("  - {}", check.description);
                } else {
                    println!("  - {} (teams: {})", check.description, check.teams.join(", "));
                }
            }
        }
    }

    Ok(())
}
