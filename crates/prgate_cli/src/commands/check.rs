//! Check command - Evaluate every check against a pull request.
//!
//! The pull request state is read from a snapshot file. Writes requested by
//! requirements (review requests, labels, assignees) are not performed; they
//! are listed after the report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use prgate_github::{GitHubClient, Snapshot, SnapshotGitHub};
use prgate_policy::{default_registry, ManualApprovals, PolicyEngine};

use super::OutputFormat;

#[derive(Args)]
pub struct CheckArgs {
    /// Pull request snapshot (.yaml, .yml or .json)
    #[arg(short, long, env = "PRGATE_SNAPSHOT")]
    snapshot: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Returns whether the pull request satisfies every applicable check.
pub fn execute(args: CheckArgs) -> Result<bool> {
    info!("Loading pull request snapshot: {:?}", args.snapshot);

    let snapshot = Snapshot::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {:?}", args.snapshot))?;
    let client = Arc::new(SnapshotGitHub::new(snapshot));
    let gh: Arc<dyn GitHubClient> = client.clone();
    let pr = &client.snapshot().pull_request;
    let approvals = ManualApprovals::from(client.snapshot().approvals.clone());

    let registry = default_registry(Arc::clone(&gh)).context("Invalid policy configuration")?;
    let engine = PolicyEngine::new(registry, gh);
    info!(
        "Evaluating {} checks against pull request #{}",
        engine.registry().len(),
        pr.number
    );
    let evaluation = engine.evaluate(pr, &approvals);

    match args.format {
        OutputFormat::Json => {
            let json = evaluation.to_json().context("Failed to serialize evaluation")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", evaluation.report());
            println!();
            println!("Commit status: {:?}", evaluation.commit_state());

            let actions = client.pending_actions();
            if !actions.is_empty() {
                println!();
                println!("Actions not performed (dry run):");
                for action in actions {
                    println!("  - {}", action);
                }
            }
        }
    }

    Ok(evaluation.passed)
}
