use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use tracing::{debug, error};

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

/// Branch a head branch is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseRef {
    /// The base branch of the pull request being evaluated.
    PullRequestBase,
    Branch(String),
}

impl BaseRef {
    fn resolve<'a>(&'a self, pr: &'a PullRequest) -> &'a str {
        match self {
            BaseRef::PullRequestBase => &pr.base_branch,
            BaseRef::Branch(name) => name,
        }
    }
}

/// The head branch contains every commit of a base branch.
pub struct UpToDateWith {
    gh: Arc<dyn GitHubClient>,
    base: BaseRef,
}

impl UpToDateWith {
    pub fn new(gh: Arc<dyn GitHubClient>, base: BaseRef) -> Self {
        Self { gh, base }
    }
}

impl Requirement for UpToDateWith {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let base = self.base.resolve(pr);
        let head = &pr.head_branch;

        match self.gh.compare_branches(base, head) {
            Ok(comparison) if comparison.is_up_to_date() => add_status_node(
                true,
                format!("Head branch ({}) is up to date with ({})", head, base),
                details,
            ),
            Ok(comparison) => {
                debug!("Head branch {} is {} commits behind {}", head, comparison.behind_by, base);
                add_status_node(
                    false,
                    format!(
                        "Head branch ({}) is behind ({}) by {} commit(s)",
                        head, base, comparison.behind_by
                    ),
                    details,
                )
            }
            Err(e) => {
                error!("Unable to compare {} with {}: {}", head, base, e);
                add_status_node(
                    false,
                    format!("Unable to check if head branch ({}) is up to date with ({})", head, base),
                    details,
                )
            }
        }
    }
}
