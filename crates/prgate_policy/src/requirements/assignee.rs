use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use tracing::{error, info};

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

/// A user is assigned to the pull request, assigning them when missing.
pub struct Assignee {
    gh: Arc<dyn GitHubClient>,
    user: String,
}

impl Assignee {
    pub fn new(gh: Arc<dyn GitHubClient>, user: impl Into<String>) -> Self {
        Self {
            gh,
            user: user.into(),
        }
    }
}

impl Requirement for Assignee {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("This user is assigned to pull request: {}", self.user);

        if pr.is_assigned(&self.user) {
            return add_status_node(true, label, details);
        }

        info!("Assigning {} to pull request #{}", self.user, pr.number);
        match self.gh.add_assignees(pr.number, &[self.user.clone()]) {
            Ok(()) => add_status_node(true, label, details),
            Err(e) => {
                error!("Unable to assign {} to pull request #{}: {}", self.user, pr.number, e);
                add_status_node(false, label, details)
            }
        }
    }
}
