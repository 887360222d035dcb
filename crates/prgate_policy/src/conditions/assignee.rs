use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use tracing::error;

use super::Condition;
use crate::status::{add_status_node, StatusNode};

/// A given user is assigned to the pull request.
pub struct Assignee {
    user: String,
}

impl Assignee {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

impl Condition for Assignee {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            pr.is_assigned(&self.user),
            format!("This user is assigned to the pull request: {}", self.user),
            details,
        )
    }
}

/// At least one assignee belongs to a team.
pub struct AssigneeInTeam {
    gh: Arc<dyn GitHubClient>,
    team: String,
}

impl AssigneeInTeam {
    pub fn new(gh: Arc<dyn GitHubClient>, team: impl Into<String>) -> Self {
        Self {
            gh,
            team: team.into(),
        }
    }
}

impl Condition for AssigneeInTeam {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("A member of this team is assigned to the pull request: {}", self.team);

        match self.gh.list_team_members(&self.team) {
            Ok(members) => add_status_node(
                members.iter().any(|m| pr.is_assigned(m)),
                label,
                details,
            ),
            Err(e) => {
                error!("Unable to check if assignees are in team {}: {}", self.team, e);
                add_status_node(false, label, details)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::test_support::evaluate;
    use prgate_github::MockGitHub;

    #[test]
    fn test_assignee() {
        let pr = PullRequest::new(1, "alice").with_assignee("bob");

        assert!(evaluate(&Assignee::new("bob"), &pr).0);
        assert!(!evaluate(&Assignee::new("alice"), &pr).0);
    }

    #[test]
    fn test_assignee_in_team() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new().with_team("devops", &["bob"]));

        let assigned = PullRequest::new(1, "alice").with_assignee("carol").with_assignee("bob");
        assert!(evaluate(&AssigneeInTeam::new(Arc::clone(&gh), "devops"), &assigned).0);

        let unassigned = PullRequest::new(2, "alice");
        assert!(!evaluate(&AssigneeInTeam::new(gh, "devops"), &unassigned).0);
    }
}
