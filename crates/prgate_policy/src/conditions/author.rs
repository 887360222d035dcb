use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use tracing::error;

use super::Condition;
use crate::status::{add_status_node, StatusNode};

/// The pull request was opened by a given user.
pub struct Author {
    user: String,
}

impl Author {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

impl Condition for Author {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            pr.author == self.user,
            format!("Pull request author is user: {}", self.user),
            details,
        )
    }
}

/// The pull request author belongs to a team.
pub struct AuthorInTeam {
    gh: Arc<dyn GitHubClient>,
    team: String,
}

impl AuthorInTeam {
    pub fn new(gh: Arc<dyn GitHubClient>, team: impl Into<String>) -> Self {
        Self {
            gh,
            team: team.into(),
        }
    }
}

impl Condition for AuthorInTeam {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("Pull request author is a member of the team: {}", self.team);

        match self.gh.list_team_members(&self.team) {
            Ok(members) => add_status_node(members.iter().any(|m| *m == pr.author), label, details),
            Err(e) => {
                error!("Unable to check if author is in team {}: {}", self.team, e);
                add_status_node(false, label, details)
            }
        }
    }
}
