use std::collections::HashMap;
use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest, Review, ReviewState};
use tracing::{debug, error, info};

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

const REQUEST_FAILED: &str = "(review request failed)";

/// Latest deciding review state per reviewer.
///
/// Comments and pending reviews do not change a previous decision; a later
/// approval or change request replaces an earlier one.
fn latest_states(reviews: &[Review]) -> HashMap<&str, ReviewState> {
    let mut latest = HashMap::new();
    for review in reviews {
        match review.state {
            ReviewState::Commented | ReviewState::Pending => continue,
            state => {
                latest.insert(review.user.as_str(), state);
            }
        }
    }
    latest
}

/// A given user approved the pull request.
///
/// When the review is missing and has not been requested yet, it is requested.
pub struct ReviewByUser {
    gh: Arc<dyn GitHubClient>,
    user: String,
}

impl ReviewByUser {
    pub fn new(gh: Arc<dyn GitHubClient>, user: impl Into<String>) -> Self {
        Self {
            gh,
            user: user.into(),
        }
    }

    /// Returns false when the request was needed and failed.
    fn request_review(&self, pr: &PullRequest) -> bool {
        if pr.author == self.user || pr.requested_reviewers.contains(&self.user) {
            return true;
        }
        info!("Requesting review from user {} on pull request #{}", self.user, pr.number);
        match self.gh.request_reviewers(pr.number, &[self.user.clone()], &[]) {
            Ok(()) => true,
            Err(e) => {
                error!("Unable to request review from user {}: {}", self.user, e);
                false
            }
        }
    }
}

impl Requirement for ReviewByUser {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("This user approved pull request: {}", self.user);

        let reviews = match self.gh.list_reviews(pr.number) {
            Ok(reviews) => reviews,
            Err(e) => {
                error!("Unable to list reviews of pull request #{}: {}", pr.number, e);
                return add_status_node(false, label, details);
            }
        };

        if latest_states(&reviews).get(self.user.as_str()) == Some(&ReviewState::Approved) {
            return add_status_node(true, label, details);
        }

        if self.request_review(pr) {
            add_status_node(false, label, details)
        } else {
            add_status_node(false, format!("{} {}", label, REQUEST_FAILED), details)
        }
    }
}

/// At least `count` members of a team approved the pull request.
///
/// When approvals are missing and the team review has not been requested
/// yet, it is requested.
pub struct ReviewByTeamMembers {
    gh: Arc<dyn GitHubClient>,
    team: String,
    count: usize,
}

impl ReviewByTeamMembers {
    pub fn new(gh: Arc<dyn GitHubClient>, team: impl Into<String>, count: usize) -> Self {
        Self {
            gh,
            team: team.into(),
            count,
        }
    }

    /// Returns false when the request was needed and failed.
    fn request_review(&self, pr: &PullRequest) -> bool {
        if pr.requested_teams.contains(&self.team) {
            return true;
        }
        info!("Requesting review from team {} on pull request #{}", self.team, pr.number);
        match self.gh.request_reviewers(pr.number, &[], &[self.team.clone()]) {
            Ok(()) => true,
            Err(e) => {
                error!("Unable to request review from team {}: {}", self.team, e);
                false
            }
        }
    }
}

impl Requirement for ReviewByTeamMembers {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!(
            "At least {} user(s) of the team {} approved pull request",
            self.count, self.team
        );

        let members = match self.gh.list_team_members(&self.team) {
            Ok(members) => members,
            Err(e) => {
                error!("Unable to list members of team {}: {}", self.team, e);
                return add_status_node(false, label, details);
            }
        };

        let reviews = match self.gh.list_reviews(pr.number) {
            Ok(reviews) => reviews,
            Err(e) => {
                error!("Unable to list reviews of pull request #{}: {}", pr.number, e);
                return add_status_node(false, label, details);
            }
        };

        let approvals = latest_states(&reviews)
            .into_iter()
            .filter(|(user, state)| {
                *state == ReviewState::Approved && members.iter().any(|m| m == user)
            })
            .count();
        debug!(
            "Pull request #{} has {}/{} approvals from team {}",
            pr.number, approvals, self.count, self.team
        );

        let satisfied = approvals >= self.count;
        let mut label = format!("{} ({}/{})", label, approvals, self.count);
        if !satisfied && !self.request_review(pr) {
            label = format!("{} {}", label, REQUEST_FAILED);
        }
        add_status_node(satisfied, label, details)
    }
}
