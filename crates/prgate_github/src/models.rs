//! Pull request models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The state of a pull request as seen by the policy engine.
///
/// Changed files, reviews and branch comparisons are not part of the model;
/// they are fetched on demand through a [`GitHubClient`](crate::GitHubClient).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Login of the author
    pub author: String,
    /// Branch the pull request merges into
    pub base_branch: String,
    /// Branch the pull request merges from
    pub head_branch: String,
    /// Whether the pull request is a draft
    #[serde(default)]
    pub draft: bool,
    /// Labels currently applied
    #[serde(default)]
    pub labels: Vec<String>,
    /// Logins of assigned users
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Users whose review has been requested
    #[serde(default)]
    pub requested_reviewers: Vec<String>,
    /// Teams whose review has been requested
    #[serde(default)]
    pub requested_teams: Vec<String>,
    /// Whether maintainers are allowed to push to the head branch
    #[serde(default)]
    pub maintainer_can_modify: bool,
}

impl PullRequest {
    pub fn new(number: u64, author: impl Into<String>) -> Self {
        Self {
            number,
            author: author.into(),
            base_branch: "master".to_string(),
            head_branch: format!("pr-{}", number),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_base_branch(mut self, branch: impl Into<String>) -> Self {
        self.base_branch = branch.into();
        self
    }

    pub fn with_head_branch(mut self, branch: impl Into<String>) -> Self {
        self.head_branch = branch.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_assignee(mut self, user: impl Into<String>) -> Self {
        self.assignees.push(user.into());
        self
    }

    pub fn with_requested_reviewer(mut self, user: impl Into<String>) -> Self {
        self.requested_reviewers.push(user.into());
        self
    }

    pub fn with_requested_team(mut self, team: impl Into<String>) -> Self {
        self.requested_teams.push(team.into());
        self
    }

    pub fn with_maintainer_can_modify(mut self, allowed: bool) -> Self {
        self.maintainer_can_modify = allowed;
        self
    }

    /// Mark as draft.
    pub fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_assigned(&self, user: &str) -> bool {
        self.assignees.iter().any(|a| a == user)
    }
}

/// State of a submitted review.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

/// A review left on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewer
    pub user: String,
    pub state: ReviewState,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(user: impl Into<String>, state: ReviewState) -> Self {
        Self {
            user: user.into(),
            state,
            submitted_at: None,
        }
    }

    pub fn approved(user: impl Into<String>) -> Self {
        Self::new(user, ReviewState::Approved)
    }

    pub fn changes_requested(user: impl Into<String>) -> Self {
        Self::new(user, ReviewState::ChangesRequested)
    }

    pub fn commented(user: impl Into<String>) -> Self {
        Self::new(user, ReviewState::Commented)
    }
}

/// Result of comparing a head branch against a base.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchComparison {
    /// Commits on head that are not on base
    pub ahead_by: u32,
    /// Commits on base that are not on head
    pub behind_by: u32,
}

impl BranchComparison {
    pub fn new(ahead_by: u32, behind_by: u32) -> Self {
        Self { ahead_by, behind_by }
    }

    /// Head contains every commit of base.
    pub fn is_up_to_date(&self) -> bool {
        self.behind_by == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_builder() {
        let pr = PullRequest::new(42, "alice")
            .with_title("Fix crash on startup")
            .with_base_branch("main")
            .with_label("bug")
            .with_assignee("bob")
            .draft();

        assert_eq!(pr.number, 42);
        assert_eq!(pr.author, "alice");
        assert_eq!(pr.title, "Fix crash on startup");
        assert_eq!(pr.base_branch, "main");
        assert_eq!(pr.head_branch, "pr-42");
        assert!(pr.draft);
        assert!(pr.has_label("bug"));
        assert!(!pr.has_label("feature"));
        assert!(pr.is_assigned("bob"));
        assert!(!pr.maintainer_can_modify);
    }

    #[test]
    fn test_review_state_serialization() {
        let json = serde_json::to_string(&ReviewState::ChangesRequested).unwrap();
        assert_eq!(json, "\"CHANGES_REQUESTED\"");
    }

    #[test]
    fn test_branch_comparison() {
        assert!(BranchComparison::new(3, 0).is_up_to_date());
        assert!(!BranchComparison::new(0, 2).is_up_to_date());
    }
}
