//! GitHub client trait.

use crate::error::GitHubResult;
use crate::models::{BranchComparison, Review};

/// Blocking access to the GitHub API.
///
/// Queries are read-only. The write methods exist for requirements that
/// remediate a pull request (requesting reviews, labelling, assigning).
/// Every method can fail; callers in the policy engine treat failures as
/// a negative outcome rather than aborting the evaluation.
pub trait GitHubClient: Send + Sync {
    /// List the logins of all members of a team.
    fn list_team_members(&self, team: &str) -> GitHubResult<Vec<String>>;

    /// List the paths of all files changed by a pull request.
    fn list_changed_files(&self, pr: u64) -> GitHubResult<Vec<String>>;

    /// Compare `head` against `base`.
    fn compare_branches(&self, base: &str, head: &str) -> GitHubResult<BranchComparison>;

    /// List submitted reviews in chronological order.
    fn list_reviews(&self, pr: u64) -> GitHubResult<Vec<Review>>;

    /// Request reviews from users and/or teams.
    fn request_reviewers(&self, pr: u64, users: &[String], teams: &[String]) -> GitHubResult<()>;

    /// Add labels to a pull request.
    fn add_labels(&self, pr: u64, labels: &[String]) -> GitHubResult<()>;

    /// Assign users to a pull request.
    fn add_assignees(&self, pr: u64, users: &[String]) -> GitHubResult<()>;
}
