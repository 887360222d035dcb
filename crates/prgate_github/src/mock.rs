//! Mock GitHub client for testing.
//!
//! Provides a configurable implementation of the GitHubClient trait that
//! serves canned data, can be told to fail per method, and captures every
//! call so tests can verify which queries and writes were issued.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::client::GitHubClient;
use crate::error::{GitHubError, GitHubResult};
use crate::models::{BranchComparison, Review};

/// Captured call information for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCall {
    pub method: String,
    pub pr: Option<u64>,
    pub args: Vec<String>,
}

impl CapturedCall {
    fn new(method: &str, pr: Option<u64>, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            pr,
            args,
        }
    }
}

/// Mock GitHub client for testing.
///
/// Unknown teams yield `TeamNotFound`, unknown comparisons yield `NotFound`,
/// and pull requests without configured files or reviews yield empty lists.
#[derive(Clone, Default)]
pub struct MockGitHub {
    /// Team name to member logins.
    teams: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Changed files per pull request.
    changed_files: Arc<RwLock<HashMap<u64, Vec<String>>>>,
    /// Comparisons keyed by (base, head).
    comparisons: Arc<RwLock<HashMap<(String, String), BranchComparison>>>,
    /// Reviews per pull request.
    reviews: Arc<RwLock<HashMap<u64, Vec<Review>>>>,
    /// Method name to simulated error message.
    failures: Arc<RwLock<HashMap<String, String>>>,
    /// Captured calls for verification.
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
}

impl MockGitHub {
    /// Create a new mock client with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team and its members.
    pub fn with_team(self, team: impl Into<String>, members: &[&str]) -> Self {
        self.teams
            .write()
            .insert(team.into(), members.iter().map(|m| m.to_string()).collect());
        self
    }

    /// Set the changed files of a pull request.
    pub fn with_changed_files(self, pr: u64, files: &[&str]) -> Self {
        self.changed_files
            .write()
            .insert(pr, files.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Set the comparison result of `head` against `base`.
    pub fn with_comparison(
        self,
        base: impl Into<String>,
        head: impl Into<String>,
        comparison: BranchComparison,
    ) -> Self {
        self.comparisons
            .write()
            .insert((base.into(), head.into()), comparison);
        self
    }

    /// Append a review to a pull request.
    pub fn with_review(self, pr: u64, review: Review) -> Self {
        self.reviews.write().entry(pr).or_default().push(review);
        self
    }

    /// Make every call to `method` fail with `RequestFailed(message)`.
    pub fn simulate_failure(self, method: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.write().insert(method.into(), message.into());
        self
    }

    /// Clear all captured calls.
    pub fn clear_calls(&self) {
        self.captured_calls.write().clear();
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Check if a specific method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.captured_calls.read().iter().any(|c| c.method == method)
    }

    /// Get calls to a specific method.
    pub fn get_method_calls(&self, method: &str) -> Vec<CapturedCall> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    fn record_call(&self, call: CapturedCall) {
        self.captured_calls.write().push(call);
    }

    fn check_failure(&self, method: &str) -> GitHubResult<()> {
        if let Some(msg) = self.failures.read().get(method) {
            return Err(GitHubError::RequestFailed(msg.clone()));
        }
        Ok(())
    }
}

impl GitHubClient for MockGitHub {
    fn list_team_members(&self, team: &str) -> GitHubResult<Vec<String>> {
        self.record_call(CapturedCall::new("list_team_members", None, vec![team.to_string()]));
        self.check_failure("list_team_members")?;
        self.teams
            .read()
            .get(team)
            .cloned()
            .ok_or_else(|| GitHubError::TeamNotFound(team.to_string()))
    }

    fn list_changed_files(&self, pr: u64) -> GitHubResult<Vec<String>> {
        self.record_call(CapturedCall::new("list_changed_files", Some(pr), Vec::new()));
        self.check_failure("list_changed_files")?;
        Ok(self.changed_files.read().get(&pr).cloned().unwrap_or_default())
    }

    fn compare_branches(&self, base: &str, head: &str) -> GitHubResult<BranchComparison> {
        self.record_call(CapturedCall::new(
            "compare_branches",
            None,
            vec![base.to_string(), head.to_string()],
        ));
        self.check_failure("compare_branches")?;
        self.comparisons
            .read()
            .get(&(base.to_string(), head.to_string()))
            .copied()
            .ok_or_else(|| GitHubError::NotFound(format!("comparison {}...{}", base, head)))
    }

    fn list_reviews(&self, pr: u64) -> GitHubResult<Vec<Review>> {
        self.record_call(CapturedCall::new("list_reviews", Some(pr), Vec::new()));
        self.check_failure("list_reviews")?;
        Ok(self.reviews.read().get(&pr).cloned().unwrap_or_default())
    }

    fn request_reviewers(&self, pr: u64, users: &[String], teams: &[String]) -> GitHubResult<()> {
        let args = users
            .iter()
            .cloned()
            .chain(teams.iter().map(|t| format!("team:{}", t)))
            .collect();
        self.record_call(CapturedCall::new("request_reviewers", Some(pr), args));
        self.check_failure("request_reviewers")
    }

    fn add_labels(&self, pr: u64, labels: &[String]) -> GitHubResult<()> {
        self.record_call(CapturedCall::new("add_labels", Some(pr), labels.to_vec()));
        self.check_failure("add_labels")
    }

    fn add_assignees(&self, pr: u64, users: &[String]) -> GitHubResult<()> {
        self.record_call(CapturedCall::new("add_assignees", Some(pr), users.to_vec()));
        self.check_failure("add_assignees")
    }
}
