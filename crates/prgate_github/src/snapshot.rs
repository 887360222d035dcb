//! Recorded pull request state.
//!
//! A snapshot captures everything the policy engine may ask GitHub about a
//! single pull request. It is loaded from YAML or JSON and served through
//! [`SnapshotGitHub`], which never talks to the network: writes are logged
//! and recorded as pending actions instead of being performed.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::GitHubClient;
use crate::error::{GitHubError, GitHubResult};
use crate::models::{BranchComparison, PullRequest, Review};

/// Key under which a comparison of `head` against `base` is stored.
pub fn comparison_key(base: &str, head: &str) -> String {
    format!("{}...{}", base, head)
}

/// Recorded state of one pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub pull_request: PullRequest,
    #[serde(default)]
    pub changed_files: Vec<String>,
    /// Team name to member logins
    #[serde(default)]
    pub teams: HashMap<String, Vec<String>>,
    /// Reviews in chronological order
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Comparisons keyed by `base...head`
    #[serde(default)]
    pub comparisons: HashMap<String, BranchComparison>,
    /// Manual check description to the login that ticked its checkbox
    #[serde(default)]
    pub approvals: HashMap<String, String>,
}

impl Snapshot {
    pub fn new(pull_request: PullRequest) -> Self {
        Self {
            pull_request,
            changed_files: Vec::new(),
            teams: HashMap::new(),
            reviews: Vec::new(),
            comparisons: HashMap::new(),
            approvals: HashMap::new(),
        }
    }

    /// Load a snapshot from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file(path: &Path) -> GitHubResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            other => Err(GitHubError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Parse a snapshot from YAML string.
    pub fn from_yaml(yaml: &str) -> GitHubResult<Self> {
        serde_yaml::from_str(yaml).map_err(GitHubError::from)
    }

    /// Parse a snapshot from JSON string.
    pub fn from_json(json: &str) -> GitHubResult<Self> {
        serde_json::from_str(json).map_err(GitHubError::from)
    }

    /// Serialize the snapshot to YAML.
    pub fn to_yaml(&self) -> GitHubResult<String> {
        serde_yaml::to_string(self).map_err(GitHubError::from)
    }
}

/// GitHub client backed by a [`Snapshot`].
pub struct SnapshotGitHub {
    snapshot: Snapshot,
    pending_actions: Mutex<Vec<String>>,
}

impl SnapshotGitHub {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            pending_actions: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Writes requested during evaluation, in call order.
    pub fn pending_actions(&self) -> Vec<String> {
        self.pending_actions.lock().clone()
    }

    fn record_action(&self, action: String) {
        info!("Dry run: {}", action);
        self.pending_actions.lock().push(action);
    }

    fn check_pull_request(&self, pr: u64) -> GitHubResult<()> {
        if pr != self.snapshot.pull_request.number {
            return Err(GitHubError::NotFound(format!("pull request #{}", pr)));
        }
        Ok(())
    }
}

impl GitHubClient for SnapshotGitHub {
    fn list_team_members(&self, team: &str) -> GitHubResult<Vec<String>> {
        debug!("Listing members of team {}", team);
        self.snapshot
            .teams
            .get(team)
            .cloned()
            .ok_or_else(|| GitHubError::TeamNotFound(team.to_string()))
    }

    fn list_changed_files(&self, pr: u64) -> GitHubResult<Vec<String>> {
        self.check_pull_request(pr)?;
        Ok(self.snapshot.changed_files.clone())
    }

    fn compare_branches(&self, base: &str, head: &str) -> GitHubResult<BranchComparison> {
        let key = comparison_key(base, head);
        self.snapshot
            .comparisons
            .get(&key)
            .copied()
            .ok_or_else(|| GitHubError::NotFound(format!("comparison {}", key)))
    }

    fn list_reviews(&self, pr: u64) -> GitHubResult<Vec<Review>> {
        self.check_pull_request(pr)?;
        Ok(self.snapshot.reviews.clone())
    }

    fn request_reviewers(&self, pr: u64, users: &[String], teams: &[String]) -> GitHubResult<()> {
        self.check_pull_request(pr)?;
        if !users.is_empty() {
            self.record_action(format!("request review from {} on #{}", users.join(", "), pr));
        }
        if !teams.is_empty() {
            self.record_action(format!("request review from team {} on #{}", teams.join(", "), pr));
        }
        Ok(())
    }

    fn add_labels(&self, pr: u64, labels: &[String]) -> GitHubResult<()> {
        self.check_pull_request(pr)?;
        self.record_action(format!("add label {} to #{}", labels.join(", "), pr));
        Ok(())
    }

    fn add_assignees(&self, pr: u64, users: &[String]) -> GitHubResult<()> {
        self.check_pull_request(pr)?;
        self.record_action(format!("assign {} to #{}", users.join(", "), pr));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT_YAML: &str = r#"
pull_request:
  number: 12
  author: alice
  base_branch: master
  head_branch: feature/docs
  labels: [docs]
changed_files:
  - docs/readme.md
teams:
  devops: [bob]
comparisons:
  "master...feature/docs":
    ahead_by: 2
    behind_by: 1
approvals:
  "Determine if infra needs to be updated before merging": bob
"#;

    #[test]
    fn test_snapshot_from_yaml() {
        let snapshot = Snapshot::from_yaml(SNAPSHOT_YAML).unwrap();

        assert_eq!(snapshot.pull_request.number, 12);
        assert!(!snapshot.pull_request.maintainer_can_modify);
        assert_eq!(snapshot.changed_files, vec!["docs/readme.md"]);
        assert!(snapshot.reviews.is_empty());
        assert_eq!(snapshot.approvals.len(), 1);
    }

    #[test]
    fn test_snapshot_client_queries() {
        let gh = SnapshotGitHub::new(Snapshot::from_yaml(SNAPSHOT_YAML).unwrap());

        assert_eq!(gh.list_team_members("devops").unwrap(), vec!["bob"]);
        assert!(gh.list_team_members("unknown").is_err());
        assert_eq!(
            gh.compare_branches("master", "feature/docs").unwrap(),
            BranchComparison::new(2, 1)
        );
        assert!(gh.list_changed_files(99).is_err());
    }

    #[test]
    fn test_snapshot_client_records_writes() {
        let gh = SnapshotGitHub::new(Snapshot::from_yaml(SNAPSHOT_YAML).unwrap());

        gh.add_labels(12, &["needs-infra".to_string()]).unwrap();
        gh.request_reviewers(12, &[], &["devops".to_string()]).unwrap();

        assert_eq!(
            gh.pending_actions(),
            vec![
                "add label needs-infra to #12".to_string(),
                "request review from team devops on #12".to_string(),
            ]
        );
    }
}
