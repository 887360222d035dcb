//! Policy evaluation engine.
//!
//! Runs every check of a [`PolicyRegistry`] against one pull request and
//! collects the outcomes, their status trees and the overall verdict.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use prgate_github::{GitHubClient, PullRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PolicyError, PolicyResult};
use crate::registry::{AutomaticCheck, ManualCheck, PolicyRegistry};
use crate::status::{StatusNode, STATUS_FAIL, STATUS_SKIPPED, STATUS_SUCCESS};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Condition held and the check passed
    Satisfied,
    /// Condition held and the requirement was not satisfied
    Failed,
    /// Condition did not hold
    NotApplicable,
    /// Condition held and the manual check is waiting for approval
    Pending,
}

impl RuleStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            RuleStatus::Satisfied => STATUS_SUCCESS,
            RuleStatus::Failed | RuleStatus::Pending => STATUS_FAIL,
            RuleStatus::NotApplicable => STATUS_SKIPPED,
        }
    }

    /// Whether this outcome prevents merging.
    pub fn blocks(&self) -> bool {
        matches!(self, RuleStatus::Failed | RuleStatus::Pending)
    }
}

/// Commit status to publish for the evaluated head.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Success,
    Failure,
    Pending,
}

/// Checkbox state of manual checks, read from the bot comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualApprovals {
    approvals: HashMap<String, String>,
}

impl ManualApprovals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `user` ticked the checkbox of a manual check.
    pub fn approve(mut self, description: impl Into<String>, user: impl Into<String>) -> Self {
        self.approvals.insert(description.into(), user.into());
        self
    }

    pub fn approver(&self, description: &str) -> Option<&str> {
        self.approvals.get(description).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for ManualApprovals {
    fn from(approvals: HashMap<String, String>) -> Self {
        Self { approvals }
    }
}

/// Result of an automatic check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomaticOutcome {
    pub description: String,
    pub status: RuleStatus,
    pub condition: StatusNode,
    /// Absent when the condition did not hold
    #[serde(default)]
    pub requirement: Option<StatusNode>,
}

/// Result of a manual check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOutcome {
    pub description: String,
    pub status: RuleStatus,
    pub condition: StatusNode,
    pub teams: Vec<String>,
    /// Login of the authorized user who approved the check
    #[serde(default)]
    pub approved_by: Option<String>,
}

/// Summary statistics for an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationSummary {
    pub total_checks: usize,
    pub applicable_checks: usize,
    pub satisfied_checks: usize,
    pub failed_checks: usize,
    pub pending_checks: usize,
}

/// Result of evaluating every check against one pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub pr_number: u64,
    #[serde(default)]
    pub title: String,
    /// Whether every applicable check is satisfied
    pub passed: bool,
    pub automatic: Vec<AutomaticOutcome>,
    pub manual: Vec<ManualOutcome>,
    pub summary: EvaluationSummary,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    fn new(pr: &PullRequest, automatic: Vec<AutomaticOutcome>, manual: Vec<ManualOutcome>) -> Self {
        let statuses: Vec<RuleStatus> = automatic
            .iter()
            .map(|o| o.status)
            .chain(manual.iter().map(|o| o.status))
            .collect();
        let count = |status: RuleStatus| statuses.iter().filter(|s| **s == status).count();

        let summary = EvaluationSummary {
            total_checks: statuses.len(),
            applicable_checks: statuses.len() - count(RuleStatus::NotApplicable),
            satisfied_checks: count(RuleStatus::Satisfied),
            failed_checks: count(RuleStatus::Failed),
            pending_checks: count(RuleStatus::Pending),
        };

        Self {
            pr_number: pr.number,
            title: pr.title.clone(),
            passed: !statuses.iter().any(RuleStatus::blocks),
            automatic,
            manual,
            summary,
            evaluated_at: Utc::now(),
        }
    }

    /// Commit state: failure beats pending beats success.
    pub fn commit_state(&self) -> CommitState {
        if self.automatic.iter().any(|o| o.status == RuleStatus::Failed) {
            CommitState::Failure
        } else if self.manual.iter().any(|o| o.status == RuleStatus::Pending) {
            CommitState::Pending
        } else {
            CommitState::Success
        }
    }

    /// Serialize the evaluation to pretty JSON.
    pub fn to_json(&self) -> PolicyResult<String> {
        serde_json::to_string_pretty(self).map_err(PolicyError::from)
    }

    /// Generate a human-readable report.
    pub fn report(&self) -> String {
        let mut report = String::new();

        if self.title.is_empty() {
            report.push_str(&format!("Pull request #{}\n", self.pr_number));
        } else {
            report.push_str(&format!("Pull request #{}: {}\n", self.pr_number, self.title));
        }
        report.push_str(&format!(
            "Status: {}\n\n",
            if self.passed { "✅ READY TO MERGE" } else { "❌ NOT READY" }
        ));

        if !self.automatic.is_empty() {
            report.push_str("Automatic checks:\n");
            for outcome in &self.automatic {
                report.push_str(&format!("{} {}\n", outcome.status.glyph(), outcome.description));
                push_tree(&mut report, &outcome.condition);
                if let Some(requirement) = &outcome.requirement {
                    push_tree(&mut report, requirement);
                }
            }
            report.push('\n');
        }

        if !self.manual.is_empty() {
            report.push_str("Manual checks:\n");
            for outcome in &self.manual {
                report.push_str(&format!("{} {}\n", outcome.status.glyph(), outcome.description));
                push_tree(&mut report, &outcome.condition);
                match (&outcome.status, &outcome.approved_by) {
                    (RuleStatus::Satisfied, Some(user)) => {
                        report.push_str(&format!("    Approved by {}\n", user));
                    }
                    (RuleStatus::Pending, _) if outcome.teams.is_empty() => {
                        report.push_str("    Waiting for approval\n");
                    }
                    (RuleStatus::Pending, _) => {
                        report.push_str(&format!(
                            "    Waiting for approval from a member of: {}\n",
                            outcome.teams.join(", ")
                        ));
                    }
                    _ => {}
                }
            }
            report.push('\n');
        }

        report.push_str(&format!(
            "Summary: {}/{} applicable checks satisfied",
            self.summary.satisfied_checks, self.summary.applicable_checks
        ));

        report
    }
}

fn push_tree(report: &mut String, tree: &StatusNode) {
    for line in tree.to_string().lines() {
        report.push_str(&format!("    {}\n", line));
    }
}

/// Evaluates a registry against pull requests.
pub struct PolicyEngine {
    registry: PolicyRegistry,
    gh: Arc<dyn GitHubClient>,
}

impl PolicyEngine {
    pub fn new(registry: PolicyRegistry, gh: Arc<dyn GitHubClient>) -> Self {
        Self { registry, gh }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Evaluate every check against `pr`.
    ///
    /// Checks run in registry order, automatic checks first.
    pub fn evaluate(&self, pr: &PullRequest, approvals: &ManualApprovals) -> Evaluation {
        info!("Evaluating pull request #{}", pr.number);

        let automatic: Vec<AutomaticOutcome> = self
            .registry
            .automatic()
            .iter()
            .map(|check| self.evaluate_automatic(check, pr))
            .collect();

        let manual: Vec<ManualOutcome> = self
            .registry
            .manual()
            .iter()
            .map(|check| self.evaluate_manual(check, pr, approvals))
            .collect();

        let evaluation = Evaluation::new(pr, automatic, manual);
        if evaluation.passed {
            info!("Pull request #{} satisfies every applicable check", pr.number);
        } else {
            warn!(
                "Pull request #{} has {} failed and {} pending checks",
                pr.number, evaluation.summary.failed_checks, evaluation.summary.pending_checks
            );
        }
        evaluation
    }

    fn evaluate_automatic(&self, check: &AutomaticCheck, pr: &PullRequest) -> AutomaticOutcome {
        let condition = StatusNode::evaluate("Condition", |node| check.condition.is_met(pr, node));

        if !condition.ok {
            debug!("Automatic check '{}' does not apply", check.description);
            return AutomaticOutcome {
                description: check.description.clone(),
                status: RuleStatus::NotApplicable,
                condition,
                requirement: None,
            };
        }

        let requirement =
            StatusNode::evaluate("Requirement", |node| check.requirement.is_satisfied(pr, node));
        let status = if requirement.ok {
            RuleStatus::Satisfied
        } else {
            RuleStatus::Failed
        };
        debug!("Automatic check '{}': {:?}", check.description, status);

        AutomaticOutcome {
            description: check.description.clone(),
            status,
            condition,
            requirement: Some(requirement),
        }
    }

    fn evaluate_manual(
        &self,
        check: &ManualCheck,
        pr: &PullRequest,
        approvals: &ManualApprovals,
    ) -> ManualOutcome {
        let condition = StatusNode::evaluate("Condition", |node| check.condition.is_met(pr, node));

        let (status, approved_by) = if !condition.ok {
            (RuleStatus::NotApplicable, None)
        } else {
            match approvals.approver(&check.description) {
                Some(user) if self.is_authorized(check, user) => {
                    (RuleStatus::Satisfied, Some(user.to_string()))
                }
                Some(user) => {
                    warn!(
                        "Ignoring approval of '{}' by {}: not a member of {:?}",
                        check.description, user, check.teams
                    );
                    (RuleStatus::Pending, None)
                }
                None => (RuleStatus::Pending, None),
            }
        };
        debug!("Manual check '{}': {:?}", check.description, status);

        ManualOutcome {
            description: check.description.clone(),
            status,
            condition,
            teams: check.teams.clone(),
            approved_by,
        }
    }

    /// Whether `user` may approve `check`. Anyone may when no team is set.
    fn is_authorized(&self, check: &ManualCheck, user: &str) -> bool {
        if check.teams.is_empty() {
            return true;
        }
        check
            .teams
            .iter()
            .any(|team| match self.gh.list_team_members(team) {
                Ok(members) => members.iter().any(|m| m == user),
                Err(e) => {
                    warn!("Unable to list members of team {}: {}", team, e);
                    false
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions as c;
    use crate::requirements as r;
    use prgate_github::MockGitHub;

    fn engine(
        gh: Arc<dyn GitHubClient>,
        automatic: Vec<AutomaticCheck>,
        manual: Vec<ManualCheck>,
    ) -> PolicyEngine {
        PolicyEngine::new(PolicyRegistry::new(automatic, manual).unwrap(), gh)
    }

    #[test]
    fn test_not_applicable_check_skips_requirement() {
        let mock = MockGitHub::new();
        let gh: Arc<dyn GitHubClient> = Arc::new(mock.clone());
        let engine = engine(
            Arc::clone(&gh),
            vec![AutomaticCheck::new("Never applies", c::never(), r::label(&gh, "x"))],
            Vec::new(),
        );

        let evaluation = engine.evaluate(&PullRequest::new(1, "alice"), &ManualApprovals::new());

        let outcome = &evaluation.automatic[0];
        assert_eq!(outcome.status, RuleStatus::NotApplicable);
        assert!(outcome.requirement.is_none());
        assert!(!mock.was_called("add_labels"));
        assert!(evaluation.passed);
        assert_eq!(evaluation.commit_state(), CommitState::Success);
    }

    #[test]
    fn test_failed_automatic_check() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new());
        let engine = engine(
            gh,
            vec![
                AutomaticCheck::new("Editable", c::always(), r::maintainer_can_modify()),
                AutomaticCheck::new("Anything", c::always(), r::always()),
            ],
            Vec::new(),
        );

        let evaluation = engine.evaluate(&PullRequest::new(1, "alice"), &ManualApprovals::new());

        assert!(!evaluation.passed);
        assert_eq!(evaluation.automatic[0].status, RuleStatus::Failed);
        assert_eq!(evaluation.automatic[1].status, RuleStatus::Satisfied);
        assert_eq!(evaluation.commit_state(), CommitState::Failure);
        assert_eq!(
            evaluation.summary,
            EvaluationSummary {
                total_checks: 2,
                applicable_checks: 2,
                satisfied_checks: 1,
                failed_checks: 1,
                pending_checks: 0,
            }
        );
    }

    #[test]
    fn test_manual_check_pending_without_approval() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new().with_team("devops", &["bob"]));
        let engine = engine(
            gh,
            Vec::new(),
            vec![ManualCheck::new("Infra reviewed", c::always()).with_teams(&["devops"])],
        );

        let evaluation = engine.evaluate(&PullRequest::new(1, "alice"), &ManualApprovals::new());

        assert_eq!(evaluation.manual[0].status, RuleStatus::Pending);
        assert!(!evaluation.passed);
        assert_eq!(evaluation.commit_state(), CommitState::Pending);
    }

    #[test]
    fn test_manual_check_approval_requires_team_member() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new().with_team("devops", &["bob"]));
        let engine = engine(
            gh,
            Vec::new(),
            vec![ManualCheck::new("Infra reviewed", c::always()).with_teams(&["devops"])],
        );
        let pr = PullRequest::new(1, "alice");

        let by_member = ManualApprovals::new().approve("Infra reviewed", "bob");
        let evaluation = engine.evaluate(&pr, &by_member);
        assert_eq!(evaluation.manual[0].status, RuleStatus::Satisfied);
        assert_eq!(evaluation.manual[0].approved_by.as_deref(), Some("bob"));
        assert!(evaluation.passed);

        let by_outsider = ManualApprovals::new().approve("Infra reviewed", "mallory");
        let evaluation = engine.evaluate(&pr, &by_outsider);
        assert_eq!(evaluation.manual[0].status, RuleStatus::Pending);
        assert!(evaluation.manual[0].approved_by.is_none());
    }

    #[test]
    fn test_manual_check_without_teams_accepts_any_approver() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new());
        let engine = engine(gh, Vec::new(), vec![ManualCheck::new("Looked at it", c::always())]);

        let approvals = ManualApprovals::new().approve("Looked at it", "anyone");
        let evaluation = engine.evaluate(&PullRequest::new(1, "alice"), &approvals);

        assert_eq!(evaluation.manual[0].status, RuleStatus::Satisfied);
    }

    #[test]
    fn test_manual_check_team_lookup_failure() {
        let gh: Arc<dyn GitHubClient> = Arc::new(
            MockGitHub::new()
                .with_team("devops", &["bob"])
                .simulate_failure("list_team_members", "unauthorized"),
        );
        let engine = engine(
            gh,
            Vec::new(),
            vec![ManualCheck::new("Infra reviewed", c::always()).with_teams(&["devops"])],
        );

        let approvals = ManualApprovals::new().approve("Infra reviewed", "bob");
        let evaluation = engine.evaluate(&PullRequest::new(1, "alice"), &approvals);

        assert_eq!(evaluation.manual[0].status, RuleStatus::Pending);
    }

    #[test]
    fn test_report_distinguishes_not_applicable() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new());
        let engine = engine(
            gh,
            vec![
                AutomaticCheck::new("Skipped rule", c::never(), r::always()),
                AutomaticCheck::new("Failed rule", c::always(), r::never()),
            ],
            Vec::new(),
        );

        let report = engine
            .evaluate(&PullRequest::new(9, "alice"), &ManualApprovals::new())
            .report();

        assert!(report.contains("Pull request #9"));
        assert!(report.contains("❌ NOT READY"));
        assert!(report.contains("⚪ Skipped rule"));
        assert!(report.contains("🔴 Failed rule"));
        assert!(report.contains("Summary: 0/1 applicable checks satisfied"));
    }

    #[test]
    fn test_report_layout() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new().with_team("devops", &["dave"]));
        let engine = engine(
            gh,
            vec![AutomaticCheck::new("Maintainer edits", c::always(), r::maintainer_can_modify())],
            vec![ManualCheck::new("Infra reviewed", c::always()).with_teams(&["devops"])],
        );
        assert_eq!(engine.registry().len(), 2);

        let pr = PullRequest::new(4, "alice")
            .with_title("Bump the base image")
            .with_maintainer_can_modify(true);
        let approvals = ManualApprovals::new().approve("Infra reviewed", "dave");
        let report = engine.evaluate(&pr, &approvals).report();

        let expected = "\
Pull request #4: Bump the base image
Status: ✅ READY TO MERGE

Automatic checks:
🟢 Maintainer edits
    🟢 Condition
    └── 🟢 On every pull request
    🟢 Requirement
    └── 🟢 Maintainer can modify this pull request

Manual checks:
🟢 Infra reviewed
    🟢 Condition
    └── 🟢 On every pull request
    Approved by dave

Summary: 2/2 applicable checks satisfied";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_evaluation_to_json() {
        let gh: Arc<dyn GitHubClient> = Arc::new(MockGitHub::new());
        let engine = engine(
            gh,
            vec![AutomaticCheck::new("Always", c::always(), r::always())],
            Vec::new(),
        );

        let json = engine
            .evaluate(&PullRequest::new(3, "alice"), &ManualApprovals::new())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pr_number"], 3);
        assert_eq!(value["automatic"][0]["status"], "satisfied");
    }
}
