use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use tracing::{error, info};

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

/// A label is applied to the pull request, adding it when missing.
pub struct Label {
    gh: Arc<dyn GitHubClient>,
    name: String,
}

impl Label {
    pub fn new(gh: Arc<dyn GitHubClient>, name: impl Into<String>) -> Self {
        Self {
            gh,
            name: name.into(),
        }
    }
}

impl Requirement for Label {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("This label is applied to pull request: {}", self.name);

        if pr.has_label(&self.name) {
            return add_status_node(true, label, details);
        }

        info!("Adding label {} to pull request #{}", self.name, pr.number);
        match self.gh.add_labels(pr.number, &[self.name.clone()]) {
            Ok(()) => add_status_node(true, label, details),
            Err(e) => {
                error!("Unable to add label {} to pull request #{}: {}", self.name, pr.number, e);
                add_status_node(false, label, details)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::test_support::evaluate;
    use prgate_github::MockGitHub;

    #[test]
    fn test_label_already_applied() {
        let mock = MockGitHub::new();
        let gh: Arc<dyn GitHubClient> = Arc::new(mock.clone());
        let pr = PullRequest::new(1, "alice").with_label("review/triage-pending");

        assert!(evaluate(&Label::new(gh, "review/triage-pending"), &pr).0);
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_label_added_when_missing() {
        let mock = MockGitHub::new();
        let gh: Arc<dyn GitHubClient> = Arc::new(mock.clone());

        assert!(evaluate(&Label::new(gh, "needs-docs"), &PullRequest::new(4, "alice")).0);

        let calls = mock.get_method_calls("add_labels");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].pr, Some(4));
        assert_eq!(calls[0].args, vec!["needs-docs"]);
    }

    #[test]
    fn test_label_write_failure() {
        let gh: Arc<dyn GitHubClient> =
            Arc::new(MockGitHub::new().simulate_failure("add_labels", "forbidden"));

        assert!(!evaluate(&Label::new(gh, "needs-docs"), &PullRequest::new(4, "alice")).0);
    }
}
