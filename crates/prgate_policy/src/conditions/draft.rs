use prgate_github::PullRequest;

use super::Condition;
use crate::status::{add_status_node, StatusNode};

/// The pull request is a draft.
pub struct Draft;

impl Condition for Draft {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(pr.draft, "This pull request is a draft", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::test_support::evaluate;

    #[test]
    fn test_draft() {
        let (met, _) = evaluate(&Draft, &PullRequest::new(1, "alice").draft());
        assert!(met);

        let (met, node) = evaluate(&Draft, &PullRequest::new(2, "alice"));
        assert!(!met);
        assert_eq!(node.text(), "🔴 This pull request is a draft");
    }
}
