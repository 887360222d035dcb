use prgate_github::PullRequest;

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

/// Maintainers are allowed to push to the head branch.
pub struct MaintainerCanModify;

impl Requirement for MaintainerCanModify {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            pr.maintainer_can_modify,
            "Maintainer can modify this pull request",
            details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::test_support::evaluate;

    #[test]
    fn test_maintainer_can_modify() {
        let allowed = PullRequest::new(1, "alice").with_maintainer_can_modify(true);
        assert!(evaluate(&MaintainerCanModify, &allowed).0);

        let (satisfied, node) = evaluate(&MaintainerCanModify, &PullRequest::new(2, "alice"));
        assert!(!satisfied);
        assert_eq!(node.text(), "🔴 Maintainer can modify this pull request");
    }
}
