use prgate_github::PullRequest;

use super::Requirement;
use crate::status::{add_status_node, StatusNode};

/// Always satisfied.
pub struct Always;

impl Requirement for Always {
    fn is_satisfied(&self, _pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(true, "On every pull request", details)
    }
}

/// Never satisfied.
pub struct Never;

impl Requirement for Never {
    fn is_satisfied(&self, _pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(false, "On no pull request", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::test_support::evaluate;

    #[test]
    fn test_constants() {
        let pr = PullRequest::new(1, "alice");

        let (satisfied, node) = evaluate(&Always, &pr);
        assert!(satisfied);
        assert_eq!(node.text(), "🟢 On every pull request");

        let (satisfied, node) = evaluate(&Never, &pr);
        assert!(!satisfied);
        assert_eq!(node.text(), "🔴 On no pull request");
    }
}
