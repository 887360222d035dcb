use prgate_github::PullRequest;

use super::Requirement;
use crate::status::{add_branch, StatusNode};

/// Every child requirement is satisfied.
///
/// Children run in order and none is skipped, so side effects of later
/// children happen even when an earlier one fails. An empty `And` is satisfied.
pub struct And {
    requirements: Vec<Box<dyn Requirement>>,
}

impl And {
    pub fn new(requirements: Vec<Box<dyn Requirement>>) -> Self {
        Self { requirements }
    }
}

impl Requirement for And {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("All of:", details, |branch| {
            let mut satisfied = true;
            for requirement in &self.requirements {
                if !requirement.is_satisfied(pr, branch) {
                    satisfied = false;
                }
            }
            satisfied
        })
    }
}

/// At least one child requirement is satisfied. An empty `Or` is not.
pub struct Or {
    requirements: Vec<Box<dyn Requirement>>,
}

impl Or {
    pub fn new(requirements: Vec<Box<dyn Requirement>>) -> Self {
        Self { requirements }
    }
}

impl Requirement for Or {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("Any of:", details, |branch| {
            let mut satisfied = false;
            for requirement in &self.requirements {
                if requirement.is_satisfied(pr, branch) {
                    satisfied = true;
                }
            }
            satisfied
        })
    }
}

/// Negation.
pub struct Not {
    requirement: Box<dyn Requirement>,
}

impl Not {
    pub fn new(requirement: Box<dyn Requirement>) -> Self {
        Self { requirement }
    }
}

impl Requirement for Not {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("Not", details, |branch| !self.requirement.is_satisfied(pr, branch))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::requirements::test_support::evaluate;
    use crate::requirements::{self as r, Always, Never};
    use prgate_github::{GitHubClient, MockGitHub, Review};

    #[test]
    fn test_empty_combinators() {
        let pr = PullRequest::new(1, "alice");
        assert!(evaluate(&And::new(vec![]), &pr).0);
        assert!(!evaluate(&Or::new(vec![]), &pr).0);
    }

    #[test]
    fn test_not() {
        let pr = PullRequest::new(1, "alice");
        assert!(!evaluate(&Not::new(Box::new(Always)), &pr).0);
        assert!(evaluate(&Not::new(Box::new(Never)), &pr).0);
    }

    #[test]
    fn test_double_negation() {
        let pr = PullRequest::new(1, "alice").with_maintainer_can_modify(true);

        let (plain, _) = evaluate(&*r::maintainer_can_modify(), &pr);
        let (doubled, node) = evaluate(&*r::not(r::not(r::maintainer_can_modify())), &pr);

        assert_eq!(plain, doubled);
        assert_eq!(node.text(), "🟢 Not");
        assert_eq!(node.children()[0].text(), "🔴 Not");
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn test_and_runs_side_effects_after_failure() {
        let mock = MockGitHub::new();
        let gh: Arc<dyn GitHubClient> = Arc::new(mock.clone());
        let requirement = And::new(vec![r::never(), r::label(&gh, "blocked")]);

        let (satisfied, node) = evaluate(&requirement, &PullRequest::new(1, "alice"));

        assert!(!satisfied);
        assert_eq!(node.children().len(), 2);
        assert!(mock.was_called("add_labels"));
    }

    #[test]
    fn test_docs_review_rule() {
        let mock = MockGitHub::new()
            .with_team("devrels", &["alice"])
            .with_team("tech-staff", &["bob"])
            .with_review(1, Review::approved("bob"));
        let gh: Arc<dyn GitHubClient> = Arc::new(mock);

        let requirement = r::or(vec![
            r::and(vec![
                r::author_in_team(&gh, "devrels"),
                r::review_by_team_members(&gh, "tech-staff", 1),
            ]),
            r::and(vec![
                r::author_in_team(&gh, "tech-staff"),
                r::review_by_team_members(&gh, "devrels", 1),
            ]),
        ]);

        let (satisfied, node) = evaluate(&*requirement, &PullRequest::new(1, "alice"));

        assert!(satisfied);
        assert_eq!(node.text(), "🟢 Any of:");
        assert!(node.children()[0].ok);
        assert!(!node.children()[1].ok);
        assert_eq!(node.size(), 7);
    }
}
