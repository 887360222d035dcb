use prgate_github::PullRequest;
use regex::Regex;

use super::Condition;
use crate::error::{PolicyError, PolicyResult};
use crate::status::{add_status_node, StatusNode};

/// At least one applied label matches a pattern.
pub struct Label {
    pattern: Regex,
}

impl Label {
    pub fn new(pattern: &str) -> PolicyResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| PolicyError::invalid_pattern(pattern, e))?;
        Ok(Self { pattern })
    }
}

impl Condition for Label {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            pr.labels.iter().any(|l| self.pattern.is_match(l)),
            format!("A label matches this pattern: {}", self.pattern.as_str()),
            details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::test_support::evaluate;

    #[test]
    fn test_label() {
        let pr = PullRequest::new(1, "alice").with_label("area/docs").with_label("bug");

        let (met, _) = evaluate(&Label::new("^area/").unwrap(), &pr);
        assert!(met);

        let (met, _) = evaluate(&Label::new("^security$").unwrap(), &pr);
        assert!(!met);

        let (met, _) = evaluate(&Label::new(".*").unwrap(), &PullRequest::new(2, "alice"));
        assert!(!met, "no labels means nothing can match");
    }
}
