use prgate_github::PullRequest;
use regex::Regex;

use super::Condition;
use crate::error::{PolicyError, PolicyResult};
use crate::status::{add_status_node, StatusNode};

/// The pull request targets a given base branch.
pub struct BaseBranch {
    name: String,
}

impl BaseBranch {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Condition for BaseBranch {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            pr.base_branch == self.name,
            format!("The base branch is: {}", self.name),
            details,
        )
    }
}

/// The head branch name matches a pattern.
pub struct HeadBranch {
    pattern: Regex,
}

impl HeadBranch {
    pub fn new(pattern: &str) -> PolicyResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| PolicyError::invalid_pattern(pattern, e))?;
        Ok(Self { pattern })
    }
}

impl Condition for HeadBranch {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(
            self.pattern.is_match(&pr.head_branch),
            format!("The head branch matches this pattern: {}", self.pattern.as_str()),
            details,
        )
    }
}
