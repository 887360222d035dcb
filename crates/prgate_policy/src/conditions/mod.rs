//! Conditions decide whether a policy applies to a pull request.
//!
//! The free functions in this module build boxed conditions so rule lists
//! read like the policy they describe:
//!
//! ```rust,ignore
//! use prgate_policy::conditions as c;
//!
//! let infra = c::and(vec![
//!     c::base_branch("master"),
//!     c::or(vec![
//!         c::file_changed(&gh, "Dockerfile")?,
//!         c::file_changed(&gh, "^misc/deployments")?,
//!     ]),
//! ]);
//! ```

use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};

use crate::error::PolicyResult;
use crate::status::StatusNode;

mod assignee;
mod author;
mod boolean;
mod branch;
mod constant;
mod draft;
mod file;
mod label;

pub use assignee::{Assignee, AssigneeInTeam};
pub use author::{Author, AuthorInTeam};
pub use boolean::{And, Not, Or};
pub use branch::{BaseBranch, HeadBranch};
pub use constant::{Always, Never};
pub use draft::Draft;
pub use file::FileChanged;
pub use label::Label;

/// A predicate over a pull request.
///
/// Implementations must append exactly one node to `details` per call and
/// must not fail: lookup errors are logged and reported as `false`.
pub trait Condition: Send + Sync {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool;
}

pub fn always() -> Box<dyn Condition> {
    Box::new(Always)
}

pub fn never() -> Box<dyn Condition> {
    Box::new(Never)
}

pub fn and(conditions: Vec<Box<dyn Condition>>) -> Box<dyn Condition> {
    Box::new(And::new(conditions))
}

pub fn or(conditions: Vec<Box<dyn Condition>>) -> Box<dyn Condition> {
    Box::new(Or::new(conditions))
}

pub fn not(condition: Box<dyn Condition>) -> Box<dyn Condition> {
    Box::new(Not::new(condition))
}

pub fn author(user: impl Into<String>) -> Box<dyn Condition> {
    Box::new(Author::new(user))
}

pub fn author_in_team(gh: &Arc<dyn GitHubClient>, team: impl Into<String>) -> Box<dyn Condition> {
    Box::new(AuthorInTeam::new(Arc::clone(gh), team))
}

pub fn assignee(user: impl Into<String>) -> Box<dyn Condition> {
    Box::new(Assignee::new(user))
}

pub fn assignee_in_team(gh: &Arc<dyn GitHubClient>, team: impl Into<String>) -> Box<dyn Condition> {
    Box::new(AssigneeInTeam::new(Arc::clone(gh), team))
}

pub fn base_branch(name: impl Into<String>) -> Box<dyn Condition> {
    Box::new(BaseBranch::new(name))
}

pub fn head_branch(pattern: &str) -> PolicyResult<Box<dyn Condition>> {
    Ok(Box::new(HeadBranch::new(pattern)?))
}

pub fn draft() -> Box<dyn Condition> {
    Box::new(Draft)
}

pub fn file_changed(gh: &Arc<dyn GitHubClient>, pattern: &str) -> PolicyResult<Box<dyn Condition>> {
    Ok(Box::new(FileChanged::new(Arc::clone(gh), pattern)?))
}

pub fn label(pattern: &str) -> PolicyResult<Box<dyn Condition>> {
    Ok(Box::new(Label::new(pattern)?))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Evaluate a condition against a fresh root and return the outcome
    /// together with the single node it appended.
    pub fn evaluate(condition: &dyn Condition, pr: &PullRequest) -> (bool, StatusNode) {
        let mut root = StatusNode::new(true, "root");
        let met = condition.is_met(pr, &mut root);
        assert_eq!(root.children().len(), 1, "condition must append exactly one node");
        (met, root.children[0].clone())
    }
}
