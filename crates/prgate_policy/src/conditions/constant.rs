use prgate_github::PullRequest;

use super::Condition;
use crate::status::{add_status_node, StatusNode};

/// Holds for every pull request.
pub struct Always;

impl Condition for Always {
    fn is_met(&self, _pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(true, "On every pull request", details)
    }
}

/// Holds for no pull request.
pub struct Never;

impl Condition for Never {
    fn is_met(&self, _pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_status_node(false, "On no pull request", details)
    }
}
