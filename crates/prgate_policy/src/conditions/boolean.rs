use prgate_github::PullRequest;

use super::Condition;
use crate::status::{add_branch, StatusNode};

/// Every child condition holds.
///
/// All children are evaluated and recorded even once the outcome is known,
/// so the tree always shows the complete reasoning. An empty `And` holds.
pub struct And {
    conditions: Vec<Box<dyn Condition>>,
}

impl And {
    pub fn new(conditions: Vec<Box<dyn Condition>>) -> Self {
        Self { conditions }
    }
}

impl Condition for And {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("All of:", details, |branch| {
            let mut met = true;
            for condition in &self.conditions {
                if !condition.is_met(pr, branch) {
                    met = false;
                }
            }
            met
        })
    }
}

/// At least one child condition holds.
///
/// Evaluates every child like [`And`]. An empty `Or` does not hold.
pub struct Or {
    conditions: Vec<Box<dyn Condition>>,
}

impl Or {
    pub fn new(conditions: Vec<Box<dyn Condition>>) -> Self {
        Self { conditions }
    }
}

impl Condition for Or {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("Any of:", details, |branch| {
            let mut met = false;
            for condition in &self.conditions {
                if condition.is_met(pr, branch) {
                    met = true;
                }
            }
            met
        })
    }
}

/// Negation. The child's own node is kept below the `Not` node.
pub struct Not {
    condition: Box<dyn Condition>,
}

impl Not {
    pub fn new(condition: Box<dyn Condition>) -> Self {
        Self { condition }
    }
}

impl Condition for Not {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        add_branch("Not", details, |branch| !self.condition.is_met(pr, branch))
    }
}
