//! Requirements decide whether an applicable policy is satisfied.
//!
//! Unlike conditions, a requirement may act on the pull request before
//! reporting (requesting a review, adding a label, assigning a user).
//! Requirements run sequentially in declared order since those writes can be
//! order-sensitive.

use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};

use crate::conditions::{self, Condition};
use crate::status::StatusNode;

mod assignee;
mod boolean;
mod branch;
mod constant;
mod label;
mod maintainer;
mod reviewer;

pub use assignee::Assignee;
pub use boolean::{And, Not, Or};
pub use branch::{BaseRef, UpToDateWith};
pub use constant::{Always, Never};
pub use label::Label;
pub use maintainer::MaintainerCanModify;
pub use reviewer::{ReviewByTeamMembers, ReviewByUser};

/// A check, with an optional side effect, over a pull request.
///
/// Implementations must append exactly one node to `details` per call and
/// must not fail: lookup and write errors are logged and reported as `false`.
pub trait Requirement: Send + Sync {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool;
}

/// Uses a condition as a requirement.
pub struct Satisfies<C> {
    condition: C,
}

impl<C: Condition> Satisfies<C> {
    pub fn new(condition: C) -> Self {
        Self { condition }
    }
}

impl<C: Condition> Requirement for Satisfies<C> {
    fn is_satisfied(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        self.condition.is_met(pr, details)
    }
}

pub fn always() -> Box<dyn Requirement> {
    Box::new(Always)
}

pub fn never() -> Box<dyn Requirement> {
    Box::new(Never)
}

pub fn and(requirements: Vec<Box<dyn Requirement>>) -> Box<dyn Requirement> {
    Box::new(And::new(requirements))
}

pub fn or(requirements: Vec<Box<dyn Requirement>>) -> Box<dyn Requirement> {
    Box::new(Or::new(requirements))
}

pub fn not(requirement: Box<dyn Requirement>) -> Box<dyn Requirement> {
    Box::new(Not::new(requirement))
}

pub fn author(user: impl Into<String>) -> Box<dyn Requirement> {
    Box::new(Satisfies::new(conditions::Author::new(user)))
}

pub fn author_in_team(gh: &Arc<dyn GitHubClient>, team: impl Into<String>) -> Box<dyn Requirement> {
    Box::new(Satisfies::new(conditions::AuthorInTeam::new(Arc::clone(gh), team)))
}

pub fn draft() -> Box<dyn Requirement> {
    Box::new(Satisfies::new(conditions::Draft))
}

pub fn maintainer_can_modify() -> Box<dyn Requirement> {
    Box::new(MaintainerCanModify)
}

pub fn up_to_date_with(gh: &Arc<dyn GitHubClient>, base: BaseRef) -> Box<dyn Requirement> {
    Box::new(UpToDateWith::new(Arc::clone(gh), base))
}

pub fn review_by_user(gh: &Arc<dyn GitHubClient>, user: impl Into<String>) -> Box<dyn Requirement> {
    Box::new(ReviewByUser::new(Arc::clone(gh), user))
}

pub fn review_by_team_members(
    gh: &Arc<dyn GitHubClient>,
    team: impl Into<String>,
    count: usize,
) -> Box<dyn Requirement> {
    Box::new(ReviewByTeamMembers::new(Arc::clone(gh), team, count))
}

pub fn label(gh: &Arc<dyn GitHubClient>, name: impl Into<String>) -> Box<dyn Requirement> {
    Box::new(Label::new(Arc::clone(gh), name))
}

pub fn assignee(gh: &Arc<dyn GitHubClient>, user: impl Into<String>) -> Box<dyn Requirement> {
    Box::new(Assignee::new(Arc::clone(gh), user))
}
