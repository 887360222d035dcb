//! # prgate_policy
//!
//! Merge-gating policies for pull requests.
//!
//! This crate provides:
//! - **Status trees**: every evaluated boolean recorded with a readable label
//! - **Conditions**: predicates deciding whether a policy applies
//! - **Requirements**: checks, optionally acting on the pull request, deciding whether it is satisfied
//! - **Combinators**: `And`, `Or`, `Not` over both, evaluating every child
//! - **Registry**: validated lists of automatic and manual checks
//! - **Engine**: evaluation of a registry against one pull request
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prgate_policy::{conditions as c, requirements as r};
//! use prgate_policy::{AutomaticCheck, ManualApprovals, PolicyEngine, PolicyRegistry};
//!
//! let registry = PolicyRegistry::new(
//!     vec![AutomaticCheck::new(
//!         "Maintainers must be able to edit this pull request",
//!         c::always(),
//!         r::maintainer_can_modify(),
//!     )],
//!     vec![],
//! )?;
//!
//! let engine = PolicyEngine::new(registry, gh);
//! let evaluation = engine.evaluate(&pr, &ManualApprovals::new());
//! println!("{}", evaluation.report());
//! ```

pub mod conditions;
pub mod engine;
pub mod error;
pub mod registry;
pub mod requirements;
pub mod status;

pub use conditions::Condition;
pub use engine::{
    AutomaticOutcome, CommitState, Evaluation, EvaluationSummary, ManualApprovals, ManualOutcome,
    PolicyEngine, RuleStatus,
};
pub use error::{PolicyError, PolicyResult};
pub use registry::{default_registry, AutomaticCheck, ManualCheck, PolicyRegistry};
pub use requirements::{BaseRef, Requirement};
pub use status::{add_branch, add_status_node, StatusNode};
