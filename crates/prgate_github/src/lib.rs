//! # prgate_github
//!
//! The GitHub side of prgate: pull request models and the client abstraction
//! the policy engine queries.
//!
//! This crate provides:
//! - **Models**: `PullRequest`, `Review`, `BranchComparison`
//! - **Client trait**: `GitHubClient`, blocking queries and writes that may fail
//! - **Mock client**: `MockGitHub` with canned data, failure injection and call capture
//! - **Snapshots**: recorded pull request state loaded from YAML/JSON and served by `SnapshotGitHub`

pub mod client;
pub mod error;
pub mod mock;
pub mod models;
pub mod snapshot;

pub use client::GitHubClient;
pub use error::{GitHubError, GitHubResult};
pub use mock::{CapturedCall, MockGitHub};
pub use models::{BranchComparison, PullRequest, Review, ReviewState};
pub use snapshot::{comparison_key, Snapshot, SnapshotGitHub};
