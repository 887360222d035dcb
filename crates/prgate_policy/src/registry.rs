//! Policy registry.
//!
//! The registry holds the ordered automatic and manual checks the bot
//! enforces. It is built once at startup; building it validates the
//! configuration so that a broken rule list is rejected before any pull
//! request is evaluated.

use std::collections::HashSet;
use std::sync::Arc;

use prgate_github::GitHubClient;
use tracing::debug;

use crate::conditions::{self as c, Condition};
use crate::error::{PolicyError, PolicyResult};
use crate::requirements::{self as r, BaseRef, Requirement};

/// A check performed by the bot.
///
/// The requirement only runs when the condition holds; otherwise the check
/// does not apply to the pull request.
pub struct AutomaticCheck {
    pub description: String,
    pub condition: Box<dyn Condition>,
    pub requirement: Box<dyn Requirement>,
}

impl AutomaticCheck {
    pub fn new(
        description: impl Into<String>,
        condition: Box<dyn Condition>,
        requirement: Box<dyn Requirement>,
    ) -> Self {
        Self {
            description: description.into(),
            condition,
            requirement,
        }
    }
}

/// A check performed by people.
///
/// When the condition holds, a member of one of `teams` must tick the
/// check's checkbox. The description identifies the checkbox in the bot
/// comment and must be unique.
pub struct ManualCheck {
    pub description: String,
    pub condition: Box<dyn Condition>,
    pub teams: Vec<String>,
}

impl ManualCheck {
    pub fn new(description: impl Into<String>, condition: Box<dyn Condition>) -> Self {
        Self {
            description: description.into(),
            condition,
            teams: Vec::new(),
        }
    }

    pub fn with_teams(mut self, teams: &[&str]) -> Self {
        self.teams = teams.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// Ordered, validated set of checks.
pub struct PolicyRegistry {
    automatic: Vec<AutomaticCheck>,
    manual: Vec<ManualCheck>,
}

impl PolicyRegistry {
    /// Build a registry.
    ///
    /// Fails on a blank check description, a blank team name or a duplicate
    /// manual check description.
    pub fn new(automatic: Vec<AutomaticCheck>, manual: Vec<ManualCheck>) -> PolicyResult<Self> {
        if automatic.iter().any(|check| check.description.trim().is_empty()) {
            return Err(PolicyError::InvalidConfiguration(
                "automatic check with an empty description".to_string(),
            ));
        }
        validate_manual_checks(&manual)?;
        debug!(
            "Registered {} automatic and {} manual checks",
            automatic.len(),
            manual.len()
        );
        Ok(Self { automatic, manual })
    }

    pub fn automatic(&self) -> &[AutomaticCheck] {
        &self.automatic
    }

    pub fn manual(&self) -> &[ManualCheck] {
        &self.manual
    }

    /// Get a manual check by description.
    pub fn manual_check(&self, description: &str) -> Option<&ManualCheck> {
        self.manual.iter().find(|m| m.description == description)
    }

    pub fn len(&self) -> usize {
        self.automatic.len() + self.manual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.automatic.is_empty() && self.manual.is_empty()
    }
}

fn validate_manual_checks(manual: &[ManualCheck]) -> PolicyResult<()> {
    let mut seen = HashSet::new();
    for check in manual {
        if check.description.trim().is_empty() {
            return Err(PolicyError::InvalidConfiguration(
                "manual check with an empty description".to_string(),
            ));
        }
        if check.teams.iter().any(|team| team.trim().is_empty()) {
            return Err(PolicyError::InvalidConfiguration(format!(
                "manual check '{}' lists an empty team name",
                check.description
            )));
        }
        if !seen.insert(check.description.as_str()) {
            return Err(PolicyError::DuplicateManualCheck(check.description.clone()));
        }
    }
    Ok(())
}

/// The checks enforced by the bot, with the GitHub client injected.
pub fn default_registry(gh: Arc<dyn GitHubClient>) -> PolicyResult<PolicyRegistry> {
    let automatic = vec![
        AutomaticCheck::new(
            "Maintainers must be able to edit this pull request",
            c::always(),
            r::maintainer_can_modify(),
        ),
        AutomaticCheck::new(
            "The pull request head branch must be up-to-date with its base",
            c::always(),
            r::up_to_date_with(&gh, BaseRef::PullRequestBase),
        ),
        AutomaticCheck::new(
            "Changes to 'docs' folder must be reviewed/authored by at least one devrel and one tech-staff",
            c::file_changed(&gh, "^docs/")?,
            r::or(vec![
                r::and(vec![
                    r::author_in_team(&gh, "devrels"),
                    r::review_by_team_members(&gh, "tech-staff", 1),
                ]),
                r::and(vec![
                    r::author_in_team(&gh, "tech-staff"),
                    r::review_by_team_members(&gh, "devrels", 1),
                ]),
            ]),
        ),
    ];

    let manual = vec![
        ManualCheck::new(
            "The pull request description provides enough details",
            c::not(c::author_in_team(&gh, "core-contributors")),
        )
        .with_teams(&["core-contributors"]),
        ManualCheck::new(
            "Determine if infra needs to be updated before merging",
            c::and(vec![
                c::base_branch("master"),
                c::or(vec![
                    c::file_changed(&gh, "Dockerfile")?,
                    c::file_changed(&gh, "^misc/deployments")?,
                    c::file_changed(&gh, "^misc/docker-")?,
                    c::file_changed(&gh, r"^.github/workflows/releaser.*\.yml$")?,
                    c::file_changed(&gh, r"^.github/workflows/portal-loop\.yml$")?,
                ]),
            ]),
        )
        .with_teams(&["devops"]),
    ];

    PolicyRegistry::new(automatic, manual)
}
