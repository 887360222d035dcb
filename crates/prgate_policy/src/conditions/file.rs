use std::sync::Arc;

use prgate_github::{GitHubClient, PullRequest};
use regex::Regex;
use tracing::{debug, error};

use super::Condition;
use crate::error::{PolicyError, PolicyResult};
use crate::status::{add_status_node, StatusNode};

/// At least one changed file path matches a pattern.
pub struct FileChanged {
    gh: Arc<dyn GitHubClient>,
    pattern: Regex,
}

impl FileChanged {
    /// Fails with `InvalidPattern` if `pattern` is not a valid regex.
    pub fn new(gh: Arc<dyn GitHubClient>, pattern: &str) -> PolicyResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| PolicyError::invalid_pattern(pattern, e))?;
        Ok(Self { gh, pattern })
    }
}

impl Condition for FileChanged {
    fn is_met(&self, pr: &PullRequest, details: &mut StatusNode) -> bool {
        let label = format!("A changed file matches this pattern: {}", self.pattern.as_str());

        let files = match self.gh.list_changed_files(pr.number) {
            Ok(files) => files,
            Err(e) => {
                error!("Unable to list changed files of pull request #{}: {}", pr.number, e);
                return add_status_node(false, label, details);
            }
        };

        match files.iter().find(|f| self.pattern.is_match(f)) {
            Some(file) => {
                debug!("File {} matches pattern {}", file, self.pattern.as_str());
                add_status_node(true, format!("{} (filename: {})", label, file), details)
            }
            None => add_status_node(false, label, details),
        }
    }
}
