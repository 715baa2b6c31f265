//! # Models
//!
//! This module contains the data models returned by the GitHub API operations used by
//! Branch Warden: repositories, branches, and the effective branch protection state.
//! They are deserialized straight from the REST responses; fields GitHub may omit are
//! modeled as `Option`.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub repository.
///
/// Only the fields the setup flow actually inspects are kept; the REST response
/// carries far more, which serde ignores.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo = Repository {
///     name: "my-repo".to_string(),
///     full_name: Some("owner/my-repo".to_string()),
///     private: Some(false),
///     default_branch: Some("main".to_string()),
/// };
/// assert_eq!(repo.label(), "owner/my-repo");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    /// The name of the repository (without owner)
    pub name: String,
    /// The full name of the repository (owner/name)
    pub full_name: Option<String>,
    /// Whether the repository is private
    pub private: Option<bool>,
    /// The default branch of the repository
    pub default_branch: Option<String>,
}

impl Repository {
    /// Returns the `owner/name` label, falling back to the bare name when the
    /// full name is not present in the response.
    pub fn label(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

impl From<octocrab::models::Repository> for Repository {
    fn from(value: octocrab::models::Repository) -> Self {
        Self {
            name: value.name.clone(),
            full_name: value.full_name,
            private: value.private,
            default_branch: value.default_branch,
        }
    }
}

/// Represents a branch of a repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Branch {
    /// The branch name
    pub name: String,
    /// Whether any protection rule currently applies to the branch
    pub protected: Option<bool>,
}

/// The effective protection state of a branch as reported by
/// `GET /repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// GitHub omits whole sections of this object when the corresponding rule is not
/// configured, so every part is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BranchProtection {
    /// The pull-request review requirements, if any are configured
    pub required_pull_request_reviews: Option<RequiredReviews>,
    /// Whether administrators are subject to the protection rules
    pub enforce_admins: Option<EnabledSetting>,
}

impl BranchProtection {
    /// Returns the number of approving reviews the branch currently requires,
    /// or zero when no review requirement is configured.
    pub fn required_approving_reviews(&self) -> u32 {
        self.required_pull_request_reviews
            .as_ref()
            .and_then(|reviews| reviews.required_approving_review_count)
            .unwrap_or(0)
    }
}

/// The review-requirement section of a branch protection response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequiredReviews {
    /// Required number of approving reviews before merging
    pub required_approving_review_count: Option<u32>,
    /// Whether stale reviews are dismissed when new commits are pushed
    pub dismiss_stale_reviews: Option<bool>,
    /// Whether code owner reviews are required
    pub require_code_owner_reviews: Option<bool>,
}

/// A boolean protection setting that GitHub reports as `{"url": ..., "enabled": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnabledSetting {
    /// Whether the setting is enabled
    pub enabled: bool,
}
