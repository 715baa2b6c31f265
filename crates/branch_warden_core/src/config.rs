//! Run configuration types.
//!
//! These types carry the full intent of a setup run: which repository to target,
//! which branches to protect with how many reviews, and which optional steps to
//! perform. They are constructed by the caller before the run and never modified
//! during it.

use std::fmt;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Identifies the repository a setup run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// The owner of the repository (user or organization name)
    pub owner: String,
    /// The name of the repository
    pub name: String,
}

impl RepositoryRef {
    /// Creates a new `RepositoryRef` from an owner and a repository name.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One branch to protect and the number of approving reviews it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPolicy {
    /// The branch name
    pub name: String,
    /// Required number of approving reviews before merging
    pub required_reviews: u32,
}

impl BranchPolicy {
    /// Creates a new `BranchPolicy`.
    pub fn new(name: impl Into<String>, required_reviews: u32) -> Self {
        Self {
            name: name.into(),
            required_reviews,
        }
    }
}

/// The full intent of a setup run.
///
/// Branches are processed in the order they appear in `branches`, and the
/// resulting [`SetupResult`](crate::SetupResult) reports them in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    /// The branches to protect, in processing order
    pub branches: Vec<BranchPolicy>,
    /// Whether protection rules also apply to repository administrators
    pub enforce_admins: bool,
    /// Whether to enable vulnerability alerts and automated security fixes
    pub enable_security: bool,
}

impl Default for SetupConfig {
    /// The configuration the CLI ships with: two reviews on `main`, one on
    /// `develop` and `staging`, admins included, security features on.
    fn default() -> Self {
        Self {
            branches: vec![
                BranchPolicy::new("main", 2),
                BranchPolicy::new("develop", 1),
                BranchPolicy::new("staging", 1),
            ],
            enforce_admins: true,
            enable_security: true,
        }
    }
}
