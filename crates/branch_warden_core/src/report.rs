//! Setup outcome types.
//!
//! A [`SetupResult`] is assembled incrementally while the run executes and handed
//! back as an immutable value once the run is over.

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// The recorded outcome for one configured branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOutcome {
    /// The branch name
    pub branch: String,
    /// Whether the protection rule was applied to this branch
    pub protected: bool,
    /// The required-approval count read back during verification, when available.
    ///
    /// `None` either because the branch was not protected or because the
    /// verification read failed; a failed verification never downgrades
    /// `protected`.
    pub verified_reviews: Option<u32>,
}

/// Outcome of the optional security-feature step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityOutcome {
    /// Whether vulnerability alerts were enabled
    pub vulnerability_alerts: bool,
    /// Whether automated security-fix pull requests were enabled
    pub automated_fixes: bool,
}

/// The result of a setup run.
///
/// Contains exactly one [`BranchOutcome`] per configured branch, in configuration
/// order. Repository-settings and security outcomes are reported separately and
/// never influence `overall_success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupResult {
    /// The `owner/name` label of the repository that was configured
    pub repository: String,
    /// Per-branch outcomes, in configuration order
    pub branches: Vec<BranchOutcome>,
    /// Whether the repository-wide merge settings update succeeded
    pub settings_applied: bool,
    /// Security-feature outcome; `None` when the step was not requested
    pub security: Option<SecurityOutcome>,
    /// True iff at least one branch ended up protected
    pub overall_success: bool,
}

impl SetupResult {
    pub(crate) fn new(
        repository: String,
        branches: Vec<BranchOutcome>,
        settings_applied: bool,
        security: Option<SecurityOutcome>,
    ) -> Self {
        let overall_success = branches.iter().any(|outcome| outcome.protected);
        Self {
            repository,
            branches,
            settings_applied,
            security,
            overall_success,
        }
    }

    /// Returns the names of the branches that ended up protected.
    pub fn protected_branches(&self) -> Vec<&str> {
        self.branches
            .iter()
            .filter(|outcome| outcome.protected)
            .map(|outcome| outcome.branch.as_str())
            .collect()
    }
}
