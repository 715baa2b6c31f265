//! # Branch Warden Core
//!
//! This crate provides the orchestration logic for Branch Warden, a tool that
//! applies branch protection rules and repository settings to an existing GitHub
//! repository.
//!
//! ## Overview
//!
//! A setup run walks a fixed sequence of steps:
//! 1. Repository access verification (the only fatal step)
//! 2. Per-branch protection: existence check, then protection rule application
//! 3. Repository-wide merge policy update (squash-only)
//! 4. Security feature enablement, when requested (vulnerability alerts and
//!    automated security fixes, attempted independently)
//! 5. Verification pass over the branches that were protected
//! 6. Aggregation into an immutable [`SetupResult`]
//!
//! Only step 1 can abort the run. A branch that is missing or rejects its
//! protection update is recorded as failed and the remaining branches are still
//! processed; settings and security failures are logged as warnings and never
//! affect the per-branch outcomes. The run counts as successful when at least one
//! branch ended up protected.
//!
//! ## Architecture
//!
//! The orchestrator only talks to GitHub through the
//! [`RepositoryClient`](github_client::RepositoryClient) trait, so tests can
//! drive the whole sequence against a scripted in-memory client.
//!
//! ## Examples
//!
//! ```no_run
//! use branch_warden_core::{run_setup_with_token, RepositoryRef, SetupConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = RepositoryRef::new("my-org", "my-repo");
//! let config = SetupConfig::default();
//!
//! let result = run_setup_with_token(&repository, &config, "ghp_xxx").await?;
//! if result.overall_success {
//!     println!("Protected: {}", result.protected_branches().join(", "));
//! }
//! # Ok(())
//! # }
//! ```

use github_client::{
    models, BranchProtectionPayload, GitHubClient, RepositoryClient, RepositorySettingsUpdate,
};
use tracing::{error, info, warn};

mod errors;
pub use errors::SetupError;

mod config;
pub use config::{BranchPolicy, RepositoryRef, SetupConfig};

mod report;
pub use report::{BranchOutcome, SecurityOutcome, SetupResult};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Builds a token-authenticated GitHub client and runs the setup sequence with it.
///
/// # Errors
///
/// Returns [`SetupError::Authorization`] when the client cannot be built from the
/// token, and [`SetupError::RepositoryInaccessible`] when the initial repository
/// access check fails. Any other problem is recorded in the returned
/// [`SetupResult`] instead.
pub async fn run_setup_with_token(
    repository: &RepositoryRef,
    config: &SetupConfig,
    token: &str,
) -> Result<SetupResult, SetupError> {
    let client = github_client::create_token_client(token)
        .map_err(|source| SetupError::Authorization { source })?;
    let client = GitHubClient::new(client);

    run_setup(&client, repository, config).await
}

/// Runs the full setup sequence against the given client.
///
/// Steps 2 through 5 run only after the repository access check succeeds; each of
/// them depends on that check alone, never on each other's success.
pub async fn run_setup(
    client: &dyn RepositoryClient,
    repository: &RepositoryRef,
    config: &SetupConfig,
) -> Result<SetupResult, SetupError> {
    let repo = verify_repository_access(client, repository).await?;

    info!(repository = %repository, "Setting up branch protection rules");
    let mut outcomes = Vec::with_capacity(config.branches.len());
    for policy in &config.branches {
        let protected = protect_branch(client, repository, policy, config.enforce_admins).await;
        outcomes.push(BranchOutcome {
            branch: policy.name.clone(),
            protected,
            verified_reviews: None,
        });
    }

    let settings_applied = apply_merge_policy(client, repository).await;

    let security = if config.enable_security {
        Some(enable_security_features(client, repository).await)
    } else {
        None
    };

    for outcome in outcomes.iter_mut().filter(|outcome| outcome.protected) {
        outcome.verified_reviews =
            verify_branch_protection(client, repository, &outcome.branch).await;
    }

    Ok(SetupResult::new(
        repo.label().to_string(),
        outcomes,
        settings_applied,
        security,
    ))
}

/// Step 1: check that the repository exists and is visible to the credential.
///
/// This is the only step whose failure aborts the run.
async fn verify_repository_access(
    client: &dyn RepositoryClient,
    repository: &RepositoryRef,
) -> Result<models::Repository, SetupError> {
    match client.get_repository(&repository.owner, &repository.name).await {
        Ok(repo) => {
            info!(repository = %repository, "Repository accessed successfully");
            Ok(repo)
        }
        Err(source) => {
            error!(repository = %repository, error = %source, "Cannot access repository");
            Err(SetupError::RepositoryInaccessible {
                repository: repository.to_string(),
                source,
            })
        }
    }
}

/// Step 2: protect a single branch, returning whether the rule was applied.
///
/// A branch that does not exist is skipped; a rejected protection update is
/// recorded as a failure. Neither stops the loop over the remaining branches.
async fn protect_branch(
    client: &dyn RepositoryClient,
    repository: &RepositoryRef,
    policy: &BranchPolicy,
    enforce_admins: bool,
) -> bool {
    if let Err(e) = client
        .get_branch(&repository.owner, &repository.name, &policy.name)
        .await
    {
        warn!(branch = %policy.name, error = %e, "Branch does not exist, skipping");
        return false;
    }

    info!(
        branch = %policy.name,
        required_reviews = policy.required_reviews,
        "Setting up branch protection"
    );
    let payload = BranchProtectionPayload::new(policy.required_reviews, enforce_admins);
    match client
        .update_branch_protection(&repository.owner, &repository.name, &policy.name, &payload)
        .await
    {
        Ok(_) => {
            info!(branch = %policy.name, "Branch protection configured");
            true
        }
        Err(e) => {
            error!(branch = %policy.name, error = %e, "Failed to configure branch protection");
            false
        }
    }
}

/// Step 3: apply the squash-only merge policy to the repository.
///
/// Runs exactly once, regardless of how the branches fared. Failure is a warning.
async fn apply_merge_policy(client: &dyn RepositoryClient, repository: &RepositoryRef) -> bool {
    info!("Configuring repository settings");
    match client
        .update_repository_settings(
            &repository.owner,
            &repository.name,
            &RepositorySettingsUpdate::squash_only(),
        )
        .await
    {
        Ok(_) => {
            info!("Repository settings configured");
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to configure repository settings");
            false
        }
    }
}

/// Step 4: enable vulnerability alerts and automated security fixes.
///
/// The two calls are independent: the second is attempted even when the first
/// fails. Failures are warnings only.
async fn enable_security_features(
    client: &dyn RepositoryClient,
    repository: &RepositoryRef,
) -> SecurityOutcome {
    info!("Enabling security features");

    let vulnerability_alerts = match client
        .enable_vulnerability_alerts(&repository.owner, &repository.name)
        .await
    {
        Ok(()) => {
            info!("Vulnerability alerts enabled");
            true
        }
        Err(e) => {
            warn!(error = %e, "Could not enable vulnerability alerts");
            false
        }
    };

    let automated_fixes = match client
        .enable_automated_security_fixes(&repository.owner, &repository.name)
        .await
    {
        Ok(()) => {
            info!("Automated security fixes enabled");
            true
        }
        Err(e) => {
            warn!(error = %e, "Could not enable automated security fixes");
            false
        }
    };

    SecurityOutcome {
        vulnerability_alerts,
        automated_fixes,
    }
}

/// Step 5: read back the protection rule of a branch that was just protected.
///
/// Returns the effective required-approval count, or `None` when the read fails.
/// The recorded per-branch outcome is not changed either way.
async fn verify_branch_protection(
    client: &dyn RepositoryClient,
    repository: &RepositoryRef,
    branch: &str,
) -> Option<u32> {
    match client
        .get_branch_protection(&repository.owner, &repository.name, branch)
        .await
    {
        Ok(protection) => {
            let required_reviews = protection.required_approving_reviews();
            info!(branch = %branch, required_reviews, "Branch protection verified");
            Some(required_reviews)
        }
        Err(e) => {
            warn!(branch = %branch, error = %e, "Branch protection verification failed");
            None
        }
    }
}
