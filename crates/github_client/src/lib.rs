//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making authenticated requests to GitHub,
//! authenticating with a personal access token. The [`RepositoryClient`] trait
//! describes the operations the repository setup flow needs, so that callers can
//! swap the real [`GitHubClient`] for a mock in tests.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::Serialize;
use tracing::{error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// A client for interacting with the GitHub API, authenticated with an access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an already-built `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

/// Trait for the repository management operations used during setup.
///
/// The setup orchestrator only ever talks to GitHub through this trait, which keeps
/// the sequencing logic testable without a network. All operations are read-only
/// except `update_branch_protection`, `update_repository_settings`, and the two
/// security-feature toggles.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches details for a specific repository.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the repository does not exist or is not visible
    /// to the credential, `Error::PermissionDenied` for 401/403 responses, and
    /// `Error::Transient` for any other failure.
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<models::Repository, Error>;

    /// Fetches a single branch of a repository.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the branch does not exist.
    async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<models::Branch, Error>;

    /// Replaces the protection rule of a branch.
    ///
    /// GitHub treats this as a full update: every part of the rule is set to the
    /// value in `payload`, and parts serialized as `null` are cleared.
    ///
    /// # Errors
    ///
    /// Returns `Error::PermissionDenied` if the token lacks administration rights
    /// on the repository.
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        payload: &BranchProtectionPayload,
    ) -> Result<models::BranchProtection, Error>;

    /// Fetches the effective protection rule of a branch.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the branch is not protected at all.
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<models::BranchProtection, Error>;

    /// Updates settings for a specific repository.
    ///
    /// Only the fields provided in the `settings` argument will be updated.
    ///
    /// # Errors
    ///
    /// Returns an `Error` variant classified from the API response status.
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<models::Repository, Error>;

    /// Enables vulnerability alerts for a repository.
    ///
    /// The endpoint responds with `204 No Content` on success.
    async fn enable_vulnerability_alerts(&self, owner: &str, repo: &str) -> Result<(), Error>;

    /// Enables automated security-fix pull requests for a repository.
    ///
    /// Requires vulnerability alerts to be available for the repository; GitHub
    /// rejects the call otherwise, which surfaces as `Error::PermissionDenied` or
    /// `Error::Transient` depending on the response.
    async fn enable_automated_security_fixes(&self, owner: &str, repo: &str) -> Result<(), Error>;
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<models::Repository, Error> {
        let result = self.client.repos(owner, repo).get().await;
        match result {
            Ok(r) => Ok(models::Repository::from(r)),
            Err(e) => Err(classify_octocrab_error("Failed to get repository", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<models::Branch, Error> {
        let path = format!("/repos/{}/{}/branches/{}", owner, repo, branch);
        let response: OctocrabResult<models::Branch> = self.client.get(path, None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get branch", e))
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        payload: &BranchProtectionPayload,
    ) -> Result<models::BranchProtection, Error> {
        let path = format!("/repos/{}/{}/branches/{}/protection", owner, repo, branch);
        let response: OctocrabResult<models::BranchProtection> =
            self.client.put(path, Some(payload)).await;
        match response {
            Ok(protection) => {
                info!(
                    branch = branch,
                    required_reviews = payload.required_pull_request_reviews.required_approving_review_count,
                    "Applied branch protection rule"
                );
                Ok(protection)
            }
            Err(e) => Err(classify_octocrab_error(
                "Failed to update branch protection",
                e,
            )),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<models::BranchProtection, Error> {
        let path = format!("/repos/{}/{}/branches/{}/protection", owner, repo, branch);
        let response: OctocrabResult<models::BranchProtection> =
            self.client.get(path, None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get branch protection", e))
    }

    #[instrument(skip(self, settings), fields(owner = %owner, repo = %repo))]
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<models::Repository, Error> {
        let path = format!("/repos/{}/{}", owner, repo);
        // Use client.patch for updating repository settings via the REST API
        let response: OctocrabResult<octocrab::models::Repository> =
            self.client.patch(path, Some(settings)).await;
        match response {
            Ok(r) => Ok(models::Repository::from(r)),
            Err(e) => Err(classify_octocrab_error(
                "Failed to update repository settings",
                e,
            )),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn enable_vulnerability_alerts(&self, owner: &str, repo: &str) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/vulnerability-alerts", owner, repo);
        self.put_no_content(path, "Failed to enable vulnerability alerts")
            .await
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn enable_automated_security_fixes(&self, owner: &str, repo: &str) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/automated-security-fixes", owner, repo);
        self.put_no_content(path, "Failed to enable automated security fixes")
            .await
    }
}

impl GitHubClient {
    /// Sends a `PUT` to an endpoint that answers `204 No Content` on success.
    ///
    /// The typed `Octocrab::put` insists on deserializing a response body, so these
    /// endpoints go through the raw request layer with the GitHub error mapping
    /// applied by hand.
    async fn put_no_content(&self, path: String, context: &str) -> Result<(), Error> {
        let response = self
            .client
            ._put(path, None::<&()>)
            .await
            .map_err(|e| classify_octocrab_error(context, e))?;

        octocrab::map_github_error(response)
            .await
            .map_err(|e| classify_octocrab_error(context, e))?;
        Ok(())
    }
}

/// Represents the branch protection rule submitted to
/// `PUT /repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// The endpoint requires `required_status_checks` and `restrictions` to be present
/// even when unused, so those fields serialize as explicit `null` rather than being
/// skipped.
#[derive(Serialize, Debug, Clone)]
pub struct BranchProtectionPayload {
    /// Status-check requirement; always `null`, no checks are required
    pub required_status_checks: Option<StatusCheckPolicy>,
    /// Whether the rule also applies to repository administrators
    pub enforce_admins: bool,
    /// The pull-request review requirement
    pub required_pull_request_reviews: RequiredReviewsPayload,
    /// Push restrictions; always `null`, no user/team restrictions
    pub restrictions: Option<RestrictionsPolicy>,
    pub allow_force_pushes: bool,
    pub allow_deletions: bool,
    pub block_creations: bool,
    pub required_conversation_resolution: bool,
}

/// Placeholder for the status-check section of a protection rule.
///
/// Never constructed: the setup flow always submits `null` for this section.
#[derive(Serialize, Debug, Clone)]
pub struct StatusCheckPolicy {
    pub strict: bool,
    pub contexts: Vec<String>,
}

/// Placeholder for the push-restriction section of a protection rule.
///
/// Never constructed: the setup flow always submits `null` for this section.
#[derive(Serialize, Debug, Clone)]
pub struct RestrictionsPolicy {
    pub users: Vec<String>,
    pub teams: Vec<String>,
}

/// The pull-request review section of a [`BranchProtectionPayload`].
#[derive(Serialize, Debug, Clone)]
pub struct RequiredReviewsPayload {
    pub required_approving_review_count: u32,
    pub dismiss_stale_reviews: bool,
    pub require_code_owner_reviews: bool,
    pub require_last_push_approval: bool,
}

impl BranchProtectionPayload {
    /// Builds the protection rule the setup flow applies to every branch: the given
    /// review count and admin enforcement, stale reviews dismissed, and everything
    /// else left off (no code-owner requirement, no force pushes or deletions, no
    /// status checks, no push restrictions, conversation resolution not required).
    pub fn new(required_reviews: u32, enforce_admins: bool) -> Self {
        Self {
            required_status_checks: None,
            enforce_admins,
            required_pull_request_reviews: RequiredReviewsPayload {
                required_approving_review_count: required_reviews,
                dismiss_stale_reviews: true,
                require_code_owner_reviews: false,
                require_last_push_approval: false,
            },
            restrictions: None,
            allow_force_pushes: false,
            allow_deletions: false,
            block_creations: false,
            required_conversation_resolution: false,
        }
    }
}

/// Represents the settings that can be updated for a repository.
/// Use `Default::default()` and modify fields as needed.
#[derive(Serialize, Default, Debug)]
pub struct RepositorySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,
    // Add other updatable fields like description, topics etc. as needed
}

impl RepositorySettingsUpdate {
    /// The merge policy the setup flow applies: squash merges only, branches kept
    /// after merge, and auto-merge disabled.
    pub fn squash_only() -> Self {
        Self {
            allow_squash_merge: Some(true),
            allow_merge_commit: Some(false),
            allow_rebase_merge: Some(false),
            delete_branch_on_merge: Some(false),
            allow_auto_merge: Some(false),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
///
/// Returns `Error::AuthError` if the client cannot be built from the token.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build GitHub client: {}", e)))
}

/// Classifies an `octocrab` failure into the crate's [`Error`] taxonomy and logs it.
///
/// GitHub API errors are mapped by status code: 404 becomes [`Error::NotFound`],
/// 401/403 become [`Error::PermissionDenied`], everything else is
/// [`Error::Transient`].
fn classify_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            error!(
                error_message = source.message,
                status = %source.status_code,
                "{}. Received an error from GitHub",
                message
            );
            match source.status_code {
                StatusCode::NOT_FOUND => Error::NotFound,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Error::PermissionDenied(source.message)
                }
                _ => Error::Transient(source.message),
            }
        }
        octocrab::Error::UriParse { source, .. } => {
            error!(
                error_message = source.to_string(),
                "{}. Failed to parse URI.", message
            );
            Error::Transient(source.to_string())
        }
        _ => {
            error!(error_message = e.to_string(), message);
            Error::Transient(e.to_string())
        }
    }
}
