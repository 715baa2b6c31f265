//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. The variants mirror the failure classes a caller has to
//! distinguish: a missing resource, a credential problem, and everything else.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Each variant captures one class of failure so that callers can decide whether a
/// failed request is worth reporting, skipping, or aborting over.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_branch("owner", "repo", "main").await {
///     Ok(branch) => println!("Branch found: {}", branch.name),
///     Err(Error::NotFound) => println!("Branch does not exist"),
///     Err(Error::PermissionDenied(msg)) => eprintln!("Token lacks scope: {}", msg),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when the client itself cannot be constructed, for example
    /// because the access token cannot be turned into a valid authorization header.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the GitHub API returns a response that cannot be
    /// parsed into the expected data structure.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested repository or branch does not exist or is
    /// not visible to the current credential.
    #[error("Resource not found")]
    NotFound,

    /// The credential is not allowed to perform the requested operation.
    ///
    /// This error occurs when a GitHub API request returns 401 or 403, which
    /// typically means the token is invalid, expired, or lacks the `repo`
    /// (administration) scope required for protection and settings updates.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A request failed for a reason other than authorization or a missing resource.
    ///
    /// Covers network failures, GitHub service errors, and any response status the
    /// client does not map to a more specific variant.
    #[error("API request failed: {0}")]
    Transient(String),
}
