use branch_warden_core::SetupError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the Branch Warden CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// No token was passed on the command line and `GITHUB_TOKEN` is not set.
    #[error("GitHub token is required")]
    MissingToken,

    /// The setup run failed before producing a result.
    #[error(transparent)]
    Setup(#[from] SetupError),
}
