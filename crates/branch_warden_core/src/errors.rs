use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Fatal errors that abort a setup run.
///
/// These are the only two ways a run can fail outright. Everything else that goes
/// wrong during setup (a missing branch, a rejected protection update, a failed
/// settings or security call) is recorded in the [`SetupResult`](crate::SetupResult)
/// and the run keeps going.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The GitHub client could not be constructed from the supplied credential.
    #[error("Failed to authorize against GitHub")]
    Authorization {
        #[source]
        source: github_client::Error,
    },

    /// The target repository could not be accessed.
    ///
    /// Raised by the initial access check; no configuration step is attempted
    /// after this.
    #[error("Cannot access repository {repository}")]
    RepositoryInaccessible {
        repository: String,
        #[source]
        source: github_client::Error,
    },
}
