use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the org-props CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or validating the declaration file.
    ///
    /// This error is returned when the file is missing, is not valid TOML, or
    /// declares properties that fail validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    GitHub(#[from] github_client::Error),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A synchronizer operation failed.
    #[error("{0}")]
    Property(#[from] property_sync::PropertyError),

    /// The state file could not be read or written.
    #[error("State file error: {0}")]
    State(String),
}
