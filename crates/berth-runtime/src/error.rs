//! Error types for the berth runtime.

use thiserror::Error;

/// Errors that can occur in the container framework.
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Module not found at the specified path.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// Failed to parse a module manifest.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// The framework was started while already running or after shutdown.
    #[error("Framework already started")]
    AlreadyStarted,

    /// An operation required a started framework.
    #[error("Framework is not started")]
    NotStarted,

    /// The argument vector did not select an application to run.
    #[error("No -application directive in the launch arguments")]
    NoApplication,

    /// The selected application is not registered in the container.
    #[error("Application not registered: {0}")]
    ApplicationNotFound(String),

    /// A launch directive was malformed.
    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for framework operations.
pub type FrameworkResult<T> = std::result::Result<T, FrameworkError>;
