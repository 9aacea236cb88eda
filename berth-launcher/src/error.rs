//! Error types for the launcher.
//!
//! One enum per lifecycle phase: configuration, launch, application run,
//! shutdown. Nothing here is retried; every error is terminal and surfaced
//! to the caller.

use crate::launcher::HandleState;
use berth_runtime::FrameworkError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from parsing the launch configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Launch configuration not found: {0}")]
    NotFound(PathBuf),

    /// The configuration file could not be read (IO failure or malformed
    /// encoding).
    #[error("Failed to read launch configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from starting the container.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The container bootstrap itself failed.
    #[error("Container startup failed: {0}")]
    Startup(#[from] FrameworkError),

    /// The bootstrap returned without reporting a registry. A started but
    /// handleless container is unusable, so this is fatal.
    #[error("Container startup returned without publishing a registry")]
    RegistryUnavailable,
}

/// Errors from running the configured application.
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// `run` was called outside the `Open` state.
    #[error("Handle is {0:?}; an application can only be run while open")]
    NotOpen(HandleState),

    /// The container failed to dispatch the application.
    #[error("Application run failed in the container: {0}")]
    Framework(#[from] FrameworkError),

    /// The application completed with a non-zero code.
    #[error("Application completed with code {0}, expected 0")]
    ExitCode(i32),
}

/// Errors from closing a running handle.
#[derive(Error, Debug)]
pub enum ShutdownError {
    /// The handle was already closed.
    #[error("Handle already closed")]
    AlreadyClosed,

    /// The container shutdown call failed.
    #[error("Container shutdown failed: {0}")]
    Framework(#[from] FrameworkError),
}

/// Accessor called on a closed handle.
#[derive(Error, Debug)]
#[error("Running handle is closed")]
pub struct HandleClosed;

/// Umbrella error for the open/run/close convenience sequence.
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}
