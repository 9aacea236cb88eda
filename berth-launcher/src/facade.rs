//! Top-level launcher facade.
//!
//! Wraps an installation root: parses its launch configuration once at
//! construction, opens running container handles on demand, and offers the
//! open/run/close convenience sequence.

use crate::config::LaunchConfig;
use crate::error::{ConfigError, LaunchError, LauncherError};
use crate::launcher::{launch, Running};
use berth_runtime::{Framework, ModuleFramework};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Fixed name of the launch configuration file under the installation root.
pub const LAUNCH_CONFIG_FILE: &str = "berth.ini";

/// Launcher over an installation root.
///
/// The launch configuration is read exactly once, at construction; a
/// missing or unreadable `berth.ini` is a fatal construction error.
#[derive(Debug)]
pub struct Launcher {
    installation_root: PathBuf,
    config: LaunchConfig,
}

impl Launcher {
    /// Wrap an installation root, parsing `<root>/berth.ini`.
    pub fn new(installation_root: impl Into<PathBuf>) -> Result<Launcher, ConfigError> {
        let installation_root = installation_root.into();
        let config = LaunchConfig::parse_from(&installation_root.join(LAUNCH_CONFIG_FILE))?;
        Ok(Launcher {
            installation_root,
            config,
        })
    }

    /// The installation root this launcher was built over.
    pub fn installation_root(&self) -> &Path {
        &self.installation_root
    }

    /// The parsed launch configuration.
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Open the container and return a running handle.
    pub fn open(&self) -> Result<Running<ModuleFramework>, LaunchError> {
        self.open_with(ModuleFramework::new(&self.installation_root))
    }

    /// Open a specific framework with the stored launch arguments.
    pub fn open_with<F: Framework>(&self, framework: F) -> Result<Running<F>, LaunchError> {
        launch(framework, self.config.args())
    }

    /// Open the container, run the configured application, and close it.
    ///
    /// The handle is closed exactly once on every exit path. If both the
    /// run and the close fail, the run error propagates and the close
    /// failure is logged.
    pub fn run_once(&self) -> Result<(), LauncherError> {
        self.run_once_with(ModuleFramework::new(&self.installation_root))
    }

    /// Like [`Launcher::run_once`], over a specific framework.
    pub fn run_once_with<F: Framework>(&self, framework: F) -> Result<(), LauncherError> {
        let mut running = self.open_with(framework)?;
        match running.run() {
            Ok(()) => {
                running.close()?;
                Ok(())
            }
            Err(run_err) => {
                if let Err(close_err) = running.close() {
                    warn!(
                        "Container shutdown failed after application error: {}",
                        close_err
                    );
                }
                Err(run_err.into())
            }
        }
    }
}
