//! # berth-launcher
//!
//! Launches and supervises the berth module container from an installation
//! root, exposes a handle to the running container's service registry, and
//! guarantees the container is torn down exactly once however control
//! leaves the scope.
//!
//! ## Lifecycle
//!
//! A [`Launcher`] is built over an installation root and parses the launch
//! configuration (`berth.ini`, one argument per line) once at construction.
//! [`Launcher::open`] starts the container and returns a [`Running`] handle
//! only after the live registry reference has been captured; the handle
//! supports running the configured application and shutting the container
//! down, with a drop guard covering every exit path that skipped an
//! explicit close.
//!
//! ```no_run
//! use berth_launcher::Launcher;
//!
//! # fn main() -> Result<(), berth_launcher::LauncherError> {
//! let launcher = Launcher::new("/opt/berth")?;
//! let mut running = launcher.open()?;
//! println!("modules: {}", running.bundle_registry().unwrap().module_count());
//! running.close()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod launcher;

pub use config::LaunchConfig;
pub use error::{
    ApplicationError, ConfigError, HandleClosed, LaunchError, LauncherError, ShutdownError,
};
pub use facade::{Launcher, LAUNCH_CONFIG_FILE};
pub use launcher::{launch, HandleState, Running};
