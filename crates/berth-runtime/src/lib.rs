//! # berth-runtime
//!
//! In-process module container runtime for berth.
//!
//! This crate provides:
//! - Module discovery from an installation root
//! - Module manifest parsing
//! - The container's service registry
//! - The `Framework` bootstrap API and its in-process implementation
//!
//! ## Module Structure
//!
//! Modules are directories under `<installation root>/modules/`, each
//! containing a `manifest.toml` with the module's identity. The archive
//! payload next to the manifest is opaque to the runtime.
//!
//! ## Lifecycle
//!
//! A [`ModuleFramework`] goes `Created -> Started -> Stopped`. Startup
//! interprets the launch argument vector, installs discovered modules,
//! and reports the live [`ServiceRegistry`] through a readiness hook
//! before returning. Only one framework instance may be started at a
//! time per installation.

pub mod discovery;
pub mod error;
pub mod framework;
pub mod manifest;
pub mod registry;

pub use discovery::{discover_modules, ModulePath, MODULES_DIR};
pub use error::{FrameworkError, FrameworkResult};
pub use framework::{Framework, ModuleFramework};
pub use manifest::{ModuleManifest, ModuleMetadata};
pub use registry::{Application, ModuleInfo, RegistryHandle, ServiceRegistry};
