//! Container bootstrap: startup, application run, shutdown.
//!
//! `Framework` is the bootstrap seam consumed by the launcher; the concrete
//! `ModuleFramework` starts an in-process container over an installation
//! root. The framework is a process-wide singleton in spirit: only one
//! instance may be started at a time per installation. That is a usage
//! precondition on the caller, not something enforced here.

use crate::discovery::discover_modules;
use crate::error::{FrameworkError, FrameworkResult};
use crate::registry::{RegistryHandle, ServiceRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Bootstrap API of the embedded container.
///
/// `startup` interprets the launch argument vector and, once the container
/// is ready, reports the live registry through `on_ready` before returning.
/// `run` executes the application selected by the argument vector and
/// returns its raw completion code. `shutdown` stops the container.
pub trait Framework {
    fn startup(
        &mut self,
        args: &[String],
        on_ready: &mut dyn FnMut(RegistryHandle),
    ) -> FrameworkResult<()>;

    fn run(&mut self) -> FrameworkResult<i32>;

    fn shutdown(&mut self) -> FrameworkResult<()>;
}

/// Lifecycle state of a [`ModuleFramework`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameworkState {
    Created,
    Started,
    Stopped,
}

/// Launch directives recognized by the container bootstrap.
#[derive(Debug, Default)]
struct Directives {
    /// Override for the installation root (`-install <dir>`).
    install: Option<PathBuf>,
    /// Application selected to run (`-application <id>`).
    application: Option<String>,
    /// Uninterpreted arguments, handed through to the application.
    passthrough: Vec<String>,
}

impl Directives {
    fn parse(args: &[String]) -> FrameworkResult<Self> {
        let mut directives = Directives::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-install" => {
                    let value = iter.next().ok_or_else(|| {
                        FrameworkError::InvalidDirective("-install requires a path".to_string())
                    })?;
                    directives.install = Some(PathBuf::from(value));
                }
                "-application" => {
                    let value = iter.next().ok_or_else(|| {
                        FrameworkError::InvalidDirective(
                            "-application requires an identifier".to_string(),
                        )
                    })?;
                    directives.application = Some(value.clone());
                }
                "-vmargs" => {
                    // Everything after -vmargs belongs to the hosting VM,
                    // not to the container.
                    let rest: Vec<&String> = iter.by_ref().collect();
                    debug!("Ignoring {} -vmargs tokens", rest.len());
                }
                other => directives.passthrough.push(other.to_string()),
            }
        }

        Ok(directives)
    }
}

/// In-process module container over an installation root.
pub struct ModuleFramework {
    installation_root: PathBuf,
    state: FrameworkState,
    registry: Option<RegistryHandle>,
    application: Option<String>,
}

impl ModuleFramework {
    /// Create a framework over the given installation root. Nothing is
    /// started until [`Framework::startup`] is called.
    pub fn new(installation_root: impl Into<PathBuf>) -> Self {
        Self {
            installation_root: installation_root.into(),
            state: FrameworkState::Created,
            registry: None,
            application: None,
        }
    }
}

impl Framework for ModuleFramework {
    fn startup(
        &mut self,
        args: &[String],
        on_ready: &mut dyn FnMut(RegistryHandle),
    ) -> FrameworkResult<()> {
        if self.state != FrameworkState::Created {
            return Err(FrameworkError::AlreadyStarted);
        }

        let directives = Directives::parse(args)?;
        if let Some(install) = directives.install {
            self.installation_root = install;
        }
        self.application = directives.application;
        if !directives.passthrough.is_empty() {
            debug!("Pass-through arguments: {:?}", directives.passthrough);
        }

        let modules = discover_modules(&self.installation_root)?;

        let registry = Arc::new(ServiceRegistry::new());
        for module in &modules {
            registry.install_module(module);
        }

        info!(
            "Container started from {:?} with {} modules",
            self.installation_root,
            registry.module_count()
        );

        self.state = FrameworkState::Started;
        self.registry = Some(Arc::clone(&registry));
        on_ready(registry);
        Ok(())
    }

    fn run(&mut self) -> FrameworkResult<i32> {
        if self.state != FrameworkState::Started {
            return Err(FrameworkError::NotStarted);
        }

        let registry = self.registry.as_ref().ok_or(FrameworkError::NotStarted)?;
        let id = self
            .application
            .as_deref()
            .ok_or(FrameworkError::NoApplication)?;

        let application = registry
            .application(id)
            .ok_or_else(|| FrameworkError::ApplicationNotFound(id.to_string()))?;

        info!("Running application: {}", id);
        let code = application.run();
        debug!("Application {} completed with code {}", id, code);
        Ok(code)
    }

    fn shutdown(&mut self) -> FrameworkResult<()> {
        if self.state != FrameworkState::Started {
            return Err(FrameworkError::NotStarted);
        }

        if let Some(registry) = self.registry.take() {
            registry.clear();
        }

        self.state = FrameworkState::Stopped;
        info!("Container stopped");
        Ok(())
    }
}
