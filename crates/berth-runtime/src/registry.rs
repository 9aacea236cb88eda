//! The container's service registry.
//!
//! The registry records the modules installed into a running container and
//! the applications the host has bound by name. A shared handle to it is
//! the primary capability surface handed out at startup.

use crate::discovery::ModulePath;
use crate::error::{FrameworkError, FrameworkResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Opaque shared reference to a running container's service registry.
pub type RegistryHandle = Arc<ServiceRegistry>;

/// An application that can be run inside the container.
///
/// The selection of which application to run comes from the launch argument
/// vector; implementations come from the host. `run` returns the raw
/// completion code, with zero meaning success by convention.
pub trait Application: Send + Sync {
    fn run(&self) -> i32;
}

/// Information about an installed module.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub path: std::path::PathBuf,
}

impl From<&ModulePath> for ModuleInfo {
    fn from(module: &ModulePath) -> Self {
        Self {
            id: module.id().to_string(),
            name: module.name().to_string(),
            version: module.version().to_string(),
            path: module.path.clone(),
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    modules: Vec<ModuleInfo>,
    applications: HashMap<String, Arc<dyn Application>>,
}

/// Registry of installed modules and bound applications.
pub struct ServiceRegistry {
    inner: RwLock<RegistryInner>,
}

impl ServiceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Install a discovered module.
    pub fn install_module(&self, module: &ModulePath) {
        let info = ModuleInfo::from(module);
        info!("Installed module: {} v{}", info.name, info.version);
        self.write().modules.push(info);
    }

    /// Get all installed modules.
    pub fn modules(&self) -> Vec<ModuleInfo> {
        self.read().modules.clone()
    }

    /// Get an installed module by ID.
    pub fn module(&self, id: &str) -> Option<ModuleInfo> {
        self.read().modules.iter().find(|m| m.id == id).cloned()
    }

    /// Get the number of installed modules.
    pub fn module_count(&self) -> usize {
        self.read().modules.len()
    }

    /// Bind an application under a name.
    pub fn register_application(
        &self,
        id: impl Into<String>,
        application: Arc<dyn Application>,
    ) -> FrameworkResult<()> {
        let id = id.into();
        let mut inner = self.write();

        if inner.applications.contains_key(&id) {
            return Err(FrameworkError::InvalidDirective(format!(
                "Application '{}' is already registered",
                id
            )));
        }

        info!("Registered application: {}", id);
        inner.applications.insert(id, application);
        Ok(())
    }

    /// Look up a bound application by name.
    pub fn application(&self, id: &str) -> Option<Arc<dyn Application>> {
        self.read().applications.get(id).cloned()
    }

    /// Drop all modules and applications. Called on container shutdown so a
    /// leaked handle observes an emptied registry rather than stale state.
    pub(crate) fn clear(&self) {
        let mut inner = self.write();
        inner.modules.clear();
        inner.applications.clear();
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
