//! Module discovery under an installation root.
//!
//! Modules live in `<installation root>/modules/`, one directory per
//! module, each carrying a `manifest.toml`. Entries without a manifest
//! and entries whose manifest fails to parse are skipped with a warning;
//! when two entries claim the same id, the first one scanned stays.

use crate::error::FrameworkResult;
use crate::manifest::ModuleManifest;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the directory scanned for modules under the installation root.
pub const MODULES_DIR: &str = "modules";

/// Information about a discovered module.
#[derive(Debug, Clone)]
pub struct ModulePath {
    /// Path to the module directory.
    pub path: PathBuf,

    /// Parsed manifest.
    pub manifest: ModuleManifest,
}

impl ModulePath {
    /// Get the module ID.
    pub fn id(&self) -> &str {
        &self.manifest.module.id
    }

    /// Get the module name.
    pub fn name(&self) -> &str {
        &self.manifest.module.name
    }

    /// Get the module version.
    pub fn version(&self) -> &str {
        &self.manifest.module.version
    }
}

/// Discover all modules under an installation root.
///
/// An installation without a `modules/` directory is an empty, still
/// valid container. A `modules/` directory that exists but cannot be
/// read is an error.
pub fn discover_modules(installation_root: &Path) -> FrameworkResult<Vec<ModulePath>> {
    let modules_dir = installation_root.join(MODULES_DIR);
    if !modules_dir.is_dir() {
        debug!("No modules directory at {:?}", modules_dir);
        return Ok(Vec::new());
    }

    let mut modules: Vec<ModulePath> = Vec::new();
    for entry in std::fs::read_dir(&modules_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let module = match load_module(&path) {
            Some(module) => module,
            None => continue,
        };

        if let Some(existing) = modules.iter().find(|m| m.id() == module.id()) {
            warn!(
                "Module id {} at {:?} already provided by {:?}, keeping the first",
                module.id(),
                module.path,
                existing.path
            );
            continue;
        }

        debug!(
            "Discovered module {} v{} at {:?}",
            module.name(),
            module.version(),
            module.path
        );
        modules.push(module);
    }

    debug!("Discovered {} modules under {:?}", modules.len(), modules_dir);
    Ok(modules)
}

/// Read one module directory, or `None` if it holds no usable manifest.
fn load_module(path: &Path) -> Option<ModulePath> {
    let manifest_path = path.join("manifest.toml");
    if !manifest_path.exists() {
        debug!("Skipping {:?}: no manifest.toml", path);
        return None;
    }

    match ModuleManifest::from_file(&manifest_path) {
        Ok(manifest) => Some(ModulePath {
            path: path.to_path_buf(),
            manifest,
        }),
        Err(e) => {
            warn!("Skipping {:?}: {}", path, e);
            None
        }
    }
}
