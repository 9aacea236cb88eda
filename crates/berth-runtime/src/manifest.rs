//! Module manifest parsing.
//!
//! Each module directory carries a `manifest.toml` file describing its
//! identity. The archive payload next to it is opaque to the runtime.

use crate::error::{FrameworkError, FrameworkResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Module manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module metadata.
    pub module: ModuleMetadata,
}

/// Module metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Unique identifier for the module.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Version string (semver).
    pub version: String,

    /// Module description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ModuleManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> FrameworkResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml(content: &str) -> FrameworkResult<Self> {
        let manifest: ModuleManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest.
    fn validate(&self) -> FrameworkResult<()> {
        if self.module.id.is_empty() {
            return Err(FrameworkError::InvalidManifest(
                "Module ID cannot be empty".to_string(),
            ));
        }

        if self.module.name.is_empty() {
            return Err(FrameworkError::InvalidManifest(
                "Module name cannot be empty".to_string(),
            ));
        }

        if self.module.version.is_empty() {
            return Err(FrameworkError::InvalidManifest(
                "Module version cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
