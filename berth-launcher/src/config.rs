//! Launch configuration parsing.
//!
//! The launch configuration is an argv file, not a structured config: one
//! directive or argument per line, in the order the container bootstrap
//! expects them. This parser assigns no meaning to the directives; it only
//! turns the file into an ordered argument vector. Blank lines are dropped,
//! everything else passes through verbatim (after trimming).

use crate::error::ConfigError;
use std::path::Path;
use tracing::debug;

/// Ordered launch argument vector parsed from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    args: Vec<String>,
}

impl LaunchConfig {
    /// Parse a launch configuration file into an argument vector.
    ///
    /// Every non-empty line becomes exactly one argument, in file order.
    /// A missing file is [`ConfigError::NotFound`]; an unreadable or
    /// non-UTF-8 file is [`ConfigError::Read`].
    pub fn parse_from(path: &Path) -> Result<LaunchConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let args: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        debug!("Parsed {} launch arguments from {:?}", args.len(), path);
        Ok(LaunchConfig { args })
    }

    /// The parsed argument vector, in file order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the configuration file contained no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}
