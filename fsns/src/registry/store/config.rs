//! Registry store configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the registry database inside the data directory.
pub const REGISTRY_FILE_NAME: &str = "registry.db";

/// Configuration for opening a [`SqliteRegistry`](super::SqliteRegistry).
///
/// # Examples
///
/// ```
/// use fsns::registry::RegistryConfig;
/// use std::time::Duration;
///
/// let config = RegistryConfig::new("/tmp/registry.db")
///     .with_busy_timeout(Duration::from_millis(250));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait on a locked database.
    pub busy_timeout: Duration,
    /// Create the file (and its directory) when missing.
    pub auto_create: bool,
    /// Open without write access.
    pub read_only: bool,
}

impl RegistryConfig {
    /// Configuration with a 5 second busy timeout, auto-create on.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Set the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Open read-only. Disables auto-create.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// The per-user data directory, `~/.fsns`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".fsns"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolve the registry database path.
///
/// Order: `$FSNS_REGISTRY`, then `$FSNS_DATA_DIR/registry.db`, then
/// `~/.fsns/registry.db`.
///
/// # Errors
///
/// Returns an error if no environment variable is set and the home directory
/// cannot be determined.
pub fn resolve_registry_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("FSNS_REGISTRY") {
        return Ok(PathBuf::from(path));
    }
    if let Ok(data_dir) = std::env::var("FSNS_DATA_DIR") {
        return Ok(PathBuf::from(data_dir).join(REGISTRY_FILE_NAME));
    }
    Ok(default_data_dir()?.join(REGISTRY_FILE_NAME))
}
