//! The type-handler registry.
//!
//! The registry is a type-keyed table of string values addressed by
//! backslash-separated key paths, in the shape of the classic file-type
//! database:
//!
//! ```text
//! .txt                               -> txtfile
//! .txt\CLSID                         -> {class of a provider for .txt files}
//! txtfile                            -> Text Document
//! txtfile\AlwaysShowExt              -> (present: never hide the extension)
//! txtfile\shellex\IconHandler        -> {icon handler class}
//! txtfile\DefaultIcon                -> C:\icons\text.ico,2
//! ```
//!
//! Keys compare case-insensitively. Providers never cache what they read:
//! every question re-queries the registry.

mod file;
mod memory;
mod store;

pub use file::RegistryFile;
pub use memory::MemoryRegistry;
pub use store::{
    default_data_dir, resolve_registry_path, RegistryConfig, SqliteRegistry, REGISTRY_FILE_NAME,
};

use crate::class_id::ClassId;
use crate::error::Result;

/// Read access to the type-handler registry.
///
/// Implementations must be safe to share between threads; they may hold
/// whatever lock they need for concurrent reads.
pub trait TypeRegistry: Send + Sync {
    /// The default value stored at `key\subkey`, or at `key` when `subkey`
    /// is `None`. Missing keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    fn lookup(&self, key: &str, subkey: Option<&str>) -> Result<Option<String>>;

    /// Whether a handler class is on the block list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    fn is_blocked(&self, class: &ClassId) -> Result<bool>;
}

/// Write access used by importers and the command line.
pub trait RegistryWriter {
    /// Store `value` at the key path `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn set_value(&self, key: &str, value: &str) -> Result<()>;

    /// Add a class to the block list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn block(&self, class: &ClassId) -> Result<()>;
}

/// Normalize a key path: forward slashes become backslashes and leading or
/// trailing separators are dropped. Case is preserved.
///
/// # Examples
///
/// ```
/// use fsns::registry::normalize_key;
///
/// assert_eq!(normalize_key("/txtfile/shellex/"), "txtfile\\shellex");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.replace('/', "\\").trim_matches('\\').to_string()
}

/// Join a key and an optional subkey into a normalized key path.
#[must_use]
pub fn key_path(key: &str, subkey: Option<&str>) -> String {
    match subkey {
        Some(subkey) if !subkey.is_empty() => {
            normalize_key(&format!("{}\\{}", normalize_key(key), normalize_key(subkey)))
        }
        _ => normalize_key(key),
    }
}
