//! YAML import format for the registry.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::class_id::ClassId;
use crate::error::Result;

use super::RegistryWriter;

/// A registry snapshot in YAML.
///
/// ```yaml
/// keys:
///   .txt: txtfile
///   txtfile\AlwaysShowExt: ""
///   txtfile\shellex\IconHandler: "{11111111-2222-3333-4444-555555555555}"
/// blocked:
///   - "{99999999-0000-0000-0000-000000000000}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    /// Key paths and their default values.
    #[serde(default)]
    pub keys: BTreeMap<String, String>,

    /// Blocked handler classes.
    #[serde(default)]
    pub blocked: Vec<ClassId>,
}

impl RegistryFile {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// document is malformed or a class id is invalid.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Write every key and block entry into a registry.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn apply_to(&self, registry: &dyn RegistryWriter) -> Result<()> {
        for (key, value) in &self.keys {
            registry.set_value(key, value)?;
        }
        for class in &self.blocked {
            registry.block(class)?;
        }
        log::debug!(
            "imported {} registry keys and {} blocked classes",
            self.keys.len(),
            self.blocked.len()
        );
        Ok(())
    }
}
