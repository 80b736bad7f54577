//! Configuration merging and precedence handling.
//!
//! Scalar fields are overwritten by higher layers; `filesystem_classes`
//! accumulates across layers.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use fsns::config::{Config, ConfigMerger};
///
/// let low = Config { sidecar_name: Some("low.ini".to_string()), ..Default::default() };
/// let high = Config { sidecar_name: Some("high.ini".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.sidecar_name, Some("high.ini".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; set fields in `source` win.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.hide_extensions.is_some() {
            target.hide_extensions = source.hide_extensions;
        }

        if source.show_hidden.is_some() {
            target.show_hidden = source.show_hidden;
        }

        if source.sort_column.is_some() {
            target.sort_column = source.sort_column;
        }

        if source.registry_path.is_some() {
            target.registry_path.clone_from(&source.registry_path);
        }

        if source.sidecar_name.is_some() {
            target.sidecar_name.clone_from(&source.sidecar_name);
        }

        if source.shortcut_extension.is_some() {
            target.shortcut_extension.clone_from(&source.shortcut_extension);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref classes) = source.filesystem_classes {
            let merged = target.filesystem_classes.get_or_insert_with(Vec::new);
            for class in classes {
                if !merged.contains(class) {
                    merged.push(*class);
                }
            }
        }
    }
}
