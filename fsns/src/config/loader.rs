//! Locating and reading `fsns.yaml`, `fsns.local.yaml` and the user
//! `config.yaml`.

use crate::config::schema::Config;
use crate::error::Result;
use crate::probe::map_io_error;
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "fsns.yaml";

/// Private project configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "fsns.local.yaml";

/// User configuration file name inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// One parsed file and the layer it belongs to.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where the file was found.
    pub path: PathBuf,
    /// Layer number; higher layers win when merged.
    pub precedence: u8,
    /// The file's settings.
    pub config: Config,
}

/// Loads configuration from the user and project files.
///
/// # Examples
///
/// ```no_run
/// use fsns::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// for source in &sources {
///     println!("{} (layer {})", source.path.display(), source.precedence);
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies to `working_dir`, lowest layer
    /// first:
    /// 1. User config at `~/.fsns/config.yaml` (precedence 1)
    /// 2. Project `fsns.yaml` walking up from `working_dir` (precedence 2)
    /// 3. Project `fsns.local.yaml` in the same directory (precedence 3)
    ///
    /// `data_dir` overrides where the user config is loaded from.
    ///
    /// # Errors
    ///
    /// Fails on the first file that exists but is unreadable or not valid
    /// YAML.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::registry::default_data_dir()?.join(USER_CONFIG_FILE),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either project file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| map_io_error(path, e))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(serde_yaml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let err = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let err = ConfigLoader::load_file(&config_path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "hide_extensions: true\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.hide_extensions, Some(true));
    }

    #[test]
    fn test_discover_no_configs() {
        let temp_dir = TempDir::new().unwrap();
        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert!(configs.is_empty());
    }

    #[test]
    fn test_discover_both_project_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILE), "sidecar_name: main.ini\n").unwrap();
        fs::write(temp_dir.path().join(LOCAL_CONFIG_FILE), "sidecar_name: local.ini\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert_eq!(configs.len(), 2);

        let main = configs.iter().find(|c| c.precedence == 2).unwrap();
        let local = configs.iter().find(|c| c.precedence == 3).unwrap();
        assert_eq!(main.config.sidecar_name.as_deref(), Some("main.ini"));
        assert_eq!(local.config.sidecar_name.as_deref(), Some("local.ini"));
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILE), "show_hidden: true\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].config.show_hidden, Some(true));
    }

    #[test]
    fn test_load_all_with_data_dir() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(data_dir.path().join(USER_CONFIG_FILE), "hide_extensions: true\n").unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "hide_extensions: false\n").unwrap();

        let sources = ConfigLoader::load_all(project.path(), Some(data_dir.path())).unwrap();
        let precedences: Vec<u8> = sources.iter().map(|s| s.precedence).collect();
        assert_eq!(precedences, [1, 2]);
    }
}
