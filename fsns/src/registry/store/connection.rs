//! The SQLite-backed registry.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::class_id::ClassId;
use crate::error::{Error, Result};
use crate::registry::{key_path, normalize_key, RegistryWriter, TypeRegistry};

use super::config::RegistryConfig;
use super::schema::{
    DELETE_BLOCKED, DELETE_VALUE, INSERT_BLOCKED, SELECT_ALL_VALUES, SELECT_BLOCKED, SELECT_VALUE,
    UPSERT_VALUE,
};

/// A type registry persisted in SQLite.
///
/// Every lookup runs a fresh query, so values written by another process are
/// seen on the next call. The connection is serialized behind a mutex; that
/// is the only lock the registry holds.
///
/// # Examples
///
/// ```
/// use fsns::registry::{RegistryWriter, SqliteRegistry, TypeRegistry};
///
/// let registry = SqliteRegistry::open_in_memory().unwrap();
/// registry.set_value(".txt", "txtfile").unwrap();
/// assert_eq!(registry.lookup(".TXT", None).unwrap().as_deref(), Some("txtfile"));
/// ```
#[derive(Debug)]
pub struct SqliteRegistry {
    conn: Mutex<Connection>,
    config: Option<RegistryConfig>,
}

impl SqliteRegistry {
    /// Open (and if needed create) the registry described by `config`.
    ///
    /// WAL journaling and the busy timeout are applied, then the schema is
    /// initialized or checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the pragmas fail, or
    /// the schema version is incompatible.
    pub fn open(config: RegistryConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        if !config.read_only {
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        if config.read_only {
            let version = super::migrations::get_schema_version(&conn)?;
            if version != super::schema::CURRENT_SCHEMA_VERSION {
                return Err(Error::Validation {
                    field: "schema_version".into(),
                    message: format!("registry at {} has schema version {version}", config.path.display()),
                });
            }
        } else {
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("opened type registry at {}", config.path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            config: Some(config),
        })
    }

    /// An empty registry that lives only in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot create the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            config: None,
        })
    }

    /// The configuration this registry was opened with, if file-backed.
    #[must_use]
    pub fn config(&self) -> Option<&RegistryConfig> {
        self.config.as_ref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::RegistryUnavailable {
            reason: "registry connection lock poisoned".into(),
        })
    }

    /// Remove a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove_value(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(DELETE_VALUE, [normalize_key(key)])?;
        Ok(removed > 0)
    }

    /// Remove a class from the block list.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn unblock(&self, class: &ClassId) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute(DELETE_BLOCKED, [class.to_string()])?;
        Ok(removed > 0)
    }

    /// All stored keys and values, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(SELECT_ALL_VALUES)?;
        let entries = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl TypeRegistry for SqliteRegistry {
    fn lookup(&self, key: &str, subkey: Option<&str>) -> Result<Option<String>> {
        let path = key_path(key, subkey);
        let conn = self.lock()?;
        Ok(conn
            .query_row(SELECT_VALUE, [path], |row| row.get(0))
            .optional()?)
    }

    fn is_blocked(&self, class: &ClassId) -> Result<bool> {
        let conn = self.lock()?;
        Ok(conn
            .query_row(SELECT_BLOCKED, [class.to_string()], |_| Ok(()))
            .optional()?
            .is_some())
    }
}

impl RegistryWriter for SqliteRegistry {
    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(UPSERT_VALUE, [normalize_key(key).as_str(), value])?;
        Ok(())
    }

    fn block(&self, class: &ClassId) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(INSERT_BLOCKED, [class.to_string()])?;
        Ok(())
    }
}
