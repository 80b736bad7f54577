//! Schema initialization and version checks.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BLOCKED_TABLE, CREATE_METADATA_TABLE, CREATE_TYPE_KEYS_TABLE, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Create all tables on a fresh database.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_TYPE_KEYS_TABLE, [])?;
    conn.execute(CREATE_BLOCKED_TABLE, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// Read the stored schema version; 0 means uninitialized.
///
/// # Errors
///
/// Returns an error if the query fails for a reason other than a missing
/// metadata table or row.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref err, _)) if err.code == rusqlite::ErrorCode::Unknown => {
            // no metadata table yet
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Initialize a fresh database, or reject one written by a different schema
/// version.
///
/// # Errors
///
/// Returns [`Error::Validation`] on a version mismatch, or a registry error
/// if a query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version < CURRENT_SCHEMA_VERSION {
        return Err(Error::Validation {
            field: "schema_version".into(),
            message: format!(
                "Registry schema version {version} is older than client version {CURRENT_SCHEMA_VERSION}. Migration not yet implemented."
            ),
        });
    } else if version > CURRENT_SCHEMA_VERSION {
        return Err(Error::Validation {
            field: "schema_version".into(),
            message: format!(
                "Registry schema version {version} is newer than client version {CURRENT_SCHEMA_VERSION}. Please upgrade fsns."
            ),
        });
    }

    Ok(())
}
