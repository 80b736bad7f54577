//! SQL for the registry store.

/// Schema version written to the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value metadata, including the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Type keys. `path` is a normalized backslash-separated key path such as
/// `.txt` or `txtfile\shellex\IconHandler`; `value` is its default value.
pub const CREATE_TYPE_KEYS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS type_keys (
        path TEXT PRIMARY KEY NOT NULL COLLATE NOCASE,
        value TEXT NOT NULL
    )";

/// Handler classes that must never be instantiated.
pub const CREATE_BLOCKED_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS blocked_classes (
        class_id TEXT PRIMARY KEY NOT NULL COLLATE NOCASE
    )";

pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

pub const SELECT_VALUE: &str = "SELECT value FROM type_keys WHERE path = ?";

pub const UPSERT_VALUE: &str = "INSERT OR REPLACE INTO type_keys (path, value) VALUES (?, ?)";

pub const DELETE_VALUE: &str = "DELETE FROM type_keys WHERE path = ?";

pub const SELECT_ALL_VALUES: &str = "SELECT path, value FROM type_keys ORDER BY path";

pub const SELECT_BLOCKED: &str = "SELECT 1 FROM blocked_classes WHERE class_id = ?";

pub const INSERT_BLOCKED: &str = "INSERT OR IGNORE INTO blocked_classes (class_id) VALUES (?)";

pub const DELETE_BLOCKED: &str = "DELETE FROM blocked_classes WHERE class_id = ?";
