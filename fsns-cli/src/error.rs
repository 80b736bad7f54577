//! CLI error type and exit codes.
//!
//! Library errors are wrapped and mapped to a small set of exit codes so
//! scripts can tell a missing item apart from a malformed invocation.

use std::fmt;

use fsns::Error as LibError;

/// Errors surfaced by the `fsns` binary.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// The command ran but found nothing to report.
    SemanticFailure(String),
}

impl CliError {
    /// Exit code for this error.
    ///
    /// - 1: not found, access denied, or nothing to report
    /// - 4: invalid arguments
    /// - 5: I/O error
    /// - 6: other library error
    /// - 7: configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                e if e.is_not_found() || e.is_access_denied() => 1,
                e if e.is_invalid_argument() => 4,
                LibError::Io(_) | LibError::Enumeration { .. } => 5,
                LibError::Configuration(_) | LibError::Validation { .. } => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsns::ClassId;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let missing = CliError::from(LibError::PathNotFound {
            path: PathBuf::from("/nope"),
        });
        assert_eq!(missing.exit_code(), 1);

        let denied = CliError::from(LibError::AccessDenied {
            class: ClassId::from_u128(1),
        });
        assert_eq!(denied.exit_code(), 1);

        let bad = CliError::from(LibError::InvalidArgument {
            reason: "empty".into(),
        });
        assert_eq!(bad.exit_code(), 4);

        let io = CliError::from(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 5);

        assert_eq!(CliError::Config("x".into()).exit_code(), 7);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
    }
}
