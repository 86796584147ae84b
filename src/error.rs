//! Error handling for dumpctx
//!
//! Fatal failures (walk, path resolution, output write, configuration) are
//! represented here. Per-file read failures are not errors at this level:
//! they are recorded on the snapshot as skipped files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for dumpctx operations
#[derive(Error, Debug)]
pub enum DumpCtxError {
    /// Traversal of the scan root failed
    #[error("Error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A walked entry could not be expressed relative to the scan root
    #[error("Error resolving path {path}: not under {root}")]
    PathResolution { path: PathBuf, root: PathBuf },

    /// The assembled document could not be written
    #[error("Error writing output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for dumpctx operations
pub type Result<T> = std::result::Result<T, DumpCtxError>;

/// Creates a DumpCtxError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DumpCtxError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets io::Result-returning callers (and tests) use `?` on dumpctx results
impl From<DumpCtxError> for io::Error {
    fn from(err: DumpCtxError) -> Self {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_dir(ok: bool) -> Result<()> {
        crate::ensure!(ok, Config, "Target directory not found: {}", "nowhere");
        Ok(())
    }

    #[test]
    fn ensure_builds_config_error() {
        assert!(check_dir(true).is_ok());
        let err = check_dir(false).unwrap_err();
        assert!(matches!(err, DumpCtxError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Target directory not found: nowhere"
        );
    }

    #[test]
    fn messages_name_the_path() {
        let err = DumpCtxError::PathResolution {
            path: PathBuf::from("/a/b"),
            root: PathBuf::from("/c"),
        };
        assert_eq!(err.to_string(), "Error resolving path /a/b: not under /c");

        let err = DumpCtxError::Write {
            path: PathBuf::from("/c/context.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Error writing output file /c/context.txt: denied"
        );
    }
}
