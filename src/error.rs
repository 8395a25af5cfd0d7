//! Error types for plugin loading operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading plugins.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A shared library could not be mapped into the process
    #[error("Unable to load plugin {} : {}", .path.display(), .message)]
    LoadFailed {
        /// Path handed to the platform loader
        path: PathBuf,
        /// Platform diagnostic text
        message: String,
    },

    /// The plugin directory could not be read
    #[error("Unable to read plugin directory {} : {}", .path.display(), .source)]
    Enumeration {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// A library handle could not be released
    #[error("Unable to close plugin {} : {}", .path.display(), .message)]
    CloseFailed {
        /// Path the handle was opened from
        path: PathBuf,
        /// Platform diagnostic text
        message: String,
    },
}

impl LoaderError {
    /// Path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoaderError::LoadFailed { path, .. }
            | LoaderError::Enumeration { path, .. }
            | LoaderError::CloseFailed { path, .. } => path,
        }
    }
}

/// Result type for plugin loading operations
pub type Result<T> = std::result::Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failed_message() {
        let err = LoaderError::LoadFailed {
            path: PathBuf::from("/opt/app/audio.ext.so"),
            message: "file too short".into(),
        };

        assert_eq!(
            err.to_string(),
            "Unable to load plugin /opt/app/audio.ext.so : file too short"
        );
        assert_eq!(err.path(), std::path::Path::new("/opt/app/audio.ext.so"));
    }

    #[test]
    fn test_enumeration_keeps_source() {
        let err = LoaderError::Enumeration {
            path: PathBuf::from("plugins"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().starts_with("Unable to read plugin directory plugins : "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
