//! Error types for storage and rendering.
//!
//! Style validation never produces an error; invalid values degrade to the
//! registry default. Errors are reserved for failures the host must see:
//! unreadable settings records and broken templates.

use std::path::PathBuf;

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, saving or rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A settings record could not be read or written.
    #[error("Failed to access settings record '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings record could not be encoded or decoded.
    #[error("Settings record '{record}' is not valid JSON: {source}")]
    Json {
        record: String,
        #[source]
        source: serde_json::Error,
    },

    /// A template failed to compile or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON error.
    pub fn json(record: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            record: record.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = Error::io(
            "/tmp/colors.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/colors.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::json("cg_media_library_item_colors", source);
        assert!(err.to_string().contains("cg_media_library_item_colors"));
    }
}
