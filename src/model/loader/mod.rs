//! Manifest loading from serialized JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use semantic_manifest::model::loader::load_manifest;
//! use std::path::Path;
//!
//! let manifest = load_manifest(Path::new("target/semantic_manifest.json"))?;
//! ```

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::SemanticManifest;

/// Errors that can occur when loading or writing a manifest.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Unsupported file extension
    #[error("Unsupported file extension: {extension}. Supported: .json")]
    UnsupportedExtension { extension: String },

    /// IO error reading or writing the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed manifest document
    #[error("Invalid manifest in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for manifest loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a manifest from a file path.
pub fn load_manifest(path: &Path) -> LoadResult<SemanticManifest> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if extension != "json" {
        return Err(LoadError::UnsupportedExtension {
            extension: extension.to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    load_manifest_from_str(&content, &path.display().to_string())
}

/// Load a manifest from a JSON string (useful for testing).
pub fn load_manifest_from_str(content: &str, filename: &str) -> LoadResult<SemanticManifest> {
    serde_json::from_str(content).map_err(|source| LoadError::Json {
        file: filename.to_string(),
        source,
    })
}

/// Write a manifest as pretty-printed JSON.
pub fn write_manifest(manifest: &SemanticManifest, path: &Path) -> LoadResult<()> {
    let json = serde_json::to_string_pretty(manifest).map_err(|source| LoadError::Json {
        file: path.display().to_string(),
        source,
    })?;
    fs::write(path, json)?;
    Ok(())
}
