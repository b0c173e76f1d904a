//! Project documents and the project file format.

mod file;

pub use file::{PROJECT_EXTENSION, load_project, save_project};

use crate::property::PropertyMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version written into new project documents.
pub const FORMAT_VERSION: &str = "1.0";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Unsupported project version: {0}")]
    UnsupportedVersion(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// One persisted widget. Ids are not stored; loading assigns fresh ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    #[serde(alias = "widget_type")]
    pub type_tag: String,
    pub properties: PropertyMap,
}

/// Serialized form of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub version: String,
    /// Widgets in creation order.
    pub widgets: Vec<WidgetRecord>,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDocument {
    /// Create an empty document at the current format version.
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            widgets: Vec::new(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document, rejecting versions with a different major number.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let document: ProjectDocument =
            serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
        document.check_version()?;
        Ok(document)
    }

    fn check_version(&self) -> StorageResult<()> {
        let major = |v: &str| v.split('.').next().map(str::trim).map(str::to_owned);
        if major(&self.version) == major(FORMAT_VERSION) {
            Ok(())
        } else {
            Err(StorageError::UnsupportedVersion(self.version.clone()))
        }
    }
}
