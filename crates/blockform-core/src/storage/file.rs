//! Project files on disk.

use super::{ProjectDocument, StorageError, StorageResult};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Extension used for project files.
pub const PROJECT_EXTENSION: &str = "bform";

/// Write a project to `path`.
///
/// The JSON goes to a sibling temporary file first and is renamed into place,
/// so an interrupted save never leaves a half-written project behind.
pub fn save_project(path: &Path, document: &ProjectDocument) -> StorageResult<()> {
    let json = document
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut tmp_name = path
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| StorageError::Io(format!("Not a file path: {}", path.display())))?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::Io(format!(
            "Failed to write {}: {}",
            tmp_path.display(),
            e
        )));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
    })?;
    log::info!("Saved {} widgets to {}", document.widgets.len(), path.display());
    Ok(())
}

/// Read and parse a project from `path`.
pub fn load_project(path: &Path) -> StorageResult<ProjectDocument> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    ProjectDocument::from_json(&json).map_err(|e| match e {
        StorageError::Serialization(msg) => {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), msg))
        }
        other => other,
    })
}
