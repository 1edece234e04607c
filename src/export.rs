// src/export.rs
//
// Agenda record → pretty-printed agenda.json on disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::record::AgendaRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize agenda record")]
    Json(#[from] serde_json::Error),
    #[error("could not write {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub fn to_pretty_json(record: &AgendaRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Write the record as pretty JSON. Parent directories are created on
/// demand. Returns the path actually written.
pub fn write_json(path: &Path, record: &AgendaRecord) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).map_err(|source| ExportError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let mut contents = to_pretty_json(record)?;
    contents.push('\n');
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
