//! Storage layer for gradebook.
//!
//! The whole gradebook lives in one JSON document. It is read once when a
//! session starts and written once when it ends; there are no partial reads
//! or writes.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::state::GradebookState;

/// Indentation used in the saved document.
const INDENT: &[u8] = b"    ";

/// File-backed store for a [`GradebookState`].
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the gradebook document.
    path: PathBuf,
}

impl Store {
    /// Create a store for the document at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the gradebook document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved gradebook.
    ///
    /// A missing document is not an error; it yields an empty gradebook.
    ///
    /// # Errors
    ///
    /// - [`Error::Storage`] if the document exists but cannot be read
    /// - [`Error::CorruptData`] if it is not a valid gradebook document,
    ///   including records with out-of-range scores or credits
    pub fn load(&self) -> Result<GradebookState> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No gradebook at {}, starting empty",
                    self.path.display()
                );
                return Ok(GradebookState::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(Error::corrupt(&self.path, e.to_string()));
            }
            Err(source) => return Err(Error::storage("read", &self.path, source)),
        };

        let state: GradebookState = serde_json::from_str(&text)
            .map_err(|e| Error::corrupt(&self.path, e.to_string()))?;

        for (code, record) in state.iter() {
            record
                .validate()
                .map_err(|e| Error::corrupt(&self.path, format!("course {code}: {e}")))?;
        }

        info!(
            "Loaded {} courses from {}",
            state.len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Save the gradebook, replacing any previous document.
    ///
    /// The document is written to a temporary file next to the target and
    /// then renamed over it, so readers see either the old or the new
    /// document, never a truncated one. Missing parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if any file operation fails, or
    /// [`Error::Json`] if serialization fails.
    pub fn save(&self, state: &GradebookState) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|source| Error::storage("create directory for", dir, source))?;
        }

        let bytes = to_document(state)?;

        debug!(
            "Writing {} bytes to temporary file in {}",
            bytes.len(),
            dir.display()
        );
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|source| Error::storage("write", &self.path, source))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| Error::storage("write", &self.path, source))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::storage("replace", &self.path, e.error))?;

        info!("Saved {} courses to {}", state.len(), self.path.display());
        Ok(())
    }
}

/// Render the on-disk form: pretty JSON with four-space indentation.
fn to_document(state: &GradebookState) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    state.serialize(&mut ser)?;
    bytes.push(b'\n');
    Ok(bytes)
}
