//! Opening locked documents.
//!
//! The prompt never decrypts anything itself. It hands the configured path and
//! the entered password to a [`DocumentOpener`], and only observes whether the
//! open succeeded. [`LopdfOpener`] is the production implementation.

use crate::error::Result;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens a document with a password.
pub trait DocumentOpener: Send + Sync {
    /// Open the document at `path` using `password`.
    ///
    /// Any error means "not unlocked"; callers do not inspect the kind.
    fn open(&self, path: &Path, password: &str) -> Result<UnlockedDocument>;
}

impl<T: DocumentOpener + ?Sized> DocumentOpener for &T {
    fn open(&self, path: &Path, password: &str) -> Result<UnlockedDocument> {
        (**self).open(path, password)
    }
}

/// Opener backed by `lopdf`'s standard security handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfOpener;

impl LopdfOpener {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentOpener for LopdfOpener {
    fn open(&self, path: &Path, password: &str) -> Result<UnlockedDocument> {
        let data = std::fs::read(path)?;
        let mut document = Document::load_mem(&data)?;

        // Documents with an empty user password come back already decrypted.
        if document.is_encrypted() {
            document.decrypt(password)?;
        } else {
            debug!(path = %path.display(), "document is not locked");
        }

        Ok(UnlockedDocument {
            path: path.to_path_buf(),
            document,
        })
    }
}

/// Report whether the file at `path` still needs a password after loading.
pub fn is_locked(path: &Path) -> Result<bool> {
    let data = std::fs::read(path)?;
    let document = Document::load_mem(&data)?;
    Ok(document.is_encrypted())
}

/// A document that was opened successfully.
#[derive(Debug, Clone)]
pub struct UnlockedDocument {
    path: PathBuf,
    document: Document,
}

impl UnlockedDocument {
    /// Wrap an already opened document.
    pub fn new(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Number of pages reachable from the page tree.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// PDF header version, e.g. `"1.4"`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Write the opened document to `path`.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.document.save(path)?;
        Ok(())
    }
}
