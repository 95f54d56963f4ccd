//! # Filesystem Collaborator
//!
//! The three asynchronous primitives the walker needs. Every call may fail
//! with an `io::Error`; the walker records the failure against the path.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Sockets, FIFOs, devices: never visited.
    Other,
}

/// Minimal async filesystem used by the tree walker.
#[async_trait]
pub trait SnippetFs: Send + Sync + 'static {
    /// Classify a path, following symlinks.
    async fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Names of a directory's children.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Read a file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`SnippetFs`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl SnippetFs for TokioFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
