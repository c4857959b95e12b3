use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Capability to read a project file as text.
///
/// The analysis core only ever reads through this trait, so it can run over
/// a directory on disk or over an in-memory corpus.
pub trait TextSource: Sync {
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Manifest text, or `None` when there is no manifest or it cannot be read
    fn read_manifest_text(&self, path: Option<&Path>) -> Option<String> {
        path.and_then(|p| self.read_text(p).ok())
    }
}

/// Reads files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextSource;

impl TextSource for FsTextSource {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl TextSource for HashMap<PathBuf, String> {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not in corpus", path.display()))
        })
    }
}
