mod file_finder;
mod source;

pub use file_finder::{FileFinder, FileKind, ProjectFiles};
pub use source::{FsTextSource, TextSource};
