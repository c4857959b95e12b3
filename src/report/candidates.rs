//! Candidate hand-off file
//!
//! The detection pass can write its code candidates to a plain text file so a
//! later run can verify them without detecting again. One path per line,
//! relative to the project root. Blank lines and `#` comments are ignored.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CandidateListError {
    #[error("Failed to read candidate list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write candidate list {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render paths relative to `root`, one per line
pub fn format_candidates(root: &Path, candidates: &[PathBuf]) -> String {
    let mut out = String::from("# Dead-file candidates, one path per line\n");
    for path in candidates {
        let relative = path.strip_prefix(root).unwrap_or(path);
        out.push_str(&relative.to_string_lossy());
        out.push('\n');
    }
    out
}

/// Parse a candidate list. Paths are returned as written.
pub fn parse_candidates(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

pub fn write_candidates(path: &Path, root: &Path, candidates: &[PathBuf]) -> Result<(), CandidateListError> {
    std::fs::write(path, format_candidates(root, candidates)).map_err(|source| {
        CandidateListError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Read a candidate list, resolving each entry against `root`
pub fn read_candidates(path: &Path, root: &Path) -> Result<Vec<PathBuf>, CandidateListError> {
    let text = std::fs::read_to_string(path).map_err(|source| CandidateListError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_candidates(&text)
        .into_iter()
        .map(|candidate| root.join(candidate))
        .collect())
}
