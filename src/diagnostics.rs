//! Non-fatal problems collected during a run
//!
//! Nothing in the analysis aborts on a single bad file. Failures are turned
//! into [`Diagnostic`] entries and shipped alongside the results.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Unit-level failures raised while gathering evidence
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Build manifest not found or unreadable")]
    MissingManifest { path: Option<PathBuf> },

    #[error("Failed to read {}: {source}", .path.display())]
    UnreadableUnit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No code units found")]
    EmptyCorpus,
}

impl ScanError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ScanError::MissingManifest { .. } => DiagnosticKind::MissingManifest,
            ScanError::UnreadableUnit { .. } => DiagnosticKind::UnreadableUnit,
            ScanError::EmptyCorpus => DiagnosticKind::EmptyCorpus,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ScanError::MissingManifest { path } => path.as_ref(),
            ScanError::UnreadableUnit { path, .. } => Some(path),
            ScanError::EmptyCorpus => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingManifest,
    UnreadableUnit,
    EmptyCorpus,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingManifest => "missing_manifest",
            DiagnosticKind::UnreadableUnit => "unreadable_unit",
            DiagnosticKind::EmptyCorpus => "empty_corpus",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reported, non-fatal problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl From<ScanError> for Diagnostic {
    fn from(error: ScanError) -> Self {
        Self {
            kind: error.kind(),
            path: error.path().cloned(),
            message: error.to_string(),
        }
    }
}
