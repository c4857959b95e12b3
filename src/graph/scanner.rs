// Parallel project scanner using rayon

use crate::diagnostics::{Diagnostic, ScanError};
use crate::discovery::TextSource;
use crate::parser::PatternLibrary;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Evidence extracted from one code unit. The unit's text is dropped once
/// extraction is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeUnit {
    pub path: PathBuf,

    /// Path stem, e.g. `FeedViewController`
    pub base_name: String,

    /// Last path component, e.g. `FeedViewController.swift`
    pub file_name: String,

    pub imports: BTreeSet<String>,
    pub declared_types: BTreeSet<String>,
    pub symbols: BTreeSet<String>,
    pub resource_literals: BTreeSet<String>,
    pub layout_literals: BTreeSet<String>,
}

impl CodeUnit {
    pub fn from_text(path: PathBuf, text: &str, patterns: &PatternLibrary) -> Self {
        let base_name = stem_of(&path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            base_name,
            file_name,
            imports: patterns.extract_imports(text),
            declared_types: patterns.extract_declared_types(text),
            symbols: patterns.extract_type_like_identifiers(text),
            resource_literals: patterns.extract_resource_literals(text),
            layout_literals: patterns.extract_layout_name_literals(text),
            path,
        }
    }
}

/// File stem as an owned string (`icon.imageset` -> `icon`)
pub(crate) fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Units that were scanned plus the ones that had to be skipped
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Scanned units, in input order
    pub units: Vec<CodeUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Applies the pattern library to every code unit
pub struct ProjectScanner<'a> {
    patterns: &'a PatternLibrary,
    progress: ProgressBar,
}

impl<'a> ProjectScanner<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self {
            patterns,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report per-unit progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Scan all units in parallel. A unit that cannot be read is reported
    /// and left out; it never stops the others.
    pub fn scan<S: TextSource>(&self, paths: &[PathBuf], source: &S) -> ScanOutput {
        debug!("Scanning {} code units...", paths.len());

        let results: Vec<Result<CodeUnit, ScanError>> = paths
            .par_iter()
            .map(|path| {
                let result = self.scan_unit(path, source);
                self.progress.inc(1);
                result
            })
            .collect();

        self.progress.finish_and_clear();

        let mut output = ScanOutput::default();
        for result in results {
            match result {
                Ok(unit) => output.units.push(unit),
                Err(e) => {
                    warn!("{} (skipping)", e);
                    output.diagnostics.push(e.into());
                }
            }
        }

        debug!(
            "Scanned {} units, skipped {}",
            output.units.len(),
            output.diagnostics.len()
        );
        output
    }

    fn scan_unit<S: TextSource>(&self, path: &Path, source: &S) -> Result<CodeUnit, ScanError> {
        let text = source
            .read_text(path)
            .map_err(|e| ScanError::UnreadableUnit {
                path: path.to_path_buf(),
                source: e,
            })?;

        trace!("Extracting references from {}", path.display());
        Ok(CodeUnit::from_text(path.to_path_buf(), &text, self.patterns))
    }
}
