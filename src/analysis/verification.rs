//! Second-pass verification of dead-file candidates
//!
//! The corpus is read once into a [`Corpus`] snapshot. Every candidate is
//! then scored independently against that snapshot, so candidates can be
//! scored in parallel without any shared mutable state.

use super::{Confidence, VerificationRecord};
use crate::diagnostics::{Diagnostic, ScanError};
use crate::discovery::TextSource;
use crate::graph::stem_of;
use crate::parser::{ManifestIndex, PatternLibrary, ReferenceCategory};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Immutable text snapshot of every readable code unit
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    texts: Vec<(PathBuf, String)>,
}

impl Corpus {
    /// Read all units once. Unreadable units are left out and reported.
    pub fn load<S: TextSource>(paths: &[PathBuf], source: &S) -> (Self, Vec<Diagnostic>) {
        let results: Vec<Result<(PathBuf, String), ScanError>> = paths
            .par_iter()
            .map(|path| {
                source
                    .read_text(path)
                    .map(|text| (path.clone(), text))
                    .map_err(|e| ScanError::UnreadableUnit {
                        path: path.clone(),
                        source: e,
                    })
            })
            .collect();

        let mut texts = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for result in results {
            match result {
                Ok(entry) => texts.push(entry),
                Err(e) => {
                    warn!("{} (skipping)", e);
                    diagnostics.push(e.into());
                }
            }
        }

        debug!("Loaded {} units into the verification corpus", texts.len());
        (Self { texts }, diagnostics)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.texts.iter().map(|(p, t)| (p.as_path(), t.as_str()))
    }
}

/// Grades candidates by how many other units still reference them
pub struct VerificationScorer<'a> {
    patterns: &'a PatternLibrary,
    manifest: &'a ManifestIndex,
    corpus: &'a Corpus,
    progress: ProgressBar,
}

impl<'a> VerificationScorer<'a> {
    pub fn new(patterns: &'a PatternLibrary, manifest: &'a ManifestIndex, corpus: &'a Corpus) -> Self {
        Self {
            patterns,
            manifest,
            corpus,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Score one candidate. The candidate's own file never counts as a
    /// reference to itself.
    pub fn score(&self, candidate: &Path) -> Result<VerificationRecord, regex::Error> {
        let base_name = stem_of(candidate);
        let file_name = candidate
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut references: BTreeMap<ReferenceCategory, Vec<PathBuf>> = BTreeMap::new();

        if !base_name.is_empty() {
            let matchers = self.patterns.reference_matchers(&base_name)?;
            for (path, text) in self.corpus.iter() {
                if path == candidate {
                    continue;
                }
                for category in matchers.matched_categories(text) {
                    references.entry(category).or_default().push(path.to_path_buf());
                }
            }
        }

        for files in references.values_mut() {
            files.sort();
        }

        let record = VerificationRecord::new(
            candidate.to_path_buf(),
            references,
            self.manifest.in_build_phase(&file_name),
        );
        debug!(
            "{}: {} references, in build phase: {}, confidence {}",
            base_name, record.total_references, record.in_build_phase, record.confidence
        );
        Ok(record)
    }

    /// Score all candidates in parallel, ordered by grade (High first) then path
    pub fn score_all(&self, candidates: &[PathBuf]) -> Vec<VerificationRecord> {
        let mut records: Vec<VerificationRecord> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let result = self.score(candidate);
                self.progress.inc(1);
                match result {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Cannot build patterns for {}: {}", candidate.display(), e);
                        None
                    }
                }
            })
            .collect();

        self.progress.finish_and_clear();

        records.sort_by(|a, b| {
            b.confidence
                .cmp(&a.confidence)
                .then_with(|| a.path.cmp(&b.path))
        });
        records.dedup_by(|a, b| a.path == b.path);
        records
    }

    /// Count of candidates per grade, highest grade first
    pub fn summarize(records: &[VerificationRecord]) -> Vec<(Confidence, usize)> {
        [
            Confidence::High,
            Confidence::Medium,
            Confidence::Low,
            Confidence::VeryLow,
        ]
        .into_iter()
        .map(|grade| (grade, records.iter().filter(|r| r.confidence == grade).count()))
        .collect()
    }
}
