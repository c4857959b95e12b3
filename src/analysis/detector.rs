// Detection and verification pipeline

use super::{
    Corpus, DeadCandidate, DeadReason, DetectionReport, DetectionStats, LivenessClassifier,
    Verdict, VerificationReport, VerificationScorer,
};
use crate::config::Config;
use crate::diagnostics::{Diagnostic, ScanError};
use crate::discovery::{FileKind, ProjectFiles, TextSource};
use crate::graph::{stem_of, ProjectScanner, ReferenceGraph};
use crate::parser::{ManifestIndex, PatternLibrary};
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Runs the two passes over a discovered project
pub struct DeadFileDetector<'a> {
    config: &'a Config,
    patterns: PatternLibrary,
    show_progress: bool,
}

impl<'a> DeadFileDetector<'a> {
    /// Compile the configured rule vocabulary
    pub fn new(config: &'a Config) -> Result<Self> {
        let patterns = PatternLibrary::new(&config.rules, &config.project.code_extension)
            .into_diagnostic()
            .wrap_err("Invalid pattern in rules configuration")?;

        Ok(Self {
            config,
            patterns,
            show_progress: false,
        })
    }

    /// Show progress bars while scanning and verifying
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// First pass: classify every code unit, asset and layout
    pub fn detect<S: TextSource>(&self, files: &ProjectFiles, source: &S) -> DetectionReport {
        let mut report = DetectionReport::default();

        let manifest = self.load_manifest(files, source, &mut report.diagnostics);

        if files.code_units.is_empty() {
            warn!("No code units found under {}", files.root.display());
            report.diagnostics.push(ScanError::EmptyCorpus.into());
        }

        let scan = ProjectScanner::new(&self.patterns)
            .with_progress(self.progress_bar(files.code_units.len()))
            .scan(&files.code_units, source);
        report.diagnostics.extend(scan.diagnostics);

        let graph = ReferenceGraph::from_units(&scan.units);
        let classifier = LivenessClassifier::new(self.config, &manifest, &graph);

        for unit in &scan.units {
            match classifier.classify_code(unit) {
                Verdict::Alive(_) => report.alive_count += 1,
                Verdict::Dead(reason) => {
                    report.dead_code_units.push(unit.path.clone());
                    report.candidates.push(DeadCandidate {
                        path: unit.path.clone(),
                        name: unit.base_name.clone(),
                        kind: FileKind::Code,
                        reason,
                        declared_types: unit.declared_types.iter().cloned().collect(),
                    });
                }
            }
        }

        for path in &files.assets {
            let name = stem_of(path);
            match classifier.classify_asset(&name) {
                Verdict::Alive(_) => report.alive_count += 1,
                Verdict::Dead(reason) => {
                    report.dead_assets.push(path.clone());
                    report.candidates.push(resource_candidate(path, name, FileKind::Asset, reason));
                }
            }
        }

        for path in &files.layouts {
            let name = stem_of(path);
            match classifier.classify_layout(&name) {
                Verdict::Alive(_) => report.alive_count += 1,
                Verdict::Dead(reason) => {
                    report.dead_layouts.push(path.clone());
                    report.candidates.push(resource_candidate(path, name, FileKind::Layout, reason));
                }
            }
        }

        report.dead_code_units.sort();
        report.dead_assets.sort();
        report.dead_layouts.sort();
        report
            .candidates
            .sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.path.cmp(&b.path)));

        report.stats = DetectionStats {
            code_units: scan.units.len(),
            assets: files.assets.len(),
            layouts: files.layouts.len(),
            manifest_present: manifest.is_present(),
            manifest_declared: manifest.declared().len(),
            mentioned_symbols: graph.mentioned_symbols().len(),
            imported_modules: graph.imported_modules().len(),
            declared_types: graph.declared_count(),
        };

        info!(
            "Detection finished: {} alive, {} dead ({} code, {} assets, {} layouts)",
            report.alive_count,
            report.total_dead(),
            report.dead_code_units.len(),
            report.dead_assets.len(),
            report.dead_layouts.len()
        );
        report
    }

    /// Second pass: grade code-unit candidates against the whole corpus.
    ///
    /// Relative candidate paths are resolved against the project root.
    pub fn verify<S: TextSource>(
        &self,
        files: &ProjectFiles,
        candidates: &[PathBuf],
        source: &S,
    ) -> VerificationReport {
        let mut report = VerificationReport::default();

        let manifest = self.load_manifest(files, source, &mut report.diagnostics);
        let (corpus, diagnostics) = Corpus::load(&files.code_units, source);
        report.diagnostics.extend(diagnostics);

        let candidates: Vec<PathBuf> = candidates
            .iter()
            .map(|c| {
                if c.is_absolute() || c.starts_with(&files.root) {
                    c.clone()
                } else {
                    files.root.join(c)
                }
            })
            .collect();
        debug!(
            "Verifying {} candidates against {} units",
            candidates.len(),
            corpus.len()
        );

        report.records = VerificationScorer::new(&self.patterns, &manifest, &corpus)
            .with_progress(self.progress_bar(candidates.len()))
            .score_all(&candidates);

        info!("Verification finished: {} candidates graded", report.records.len());
        report
    }

    fn load_manifest<S: TextSource>(
        &self,
        files: &ProjectFiles,
        source: &S,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ManifestIndex {
        let text = source.read_manifest_text(files.manifest.as_deref());
        if text.is_none() {
            warn!("Build manifest not found; every code unit counts as undeclared");
            diagnostics.push(
                ScanError::MissingManifest {
                    path: files.manifest.clone(),
                }
                .into(),
            );
        }
        ManifestIndex::parse(&self.patterns, text.as_deref())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

fn resource_candidate(path: &Path, name: String, kind: FileKind, reason: DeadReason) -> DeadCandidate {
    DeadCandidate {
        path: path.to_path_buf(),
        name,
        kind,
        reason,
        declared_types: Vec::new(),
    }
}
