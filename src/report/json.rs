use crate::analysis::{Confidence, DetectionReport, VerificationReport};
use crate::diagnostics::Diagnostic;
use crate::parser::ReferenceCategory;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
    root: PathBuf,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>, root: PathBuf) -> Self {
        Self { output_path, root }
    }

    pub fn report(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> Result<()> {
        let json = self.render(detection, verification)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }

    pub fn render(
        &self,
        detection: Option<&DetectionReport>,
        verification: Option<&VerificationReport>,
    ) -> Result<String> {
        let report = JsonReport::build(&self.root, detection, verification);
        serde_json::to_string_pretty(&report).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detection: Option<JsonDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<JsonVerification>,
    diagnostics: Vec<&'a Diagnostic>,
}

#[derive(Serialize)]
struct JsonDetection {
    alive_count: usize,
    dead_code_units: Vec<String>,
    dead_assets: Vec<String>,
    dead_layouts: Vec<String>,
    candidates: Vec<JsonCandidate>,
    stats: JsonStats,
}

#[derive(Serialize)]
struct JsonCandidate {
    code: &'static str,
    kind: &'static str,
    reason: &'static str,
    name: String,
    file: String,
    message: String,
    declared_types: Vec<String>,
}

#[derive(Serialize)]
struct JsonStats {
    code_units: usize,
    assets: usize,
    layouts: usize,
    manifest_present: bool,
    manifest_declared: usize,
    mentioned_symbols: usize,
    imported_modules: usize,
    declared_types: usize,
}

#[derive(Serialize)]
struct JsonVerification {
    total_candidates: usize,
    records: Vec<JsonRecord>,
    summary: JsonConfidenceSummary,
}

#[derive(Serialize)]
struct JsonRecord {
    file: String,
    confidence: &'static str,
    recommendation: &'static str,
    in_build_phase: bool,
    total_references: usize,
    references: BTreeMap<ReferenceCategory, Vec<String>>,
}

#[derive(Serialize)]
struct JsonConfidenceSummary {
    high: usize,
    medium: usize,
    low: usize,
    very_low: usize,
}

impl JsonDetection {
    fn build(root: &Path, detection: &DetectionReport) -> Self {
        let paths = |list: &[PathBuf]| -> Vec<String> {
            list.iter().map(|p| display_path(root, p)).collect()
        };

        let candidates = detection
            .candidates
            .iter()
            .map(|c| JsonCandidate {
                code: c.reason.code(),
                kind: c.kind.as_str(),
                reason: c.reason.as_str(),
                name: c.name.clone(),
                file: display_path(root, &c.path),
                message: c.message(),
                declared_types: c.declared_types.clone(),
            })
            .collect();

        let stats = &detection.stats;
        Self {
            alive_count: detection.alive_count,
            dead_code_units: paths(&detection.dead_code_units),
            dead_assets: paths(&detection.dead_assets),
            dead_layouts: paths(&detection.dead_layouts),
            candidates,
            stats: JsonStats {
                code_units: stats.code_units,
                assets: stats.assets,
                layouts: stats.layouts,
                manifest_present: stats.manifest_present,
                manifest_declared: stats.manifest_declared,
                mentioned_symbols: stats.mentioned_symbols,
                imported_modules: stats.imported_modules,
                declared_types: stats.declared_types,
            },
        }
    }
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

impl<'a> JsonReport<'a> {
    fn build(
        root: &Path,
        detection: Option<&'a DetectionReport>,
        verification: Option<&'a VerificationReport>,
    ) -> Self {
        let paths = |list: &[PathBuf]| -> Vec<String> {
            list.iter().map(|p| display_path(root, p)).collect()
        };

        let detection_json = detection.map(|detection| JsonDetection::build(root, detection));

        let verification_json = verification.map(|v| JsonVerification {
            total_candidates: v.records.len(),
            records: v
                .records
                .iter()
                .map(|r| JsonRecord {
                    file: display_path(root, &r.path),
                    confidence: r.confidence.as_str(),
                    recommendation: r.recommendation(),
                    in_build_phase: r.in_build_phase,
                    total_references: r.total_references,
                    references: r
                        .references
                        .iter()
                        .map(|(category, files)| (*category, paths(files)))
                        .collect(),
                })
                .collect(),
            summary: JsonConfidenceSummary {
                high: v.count(Confidence::High),
                medium: v.count(Confidence::Medium),
                low: v.count(Confidence::Low),
                very_low: v.count(Confidence::VeryLow),
            },
        });

        let mut diagnostics: Vec<&Diagnostic> = detection
            .map(|d| d.diagnostics.iter().collect())
            .unwrap_or_default();
        if let Some(v) = verification {
            for d in &v.diagnostics {
                if !diagnostics.contains(&d) {
                    diagnostics.push(d);
                }
            }
        }

        Self {
            version: "1.0",
            detection: detection_json,
            verification: verification_json,
            diagnostics,
        }
    }
}
