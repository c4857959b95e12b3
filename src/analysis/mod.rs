mod detector;
mod liveness;
mod verification;

pub use detector::DeadFileDetector;
pub use liveness::{AliveReason, LivenessClassifier, Verdict};
pub use verification::{Corpus, VerificationScorer};

use crate::diagnostics::Diagnostic;
use crate::discovery::FileKind;
use crate::parser::ReferenceCategory;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How safe deleting a dead-file candidate is judged to be
///
/// Ordered so that `High` (safest to delete) is the greatest grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    /// Many references, do not delete
    VeryLow,
    /// Several references or compiled into the build
    Low,
    /// A couple of references, not compiled
    Medium,
    /// No references and not compiled
    High,
}

impl Confidence {
    /// Grade from the verification evidence; first matching rule wins.
    /// Being in a build phase caps the grade at `Low`.
    pub fn grade(total_references: usize, in_build_phase: bool) -> Self {
        if total_references == 0 && !in_build_phase {
            Confidence::High
        } else if total_references <= 2 && !in_build_phase {
            Confidence::Medium
        } else if total_references <= 5 || in_build_phase {
            Confidence::Low
        } else {
            Confidence::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::VeryLow => "very-low",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Confidence::VeryLow => "Very Low",
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Confidence::High => "SAFE TO DELETE - No references found",
            Confidence::Medium => "PROBABLY SAFE - Few references, manual review recommended",
            Confidence::Low => "CAUTION - Multiple references or included in build",
            Confidence::VeryLow => "DO NOT DELETE - Likely in use",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "high" => Ok(Confidence::High),
            "medium" => Ok(Confidence::Medium),
            "low" => Ok(Confidence::Low),
            "very-low" | "verylow" => Ok(Confidence::VeryLow),
            other => Err(format!("unknown confidence level '{}'", other)),
        }
    }
}

/// Why a file was classified dead by the first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeadReason {
    /// Code unit is not declared in the build manifest
    NotInManifest,
    /// Code unit is declared but nothing mentions its name
    NoSymbolReference,
    /// Asset bundle name never appears as a resource literal
    NoResourceReference,
    /// Layout name never appears as a layout literal
    NoLayoutReference,
}

impl DeadReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadReason::NotInManifest => "not-in-manifest",
            DeadReason::NoSymbolReference => "no-symbol-reference",
            DeadReason::NoResourceReference => "no-resource-reference",
            DeadReason::NoLayoutReference => "no-layout-reference",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DeadReason::NotInManifest => "DF001",
            DeadReason::NoSymbolReference => "DF002",
            DeadReason::NoResourceReference => "DF003",
            DeadReason::NoLayoutReference => "DF004",
        }
    }

    pub fn message(&self, name: &str) -> String {
        match self {
            DeadReason::NotInManifest => {
                format!("'{}' is not part of the build manifest", name)
            }
            DeadReason::NoSymbolReference => {
                format!("'{}' is never referenced by name", name)
            }
            DeadReason::NoResourceReference => {
                format!("Asset '{}' is never loaded from code", name)
            }
            DeadReason::NoLayoutReference => {
                format!("Layout '{}' is never loaded from code", name)
            }
        }
    }
}

impl std::fmt::Display for DeadReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file provisionally classified as unreferenced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadCandidate {
    pub path: PathBuf,

    /// Base name the classification was keyed on
    pub name: String,

    pub kind: FileKind,
    pub reason: DeadReason,

    /// Types declared in the file (code units only)
    pub declared_types: Vec<String>,
}

impl DeadCandidate {
    pub fn message(&self) -> String {
        self.reason.message(&self.name)
    }
}

/// Verification evidence and grade for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecord {
    pub path: PathBuf,

    /// Referencing files per category, sorted by path
    pub references: BTreeMap<ReferenceCategory, Vec<PathBuf>>,

    pub in_build_phase: bool,
    pub total_references: usize,
    pub confidence: Confidence,
}

impl VerificationRecord {
    pub fn new(
        path: PathBuf,
        references: BTreeMap<ReferenceCategory, Vec<PathBuf>>,
        in_build_phase: bool,
    ) -> Self {
        let total_references = references.values().map(|files| files.len()).sum();
        Self {
            path,
            references,
            in_build_phase,
            total_references,
            confidence: Confidence::grade(total_references, in_build_phase),
        }
    }

    pub fn recommendation(&self) -> &'static str {
        self.confidence.recommendation()
    }

    /// Referencing files for one category (empty if none)
    pub fn referenced_by(&self, category: ReferenceCategory) -> &[PathBuf] {
        self.references
            .get(&category)
            .map(|files| files.as_slice())
            .unwrap_or(&[])
    }
}

/// Counters describing what the detection pass looked at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionStats {
    pub code_units: usize,
    pub assets: usize,
    pub layouts: usize,
    pub manifest_present: bool,
    pub manifest_declared: usize,
    pub mentioned_symbols: usize,
    pub imported_modules: usize,
    /// Type declarations found across all scanned units
    pub declared_types: usize,
}

/// Result of the detection (first) pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionReport {
    /// Files of any kind classified alive
    pub alive_count: usize,
    pub dead_code_units: Vec<PathBuf>,
    pub dead_assets: Vec<PathBuf>,
    pub dead_layouts: Vec<PathBuf>,

    /// All dead files with their reasons, ordered by kind then path
    pub candidates: Vec<DeadCandidate>,

    pub diagnostics: Vec<Diagnostic>,
    pub stats: DetectionStats,
}

impl DetectionReport {
    pub fn total_dead(&self) -> usize {
        self.dead_code_units.len() + self.dead_assets.len() + self.dead_layouts.len()
    }

    /// Code-unit candidates, the input of the verification pass
    pub fn code_candidates(&self) -> Vec<PathBuf> {
        self.dead_code_units.clone()
    }
}

/// Result of the verification (second) pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Ordered by grade (High first) then path
    pub records: Vec<VerificationRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl VerificationReport {
    pub fn count(&self, confidence: Confidence) -> usize {
        self.records.iter().filter(|r| r.confidence == confidence).count()
    }

    /// Drop records graded below `min`
    pub fn retain_at_least(&mut self, min: Confidence) {
        self.records.retain(|r| r.confidence >= min);
    }
}
