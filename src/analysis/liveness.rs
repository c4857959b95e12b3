//! First-pass liveness decisions
//!
//! Each file kind has its own decision procedure. All of them read from the
//! same immutable [`ReferenceGraph`] and [`ManifestIndex`], so the verdict for
//! one file never depends on the verdict for another.

use super::DeadReason;
use crate::config::Config;
use crate::graph::{CodeUnit, ReferenceGraph};
use crate::parser::ManifestIndex;
use tracing::trace;

/// Why a file was kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliveReason {
    /// Some unit mentions the name (or a longer name containing it)
    Referenced,
    /// Matches a naming convention the framework loads implicitly
    StructuralException,
    /// Matches a user-configured retain pattern
    Retained,
    /// The reserved bootstrap layout
    Bootstrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Alive(AliveReason),
    Dead(DeadReason),
}

impl Verdict {
    pub fn is_dead(&self) -> bool {
        matches!(self, Verdict::Dead(_))
    }
}

/// Classifies code units, assets and layouts against the aggregated evidence
pub struct LivenessClassifier<'a> {
    config: &'a Config,
    manifest: &'a ManifestIndex,
    graph: &'a ReferenceGraph,
}

impl<'a> LivenessClassifier<'a> {
    pub fn new(config: &'a Config, manifest: &'a ManifestIndex, graph: &'a ReferenceGraph) -> Self {
        Self {
            config,
            manifest,
            graph,
        }
    }

    /// Manifest membership is checked first and cannot be overridden by
    /// references, exceptions or retain patterns.
    pub fn classify_code(&self, unit: &CodeUnit) -> Verdict {
        if !self.manifest.is_declared(&unit.file_name) {
            trace!("{} not declared in manifest", unit.file_name);
            return Verdict::Dead(DeadReason::NotInManifest);
        }

        if self.graph.is_symbol_referenced(&unit.base_name) {
            return Verdict::Alive(AliveReason::Referenced);
        }

        if self.config.rules.is_structural_exception(&unit.base_name) {
            trace!("{} kept by naming convention", unit.base_name);
            return Verdict::Alive(AliveReason::StructuralException);
        }

        if self.config.should_retain(&unit.base_name) {
            trace!("{} kept by retain pattern", unit.base_name);
            return Verdict::Alive(AliveReason::Retained);
        }

        Verdict::Dead(DeadReason::NoSymbolReference)
    }

    pub fn classify_asset(&self, name: &str) -> Verdict {
        if self.graph.is_asset_mentioned(name) {
            Verdict::Alive(AliveReason::Referenced)
        } else {
            Verdict::Dead(DeadReason::NoResourceReference)
        }
    }

    pub fn classify_layout(&self, name: &str) -> Verdict {
        if self.config.rules.is_bootstrap_layout(name) {
            Verdict::Alive(AliveReason::Bootstrap)
        } else if self.graph.is_layout_mentioned(name) {
            Verdict::Alive(AliveReason::Referenced)
        } else {
            Verdict::Dead(DeadReason::NoLayoutReference)
        }
    }
}
