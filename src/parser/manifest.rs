use super::PatternLibrary;
use std::collections::BTreeSet;
use tracing::debug;

/// File names an Xcode project manifest declares, built from one text blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestIndex {
    /// Files declared as build inputs (`PBXFileReference`)
    declared: BTreeSet<String>,

    /// Files listed in a Sources build phase
    build_phase: BTreeSet<String>,

    /// Whether any manifest text was available
    present: bool,
}

impl ManifestIndex {
    /// Index the manifest text; absent text yields an empty index
    pub fn parse(patterns: &PatternLibrary, manifest_text: Option<&str>) -> Self {
        let Some(text) = manifest_text else {
            return Self::default();
        };

        let declared = patterns.extract_manifest_declared_files(text);
        let build_phase = patterns.extract_build_phase_files(text);

        debug!(
            "Manifest declares {} files, {} in Sources build phase",
            declared.len(),
            build_phase.len()
        );

        Self {
            declared,
            build_phase,
            present: true,
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Whether the file name is declared as a build input
    pub fn is_declared(&self, file_name: &str) -> bool {
        self.declared.contains(file_name)
    }

    /// Whether the file name appears in a Sources build phase
    pub fn in_build_phase(&self, file_name: &str) -> bool {
        self.build_phase.contains(file_name)
    }

    pub fn declared(&self) -> &BTreeSet<String> {
        &self.declared
    }

    pub fn build_phase(&self) -> &BTreeSet<String> {
        &self.build_phase
    }
}
