//! Cross-file reference evidence
//!
//! The [`ReferenceGraph`] is the single place where evidence from every code
//! unit is consolidated. It is built once, from the whole corpus, before any
//! file is classified, and is never mutated afterwards.

mod builder;
mod scanner;

pub use builder::ReferenceGraphBuilder;
pub use scanner::{CodeUnit, ProjectScanner, ScanOutput};
pub(crate) use scanner::stem_of;

use std::collections::BTreeSet;

/// Aggregated mentions across all code units
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceGraph {
    /// Every type-like identifier seen in any unit
    mentioned_symbols: BTreeSet<String>,

    /// Every resource literal seen in any unit
    mentioned_assets: BTreeSet<String>,

    /// Every layout-name literal seen in any unit
    mentioned_layouts: BTreeSet<String>,

    /// Every imported module
    imported_modules: BTreeSet<String>,

    /// Type declarations summed over all units
    declared_types: usize,
}

impl ReferenceGraph {
    /// Aggregate all units in one step
    pub fn from_units(units: &[CodeUnit]) -> Self {
        let mut builder = ReferenceGraphBuilder::new();
        for unit in units {
            builder.add_unit(unit);
        }
        builder.build()
    }

    /// Exact mention, or a mentioned symbol that contains `name`
    /// (`UserProfile` is covered by `UserProfileViewController`)
    pub fn is_symbol_referenced(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.mentioned_symbols.contains(name)
            || self.mentioned_symbols.iter().any(|symbol| symbol.contains(name))
    }

    pub fn is_asset_mentioned(&self, name: &str) -> bool {
        self.mentioned_assets.contains(name)
    }

    pub fn is_layout_mentioned(&self, name: &str) -> bool {
        self.mentioned_layouts.contains(name)
    }

    pub fn mentioned_symbols(&self) -> &BTreeSet<String> {
        &self.mentioned_symbols
    }

    pub fn mentioned_assets(&self) -> &BTreeSet<String> {
        &self.mentioned_assets
    }

    pub fn mentioned_layouts(&self) -> &BTreeSet<String> {
        &self.mentioned_layouts
    }

    pub fn imported_modules(&self) -> &BTreeSet<String> {
        &self.imported_modules
    }

    pub fn declared_count(&self) -> usize {
        self.declared_types
    }
}
