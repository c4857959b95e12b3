use super::{CodeUnit, ReferenceGraph};
use tracing::debug;

/// Builder that folds scanned code units into a [`ReferenceGraph`]
pub struct ReferenceGraphBuilder {
    graph: ReferenceGraph,
    units: usize,
}

impl ReferenceGraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: ReferenceGraph::default(),
            units: 0,
        }
    }

    /// Add one unit's extracted evidence
    pub fn add_unit(&mut self, unit: &CodeUnit) {
        let graph = &mut self.graph;

        graph.mentioned_symbols.extend(unit.symbols.iter().cloned());
        graph.mentioned_assets.extend(unit.resource_literals.iter().cloned());
        graph.mentioned_layouts.extend(unit.layout_literals.iter().cloned());
        graph.imported_modules.extend(unit.imports.iter().cloned());
        graph.declared_types += unit.declared_types.len();

        self.units += 1;
    }

    /// Finish aggregation
    pub fn build(self) -> ReferenceGraph {
        debug!(
            "Reference graph from {} units: {} symbols, {} assets, {} layouts, {} imports",
            self.units,
            self.graph.mentioned_symbols.len(),
            self.graph.mentioned_assets.len(),
            self.graph.mentioned_layouts.len(),
            self.graph.imported_modules.len()
        );
        self.graph
    }
}

impl Default for ReferenceGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
