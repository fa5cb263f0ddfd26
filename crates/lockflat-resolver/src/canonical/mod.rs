//! Canonicalization of the raw walk output
//!
//! The walk emits one library per tree position and one edge per package
//! position that resolved anything, so the same `(name, version)` shows up
//! once for every place npm installed it. This pass keeps the first
//! occurrence of each and drops the rest, preserving discovery order.

use std::collections::HashSet;

use lockflat_core::types::{Diagnostic, Edge, Library, PackageId, Resolution};

use crate::scope::RawGraph;

/// Turn the raw walk output into the final resolution
pub(crate) fn canonicalize(raw: RawGraph) -> Resolution {
    Resolution {
        libraries: unique_libraries(raw.libraries),
        edges: unique_edges(raw.edges),
        diagnostics: unique_diagnostics(raw.diagnostics),
    }
}

/// Drop exact duplicate libraries, keeping first occurrences in order
pub fn unique_libraries(libraries: Vec<Library>) -> Vec<Library> {
    let mut seen = HashSet::with_capacity(libraries.len());
    libraries
        .into_iter()
        .filter(|library| seen.insert(library.clone()))
        .collect()
}

/// Drop edges whose source and target set were already emitted
///
/// Target order does not matter for the comparison, but the kept edge
/// retains the order it was resolved in. Edges from the same source with
/// different target sets are both kept.
pub fn unique_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut seen = HashSet::with_capacity(edges.len());
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge_key(edge)))
        .collect()
}

/// Drop repeated diagnostics, keeping first occurrences in order
pub fn unique_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = HashSet::with_capacity(diagnostics.len());
    diagnostics
        .into_iter()
        .filter(|diagnostic| seen.insert(diagnostic.clone()))
        .collect()
}

fn edge_key(edge: &Edge) -> (PackageId, Vec<PackageId>) {
    let mut targets = edge.depends_on.clone();
    targets.sort();
    (edge.id.clone(), targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, version: &str) -> PackageId {
        PackageId::new(name, version)
    }

    #[test]
    fn test_unique_libraries_keeps_first_occurrence_order() {
        let libraries = vec![
            Library::new("ms", "2.0.0"),
            Library::new("debug", "2.6.9"),
            Library::new("ms", "2.0.0"),
            Library::new("ms", "2.1.1"),
            Library::new("debug", "2.6.9"),
        ];

        assert_eq!(
            unique_libraries(libraries),
            vec![
                Library::new("ms", "2.0.0"),
                Library::new("debug", "2.6.9"),
                Library::new("ms", "2.1.1"),
            ]
        );
    }

    #[test]
    fn test_edges_with_reordered_targets_collapse() {
        let first = Edge::new(id("react", "16.8.6"), vec![id("b", "1"), id("a", "1")]);
        let second = Edge::new(id("react", "16.8.6"), vec![id("a", "1"), id("b", "1")]);

        let unique = unique_edges(vec![first.clone(), second]);
        // First occurrence wins and keeps its unsorted order.
        assert_eq!(unique, vec![first]);
    }

    #[test]
    fn test_same_source_different_targets_are_kept() {
        let first = Edge::new(id("debug", "2.6.9"), vec![id("ms", "2.0.0")]);
        let second = Edge::new(id("debug", "2.6.9"), vec![id("ms", "2.1.1")]);

        let unique = unique_edges(vec![first.clone(), second.clone()]);
        assert_eq!(unique, vec![first, second]);
    }

    #[test]
    fn test_targets_with_commas_do_not_collide() {
        // A joined "a,b" key would make these two look the same.
        let first = Edge::new(id("x", "1"), vec![id("a", "1,b@1")]);
        let second = Edge::new(id("x", "1"), vec![id("a", "1"), id("b", "1")]);

        assert_eq!(unique_edges(vec![first, second]).len(), 2);
    }

    #[test]
    fn test_unique_diagnostics() {
        let diagnostic = Diagnostic::unresolved(id("app", "1.0.0"), "missing-pkg", "^1.0.0");
        let unique = unique_diagnostics(vec![diagnostic.clone(), diagnostic.clone()]);
        assert_eq!(unique, vec![diagnostic]);
    }

    #[test]
    fn test_canonicalize() {
        let raw = RawGraph {
            libraries: vec![Library::new("a", "1"), Library::new("a", "1")],
            edges: vec![
                Edge::new(id("a", "1"), vec![id("b", "1")]),
                Edge::new(id("a", "1"), vec![id("b", "1")]),
            ],
            diagnostics: vec![],
        };

        let resolution = canonicalize(raw);
        assert_eq!(resolution.libraries.len(), 1);
        assert_eq!(resolution.edges.len(), 1);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_id() -> impl Strategy<Value = PackageId> {
        ("[a-d]", "[1-3]").prop_map(|(name, version)| PackageId::new(name, version))
    }

    fn arb_edge() -> impl Strategy<Value = Edge> {
        (arb_id(), prop::collection::vec(arb_id(), 0..4))
            .prop_map(|(id, depends_on)| Edge::new(id, depends_on))
    }

    proptest! {
        #[test]
        fn canonicalization_is_idempotent(
            libraries in prop::collection::vec(arb_id(), 0..20),
            edges in prop::collection::vec(arb_edge(), 0..20),
        ) {
            let libraries: Vec<Library> = libraries
                .into_iter()
                .map(|id| Library::new(id.name, id.version))
                .collect();

            let once_libraries = unique_libraries(libraries);
            let once_edges = unique_edges(edges);

            prop_assert_eq!(unique_libraries(once_libraries.clone()), once_libraries);
            prop_assert_eq!(unique_edges(once_edges.clone()), once_edges);
        }

        #[test]
        fn shuffled_targets_collapse(edge in arb_edge()) {
            let mut reversed = edge.clone();
            reversed.depends_on.reverse();

            let unique = unique_edges(vec![edge.clone(), reversed]);
            prop_assert_eq!(unique, vec![edge]);
        }
    }
}
