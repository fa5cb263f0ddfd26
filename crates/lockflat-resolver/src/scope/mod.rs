//! Scope resolution over the nested lock tree
//!
//! Walks the tree depth-first, following `dependencies` (never `requires`),
//! and resolves every declared requirement to the version that node_modules
//! shadowing would load:
//!
//! 1. the requiring package's own nested copy
//! 2. otherwise the closest enclosing level that installs the name
//!
//! Every level owns its scope. A level starts from a copy of its parent's
//! scope and records all of its own entries before resolving any of them, so
//! siblings see each other regardless of order, while overrides made inside
//! one sibling's subtree never reach another sibling.

use std::collections::HashMap;

use indexmap::IndexMap;
use lockflat_core::types::{DependencyNode, Diagnostic, Edge, Library, PackageId};
use tracing::{debug, warn};

use crate::ResolveOptions;

/// Package name to installed version, as visible from one tree level
pub(crate) type Scope<'a> = HashMap<&'a str, &'a str>;

/// Everything the walk emits before canonicalization
#[derive(Debug, Default)]
pub(crate) struct RawGraph {
    pub libraries: Vec<Library>,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Depth-first walker carrying the resolve options
pub(crate) struct ScopeWalker<'o> {
    options: &'o ResolveOptions,
}

impl<'o> ScopeWalker<'o> {
    pub fn new(options: &'o ResolveOptions) -> Self {
        Self { options }
    }

    /// Walk one level of the tree with a scope owned by this level
    pub fn walk<'a>(
        &self,
        nodes: &'a IndexMap<String, DependencyNode>,
        mut scope: Scope<'a>,
        out: &mut RawGraph,
    ) {
        // Register the whole level first; nested copies shadow outer ones.
        for (name, node) in nodes {
            scope.insert(name.as_str(), node.version.as_str());
        }
        debug!("Resolving {} packages with {} visible names", nodes.len(), scope.len());

        for (name, node) in nodes {
            if node.dev && !self.options.include_dev {
                continue;
            }

            let library = Library::new(name.as_str(), node.version.as_str());
            let id = library.id();
            out.libraries.push(library);

            let depends_on = resolve_requires(&id, node, &scope, &mut out.diagnostics);
            if !depends_on.is_empty() {
                out.edges.push(Edge::new(id, depends_on));
            }

            if let Some(nested) = &node.dependencies {
                self.walk(nested, scope.clone(), out);
            }
        }
    }
}

/// Resolve every requirement of `node`, recording the ones nothing satisfies
fn resolve_requires(
    id: &PackageId,
    node: &DependencyNode,
    scope: &Scope<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<PackageId> {
    let mut depends_on = Vec::with_capacity(node.requires.len());

    for (name, range) in &node.requires {
        let version = node
            .nested_version(name)
            .or_else(|| scope.get(name.as_str()).copied());

        match version {
            Some(version) => depends_on.push(PackageId::new(name.as_str(), version)),
            None => {
                warn!("Cannot resolve the version: {}@{} (required by {})", name, range, id);
                diagnostics.push(Diagnostic::unresolved(id.clone(), name.as_str(), range.as_str()));
            }
        }
    }

    depends_on
}
