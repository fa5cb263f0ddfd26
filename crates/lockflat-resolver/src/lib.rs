//! Nested lockfile flattening engine for lockflat
//!
//! This crate turns the nested npm v1 lock tree into a flat, de-duplicated
//! list of resolved packages and the dependency edges between them. It never
//! chooses versions: every requirement is mapped to a version the lockfile
//! already installed, following node_modules shadowing.

pub mod canonical;
mod scope;

use lockflat_core::error::LockflatError;
use lockflat_core::types::{LockTree, Resolution};
use serde::{Deserialize, Serialize};
use tracing::debug;

use scope::{RawGraph, Scope, ScopeWalker};

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, LockflatError>;

/// Options controlling which entries are flattened
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolveOptions {
    /// Flatten development-only entries too
    #[serde(default)]
    pub include_dev: bool,
}

/// Flattens lock trees with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    /// Create a resolver with the given options
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Options this resolver was built with
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Flatten a lock tree into unique libraries and edges
    pub fn resolve(&self, tree: &LockTree) -> Resolution {
        let mut raw = RawGraph::default();
        ScopeWalker::new(&self.options).walk(&tree.dependencies, Scope::new(), &mut raw);

        debug!(
            "Walk produced {} libraries and {} edges before deduplication",
            raw.libraries.len(),
            raw.edges.len()
        );

        let resolution = canonical::canonicalize(raw);
        debug!(
            "Resolved {} unique libraries, {} unique edges, {} unresolved requirements",
            resolution.libraries.len(),
            resolution.edges.len(),
            resolution.unresolved_count()
        );
        resolution
    }
}

/// Flatten a lock tree with default options
pub fn flatten(tree: &LockTree) -> Resolution {
    Resolver::default().resolve(tree)
}

/// Decode a package-lock.json document and flatten it
pub fn parse(content: &str, options: &ResolveOptions) -> ResolverResult<Resolution> {
    let tree = lockflat_lockfile::parse_lockfile(content)?;
    Ok(Resolver::new(options.clone()).resolve(&tree))
}
