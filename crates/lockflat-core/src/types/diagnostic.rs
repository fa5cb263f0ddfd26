//! Diagnostics and the resolution bundle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Edge, Library, PackageId};

/// Non-fatal finding recorded while flattening a lock tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A declared requirement matched neither a nested copy nor any visible entry
    UnresolvedRequirement {
        /// Package declaring the requirement
        package: PackageId,
        /// Required package name
        name: String,
        /// Requested version range, verbatim
        range: String,
    },
}

/// Flattened output of one lock tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Unique resolved packages, in discovery order
    pub libraries: Vec<Library>,
    /// Unique dependency edges, in discovery order
    #[serde(rename = "dependencies")]
    pub edges: Vec<Edge>,
    /// Non-fatal findings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create an unresolved requirement diagnostic
    pub fn unresolved(
        package: PackageId,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self::UnresolvedRequirement {
            package,
            name: name.into(),
            range: range.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedRequirement {
                package,
                name,
                range,
            } => write!(
                f,
                "Cannot resolve the version: {}@{} (required by {})",
                name, range, package
            ),
        }
    }
}

impl Resolution {
    /// Number of unresolved requirements recorded
    pub fn unresolved_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnresolvedRequirement { .. }))
            .count()
    }

    /// Look up the edge for a given package identifier
    pub fn edges_from<'a>(&'a self, id: &'a PackageId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| &edge.id == id)
    }

    /// Check whether a `(name, version)` pair was resolved
    pub fn contains(&self, name: &str, version: &str) -> bool {
        self.libraries
            .iter()
            .any(|lib| lib.name == name && lib.version == version)
    }
}
