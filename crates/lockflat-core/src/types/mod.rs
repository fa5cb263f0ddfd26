//! Core data types for lockflat.
//!
//! This module provides the fundamental types used throughout lockflat:
//! - The decoded lock tree
//! - Package identity and the flattened graph records
//! - Diagnostics and the resolution bundle

pub mod diagnostic;
pub mod package;
pub mod tree;

// Re-export all public types
pub use diagnostic::{Diagnostic, Resolution};
pub use package::{Edge, Library, PackageId, PackageIdError};
pub use tree::{DependencyNode, LockTree};
