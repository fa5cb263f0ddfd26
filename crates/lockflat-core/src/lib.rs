//! # lockflat-core
//!
//! Core types and utilities shared across all lockflat crates.
//!
//! This crate provides:
//! - The lock tree model decoded from an npm v1 `package-lock.json`
//! - `PackageId`, `Library` and `Edge` for the flattened dependency graph
//! - `Diagnostic` for non-fatal findings recorded during resolution
//! - `LockflatError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (LockTree, PackageId, Resolution, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{LockflatError, LockflatResult};
pub use types::{
    DependencyNode, Diagnostic, Edge, Library, LockTree, PackageId, PackageIdError, Resolution,
};
