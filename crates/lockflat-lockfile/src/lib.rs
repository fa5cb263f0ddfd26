//! package-lock.json decoding for lockflat
//!
//! Decodes the nested npm v1 lockfile shape into the [`LockTree`] model.
//! Only `version`, `dev`, `dependencies` and `requires` are read from each
//! entry; every other field (`resolved`, `integrity`, `optional`, ...) is
//! ignored. Anything that cannot be decoded into that shape is a hard
//! failure and no resolution is attempted.

use camino::Utf8Path;
use lockflat_core::error::{LockflatError, LockflatResult};
use lockflat_core::types::LockTree;
use std::io::Read;
use tracing::debug;

/// Conventional lockfile name
pub const LOCKFILE_NAME: &str = "package-lock.json";

/// Parse a JSON string into a lock tree
pub fn parse_lockfile(content: &str) -> LockflatResult<LockTree> {
    let tree: LockTree = serde_json::from_str(content).map_err(LockflatError::decode)?;
    debug!(
        "Decoded lockfile with {} top-level packages (lockfileVersion: {:?})",
        tree.dependencies.len(),
        tree.lockfile_version
    );
    Ok(tree)
}

/// Decode a lock tree from any reader
pub fn from_reader<R: Read>(reader: R) -> LockflatResult<LockTree> {
    serde_json::from_reader(reader).map_err(LockflatError::decode)
}

/// Serialize a lock tree back to pretty JSON
pub fn serialize_lockfile(tree: &LockTree) -> LockflatResult<String> {
    serde_json::to_string_pretty(tree).map_err(LockflatError::serialize)
}

/// Load and decode a lockfile from disk
pub async fn load_from_file(path: &Utf8Path) -> LockflatResult<LockTree> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LockflatError::io(format!("Failed to read {}", path), e))?;

    parse_lockfile(&content).map_err(|e| match e {
        LockflatError::LockfileDecode { message } => LockflatError::LockfileDecode {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests;
