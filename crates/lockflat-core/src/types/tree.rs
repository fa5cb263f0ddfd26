//! Lock tree model.
//!
//! Mirrors the nested shape of an npm v1 `package-lock.json`. Maps keep
//! document order so that flattening the same file always yields the same
//! output order.
//!
//! Both the document and every entry must be JSON objects. Derived struct
//! deserialization would also fill fields from a positional array, so
//! decoding goes through [`ObjectOnly`], which accepts maps and nothing else.

use indexmap::IndexMap;
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Root of a decoded v1 lockfile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockTree {
    /// Name of the project that owns the lockfile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Version of the project that owns the lockfile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Lockfile format version (1 for the nested shape)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockfile_version: Option<u32>,

    /// Top-level installed packages
    pub dependencies: IndexMap<String, DependencyNode>,
}

/// One installed package at one position of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    /// Concrete installed version
    pub version: String,

    /// Installed for development only
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dev: bool,

    /// Packages installed directly beneath this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, DependencyNode>>,

    /// Declared requirements: package name to version range
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub requires: IndexMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLockTree {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    lockfile_version: Option<u32>,
    #[serde(default)]
    dependencies: IndexMap<String, DependencyNode>,
}

#[derive(Deserialize)]
struct RawDependencyNode {
    version: String,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    dependencies: Option<IndexMap<String, DependencyNode>>,
    #[serde(default)]
    requires: IndexMap<String, String>,
}

/// Visitor that only accepts a map and hands it to `T`'s own deserializer
struct ObjectOnly<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectOnly<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map))
    }
}

fn deserialize_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(ObjectOnly(PhantomData))
}

impl<'de> Deserialize<'de> for LockTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: RawLockTree = deserialize_object(deserializer)?;
        Ok(Self {
            name: raw.name,
            version: raw.version,
            lockfile_version: raw.lockfile_version,
            dependencies: raw.dependencies,
        })
    }
}

impl<'de> Deserialize<'de> for DependencyNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: RawDependencyNode = deserialize_object(deserializer)?;
        Ok(Self {
            version: raw.version,
            dev: raw.dev,
            dependencies: raw.dependencies,
            requires: raw.requires,
        })
    }
}

impl LockTree {
    /// Create a lock tree from its top-level packages
    pub fn new(dependencies: IndexMap<String, DependencyNode>) -> Self {
        Self {
            dependencies,
            ..Self::default()
        }
    }

    /// Number of package entries at every nesting depth
    pub fn node_count(&self) -> usize {
        fn count(nodes: &IndexMap<String, DependencyNode>) -> usize {
            nodes
                .values()
                .map(|node| 1 + node.dependencies.as_ref().map_or(0, count))
                .sum()
        }
        count(&self.dependencies)
    }
}

impl DependencyNode {
    /// Create a production node with no requirements
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Mark this node as development-only
    pub fn dev(mut self) -> Self {
        self.dev = true;
        self
    }

    /// Add a declared requirement
    pub fn with_require(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.requires.insert(name.into(), range.into());
        self
    }

    /// Add a package installed beneath this one
    pub fn with_nested(mut self, name: impl Into<String>, node: DependencyNode) -> Self {
        self.dependencies
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), node);
        self
    }

    /// Version of the nested copy of `name`, if this node carries one
    pub fn nested_version(&self, name: &str) -> Option<&str> {
        self.dependencies
            .as_ref()?
            .get(name)
            .map(|node| node.version.as_str())
    }
}
