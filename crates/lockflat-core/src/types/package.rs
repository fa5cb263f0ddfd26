//! Package identity and flattened graph records.
//!
//! A `PackageId` renders as `name@version`, the form npm prints. The name is
//! escaped so that two distinct `(name, version)` pairs can never render to
//! the same identifier:
//!
//! - `%` becomes `%25`
//! - every `@` except a leading one becomes `%40`
//! - an empty name is written as a lone `%`
//!
//! After escaping, the only `@` past the first character is the separator,
//! so `@babel/core@7.0.0` still reads exactly as npm prints it and
//! [`PackageId::parse`] can split it back unambiguously.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the encoded name and the version
pub const ID_SEPARATOR: char = '@';

/// Unique identifier for a resolved package instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    /// Package name (e.g., "lodash" or "@types/node")
    pub name: String,
    /// Installed version, as written in the lockfile
    pub version: String,
}

/// Error returned when an identifier string cannot be split back into a pair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageIdError {
    #[error("identifier '{0}' has no name/version separator")]
    MissingSeparator(String),

    #[error("identifier '{id}' has an invalid escape at byte {offset}")]
    InvalidEscape { id: String, offset: usize },
}

/// A resolved package: one concrete `(name, version)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub version: String,
}

/// Dependency edge from one resolved package to the packages it requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier of the depending package
    pub id: PackageId,
    /// Identifiers of the resolved requirements, in resolution order
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<PackageId>,
}

impl PackageId {
    /// Create a new package ID
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Split an identifier produced by `Display` back into its pair
    pub fn parse(id: &str) -> Result<Self, PackageIdError> {
        // The encoded name is never empty, so the separator never comes first.
        let first = id.chars().next().map_or(0, char::len_utf8);
        let separator = id[first..]
            .find(ID_SEPARATOR)
            .map(|offset| offset + first)
            .ok_or_else(|| PackageIdError::MissingSeparator(id.to_string()))?;

        let name = decode_name(id, &id[..separator])?;
        let version = &id[separator + ID_SEPARATOR.len_utf8()..];
        Ok(Self::new(name, version))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_encoded_name(f, &self.name)?;
        write!(f, "{}{}", ID_SEPARATOR, self.version)
    }
}

impl FromStr for PackageId {
    type Err = PackageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&Library> for PackageId {
    fn from(library: &Library) -> Self {
        Self::new(library.name.clone(), library.version.clone())
    }
}

impl Serialize for PackageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Self::parse(&id).map_err(serde::de::Error::custom)
    }
}

impl Library {
    /// Create a new library record
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Canonical identifier of this library
    pub fn id(&self) -> PackageId {
        PackageId::from(self)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id(), f)
    }
}

impl Edge {
    /// Create a new edge
    pub fn new(id: PackageId, depends_on: Vec<PackageId>) -> Self {
        Self { id, depends_on }
    }
}

fn write_encoded_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if name.is_empty() {
        return f.write_str("%");
    }
    for (offset, c) in name.char_indices() {
        match c {
            '%' => f.write_str("%25")?,
            '@' if offset > 0 => f.write_str("%40")?,
            _ => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

fn decode_name(id: &str, encoded: &str) -> Result<String, PackageIdError> {
    if encoded == "%" {
        return Ok(String::new());
    }

    let mut name = String::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(offset) = rest.find('%') {
        name.push_str(&rest[..offset]);
        let escape = rest.get(offset..offset + 3);
        match escape {
            Some("%25") => name.push('%'),
            Some("%40") => name.push('@'),
            _ => {
                return Err(PackageIdError::InvalidEscape {
                    id: id.to_string(),
                    offset: encoded.len() - rest.len() + offset,
                })
            }
        }
        rest = &rest[offset + 3..];
    }
    name.push_str(rest);
    Ok(name)
}
