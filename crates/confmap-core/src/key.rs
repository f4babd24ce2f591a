//! Property keys and namespace resolution.
//!
//! A [`Key`] names one flattened property and says how it reacts to the
//! namespace of the [`Mapping`](crate::Mapping) it is stored in:
//!
//! | Variant | Resolves to (prefix `P`) |
//! |---------|--------------------------|
//! | `Relative(name)` | `P.name` (or `name` without prefix) |
//! | `Absolute(name)` | `name`, whatever `P` is |
//! | `Root` | `P` itself |
//!
//! Blank segments never contribute to a joined path, so an empty prefix or
//! segment cannot produce a leading or doubled dot. Absolute names are never
//! rewritten, not even blank ones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single flattened configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "kebab-case")]
pub enum Key {
    /// Resolved against the enclosing namespace.
    Relative(String),
    /// Bypasses every enclosing namespace.
    Absolute(String),
    /// The enclosing namespace itself.
    Root,
}

impl Key {
    /// Creates a relative key. A blank name denotes the namespace itself.
    pub fn relative(name: impl Into<String>) -> Self {
        let name = name.into();
        if is_blank(&name) {
            Self::Root
        } else {
            Self::Relative(name)
        }
    }

    /// Creates an absolute key. The name is kept verbatim, even when blank.
    pub fn absolute(name: impl Into<String>) -> Self {
        Self::Absolute(name.into())
    }

    /// The root key.
    pub fn root() -> Self {
        Self::Root
    }

    /// Returns the key's path, or `""` for [`Key::Root`].
    pub fn name(&self) -> &str {
        match self {
            Self::Relative(name) | Self::Absolute(name) => name,
            Self::Root => "",
        }
    }

    /// Returns `true` for absolute keys.
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Absolute(_))
    }

    /// Resolves this key against a mapping prefix.
    pub(crate) fn resolve(&self, prefix: Option<&str>) -> Key {
        match self {
            Self::Absolute(_) => self.clone(),
            Self::Relative(name) => join([prefix, Some(name.as_str())]),
            Self::Root => join([prefix]),
        }
    }

    /// Resolves this key as a sub-key merged under `segment`, relative to a
    /// mapping prefix.
    pub(crate) fn resolve_under(&self, prefix: Option<&str>, segment: &str) -> Key {
        match self {
            Self::Absolute(_) => self.clone(),
            Self::Relative(name) => join([prefix, Some(segment), Some(name.as_str())]),
            Self::Root => join([prefix, Some(segment)]),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dot-joins the non-blank segments.
pub(crate) fn join_path<'a>(segments: impl IntoIterator<Item = Option<&'a str>>) -> String {
    segments
        .into_iter()
        .flatten()
        .filter(|segment| !is_blank(segment))
        .collect::<Vec<_>>()
        .join(".")
}

fn join<'a>(segments: impl IntoIterator<Item = Option<&'a str>>) -> Key {
    Key::relative(join_path(segments))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
