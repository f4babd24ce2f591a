//! The [`Mapping`] builder.
//!
//! A mapping collects flattened `key=value` properties under an optional
//! namespace prefix. Keys are resolved against the prefix when they are
//! stored, so the entries always hold their final names:
//!
//! ```text
//! Mapping::prefixed("db")
//!   .put("port", 5432)            ->  db.port=5432
//!   .put_absolute("tz", "UTC")    ->  tz=UTC
//!   .put_root("postgres")         ->  db=postgres
//!   .put_mappable("pool", &pool)  ->  db.pool.size=4
//! ```
//!
//! Storage order is irrelevant. Every textual view ([`Mapping::serialize`],
//! [`Mapping::fingerprint`]) sorts its output, so two mappings holding the
//! same properties render identically no matter how they were built.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::error::{MappingError, MappingResult};
use crate::fingerprint;
use crate::key::{Key, join_path};
use crate::mappable::Mappable;
use crate::value::ConfigValue;

/// Flattened configuration properties with an optional namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    prefix: Option<String>,
    entries: HashMap<Key, String>,
}

impl Mapping {
    /// Creates an empty mapping without a prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`Mapping::new`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an empty mapping whose relative keys live under `prefix`.
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            entries: HashMap::new(),
        }
    }

    /// Creates an unprefixed mapping from flat properties.
    pub fn from_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ConfigValue,
    {
        let mut config = Self::new();
        config.put_all(properties);
        config
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the namespace prefix.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the number of stored properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no property is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a value by its stored (already resolved) key.
    pub fn get(&self, key: &Key) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up a value by resolved property name, ignoring the key tag.
    ///
    /// When a relative and an absolute key share the name, the relative
    /// entry is returned.
    pub fn get_resolved(&self, name: &str) -> Option<&str> {
        let relative = Key::relative(name);
        self.entries
            .get(&relative)
            .or_else(|| self.entries.get(&Key::absolute(name)))
            .map(String::as_str)
    }

    /// Iterates over the stored entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&Key, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    // =========================================================================
    // Puts
    // =========================================================================

    /// Stores `value` under `name`, relative to this mapping's prefix.
    pub fn put<V: ConfigValue>(&mut self, name: &str, value: V) -> &mut Self {
        self.insert(Key::relative(name).resolve(self.prefix()), value);
        self
    }

    /// Stores `value` under exactly `name`, bypassing the prefix.
    pub fn put_absolute<V: ConfigValue>(&mut self, name: &str, value: V) -> &mut Self {
        self.insert(Key::absolute(name), value);
        self
    }

    /// Stores `value` under the prefix itself.
    pub fn put_root<V: ConfigValue>(&mut self, value: V) -> &mut Self {
        self.insert(Key::root().resolve(self.prefix()), value);
        self
    }

    /// Stores every entry of a flat property collection as a relative key.
    pub fn put_all<I, K, V>(&mut self, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ConfigValue,
    {
        for (name, value) in properties {
            self.put(name.as_ref(), value);
        }
        self
    }

    // =========================================================================
    // Merges
    // =========================================================================

    /// Copies every entry of `other` into this mapping.
    ///
    /// Relative entries move under this mapping's prefix; absolute entries
    /// keep their name.
    pub fn merge(&mut self, other: &Mapping) -> &mut Self {
        for (key, value) in &other.entries {
            self.insert(key.resolve(self.prefix()), value);
        }
        self
    }

    /// Copies every entry of `other` under the intermediate `segment`.
    ///
    /// Absolute entries of `other` bypass both `segment` and the prefix.
    pub fn merge_namespaced(&mut self, segment: &str, other: &Mapping) -> &mut Self {
        for (key, value) in &other.entries {
            self.insert(key.resolve_under(self.prefix(), segment), value);
        }
        self
    }

    /// Merges the configuration of `item` without any intermediate segment.
    pub fn merge_mappable<M: Mappable + ?Sized>(&mut self, item: &M) -> &mut Self {
        self.merge(&item.as_configuration())
    }

    /// Merges the configuration of `item` under `segment`.
    pub fn put_mappable<M: Mappable + ?Sized>(&mut self, segment: &str, item: &M) -> &mut Self {
        self.merge_namespaced(segment, &item.as_configuration())
    }

    /// Stores an ordered sequence of items under `segment`.
    ///
    /// Item `i` is named `{item_prefix}{i}`. The names are written,
    /// comma-joined, to `segment`, and each item is merged under
    /// `segment.{name}`. An empty sequence writes nothing.
    ///
    /// ```
    /// use confmap_core::Mapping;
    ///
    /// let first = Mapping::from_properties([("x", 1)]);
    /// let second = Mapping::from_properties([("x", 2)]);
    ///
    /// let mut config = Mapping::new();
    /// config.put_list("items", [&first, &second], "item");
    /// assert_eq!(
    ///     config.serialize(),
    ///     "items.item0.x=1\nitems.item1.x=2\nitems=item0,item1"
    /// );
    /// ```
    pub fn put_list<I>(&mut self, segment: &str, items: I, item_prefix: &str) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Mappable,
    {
        let named: Vec<(String, I::Item)> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (format!("{item_prefix}{i}"), item))
            .collect();

        self.put_named(segment, named)
    }

    /// Stores named items under `segment`.
    ///
    /// Entries are processed in lexicographic order of their names: the
    /// comma-joined names go to `segment`, and each item is merged under
    /// `segment.{name}`. An empty collection writes nothing.
    pub fn put_map<I, K, M>(&mut self, segment: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, M)>,
        K: AsRef<str>,
        M: Mappable,
    {
        let mut named: Vec<(String, M)> = items
            .into_iter()
            .map(|(name, item)| (name.as_ref().to_owned(), item))
            .collect();
        named.sort_by(|(a, _), (b, _)| a.cmp(b));

        self.put_named(segment, named)
    }

    fn put_named<M: Mappable>(&mut self, segment: &str, named: Vec<(String, M)>) -> &mut Self {
        if named.is_empty() {
            return self;
        }

        let names = named
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.put(segment, names);

        for (name, item) in &named {
            let item_segment = join_path([Some(segment), Some(name.as_str())]);
            self.put_mappable(&item_segment, item);
        }
        self
    }

    fn insert<V: ConfigValue>(&mut self, key: Key, value: V) {
        let Some(value) = value.to_config_value() else {
            trace!(key = %key, "Skipping absent configuration value");
            return;
        };

        if let Some(previous) = self.entries.insert(key.clone(), value) {
            trace!(key = %key, previous = %previous, "Overwrote configuration value");
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Projects the entries to resolved names, dropping the key tags.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateKey`] when a relative and an
    /// absolute key resolve to the same name.
    pub fn as_simple_map(&self) -> MappingResult<BTreeMap<String, String>> {
        let mut simple = BTreeMap::new();
        for (key, value) in &self.entries {
            if simple.insert(key.name().to_owned(), value.clone()).is_some() {
                return Err(MappingError::duplicate_key(key.name()));
            }
        }
        Ok(simple)
    }

    /// Renders the mapping as sorted, newline-joined `key=value` lines.
    pub fn serialize(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        lines.sort();
        lines.join("\n")
    }

    /// Returns the MD5 digest of [`Mapping::serialize`] as 32 lowercase
    /// hex characters.
    pub fn fingerprint(&self) -> String {
        let digest = fingerprint::fingerprint(&self.serialize());
        debug!(entries = self.len(), fingerprint = %digest, "Computed configuration fingerprint");
        digest
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Serializes as a map of resolved names, sorted by name.
impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let simple = self.as_simple_map().map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(simple.len()))?;
        for (name, value) in &simple {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: AsRef<str>, V: ConfigValue> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_properties(iter)
    }
}

impl<K: AsRef<str>, V: ConfigValue> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}
