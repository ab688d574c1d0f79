use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::attributes;

/// Attributes of a single EPSG code, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpsgEntry {
    attributes: BTreeMap<String, String>,
}

impl EpsgEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn datum(&self) -> Option<&str> {
        self.get(attributes::DATUM)
    }

    pub fn coordinate_system(&self) -> Option<&str> {
        self.get(attributes::COORD_SYS)
    }

    /// Returns the first required attribute this entry lacks, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        attributes::REQUIRED
            .iter()
            .copied()
            .find(|name| !self.contains(name))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for EpsgEntry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = Self::new();
        for (name, value) in iter {
            entry.insert(name, value);
        }
        entry
    }
}

/// Read-only table of EPSG codes and their attributes.
///
/// Built once through [`EpsgRegistryBuilder`] and shared for the rest of the
/// session. Codes remember the order they were first loaded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpsgRegistry {
    entries: BTreeMap<String, EpsgEntry>,
    load_order: Vec<String>,
}

impl EpsgRegistry {
    pub fn builder() -> EpsgRegistryBuilder {
        EpsgRegistryBuilder::default()
    }

    pub fn get(&self, code: &str) -> Option<&EpsgEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Codes in the order they were first loaded.
    pub fn codes(&self) -> &[String] {
        &self.load_order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EpsgEntry)> {
        self.load_order
            .iter()
            .filter_map(|code| self.entries.get(code).map(|entry| (code.as_str(), entry)))
    }
}

#[derive(Debug, Default)]
pub struct EpsgRegistryBuilder {
    registry: EpsgRegistry,
}

impl EpsgRegistryBuilder {
    /// Inserts an entry and returns the entry it replaced, if any.
    ///
    /// A replaced code keeps its original load position.
    pub fn insert(&mut self, code: impl Into<String>, entry: EpsgEntry) -> Option<EpsgEntry> {
        let code = code.into();
        match self.registry.entries.entry(code.clone()) {
            Entry::Occupied(mut slot) => Some(slot.insert(entry)),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                self.registry.load_order.push(code);
                None
            }
        }
    }

    #[must_use]
    pub fn with_entry(mut self, code: impl Into<String>, entry: EpsgEntry) -> Self {
        self.insert(code, entry);
        self
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn build(self) -> EpsgRegistry {
        self.registry
    }
}
