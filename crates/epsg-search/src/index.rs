//! Substring index over EPSG code strings.

use std::collections::HashSet;

use epsg_model::EpsgRegistry;

/// A collection that can be searched by value.
///
/// `E` is the element type handed back to callers, `V` the query type.
pub trait Searchable<E, V: ?Sized> {
    /// Every element matching `value`, in insertion order.
    fn search(&self, value: &V) -> Vec<E>;

    /// The first `n` elements, in numeric order when `numeric` is set and in
    /// insertion order otherwise.
    fn first_n(&self, n: usize, numeric: bool) -> Vec<E>;

    /// Exact membership test.
    fn contains(&self, value: &V) -> bool;
}

/// Immutable index of EPSG codes.
///
/// Matching is case-sensitive. Codes are digits in practice, so case only
/// matters for hand-written keys.
#[derive(Debug, Clone, Default)]
pub struct CodeIndex {
    codes: Vec<String>,
    numeric_order: Vec<usize>,
    members: HashSet<String>,
}

impl CodeIndex {
    /// Builds an index over `codes`, keeping their order for searches.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        let mut numeric_order: Vec<usize> = (0..codes.len()).collect();
        // Stable sort: keys that are not numbers keep their relative order
        // after every numeric key.
        numeric_order.sort_by_key(|&idx| match codes[idx].parse::<u32>() {
            Ok(value) => (false, value),
            Err(_) => (true, 0),
        });
        let members = codes.iter().cloned().collect();
        Self {
            codes,
            numeric_order,
            members,
        }
    }

    /// Index over every code in `registry`, in load order.
    pub fn from_registry(registry: &EpsgRegistry) -> Self {
        Self::new(registry.codes().iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in insertion order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl Searchable<String, str> for CodeIndex {
    fn search(&self, value: &str) -> Vec<String> {
        self.codes
            .iter()
            .filter(|code| code.contains(value))
            .cloned()
            .collect()
    }

    fn first_n(&self, n: usize, numeric: bool) -> Vec<String> {
        if numeric {
            self.numeric_order
                .iter()
                .take(n)
                .map(|&idx| self.codes[idx].clone())
                .collect()
        } else {
            self.codes.iter().take(n).cloned().collect()
        }
    }

    fn contains(&self, value: &str) -> bool {
        self.members.contains(value)
    }
}
