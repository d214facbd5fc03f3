//! # Identifier Module
//!
//! Identifier grammar and case-insensitive keying.
//!
//! - Identifiers are one or more ASCII letters, digits, or underscore
//! - Identity is case-insensitive; the first-seen casing is what gets stored
//! - Keys are lowercased at the map boundary, never inside the values

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Check a token against the identifier grammar `^[A-Za-z0-9_]+$`.
///
/// The empty string is rejected.
#[must_use]
pub fn validate(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Normalize an identifier (or a key built from identifiers) for lookup.
#[must_use]
pub fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}

// =============================================================================
// CASE-INSENSITIVE MAP
// =============================================================================

/// A `BTreeMap` keyed by lowercased strings.
///
/// Callers always pass the key as written; normalization happens here.
/// The value is expected to carry the original casing itself.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    entries: BTreeMap<String, V>,
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> CaseInsensitiveMap<V> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value regardless of the key's casing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(&normalize(key))
    }

    /// Return the value for `key`, inserting `make()` if absent.
    ///
    /// The boolean is `true` when a new entry was created.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> (&V, bool) {
        match self.entries.entry(normalize(key)) {
            Entry::Occupied(entry) => (&*entry.into_mut(), false),
            Entry::Vacant(entry) => (&*entry.insert(make()), true),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values in normalized-key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

// =============================================================================
// TESTS
// =============================================================================
