//! # Fact Store
//!
//! The in-memory triple storage for factgraph.
//!
//! The store owns every node, predicate, and triple. Identifiers are interned
//! case-insensitively; triples are deduplicated by canonical identifier and
//! filed into one secondary index per bound-position mask, so every one of
//! the eight wildcard shapes is answered by a single map lookup.
//!
//! All maps are `BTreeMap`-backed for deterministic iteration.

use crate::identifier::{self, CaseInsensitiveMap};
use crate::types::{Node, PatternMask, Predicate, Triple, TriplePattern, canonical_id};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Secondary index: composite key -> triples in insertion order.
type SecondaryIndex = BTreeMap<String, Vec<Arc<Triple>>>;

/// Result of [`FactStore::import_triple`].
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The stored triple (the existing instance on re-import).
    pub triple: Arc<Triple>,
    /// `true` if this call created the triple.
    pub inserted: bool,
}

// =============================================================================
// FACT STORE
// =============================================================================

/// The fact store.
///
/// Single writer: every mutating operation takes `&mut self`. Wrap the store
/// in a `Mutex` when it must be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    /// Interned subjects and objects.
    nodes: CaseInsensitiveMap<Node>,

    /// Interned predicates.
    predicates: CaseInsensitiveMap<Predicate>,

    /// Primary map: canonical identifier -> triple.
    triples: CaseInsensitiveMap<Arc<Triple>>,

    /// One index per non-empty mask, addressed by `PatternMask::slot`.
    indices: [SecondaryIndex; PatternMask::INDEXED_COUNT],
}

impl FactStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `identifier`, creating it on first reference.
    ///
    /// Lookup ignores case; a new node keeps the casing given here.
    pub fn get_or_create_node(&mut self, identifier: &str) -> Node {
        debug_assert!(identifier::validate(identifier));
        let (node, _) = self
            .nodes
            .get_or_insert_with(identifier, || Node::new(identifier));
        node.clone()
    }

    /// Return the predicate for `identifier`, creating it on first reference.
    pub fn get_or_create_predicate(&mut self, identifier: &str) -> Predicate {
        debug_assert!(identifier::validate(identifier));
        let (predicate, _) = self
            .predicates
            .get_or_insert_with(identifier, || Predicate::new(identifier));
        predicate.clone()
    }

    /// Store a triple, resolving or creating its endpoints.
    ///
    /// Re-importing a combination that is already present (in any casing)
    /// changes nothing and returns the stored instance.
    pub fn import_triple(&mut self, subject: &str, predicate: &str, object: &str) -> ImportOutcome {
        let subject = self.get_or_create_node(subject);
        let predicate = self.get_or_create_predicate(predicate);
        let object = self.get_or_create_node(object);

        let id = canonical_id(subject.as_str(), predicate.as_str(), object.as_str());
        let (triple, inserted) = self
            .triples
            .get_or_insert_with(&id, || Arc::new(Triple::new(subject, predicate, object)));
        let triple = Arc::clone(triple);

        if inserted {
            self.index(&triple);
        }

        ImportOutcome { triple, inserted }
    }

    /// File a new triple under its key in every secondary index.
    fn index(&mut self, triple: &Arc<Triple>) {
        for mask in PatternMask::indexed() {
            if let Some(slot) = mask.slot() {
                self.indices[slot]
                    .entry(mask.key_for(triple))
                    .or_default()
                    .push(Arc::clone(triple));
            }
        }
    }

    /// Find every triple matching `pattern`.
    ///
    /// Returns `None` when no index entry exists for the bound positions.
    /// The all-wildcard pattern returns the whole store (possibly empty).
    #[must_use]
    pub fn find_triple_pattern(&self, pattern: &TriplePattern) -> Option<Vec<Arc<Triple>>> {
        match pattern.mask().slot() {
            None => Some(self.triples.values().cloned().collect()),
            Some(slot) => self.indices[slot].get(&pattern.index_key()).cloned(),
        }
    }

    // =========================================================================
    // READ-ONLY ACCESS
    // =========================================================================

    /// Look up a predicate without creating it.
    #[must_use]
    pub fn predicate(&self, identifier: &str) -> Option<&Predicate> {
        self.predicates.get(identifier)
    }

    /// Look up a triple by canonical identifier, ignoring case.
    #[must_use]
    pub fn triple(&self, canonical: &str) -> Option<&Arc<Triple>> {
        self.triples.get(canonical)
    }

    /// All triples in canonical-identifier order.
    pub fn triples(&self) -> impl Iterator<Item = &Arc<Triple>> {
        self.triples.values()
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct predicates.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    /// Whether the store holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of keys in the secondary index for `mask`.
    ///
    /// `None` for the all-wildcard mask, which has no index.
    #[must_use]
    pub fn index_key_count(&self, mask: PatternMask) -> Option<usize> {
        mask.slot().map(|slot| self.indices[slot].len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
