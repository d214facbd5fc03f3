//! # Property-Based Tests
//!
//! These tests check the store's indexing invariants against a brute-force
//! scan over randomly generated triple sets.

use factgraph_core::{FactStore, QueryEngine, Triple, TriplePattern, validate};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Small alphabet so generated triples collide often.
fn ident() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "A", "b", "B", "c", "x_1", "X_1", "q9"]).prop_map(String::from)
}

fn triple_set() -> impl Strategy<Value = Vec<(String, String, String)>> {
    vec((ident(), ident(), ident()), 0..40)
}

fn lower(s: &str) -> String {
    s.to_ascii_lowercase()
}

fn ids(triples: &[Arc<Triple>]) -> BTreeSet<String> {
    triples.iter().map(|t| lower(t.id())).collect()
}

proptest! {
    /// The grammar accepts exactly `[A-Za-z0-9_]+`.
    #[test]
    fn grammar_matches_character_class(token in "\\PC{0,12}") {
        let expected = !token.is_empty()
            && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        prop_assert_eq!(validate(&token), expected);
    }

    /// Triple count equals the number of distinct case-folded triples.
    #[test]
    fn triple_count_is_distinct_count(triples in triple_set()) {
        let mut store = FactStore::new();
        for (s, p, o) in &triples {
            store.import_triple(s, p, o);
        }

        let distinct: BTreeSet<_> = triples
            .iter()
            .map(|(s, p, o)| (lower(s), lower(p), lower(o)))
            .collect();
        prop_assert_eq!(store.triple_count(), distinct.len());
    }

    /// Every indexed lookup agrees with a full scan, for every mask.
    #[test]
    fn index_agrees_with_scan(
        triples in triple_set(),
        probe in (ident(), ident(), ident()),
        bits in 0u8..8,
    ) {
        let mut store = FactStore::new();
        for (s, p, o) in &triples {
            store.import_triple(s, p, o);
        }

        let (s, p, o) = probe;
        let bind_s = bits & 0b100 != 0;
        let bind_p = bits & 0b010 != 0;
        let bind_o = bits & 0b001 != 0;
        let pattern = TriplePattern::new(
            bind_s.then(|| store.get_or_create_node(&s)),
            bind_p.then(|| store.get_or_create_predicate(&p)),
            bind_o.then(|| store.get_or_create_node(&o)),
        );

        let expected: BTreeSet<String> = store
            .triples()
            .filter(|t| !bind_s || lower(t.subject().as_str()) == lower(&s))
            .filter(|t| !bind_p || lower(t.predicate().as_str()) == lower(&p))
            .filter(|t| !bind_o || lower(t.object().as_str()) == lower(&o))
            .map(|t| lower(t.id()))
            .collect();

        let found = store.find_triple_pattern(&pattern).unwrap_or_default();
        prop_assert_eq!(found.len(), expected.len());
        prop_assert_eq!(ids(&found), expected);
    }

    /// Every imported triple answers its own fully bound query.
    #[test]
    fn imported_triples_round_trip(triples in triple_set()) {
        let mut store = FactStore::new();
        for (s, p, o) in &triples {
            store.import_triple(s, p, o);
        }

        for (s, p, o) in &triples {
            let out = QueryEngine::execute_query(&mut store, &format!("{s} {p} {o}."))
                .expect("query");
            prop_assert_eq!(out.triples().len(), 1);
        }
    }
}
