//! # factgraph-core
//!
//! The in-memory fact store for factgraph - THE LOGIC.
//!
//! This crate holds subject-predicate-object triples, answers wildcard
//! pattern queries over them, and bulk-loads them from line-oriented `.nt`
//! files.
//!
//! ## Components
//!
//! - `identifier` → identifier grammar and case-insensitive keying
//! - `types` → `Node`, `Predicate`, `Triple`, patterns, errors
//! - `store` → `FactStore` with seven secondary indices
//! - `query` → `QueryEngine` (single line and file mode)
//! - `importer` → `Importer` with per-line recovery
//! - `export` / `metrics` → line-format export and size counters
//!
//! ## Architectural Constraints
//!
//! - The store is an explicit value; there is no process-wide instance
//! - Single writer: mutation goes through `&mut FactStore`
//! - NO async, NO network, NO logging dependencies; diagnostics are data

// =============================================================================
// MODULES
// =============================================================================

pub mod export;
pub mod identifier;
pub mod importer;
pub mod metrics;
pub mod primitives;
pub mod query;
pub mod statement;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{
    FactError, LineDefect, LineDiagnostic, Node, PatternMask, Position, Predicate, Triple,
    TriplePattern,
};

pub use export::{export_to_file, export_triples};
pub use identifier::{CaseInsensitiveMap, validate};
pub use importer::{ImportReport, Importer, TripleStatement};
pub use metrics::{IndexMetrics, StoreMetrics};
pub use query::{QueryEngine, QueryFileEntry, QueryFileReport, QueryOutput, QueryStatement};
pub use store::{FactStore, ImportOutcome};
