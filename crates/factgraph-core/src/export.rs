//! # Export Module
//!
//! Renders the store back into the `.nt` statement format.
//!
//! The output is one `<subject> <predicate> <object>.` line per triple, in
//! canonical-identifier order, so exporting the same store twice yields the
//! same bytes and the output can be fed straight back to the importer.

use crate::statement;
use crate::store::FactStore;
use crate::types::FactError;
use std::path::Path;

/// Render every stored triple as a statement line.
#[must_use]
pub fn export_triples(store: &FactStore) -> String {
    let mut out = String::new();
    for triple in store.triples() {
        out.push_str(&triple.statement());
        out.push('\n');
    }
    out
}

/// Write [`export_triples`] to a `.nt` file, replacing its contents.
///
/// Returns the number of triples written.
pub fn export_to_file(store: &FactStore, path: impl AsRef<Path>) -> Result<usize, FactError> {
    let path = path.as_ref();
    statement::require_extension(path)?;
    std::fs::write(path, export_triples(store)).map_err(|e| FactError::io(path, &e))?;
    Ok(store.triple_count())
}
