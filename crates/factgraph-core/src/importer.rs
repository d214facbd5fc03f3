//! # Importer Module
//!
//! Bulk loading of `.nt` statement files into the fact store.
//!
//! - Every line is validated on its own before the store is touched
//! - A malformed line is recorded and skipped, never stored in part
//! - Only an unreadable file or a wrong extension aborts the import

use crate::statement;
use crate::store::FactStore;
use crate::types::{FactError, LineDefect, LineDiagnostic, Position};
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;

/// A validated import line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleStatement<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    /// Object identifier with the terminator already stripped.
    pub object: &'a str,
}

/// Summary of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Label of the input (file name).
    pub source: String,
    /// Lines that produced a triple, including re-imports.
    pub accepted: usize,
    /// Triples that were new to the store.
    pub inserted: usize,
    /// Rejected lines, in input order.
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ImportReport {
    /// Accepted lines whose triple was already stored.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.accepted.saturating_sub(self.inserted)
    }
}

/// The Importer feeds statement files into a [`FactStore`].
pub struct Importer;

impl Importer {
    /// Parse and validate a single import line.
    ///
    /// Wildcards are not allowed here; `?` fails the identifier grammar.
    pub fn parse_triple_line(line: &str) -> Result<TripleStatement<'_>, FactError> {
        Self::parse(line).map_err(FactError::MalformedTriple)
    }

    fn parse(line: &str) -> Result<TripleStatement<'_>, LineDefect> {
        let [subject, predicate, object] = statement::tokens(line)?;
        let subject = statement::require_identifier(subject, Position::Subject)?;
        let predicate = statement::require_identifier(predicate, Position::Predicate)?;
        let object = statement::strip_terminator(object)?;
        let object = statement::require_identifier(object, Position::Object)?;
        Ok(TripleStatement {
            subject,
            predicate,
            object,
        })
    }

    /// Import every line of `reader`, labelling diagnostics with `source`.
    ///
    /// Every line is a statement: a blank line is a token-count diagnostic,
    /// and undecodable bytes fail the identifier grammar on their line. Only
    /// a read error aborts the run; triples imported before it stay in the
    /// store.
    pub fn import_reader<R: BufRead>(
        store: &mut FactStore,
        reader: R,
        source: &str,
    ) -> Result<ImportReport, FactError> {
        let mut report = ImportReport {
            source: source.to_string(),
            ..ImportReport::default()
        };

        for (index, line) in statement::lines(reader).enumerate() {
            let line = line.map_err(|e| FactError::io(source, &e))?;
            match Self::parse_triple_line(&line) {
                Ok(stmt) => {
                    let outcome = store.import_triple(stmt.subject, stmt.predicate, stmt.object);
                    report.accepted += 1;
                    if outcome.inserted {
                        report.inserted += 1;
                    }
                }
                Err(err) => {
                    report
                        .diagnostics
                        .push(LineDiagnostic::new(source, index + 1, &err));
                }
            }
        }

        Ok(report)
    }

    /// Import a `.nt` file.
    ///
    /// # Errors
    /// - `FactError::InvalidImportTarget` if the extension is not `.nt`
    ///   (the file is not opened)
    /// - `FactError::Io` if the file cannot be opened or read
    pub fn import_triple_file(
        store: &mut FactStore,
        path: impl AsRef<Path>,
    ) -> Result<ImportReport, FactError> {
        let path = path.as_ref();
        let reader = statement::open(path)?;
        Self::import_reader(store, reader, &statement::source_label(path))
    }
}

// =============================================================================
// TESTS
// =============================================================================
