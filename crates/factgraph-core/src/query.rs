//! # Query Module
//!
//! Single-line wildcard queries against the fact store.
//!
//! - Query lines use the statement grammar; any position may be `?`
//! - Parsing is pure; execution resolves identifiers through the store
//! - Resolving an unknown identifier creates it, as import would
//! - File mode records malformed lines and keeps going

use crate::primitives::{NULL_SENTINEL, WILDCARD};
use crate::statement;
use crate::store::FactStore;
use crate::types::{FactError, LineDefect, LineDiagnostic, Position, Triple, TriplePattern};
use serde::Serialize;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

/// A validated query line. `None` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStatement<'a> {
    pub subject: Option<&'a str>,
    pub predicate: Option<&'a str>,
    /// Object with the terminator stripped.
    pub object: Option<&'a str>,
}

/// The answer to one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    /// The query as resolved, e.g. `Harvard locatedIn ?.`
    pub query: String,
    /// Matching triples; `None` when no index entry exists.
    pub matches: Option<Vec<Arc<Triple>>>,
}

impl QueryOutput {
    /// Matching triples, empty when nothing matched.
    #[must_use]
    pub fn triples(&self) -> &[Arc<Triple>] {
        self.matches.as_deref().unwrap_or_default()
    }

    /// Whether the answer renders as the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.triples().is_empty()
    }

    /// Console lines: the echo, then one statement per match or `<null>`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.triples().len() + 1);
        lines.push(self.query.clone());
        if self.is_null() {
            lines.push(NULL_SENTINEL.to_string());
        } else {
            lines.extend(self.triples().iter().map(|t| t.statement()));
        }
        lines
    }
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// One non-blank line of a query file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryFileEntry {
    /// The line parsed and ran.
    Answered { line: usize, output: QueryOutput },
    /// The line was malformed and skipped.
    Rejected(LineDiagnostic),
}

/// Results of a query file run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryFileReport {
    pub source: String,
    pub entries: Vec<QueryFileEntry>,
}

impl QueryFileReport {
    /// Diagnostics for the rejected lines.
    pub fn diagnostics(&self) -> impl Iterator<Item = &LineDiagnostic> {
        self.entries.iter().filter_map(|entry| match entry {
            QueryFileEntry::Rejected(diag) => Some(diag),
            QueryFileEntry::Answered { .. } => None,
        })
    }

    /// Answers for the lines that ran.
    pub fn outputs(&self) -> impl Iterator<Item = &QueryOutput> {
        self.entries.iter().filter_map(|entry| match entry {
            QueryFileEntry::Answered { output, .. } => Some(output),
            QueryFileEntry::Rejected(_) => None,
        })
    }

    /// Console rendering: each answer block followed by a blank line,
    /// diagnostics inline where they occurred.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                QueryFileEntry::Answered { output, .. } => {
                    out.push_str(&output.to_string());
                    out.push_str("\n\n");
                }
                QueryFileEntry::Rejected(diag) => {
                    out.push_str(&diag.to_string());
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// The QueryEngine parses query lines and resolves them against a store.
pub struct QueryEngine;

impl QueryEngine {
    /// Parse and validate a single query line.
    pub fn parse_query(line: &str) -> Result<QueryStatement<'_>, FactError> {
        Self::parse(line).map_err(FactError::MalformedQuery)
    }

    fn parse(line: &str) -> Result<QueryStatement<'_>, LineDefect> {
        let [subject, predicate, object] = statement::tokens(line)?;
        let subject = Self::term(subject, Position::Subject)?;
        let predicate = Self::term(predicate, Position::Predicate)?;
        let object = statement::strip_terminator(object)?;
        let object = Self::term(object, Position::Object)?;
        Ok(QueryStatement {
            subject,
            predicate,
            object,
        })
    }

    fn term(token: &str, position: Position) -> Result<Option<&str>, LineDefect> {
        if token == WILDCARD {
            return Ok(None);
        }
        statement::require_identifier(token, position).map(Some)
    }

    /// Resolve a parsed query into a pattern, creating unknown identifiers.
    pub fn resolve(store: &mut FactStore, query: &QueryStatement<'_>) -> TriplePattern {
        TriplePattern::new(
            query.subject.map(|s| store.get_or_create_node(s)),
            query.predicate.map(|p| store.get_or_create_predicate(p)),
            query.object.map(|o| store.get_or_create_node(o)),
        )
    }

    /// Parse, resolve, and run one query line.
    ///
    /// # Errors
    /// Returns `FactError::MalformedQuery` naming the defect; the store is
    /// untouched in that case.
    pub fn execute_query(store: &mut FactStore, line: &str) -> Result<QueryOutput, FactError> {
        let query = Self::parse_query(line)?;
        let pattern = Self::resolve(store, &query);
        let matches = store.find_triple_pattern(&pattern);
        Ok(QueryOutput {
            query: pattern.to_string(),
            matches,
        })
    }

    /// Run every non-blank line of `reader` as a query.
    ///
    /// Malformed lines, including undecodable bytes, become diagnostics; a
    /// read error aborts the run.
    pub fn execute_query_reader<R: BufRead>(
        store: &mut FactStore,
        reader: R,
        source: &str,
    ) -> Result<QueryFileReport, FactError> {
        let mut report = QueryFileReport {
            source: source.to_string(),
            entries: Vec::new(),
        };

        for (index, line) in statement::lines(reader).enumerate() {
            let line = line.map_err(|e| FactError::io(source, &e))?;
            if line.trim().is_empty() {
                continue;
            }

            let number = index + 1;
            let entry = match Self::execute_query(store, &line) {
                Ok(output) => QueryFileEntry::Answered {
                    line: number,
                    output,
                },
                Err(err) => QueryFileEntry::Rejected(LineDiagnostic::new(source, number, &err)),
            };
            report.entries.push(entry);
        }

        Ok(report)
    }

    /// Run a `.nt` query file.
    ///
    /// # Errors
    /// - `FactError::InvalidImportTarget` if the extension is not `.nt`
    /// - `FactError::Io` if the file cannot be opened or read
    pub fn execute_query_file(
        store: &mut FactStore,
        path: impl AsRef<Path>,
    ) -> Result<QueryFileReport, FactError> {
        let path = path.as_ref();
        let reader = statement::open(path)?;
        Self::execute_query_reader(store, reader, &statement::source_label(path))
    }
}

// =============================================================================
// TESTS
// =============================================================================
