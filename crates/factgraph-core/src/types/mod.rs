//! # Core Type Definitions
//!
//! This module contains the data model of the fact store:
//! - Identifiers (`Node`, `Predicate`)
//! - Facts (`Triple`) and query shapes (`TriplePattern`, `PatternMask`)
//! - Error types (`FactError`, `LineDefect`) and line-scoped diagnostics
//!
//! ## Identity Guarantees
//!
//! `Node` and `Predicate` share a grammar but are distinct types, so a
//! predicate can never sit in a subject or object position. Both are only
//! minted by the `FactStore`, which interns them case-insensitively.

use crate::identifier;
use crate::primitives::{FILE_EXTENSION, INDEX_KEY_SEPARATOR, STATEMENT_TERMINATOR, WILDCARD};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// A subject or object in the store.
///
/// Cheap to clone: the identifier text is shared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Node(Arc<str>);

impl Node {
    pub(crate) fn new(identifier: &str) -> Self {
        Self(Arc::from(identifier))
    }

    /// The identifier with the casing it was first stored under.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The relationship of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Predicate(Arc<str>);

impl Predicate {
    pub(crate) fn new(identifier: &str) -> Self {
        Self(Arc::from(identifier))
    }

    /// The identifier with the casing it was first stored under.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TRIPLE
// =============================================================================

/// An immutable (subject, predicate, object) fact.
///
/// The canonical identifier is the single-space join of the three
/// components in their stored casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triple {
    subject: Node,
    predicate: Predicate,
    object: Node,
    #[serde(rename = "id")]
    canonical: String,
}

impl Triple {
    pub(crate) fn new(subject: Node, predicate: Predicate, object: Node) -> Self {
        let canonical = canonical_id(subject.as_str(), predicate.as_str(), object.as_str());
        Self {
            subject,
            predicate,
            object,
            canonical,
        }
    }

    /// The subject node.
    #[must_use]
    pub fn subject(&self) -> &Node {
        &self.subject
    }

    /// The predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// The object node.
    #[must_use]
    pub fn object(&self) -> &Node {
        &self.object
    }

    /// The canonical identifier, e.g. `"Alice likes Bob"`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.canonical
    }

    /// The triple as a statement line, e.g. `"Alice likes Bob."`.
    #[must_use]
    pub fn statement(&self) -> String {
        format!("{}{}", self.canonical, STATEMENT_TERMINATOR)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Build the canonical identifier for three identifiers.
#[must_use]
pub fn canonical_id(subject: &str, predicate: &str, object: &str) -> String {
    format!("{subject} {predicate} {object}")
}

// =============================================================================
// PATTERNS
// =============================================================================

/// A query shape. `None` is the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Node>,
    pub predicate: Option<Predicate>,
    pub object: Option<Node>,
}

impl TriplePattern {
    /// Create a pattern from its three positions.
    #[must_use]
    pub fn new(subject: Option<Node>, predicate: Option<Predicate>, object: Option<Node>) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Which positions are bound.
    #[must_use]
    pub fn mask(&self) -> PatternMask {
        PatternMask::from_bound(
            self.subject.is_some(),
            self.predicate.is_some(),
            self.object.is_some(),
        )
    }

    /// Secondary index key for this pattern, built from the bound positions.
    #[must_use]
    pub fn index_key(&self) -> String {
        self.mask().key(
            self.subject.as_ref().map_or("", Node::as_str),
            self.predicate.as_ref().map_or("", Predicate::as_str),
            self.object.as_ref().map_or("", Node::as_str),
        )
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.subject.as_ref().map_or(WILDCARD, Node::as_str),
            self.predicate.as_ref().map_or(WILDCARD, Predicate::as_str),
            self.object.as_ref().map_or(WILDCARD, Node::as_str),
            STATEMENT_TERMINATOR
        )
    }
}

/// Bound-position mask: subject `0b100`, predicate `0b010`, object `0b001`.
///
/// Mask `0` (all wildcards) is answered from the primary triple map; each of
/// the other seven masks owns one secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternMask(u8);

impl PatternMask {
    pub const SUBJECT: u8 = 0b100;
    pub const PREDICATE: u8 = 0b010;
    pub const OBJECT: u8 = 0b001;

    /// All-wildcard mask.
    pub const NONE: Self = Self(0);

    /// Number of secondary indices (every mask except `NONE`).
    pub const INDEXED_COUNT: usize = 7;

    /// Build a mask from bound flags.
    #[must_use]
    pub const fn from_bound(subject: bool, predicate: bool, object: bool) -> Self {
        let mut bits = 0;
        if subject {
            bits |= Self::SUBJECT;
        }
        if predicate {
            bits |= Self::PREDICATE;
        }
        if object {
            bits |= Self::OBJECT;
        }
        Self(bits)
    }

    /// The seven masks that own a secondary index, in slot order.
    pub fn indexed() -> impl Iterator<Item = Self> {
        (1..=Self::INDEXED_COUNT as u8).map(Self)
    }

    /// Secondary index slot, or `None` for the all-wildcard mask.
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self.0 {
            0 => None,
            bits => Some(bits as usize - 1),
        }
    }

    #[must_use]
    pub const fn binds_subject(self) -> bool {
        self.0 & Self::SUBJECT != 0
    }

    #[must_use]
    pub const fn binds_predicate(self) -> bool {
        self.0 & Self::PREDICATE != 0
    }

    #[must_use]
    pub const fn binds_object(self) -> bool {
        self.0 & Self::OBJECT != 0
    }

    /// Composite key from the bound positions, lowercased, `|`-joined.
    ///
    /// Unbound arguments are ignored.
    #[must_use]
    pub fn key(self, subject: &str, predicate: &str, object: &str) -> String {
        let mut key = String::new();
        for (bound, part) in [
            (self.binds_subject(), subject),
            (self.binds_predicate(), predicate),
            (self.binds_object(), object),
        ] {
            if !bound {
                continue;
            }
            if !key.is_empty() {
                key.push(INDEX_KEY_SEPARATOR);
            }
            key.push_str(part);
        }
        identifier::normalize(&key)
    }

    /// Key under which `triple` is filed in this mask's index.
    #[must_use]
    pub fn key_for(self, triple: &Triple) -> String {
        self.key(
            triple.subject.as_str(),
            triple.predicate.as_str(),
            triple.object.as_str(),
        )
    }

    /// Short shape label such as `SP?` or `??O`.
    #[must_use]
    pub fn shape(self) -> &'static str {
        match self.0 {
            0b111 => "SPO",
            0b110 => "SP?",
            0b101 => "S?O",
            0b100 => "S??",
            0b011 => "?PO",
            0b010 => "?P?",
            0b001 => "??O",
            _ => "???",
        }
    }
}

impl fmt::Display for PatternMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Statement position, used to name the failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Subject => "subject",
            Self::Predicate => "predicate",
            Self::Object => "object",
        })
    }
}

/// Why a single statement line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineDefect {
    /// The line did not split into exactly three tokens.
    #[error("expected 3 tokens, found {found}")]
    TokenCount { found: usize },

    /// A token failed the identifier grammar.
    #[error("invalid {position} '{token}'")]
    InvalidIdentifier { position: Position, token: String },

    /// The object token did not end with the terminator.
    #[error("object '{token}' must end with '.'")]
    MissingTerminator { token: String },
}

/// Errors that can occur in factgraph.
///
/// - Line-scoped kinds (`MalformedTriple`, `MalformedQuery`) are recovered
///   from by the batch drivers and surface as [`LineDiagnostic`]s
/// - `InvalidImportTarget` and `Io` abort the operation they occur in
/// - No variant describes a store failure: validated input cannot fail there
#[derive(Debug, Error)]
pub enum FactError {
    /// The path does not carry the required extension.
    #[error("Invalid import target '{path}': expected a .{ext} file", ext = FILE_EXTENSION)]
    InvalidImportTarget { path: String },

    /// An import line failed grammar or token-count validation.
    #[error("Malformed triple: {0}")]
    MalformedTriple(LineDefect),

    /// A query line failed grammar or token-count validation.
    #[error("Malformed query: {0}")]
    MalformedQuery(LineDefect),

    /// The file could not be opened, read, or written.
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}

impl FactError {
    /// Build an `Io` error for a path.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Whether this error is scoped to a single line and can be skipped.
    #[must_use]
    pub fn is_line_scoped(&self) -> bool {
        matches!(self, Self::MalformedTriple(_) | Self::MalformedQuery(_))
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// A recovered, line-scoped failure from a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    /// File name (or other label) of the input.
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    /// Rendered error message.
    pub message: String,
}

impl LineDiagnostic {
    /// Record a line-scoped error.
    #[must_use]
    pub fn new(source: &str, line: usize, error: &FactError) -> Self {
        Self {
            source: source.to_string(),
            line,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line number {}: {}", self.source, self.line, self.message)
    }
}

// =============================================================================
// TESTS
// =============================================================================
