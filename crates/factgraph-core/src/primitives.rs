//! # Format Primitives
//!
//! Fixed tokens and limits of the factgraph line format.
//!
//! These are compiled into the binary and are immutable at runtime.
//!
//! ## Line Grammar
//!
//! ```text
//! <subject> <predicate> <object>.
//! ```
//!
//! Tokens are separated by runs of spaces or tabs. The object token carries
//! a mandatory trailing [`STATEMENT_TERMINATOR`]. Query lines may use
//! [`WILDCARD`] in any position.

/// The wildcard token accepted in query positions.
///
/// Matches any value in that position. Never turned into a Node or Predicate.
pub const WILDCARD: &str = "?";

/// Terminator that must end the object token of every statement.
pub const STATEMENT_TERMINATOR: char = '.';

/// File extension (without the dot) required for import and query files.
///
/// Any other extension is rejected before the file is opened.
pub const FILE_EXTENSION: &str = "nt";

/// Line printed when a query matches nothing.
pub const NULL_SENTINEL: &str = "<null>";

/// Number of tokens in every statement line.
pub const TOKENS_PER_STATEMENT: usize = 3;

/// Separator between bound identifiers in a secondary index key.
///
/// Cannot collide with identifier characters.
pub const INDEX_KEY_SEPARATOR: char = '|';
