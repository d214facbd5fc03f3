//! # Statement Grammar
//!
//! Tokenizing shared by the importer and the query engine, plus the
//! `.nt` file gate both of them open input through.

use crate::identifier;
use crate::primitives::{FILE_EXTENSION, STATEMENT_TERMINATOR, TOKENS_PER_STATEMENT};
use crate::types::{FactError, LineDefect, Position};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Split a line into exactly three whitespace-separated tokens.
pub fn tokens(line: &str) -> Result<[&str; TOKENS_PER_STATEMENT], LineDefect> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [subject, predicate, object] => Ok([*subject, *predicate, *object]),
        _ => Err(LineDefect::TokenCount { found: parts.len() }),
    }
}

/// Strip the mandatory terminator from an object token.
pub fn strip_terminator(token: &str) -> Result<&str, LineDefect> {
    token
        .strip_suffix(STATEMENT_TERMINATOR)
        .ok_or_else(|| LineDefect::MissingTerminator {
            token: token.to_string(),
        })
}

/// Check a token against the identifier grammar for `position`.
pub fn require_identifier(token: &str, position: Position) -> Result<&str, LineDefect> {
    if identifier::validate(token) {
        Ok(token)
    } else {
        Err(LineDefect::InvalidIdentifier {
            position,
            token: token.to_string(),
        })
    }
}

/// Reject paths without the `.nt` extension. Does not touch the filesystem.
pub fn require_extension(path: &Path) -> Result<(), FactError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == FILE_EXTENSION => Ok(()),
        _ => Err(FactError::InvalidImportTarget {
            path: path.display().to_string(),
        }),
    }
}

/// Gate on the extension, then open the file for line reading.
pub fn open(path: &Path) -> Result<BufReader<File>, FactError> {
    require_extension(path)?;
    let file = File::open(path).map_err(|e| FactError::io(path, &e))?;
    Ok(BufReader::new(file))
}

/// Lines of a statement stream, decoded lossily.
///
/// Splits on `\n` and drops a trailing `\r`. Bytes that are not UTF-8
/// become U+FFFD, which no identifier accepts, so a bad byte fails that one
/// line's grammar check. Only a failed read yields `Err`.
pub struct StatementLines<R> {
    reader: R,
    buf: Vec<u8>,
}

/// Iterate the lines of `reader`. See [`StatementLines`].
pub fn lines<R: BufRead>(reader: R) -> StatementLines<R> {
    StatementLines {
        reader,
        buf: Vec::new(),
    }
}

impl<R: BufRead> Iterator for StatementLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let bytes = self.buf.as_slice();
                let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
                let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
                Some(Ok(String::from_utf8_lossy(bytes).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Label used for a file in diagnostics.
#[must_use]
pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
