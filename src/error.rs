//! Error types for the PDF parsing core.
//!
//! Every variant that can be attributed to a specific byte in the input carries
//! the offset at which the problem was detected, so callers can inspect the
//! surrounding bytes for diagnostics. The parser never retries internally; an
//! error is always fatal to the operation that produced it.

use thiserror::Error;

/// Errors produced while tokenizing, parsing, or resolving PDF structure.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Underlying I/O failure reading from or seeking the input stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A lexical rule was violated: malformed number, unterminated string,
    /// unknown keyword, bad hex digit, or a short read inside a token.
    #[error("lexical error at byte {position}: {message}")]
    Lexical { position: u64, message: String },

    /// The token stream didn't match the expected grammar production, e.g. a
    /// dictionary key that isn't a Name, or a stream missing `endstream`.
    #[error("unexpected token at byte {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: u64,
        expected: String,
        found: String,
    },

    /// A value was structurally present but semantically invalid, e.g. a
    /// stream `Length` that resolves to something other than a non-negative
    /// Integer, or a header that isn't `%PDF-M.N`.
    #[error("semantic error at byte {position}: {message}")]
    Semantic { position: u64, message: String },

    /// A value was required but the input ended first.
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: u64 },

    /// The reference resolver refused or failed to supply an object needed
    /// mid-parse (only ever raised while resolving a stream's `Length`).
    #[error("reference resolution failed for {object_id} {generation} R: {message}")]
    ResolutionFailed {
        object_id: u64,
        generation: u16,
        message: String,
    },

    /// `find_startxref_offset` could not locate a well-formed
    /// `startxref <offset> %%EOF` trailer near the end of the input.
    #[error("malformed startxref trailer: {0}")]
    MalformedStartXRef(String),

    /// An xref entry or section header did not conform to the fixed 20-byte
    /// record format or the `first_id count` header grammar.
    #[error("invalid xref entry at byte {position}: {message}")]
    InvalidXRefEntry { position: u64, message: String },
}

/// Result type returned by every parsing operation in this crate.
pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    /// The byte offset the error was detected at, when one is known.
    pub fn position(&self) -> Option<u64> {
        match self {
            ParseError::Lexical { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::Semantic { position, .. }
            | ParseError::UnexpectedEof { position }
            | ParseError::InvalidXRefEntry { position, .. } => Some(*position),
            ParseError::Io(_) | ParseError::ResolutionFailed { .. } | ParseError::MalformedStartXRef(_) => None,
        }
    }
}
