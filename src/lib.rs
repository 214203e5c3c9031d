//! Lexical and syntactic core for parsing PDF documents.
//!
//! This crate turns a seekable byte stream into PDF object values: it
//! tokenizes PDF syntax, parses indirect objects and streams, reads classic
//! cross-reference tables and trailers, and coordinates with an external
//! [`parser::ReferenceResolver`] whenever a stream's `Length` is itself an
//! indirect reference.
//!
//! Deliberately out of scope: stream content filters (decompression,
//! decryption), document-level xref assembly across multiple sections,
//! rendering/text extraction, and serialization back to PDF bytes. Those
//! all belong to a surrounding document layer built on top of this crate.

pub mod error;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::{
    ByteCursor, IndirectObject, Keyword, NullResolver, ObjectParser, PdfArray, PdfDictionary,
    PdfName, PdfNumber, PdfObject, PdfStream, PdfString, ReferenceResolver, StringEncoding, Token,
    TokenKind, Tokenizer, XRefEntry,
};
