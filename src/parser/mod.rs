//! PDF parsing core: byte cursor, tokenizer, object grammar, classic xref
//! tables, and the reference-resolution seam between them.
//!
//! The modules are laid out leaf-first, matching their dependency order:
//! [`cursor`] knows only bytes, [`lexer`] turns those into tokens,
//! [`objects`] defines the value types the grammar produces, [`xref`] and
//! [`object_parser`] consume tokens to build those values, and [`resolver`]
//! is the capability the object parser calls out through.

pub mod cursor;
pub mod lexer;
pub mod object_parser;
pub mod objects;
pub mod resolver;
pub mod xref;

pub use cursor::ByteCursor;
pub use lexer::{Keyword, Token, TokenKind, Tokenizer, XRefEntryFields};
pub use object_parser::ObjectParser;
pub use objects::{
    IndirectObject, PdfArray, PdfDictionary, PdfName, PdfNumber, PdfObject, PdfStream, PdfString,
    StringEncoding,
};
pub use resolver::{NullResolver, ReferenceResolver};
pub use xref::XRefEntry;
