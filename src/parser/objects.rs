//! The PDF object data model: the tagged values produced by [`super::object_parser::ObjectParser`].
//!
//! These types are immutable once constructed; nothing here touches the
//! tokenizer or the byte cursor.

use std::collections::HashMap;

/// A `/`-prefixed identifier, stored with `#hh` escapes already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdfName(pub Vec<u8>);

impl PdfName {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

/// Where a [`PdfString`]'s bytes came from in the source, since filters and
/// text encoding downstream sometimes care about the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Literal,
    Hex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfString {
    pub bytes: Vec<u8>,
    pub origin: StringEncoding,
}

/// Integer or real, kept apart per the lexeme's presence of a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PdfNumber {
    Integer(i64),
    Real(f64),
}

impl PdfNumber {
    /// Widens either variant to `f64`, for callers that don't care about the
    /// Integer/Real distinction.
    pub fn as_f64(&self) -> f64 {
        match self {
            PdfNumber::Integer(v) => *v as f64,
            PdfNumber::Real(v) => *v,
        }
    }

    /// The value as an Integer, when it was lexed as one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PdfNumber::Integer(v) => Some(*v),
            PdfNumber::Real(_) => None,
        }
    }
}

pub type PdfArray = Vec<PdfObject>;

/// Dictionary with last-write-wins duplicate key semantics — [`HashMap::insert`]
/// already provides this, so the container needs no special merge logic.
pub type PdfDictionary = HashMap<PdfName, PdfObject>;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

/// A fully parsed PDF value. `Stream` only ever appears as the body of an
/// [`IndirectObject`], never nested inside an array or another dictionary's
/// value — the grammar in §4.3 only constructs one at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Numeric(PdfNumber),
    Name(PdfName),
    String(PdfString),
    Array(PdfArray),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    Reference { object_id: u64, generation: u16 },
}

impl PdfObject {
    pub fn as_dictionary(&self) -> Option<&PdfDictionary> {
        match self {
            PdfObject::Dictionary(d) => Some(d),
            PdfObject::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PdfObject::Numeric(n) => n.as_integer(),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<(u64, u16)> {
        match self {
            PdfObject::Reference {
                object_id,
                generation,
            } => Some((*object_id, *generation)),
            _ => None,
        }
    }
}

/// A top-level numbered, versioned object. Its body is any [`PdfObject`]
/// variant except another `IndirectObject` — the grammar never nests these.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    pub object_id: u64,
    pub generation: u16,
    pub body: PdfObject,
}
