//! The external reference-resolution capability.
//!
//! The parser never owns the cross-reference index; it only ever asks an
//! outside collaborator to satisfy one reference at a time, and only while
//! reading a stream's `Length` entry. Keeping this as a narrow capability
//! (one method, passed in at construction) instead of a listener registry
//! means the parser has no observable side effects beyond its return value.

use crate::error::ParseResult;
use crate::parser::objects::PdfObject;

/// Resolves an indirect reference to the object it points to.
///
/// Implementations may themselves re-enter the parser (e.g. seeking to an
/// offset recorded in an XRef index and calling `parse_indirect_object`);
/// the parser guarantees that such re-entry correctly saves and restores
/// cursor position and clears the token push-back stack across seeks.
pub trait ReferenceResolver {
    fn resolve(&mut self, object_id: u64, generation: u16) -> ParseResult<Option<PdfObject>>;
}

impl<F> ReferenceResolver for F
where
    F: FnMut(u64, u16) -> ParseResult<Option<PdfObject>>,
{
    fn resolve(&mut self, object_id: u64, generation: u16) -> ParseResult<Option<PdfObject>> {
        self(object_id, generation)
    }
}

/// A resolver that never has anything to offer, for callers that know the
/// document contains no indirect stream `Length` values (or intend that to
/// be a hard error).
pub struct NullResolver;

impl ReferenceResolver for NullResolver {
    fn resolve(&mut self, _object_id: u64, _generation: u16) -> ParseResult<Option<PdfObject>> {
        Ok(None)
    }
}
