//! Syntactic parsing: turns a token stream into [`PdfObject`]s, indirect
//! objects, and the xref/trailer pair that anchors a classic PDF file.
//!
//! `ObjectParser` owns the [`Tokenizer`] and the [`ReferenceResolver`]
//! capability. It never holds a document-wide xref index itself — that
//! assembly, and any `Length`-reference resolution it requires, is the
//! resolver's job; the parser only ever calls out to it.

use std::io::{Read, Seek};

use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::parser::cursor::ByteCursor;
use crate::parser::lexer::{Keyword, Token, TokenKind, Tokenizer};
use crate::parser::objects::{
    IndirectObject, PdfArray, PdfDictionary, PdfName, PdfNumber, PdfObject, PdfStream, PdfString,
    StringEncoding,
};
use crate::parser::resolver::ReferenceResolver;
use crate::parser::xref::{self, XRefEntry};

/// Classifies a token that caused a probe (`parse_object`, array/dictionary
/// termination) to come up empty, so that a genuine lexical failure is
/// never silently treated as "nothing here".
///
/// This inspects the token that actually stopped the parse, not whatever
/// token opened the enclosing construct — a dictionary or array is only
/// "empty" if the child parse saw its closer, not merely because the
/// container's own opening token happened to look a certain way.
fn classify_miss(token: Token, expected: &str) -> ParseError {
    match token.kind {
        TokenKind::Error(message) => ParseError::Lexical {
            position: token.offset,
            message,
        },
        TokenKind::Empty => ParseError::UnexpectedEof {
            position: token.offset,
        },
        other => ParseError::UnexpectedToken {
            position: token.offset,
            expected: expected.to_string(),
            found: format!("{other:?}"),
        },
    }
}

pub struct ObjectParser<R, Res> {
    tokenizer: Tokenizer<R>,
    resolver: Res,
}

impl<R, Res> ObjectParser<R, Res>
where
    R: Read + Seek,
    Res: ReferenceResolver,
{
    pub fn new(cursor: ByteCursor<R>, resolver: Res) -> Self {
        ObjectParser {
            tokenizer: Tokenizer::new(cursor),
            resolver,
        }
    }

    pub fn position(&self) -> u64 {
        self.tokenizer.position()
    }

    /// Read the `%PDF-M.N` header comment. Comment emission is enabled only
    /// for the duration of this call.
    pub fn parse_header(&mut self) -> ParseResult<(u32, u32)> {
        self.tokenizer.ignore_comments = false;
        let result = self.parse_header_inner();
        self.tokenizer.ignore_comments = true;
        result
    }

    fn parse_header_inner(&mut self) -> ParseResult<(u32, u32)> {
        let token = self.tokenizer.next()?;
        let TokenKind::Comment(text) = token.kind else {
            return Err(ParseError::Semantic {
                position: token.offset,
                message: "expected a '%PDF-M.N' header comment".to_string(),
            });
        };
        let text = String::from_utf8_lossy(&text).into_owned();
        let Some(version) = text.strip_prefix("PDF-") else {
            return Err(ParseError::Semantic {
                position: token.offset,
                message: format!("header comment '{text}' does not start with 'PDF-'"),
            });
        };
        let mut parts = version.splitn(2, '.');
        let (Some(major_str), Some(minor_str)) = (parts.next(), parts.next()) else {
            return Err(ParseError::Semantic {
                position: token.offset,
                message: format!("header version '{version}' is not of the form M.N"),
            });
        };
        let major = major_str.parse::<u32>().map_err(|_| ParseError::Semantic {
            position: token.offset,
            message: format!("header major version '{major_str}' is not an integer"),
        })?;
        let minor = minor_str.parse::<u32>().map_err(|_| ParseError::Semantic {
            position: token.offset,
            message: format!("header minor version '{minor_str}' is not an integer"),
        })?;
        debug!(major, minor, "parsed PDF header");
        Ok((major, minor))
    }

    /// Locate the `startxref` offset near the end of the input.
    pub fn parse_xref_offset(&mut self) -> ParseResult<u64> {
        self.tokenizer.find_startxref_offset()
    }

    /// Parse a classic xref table, optionally seeking there first.
    pub fn parse_xref(&mut self, at: Option<u64>) -> ParseResult<Vec<XRefEntry>> {
        if let Some(offset) = at {
            self.tokenizer.seek(offset)?;
        }
        xref::parse_xref_table(&mut self.tokenizer)
    }

    /// Parse the `trailer` keyword followed by its dictionary.
    pub fn parse_trailer(&mut self) -> ParseResult<PdfDictionary> {
        let token = self.tokenizer.next()?;
        if !matches!(token.kind, TokenKind::Keyword(Keyword::Trailer)) {
            return Err(ParseError::UnexpectedToken {
                position: token.offset,
                expected: "'trailer'".to_string(),
                found: format!("{:?}", token.kind),
            });
        }
        match self.parse_object()? {
            Some(PdfObject::Dictionary(dict)) => Ok(dict),
            Some(other) => Err(ParseError::UnexpectedToken {
                position: token.offset,
                expected: "a Dictionary".to_string(),
                found: format!("{other:?}"),
            }),
            None => {
                let miss = self.tokenizer.next()?;
                Err(classify_miss(miss, "trailer dictionary"))
            }
        }
    }

    /// Parse one indirect object, optionally at a given byte offset.
    ///
    /// Returns `Ok(None)` — a probe miss, not an error — when the
    /// `<id> <gen> obj` header isn't present at the current position; every
    /// consumed token is pushed back first so the caller sees the stream
    /// exactly as it found it.
    pub fn parse_indirect_object(&mut self, at: Option<u64>) -> ParseResult<Option<IndirectObject>> {
        let restore_to = at.map(|_| self.tokenizer.position());
        if let Some(offset) = at {
            self.tokenizer.seek(offset)?;
        }
        let result = self.parse_indirect_object_inner();
        if let Some(position) = restore_to {
            self.tokenizer.seek(position)?;
        }
        result
    }

    fn parse_indirect_object_inner(&mut self) -> ParseResult<Option<IndirectObject>> {
        let id_token = self.tokenizer.next()?;
        let TokenKind::Integer(id) = id_token.kind else {
            self.tokenizer.push_back(id_token);
            return Ok(None);
        };

        let gen_token = self.tokenizer.next()?;
        let TokenKind::Integer(generation) = gen_token.kind else {
            self.tokenizer.push_back(gen_token);
            self.tokenizer.push_back(id_token);
            return Ok(None);
        };

        let obj_token = self.tokenizer.next()?;
        if !matches!(obj_token.kind, TokenKind::Keyword(Keyword::Obj)) {
            self.tokenizer.push_back(obj_token);
            self.tokenizer.push_back(gen_token);
            self.tokenizer.push_back(id_token);
            return Ok(None);
        }

        if id < 0 || generation < 0 || generation > i64::from(u16::MAX) {
            return Err(ParseError::Semantic {
                position: id_token.offset,
                message: format!(
                    "indirect object header '{id} {generation} obj' has an invalid id or generation"
                ),
            });
        }
        let object_id = id as u64;
        let generation = generation as u16;

        let body = match self.parse_object()? {
            Some(obj) => obj,
            None => {
                let miss = self.tokenizer.next()?;
                return Err(classify_miss(miss, "indirect object body"));
            }
        };

        let tag_token = self.tokenizer.next()?;
        match tag_token.kind {
            TokenKind::Keyword(Keyword::EndObj) => Ok(Some(IndirectObject {
                object_id,
                generation,
                body,
            })),
            TokenKind::Keyword(Keyword::Stream) => {
                let dict = match body {
                    PdfObject::Dictionary(dict) => dict,
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            position: tag_token.offset,
                            expected: "a Dictionary preceding 'stream'".to_string(),
                            found: format!("{other:?}"),
                        })
                    }
                };
                let length = self.resolve_stream_length(&dict, tag_token.offset)?;
                self.tokenizer.read_newline()?;
                let data = self.tokenizer.read_raw_bytes(length as usize)?;
                self.tokenizer.skip_whitespace()?;

                let end_stream = self.tokenizer.next()?;
                if !matches!(end_stream.kind, TokenKind::Keyword(Keyword::EndStream)) {
                    return Err(ParseError::UnexpectedToken {
                        position: end_stream.offset,
                        expected: "'endstream'".to_string(),
                        found: format!("{:?}", end_stream.kind),
                    });
                }
                let end_obj = self.tokenizer.next()?;
                if !matches!(end_obj.kind, TokenKind::Keyword(Keyword::EndObj)) {
                    return Err(ParseError::UnexpectedToken {
                        position: end_obj.offset,
                        expected: "'endobj'".to_string(),
                        found: format!("{:?}", end_obj.kind),
                    });
                }
                Ok(Some(IndirectObject {
                    object_id,
                    generation,
                    body: PdfObject::Stream(PdfStream { dict, data }),
                }))
            }
            other => Err(ParseError::UnexpectedToken {
                position: tag_token.offset,
                expected: "'endobj' or 'stream'".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn resolve_stream_length(&mut self, dict: &PdfDictionary, position: u64) -> ParseResult<u64> {
        let length_key = PdfName(b"Length".to_vec());
        let length_obj = dict.get(&length_key).ok_or_else(|| ParseError::Semantic {
            position,
            message: "stream dictionary is missing required key /Length".to_string(),
        })?;

        let resolved = match length_obj {
            PdfObject::Reference {
                object_id,
                generation,
            } => {
                let (object_id, generation) = (*object_id, *generation);
                debug!(object_id, generation, "resolving indirect stream /Length");
                match self.resolver.resolve(object_id, generation)? {
                    Some(obj) => obj,
                    None => {
                        return Err(ParseError::ResolutionFailed {
                            object_id,
                            generation,
                            message: "resolver returned no object for stream /Length".to_string(),
                        })
                    }
                }
            }
            other => other.clone(),
        };

        match resolved {
            PdfObject::Numeric(PdfNumber::Integer(n)) if n >= 0 => Ok(n as u64),
            PdfObject::Numeric(PdfNumber::Integer(_)) => Err(ParseError::Semantic {
                position,
                message: "stream /Length must not be negative".to_string(),
            }),
            other => Err(ParseError::Semantic {
                position,
                message: format!("stream /Length must resolve to a non-negative Integer, found {other:?}"),
            }),
        }
    }

    /// Parse one PDF object value. Returns `Ok(None)` — a probe miss — when
    /// the next token doesn't begin an object; the token is pushed back so
    /// the caller's next `Tokenizer::next()` sees it unchanged.
    pub fn parse_object(&mut self) -> ParseResult<Option<PdfObject>> {
        let token = self.tokenizer.next()?;
        match token.kind {
            TokenKind::Name(bytes) => Ok(Some(PdfObject::Name(PdfName(bytes)))),
            TokenKind::LiteralString(bytes) => Ok(Some(PdfObject::String(PdfString {
                bytes,
                origin: StringEncoding::Literal,
            }))),
            TokenKind::HexString(bytes) => Ok(Some(PdfObject::String(PdfString {
                bytes,
                origin: StringEncoding::Hex,
            }))),
            TokenKind::Keyword(Keyword::True) => Ok(Some(PdfObject::Boolean(true))),
            TokenKind::Keyword(Keyword::False) => Ok(Some(PdfObject::Boolean(false))),
            TokenKind::Keyword(Keyword::Null) => Ok(Some(PdfObject::Null)),
            TokenKind::Real(v) => Ok(Some(PdfObject::Numeric(PdfNumber::Real(v)))),
            TokenKind::Integer(n) => self.parse_numeric_or_reference(n),
            TokenKind::ArrayOpen => self.parse_array().map(|a| Some(PdfObject::Array(a))),
            TokenKind::DictionaryOpen => self.parse_dictionary().map(|d| Some(PdfObject::Dictionary(d))),
            _ => {
                self.tokenizer.push_back(token);
                Ok(None)
            }
        }
    }

    /// Speculatively look ahead for `<gen> R` to disambiguate a reference
    /// from a plain Integer. Never commits a partial read: on mismatch,
    /// both lookahead tokens are pushed back in original order.
    fn parse_numeric_or_reference(&mut self, first: i64) -> ParseResult<Option<PdfObject>> {
        let gen_token = self.tokenizer.next()?;
        let TokenKind::Integer(gen) = gen_token.kind else {
            self.tokenizer.push_back(gen_token);
            return Ok(Some(PdfObject::Numeric(PdfNumber::Integer(first))));
        };

        let r_token = self.tokenizer.next()?;
        let is_reference_marker = matches!(r_token.kind, TokenKind::Keyword(Keyword::R));

        let ids = u64::try_from(first).ok().zip(u16::try_from(gen).ok());
        match (is_reference_marker, ids) {
            (true, Some((object_id, generation))) => Ok(Some(PdfObject::Reference {
                object_id,
                generation,
            })),
            _ => {
                self.tokenizer.push_back(r_token);
                self.tokenizer.push_back(gen_token);
                Ok(Some(PdfObject::Numeric(PdfNumber::Integer(first))))
            }
        }
    }

    fn parse_array(&mut self) -> ParseResult<PdfArray> {
        let mut items = Vec::new();
        while let Some(obj) = self.parse_object()? {
            items.push(obj);
        }
        let closer = self.tokenizer.next()?;
        if matches!(closer.kind, TokenKind::ArrayClose) {
            Ok(items)
        } else {
            Err(classify_miss(closer, "']'"))
        }
    }

    fn parse_dictionary(&mut self) -> ParseResult<PdfDictionary> {
        let mut dict = PdfDictionary::new();
        loop {
            // Read the key's leading token directly rather than through
            // `parse_object()`: a Name is always a single token, so there's
            // no lookahead to speculate on, and any error must report the
            // key's own starting offset — not wherever the cursor ends up
            // after a multi-token value would have been fully consumed.
            let key_token = self.tokenizer.next()?;
            let key_offset = key_token.offset;
            let key = match key_token.kind {
                TokenKind::Name(bytes) => PdfName(bytes),
                TokenKind::DictionaryClose => {
                    self.tokenizer.push_back(Token {
                        kind: TokenKind::DictionaryClose,
                        offset: key_offset,
                    });
                    break;
                }
                other => {
                    return Err(classify_miss(
                        Token {
                            kind: other,
                            offset: key_offset,
                        },
                        "a Name as dictionary key",
                    ))
                }
            };
            let value = match self.parse_object()? {
                Some(obj) => obj,
                None => {
                    let miss = self.tokenizer.next()?;
                    return Err(classify_miss(miss, "dictionary value"));
                }
            };
            dict.insert(key, value);
        }
        let closer = self.tokenizer.next()?;
        if matches!(closer.kind, TokenKind::DictionaryClose) {
            Ok(dict)
        } else {
            Err(classify_miss(closer, "'>>'"))
        }
    }
}
