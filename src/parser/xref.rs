//! Classic cross-reference table parsing.
//!
//! A thin adapter over the tokenizer: given a token stream positioned at an
//! `xref` keyword, produce every entry up to (but not including) the
//! `trailer` keyword. XRef streams, hybrid-reference files, and `Prev`-chain
//! assembly across multiple sections are a document-level concern and live
//! outside this crate.

use std::io::{Read, Seek};

use crate::error::{ParseError, ParseResult};
use crate::parser::lexer::{Keyword, Tokenizer, TokenKind};

/// One decoded record from a classic xref table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    pub object_id: u64,
    pub generation: u16,
    pub offset: u64,
    pub in_use: bool,
}

/// Parse every section of a classic xref table, starting at the `xref`
/// keyword, stopping just before `trailer` (which is pushed back so the
/// caller can read it next).
pub fn parse_xref_table<R: Read + Seek>(tokenizer: &mut Tokenizer<R>) -> ParseResult<Vec<XRefEntry>> {
    expect_keyword(tokenizer, Keyword::XRef)?;

    let mut entries = Vec::new();
    loop {
        let token = tokenizer.next()?;
        match token.kind {
            TokenKind::Keyword(Keyword::Trailer) => {
                tokenizer.push_back(token);
                break;
            }
            TokenKind::Integer(first_id) => {
                let count_token = tokenizer.next()?;
                let TokenKind::Integer(count) = count_token.kind else {
                    return Err(ParseError::UnexpectedToken {
                        position: count_token.offset,
                        expected: "Integer (section entry count)".to_string(),
                        found: format!("{:?}", count_token.kind),
                    });
                };
                if first_id < 0 || count < 0 {
                    return Err(ParseError::Semantic {
                        position: token.offset,
                        message: "xref section header must use non-negative integers".to_string(),
                    });
                }
                // `read_xref_entry` does a raw fixed-width byte read with no
                // whitespace handling of its own; the EOL that terminates the
                // "<first> <count>" header line has to be consumed here,
                // before the first 20-byte record, or it's misread as the
                // leading byte of entry 0's offset field.
                tokenizer.skip_whitespace()?;
                for i in 0..count as u64 {
                    let object_id = first_id as u64 + i;
                    let entry_token = tokenizer.read_xref_entry(object_id)?;
                    let TokenKind::XRefEntry(fields) = entry_token.kind else {
                        unreachable!("read_xref_entry always yields XRefEntry");
                    };
                    entries.push(XRefEntry {
                        object_id: fields.object_id,
                        generation: fields.generation,
                        offset: fields.offset,
                        in_use: fields.in_use,
                    });
                }
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    position: token.offset,
                    expected: "Integer (section header) or 'trailer'".to_string(),
                    found: format!("{other:?}"),
                })
            }
        }
    }

    Ok(entries)
}

fn expect_keyword<R: Read + Seek>(tokenizer: &mut Tokenizer<R>, keyword: Keyword) -> ParseResult<()> {
    let token = tokenizer.next()?;
    match token.kind {
        TokenKind::Keyword(k) if k == keyword => Ok(()),
        other => Err(ParseError::UnexpectedToken {
            position: token.offset,
            expected: format!("{keyword:?}"),
            found: format!("{other:?}"),
        }),
    }
}
