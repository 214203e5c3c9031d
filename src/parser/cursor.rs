//! Random-access byte cursor over a seekable input.
//!
//! The cursor is the leaf dependency of the parsing stack: it knows nothing
//! about PDF syntax beyond the `startxref` trailer it scans for, and it is
//! the only component that touches the underlying `Read + Seek` directly.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{ParseError, ParseResult};

/// How far back from the end of the input to search for `startxref`.
///
/// `startxref\n<offset>\n%%EOF` plus any trailing whitespace comfortably
/// fits in a fraction of this; conformant writers keep it under a few dozen
/// bytes, but we scan generously to tolerate padding.
const STARTXREF_SEARCH_WINDOW: u64 = 2048;

/// A seekable view over the input with a tracked current position.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap `inner`, positioned at its current location (normally the start).
    pub fn new(mut inner: R) -> ParseResult<Self> {
        let position = inner.stream_position()?;
        Ok(Self { inner, position })
    }

    /// Current byte offset.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total length of the input, in bytes.
    pub fn len(&mut self) -> ParseResult<u64> {
        let current = self.position;
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(current))?;
        Ok(end)
    }

    /// Reposition the cursor to an absolute byte offset.
    pub fn seek(&mut self, offset: u64) -> ParseResult<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        Ok(())
    }

    /// Read and consume one byte, or `None` at end of input.
    pub fn read_byte(&mut self) -> ParseResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf)? {
            0 => Ok(None),
            _ => {
                self.position += 1;
                Ok(Some(buf[0]))
            }
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek_byte(&mut self) -> ParseResult<Option<u8>> {
        match self.read_byte()? {
            Some(b) => {
                self.inner.seek(SeekFrom::Start(self.position - 1))?;
                self.position -= 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    /// Read exactly `n` bytes, erroring on short read.
    pub fn read_exact(&mut self, n: usize) -> ParseResult<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ParseError::UnexpectedEof {
                    position: self.position,
                }
            } else {
                ParseError::Io(e)
            }
        })?;
        self.position += n as u64;
        Ok(buf)
    }

    /// Scan backward from the end of the input for the literal `startxref`,
    /// then forward-parse a non-negative integer offset followed by `%%EOF`.
    ///
    /// Leaves the cursor position unspecified; callers that need a stable
    /// position afterward should `seek` explicitly.
    pub fn find_startxref_offset(&mut self) -> ParseResult<u64> {
        let total_len = self.len()?;
        let window = STARTXREF_SEARCH_WINDOW.min(total_len);
        let start = total_len - window;
        self.seek(start)?;
        let tail = self.read_exact(window as usize)?;

        let keyword_pos = find_last(&tail, b"startxref").ok_or_else(|| {
            ParseError::MalformedStartXRef("no `startxref` keyword found near end of file".into())
        })?;

        let mut rest = &tail[keyword_pos + b"startxref".len()..];
        skip_ws(&mut rest);

        let digits_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 {
            return Err(ParseError::MalformedStartXRef(
                "no offset digits after `startxref`".into(),
            ));
        }
        let digits = std::str::from_utf8(&rest[..digits_len]).unwrap();
        let offset: u64 = digits
            .parse()
            .map_err(|_| ParseError::MalformedStartXRef(format!("offset overflow: {digits}")))?;

        rest = &rest[digits_len..];
        skip_ws(&mut rest);

        if !rest.starts_with(b"%%EOF") {
            return Err(ParseError::MalformedStartXRef(
                "missing `%%EOF` after startxref offset".into(),
            ));
        }

        Ok(offset)
    }
}

fn find_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

fn skip_ws(buf: &mut &[u8]) {
    while let Some(&b) = buf.first() {
        if matches!(b, 0 | b'\t' | b'\n' | 0x0c | b'\r' | b' ') {
            *buf = &buf[1..];
        } else {
            break;
        }
    }
}
