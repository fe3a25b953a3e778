//! The input cursor: a one-character-lookahead sequential reader with
//! pushback over any `std::io::Read`.
//!
//! Every scanner consumes input exclusively through this type. Pushback is
//! a small LIFO stack rather than the single slot the contract requires, so
//! that speculative multi-byte reads (a sign probe followed by a `0x` or
//! `0b` prefix probe) can be undone on failure. End of stream is `None`,
//! never an error; read errors other than `Interrupted` are treated as end
//! of stream, matching the reference function's EOF-only failure model.

use std::io::Read;

use crate::ctype;

/// Sequential byte reader with peek and pushback.
///
/// Invariant: a byte passed to [`pushback`](Self::pushback) is the next
/// byte returned by [`next`](Self::next) or [`peek`](Self::peek). At least
/// one slot of pushback is guaranteed; callers should not rely on more.
#[derive(Debug)]
pub struct InputCursor<R> {
    source: R,
    pushback: Vec<u8>,
    eof: bool,
}

impl<'a> InputCursor<&'a [u8]> {
    /// Cursor over an in-memory byte slice.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        InputCursor::new(data)
    }
}

impl<R: Read> InputCursor<R> {
    /// Wrap a byte-producing source. The cursor does not manage the
    /// source's lifecycle; it only reads from it.
    pub fn new(source: R) -> Self {
        Self {
            source,
            pushback: Vec::new(),
            eof: false,
        }
    }

    /// Consume and return the next byte, or `None` at end of stream.
    pub fn next(&mut self) -> Option<u8> {
        if let Some(b) = self.pushback.pop() {
            return Some(b);
        }
        if self.eof {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return None;
                }
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => {
                    self.eof = true;
                    return None;
                }
            }
        }
    }

    /// Return the next byte without consuming it.
    pub fn peek(&mut self) -> Option<u8> {
        if let Some(&b) = self.pushback.last() {
            return Some(b);
        }
        let b = self.next()?;
        self.pushback.push(b);
        Some(b)
    }

    /// Return a previously read byte to the front of the stream.
    pub fn pushback(&mut self, byte: u8) {
        self.pushback.push(byte);
    }

    /// Consume consecutive whitespace bytes. The first non-whitespace byte
    /// is pushed back, not consumed.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.next() {
            if !ctype::is_space(b) {
                self.pushback(b);
                break;
            }
        }
    }
}
