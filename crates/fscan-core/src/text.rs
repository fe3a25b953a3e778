//! Text scanners: raw character runs, whitespace-delimited words,
//! delimiter-terminated strings, quoted strings, and boolean tokens.

use std::io::Read;

use crate::ctype;
use crate::cursor::InputCursor;
use crate::Scan;

/// Scan a raw character run (`%c`): exactly `max(width, 1)` bytes, fewer
/// at end of stream. Does not skip whitespace. Succeeds iff at least one
/// byte was read.
pub fn scan_chars<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<Vec<u8>> {
    let count = width.unwrap_or(1).max(1);
    let mut out = Vec::with_capacity(count.min(64));
    while out.len() < count {
        match cur.next() {
            Some(b) => out.push(b),
            None => break,
        }
    }
    if out.is_empty() {
        Scan::Exhausted
    } else {
        Scan::Value(out)
    }
}

/// Scan a whitespace-delimited word (`%s`): skip leading whitespace, then
/// a maximal non-whitespace run up to the width cap. The terminating
/// whitespace byte is pushed back, not consumed.
pub fn scan_word<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<Vec<u8>> {
    cur.skip_whitespace();
    if cur.peek().is_none() {
        return Scan::Exhausted;
    }
    let mut left = width.unwrap_or(usize::MAX);
    let mut out = Vec::new();
    while left > 0 {
        let Some(c) = cur.next() else { break };
        if ctype::is_space(c) {
            cur.pushback(c);
            break;
        }
        out.push(c);
        left -= 1;
    }
    // The peek above guarantees at least one non-whitespace byte.
    Scan::Value(out)
}

/// Scan until a delimiter sequence (`%D`). Does not skip leading
/// whitespace.
///
/// The delimiter is matched through a sliding window of its own length;
/// on a match the delimiter bytes are consumed silently: excluded from
/// the output and not returned to the stream. When the delimiter is a
/// single non-whitespace byte, encountering whitespace first terminates
/// the capture with that byte pushed back (the fallback that makes
/// `%D,` against `"foo bar"` yield `"foo"`).
///
/// Outcomes: `Value` for a non-empty capture, `Mismatch` when the very
/// first byte is a line terminator (pushed back) or when the capture is
/// empty, `Exhausted` when the stream ended before any byte. A trailing
/// line terminator inside captured content is trimmed.
pub fn scan_delimited<R: Read>(
    cur: &mut InputCursor<R>,
    width: Option<usize>,
    delimiter: &[u8],
) -> Scan<Vec<u8>> {
    if delimiter.is_empty() {
        return Scan::Mismatch;
    }
    let ws_fallback = delimiter.len() == 1 && !ctype::is_space(delimiter[0]);
    let mut left = width.unwrap_or(usize::MAX);
    let mut out: Vec<u8> = Vec::new();
    let mut read_any = false;

    while left > 0 {
        let Some(c) = cur.next() else {
            if !read_any {
                return Scan::Exhausted;
            }
            break;
        };
        if !read_any && (c == b'\n' || c == b'\r') {
            cur.pushback(c);
            return Scan::Mismatch;
        }
        read_any = true;
        if ws_fallback && ctype::is_space(c) {
            cur.pushback(c);
            break;
        }
        out.push(c);
        left -= 1;
        if out.len() >= delimiter.len() && out[out.len() - delimiter.len()..] == *delimiter {
            out.truncate(out.len() - delimiter.len());
            break;
        }
    }

    if out.last() == Some(&b'\n') {
        out.pop();
    }
    if out.last() == Some(&b'\r') {
        out.pop();
    }
    if out.is_empty() {
        Scan::Mismatch
    } else {
        Scan::Value(out)
    }
}

/// Scan a double-quoted string (`%q`): skip leading whitespace, require an
/// opening `"`, capture up to the closing `"`. Both quotes are consumed
/// silently. A non-quote opener is a `Mismatch` with the byte pushed back;
/// end of stream before the closing quote is a `Mismatch` with the partial
/// content not restorable. The width cap limits captured content; capped
/// excess stays in the stream.
pub fn scan_quoted<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<Vec<u8>> {
    cur.skip_whitespace();
    let Some(opener) = cur.next() else {
        return Scan::Exhausted;
    };
    if opener != b'"' {
        cur.pushback(opener);
        return Scan::Mismatch;
    }
    let mut left = width.unwrap_or(usize::MAX);
    let mut out = Vec::new();
    loop {
        let Some(c) = cur.next() else {
            // Unterminated quote.
            return Scan::Mismatch;
        };
        if c == b'"' {
            return Scan::Value(out);
        }
        if left == 0 {
            cur.pushback(c);
            return Scan::Value(out);
        }
        out.push(c);
        left -= 1;
    }
}

/// Scan a boolean token (`%B`): a whitespace-delimited word matched
/// case-insensitively against `true`/`yes`/`on`/`1` and
/// `false`/`no`/`off`/`0`. Any other token is a `Mismatch`; the token is
/// already consumed and not restorable.
pub fn scan_bool<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<bool> {
    let token = match scan_word(cur, width) {
        Scan::Value(t) => t,
        Scan::Mismatch => return Scan::Mismatch,
        Scan::Exhausted => return Scan::Exhausted,
    };
    const TRUE_TOKENS: [&[u8]; 4] = [b"true", b"yes", b"on", b"1"];
    const FALSE_TOKENS: [&[u8]; 4] = [b"false", b"no", b"off", b"0"];
    if TRUE_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        Scan::Value(true)
    } else if FALSE_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        Scan::Value(false)
    } else {
        Scan::Mismatch
    }
}
