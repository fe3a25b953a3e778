//! Integer scanners: signed decimal, unsigned hexadecimal, signed binary.
//!
//! Shared shape: skip leading whitespace, optionally consume a sign
//! (decimal and binary only) and a `0x`/`0b` prefix (only when led by a
//! literal `0` digit with a valid digit following), then consume a maximal
//! digit run for the base. The width budget counts every consumed byte of
//! the conversion, sign and prefix included, and counting starts before
//! the sign is read. Accumulation saturates at the maximum representable
//! value instead of wrapping; digits keep being consumed after saturation.

use std::io::Read;

use crate::ctype;
use crate::cursor::InputCursor;
use crate::Scan;

/// Scan a signed decimal integer (`%d` / `%i`).
///
/// Zero digits consumed is a `Mismatch` with any consumed sign pushed
/// back; end of stream after the whitespace skip is `Exhausted`.
pub fn scan_signed<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<i64> {
    cur.skip_whitespace();
    if cur.peek().is_none() {
        return Scan::Exhausted;
    }
    let mut left = width.unwrap_or(usize::MAX);
    let sign = read_sign(cur, &mut left);

    let (value, digits) = accumulate(cur, 10, &mut left);
    if digits == 0 {
        restore_sign(cur, sign);
        return Scan::Mismatch;
    }
    Scan::Value(apply_sign(value, sign))
}

/// Scan an unsigned hexadecimal integer (`%x`).
///
/// No sign is accepted. A `0x`/`0X` prefix is recognized only immediately
/// after a literal `0` digit and only when a hex digit follows within the
/// width budget; otherwise the bare `0` is itself the first significant
/// digit and the `x` is pushed back (`"0x"` alone scans as 0, leaving `x`).
pub fn scan_hex<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<u64> {
    cur.skip_whitespace();
    if cur.peek().is_none() {
        return Scan::Exhausted;
    }
    let mut left = width.unwrap_or(usize::MAX);

    let mut leading_zero = 0usize;
    if left > 0 && cur.peek() == Some(b'0') {
        cur.next();
        left -= 1;
        leading_zero = 1;
        if left > 0 {
            if let Some(marker @ (b'x' | b'X')) = cur.peek() {
                cur.next();
                // The prefix stands only if a digit can still fit.
                if left > 1 && cur.peek().is_some_and(ctype::is_xdigit) {
                    left -= 1;
                } else {
                    cur.pushback(marker);
                }
            }
        }
    }

    let (value, digits) = accumulate_unsigned(cur, 16, &mut left);
    if leading_zero + digits == 0 {
        return Scan::Mismatch;
    }
    Scan::Value(value)
}

/// Scan a signed binary integer (`%b`).
///
/// The first significant byte must be `0` or `1`; anything else is an
/// immediate `Mismatch` (distinct from `Exhausted`), with any consumed
/// sign pushed back. A `0b`/`0B` prefix follows the same
/// literal-`0`-then-digit rule as hex. The run stops at the first invalid
/// bit, so `"102"` scans as 2 leaving `"2"` available.
pub fn scan_binary<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<i64> {
    cur.skip_whitespace();
    if cur.peek().is_none() {
        return Scan::Exhausted;
    }
    let mut left = width.unwrap_or(usize::MAX);
    let sign = read_sign(cur, &mut left);

    match cur.peek() {
        Some(b'0') | Some(b'1') => {}
        _ => {
            restore_sign(cur, sign);
            return Scan::Mismatch;
        }
    }

    let mut leading_zero = 0usize;
    if left > 0 && cur.peek() == Some(b'0') {
        cur.next();
        left -= 1;
        leading_zero = 1;
        if left > 0 {
            if let Some(marker @ (b'b' | b'B')) = cur.peek() {
                cur.next();
                if left > 1 && matches!(cur.peek(), Some(b'0') | Some(b'1')) {
                    left -= 1;
                } else {
                    cur.pushback(marker);
                }
            }
        }
    }

    let (value, digits) = accumulate(cur, 2, &mut left);
    if leading_zero + digits == 0 {
        restore_sign(cur, sign);
        return Scan::Mismatch;
    }
    Scan::Value(apply_sign(value, sign))
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Consume an optional `+`/`-` if the budget allows. Returns the consumed
/// sign byte, if any.
pub(crate) fn read_sign<R: Read>(cur: &mut InputCursor<R>, left: &mut usize) -> Option<u8> {
    if *left == 0 {
        return None;
    }
    match cur.peek() {
        Some(c @ (b'+' | b'-')) => {
            cur.next();
            *left -= 1;
            Some(c)
        }
        _ => None,
    }
}

pub(crate) fn restore_sign<R: Read>(cur: &mut InputCursor<R>, sign: Option<u8>) {
    if let Some(s) = sign {
        cur.pushback(s);
    }
}

fn apply_sign(value: i64, sign: Option<u8>) -> i64 {
    if sign == Some(b'-') { -value } else { value }
}

/// Consume a maximal digit run for `base`, saturating at `i64::MAX` on the
/// `acc > (MAX - digit) / base` boundary. The terminating non-digit is
/// pushed back. Returns `(value, digits_consumed)`.
fn accumulate<R: Read>(cur: &mut InputCursor<R>, base: i64, left: &mut usize) -> (i64, usize) {
    let mut value: i64 = 0;
    let mut count = 0usize;
    let mut saturated = false;

    while *left > 0 {
        let Some(c) = cur.next() else { break };
        let Some(d) = ctype::digit_value(c, base as u8) else {
            cur.pushback(c);
            break;
        };
        *left -= 1;
        count += 1;
        if saturated {
            continue;
        }
        let d = i64::from(d);
        if value > (i64::MAX - d) / base {
            value = i64::MAX;
            saturated = true;
        } else {
            value = value * base + d;
        }
    }
    (value, count)
}

/// Unsigned variant of [`accumulate`], saturating at `u64::MAX`.
fn accumulate_unsigned<R: Read>(
    cur: &mut InputCursor<R>,
    base: u64,
    left: &mut usize,
) -> (u64, usize) {
    let mut value: u64 = 0;
    let mut count = 0usize;
    let mut saturated = false;

    while *left > 0 {
        let Some(c) = cur.next() else { break };
        let Some(d) = ctype::digit_value(c, base as u8) else {
            cur.pushback(c);
            break;
        };
        *left -= 1;
        count += 1;
        if saturated {
            continue;
        }
        let d = u64::from(d);
        if value > (u64::MAX - d) / base {
            value = u64::MAX;
            saturated = true;
        } else {
            value = value * base + d;
        }
    }
    (value, count)
}
