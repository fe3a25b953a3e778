//! Floating-point scanner.
//!
//! Sign, integer part, optional `.` + fractional part, optional scientific
//! suffix. The mantissa is accumulated incrementally (`value*10 + digit`,
//! then `digit / 10^k` for the fraction) rather than correctly rounded.
//!
//! The exponent rule is stricter than the reference function: once an
//! `e`/`E` marker is consumed, at least one exponent digit must follow or
//! the whole conversion fails, with the marker (and any exponent sign)
//! pushed back. Mantissa digits consumed before the failed suffix are not
//! restored.

use std::io::Read;

use crate::ctype;
use crate::cursor::InputCursor;
use crate::numeric::{read_sign, restore_sign};
use crate::Scan;

/// Scan a floating-point number (`%f`). Returns `f64`; the engine narrows
/// to `f32` for a `Float32` slot.
pub fn scan_float<R: Read>(cur: &mut InputCursor<R>, width: Option<usize>) -> Scan<f64> {
    cur.skip_whitespace();
    if cur.peek().is_none() {
        return Scan::Exhausted;
    }
    let mut left = width.unwrap_or(usize::MAX);
    let sign = read_sign(cur, &mut left);

    // Integer part.
    let mut value = 0f64;
    let mut int_digits = 0usize;
    while left > 0 {
        let Some(c) = cur.next() else { break };
        let Some(d) = ctype::digit_value(c, 10) else {
            cur.pushback(c);
            break;
        };
        left -= 1;
        int_digits += 1;
        value = value * 10.0 + f64::from(d);
    }

    // Fractional part.
    let mut frac_digits = 0usize;
    if left > 0 && cur.peek() == Some(b'.') {
        cur.next();
        left -= 1;
        let mut divisor = 10.0;
        while left > 0 {
            let Some(c) = cur.next() else { break };
            let Some(d) = ctype::digit_value(c, 10) else {
                cur.pushback(c);
                break;
            };
            left -= 1;
            frac_digits += 1;
            value += f64::from(d) / divisor;
            divisor *= 10.0;
        }
        if int_digits == 0 && frac_digits == 0 {
            // A bare '.' is not a number; restore it and the sign.
            cur.pushback(b'.');
            restore_sign(cur, sign);
            return Scan::Mismatch;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        restore_sign(cur, sign);
        return Scan::Mismatch;
    }

    // Scientific suffix.
    let mut exp = 0i32;
    if left > 0 {
        if let Some(marker @ (b'e' | b'E')) = cur.peek() {
            cur.next();
            left -= 1;
            let mut exp_sign = None;
            if left > 0 {
                if let Some(s @ (b'+' | b'-')) = cur.peek() {
                    cur.next();
                    left -= 1;
                    exp_sign = Some(s);
                }
            }
            let mut exp_value = 0i32;
            let mut exp_digits = 0usize;
            while left > 0 {
                let Some(c) = cur.next() else { break };
                let Some(d) = ctype::digit_value(c, 10) else {
                    cur.pushback(c);
                    break;
                };
                left -= 1;
                exp_digits += 1;
                exp_value = exp_value.saturating_mul(10).saturating_add(i32::from(d));
            }
            if exp_digits == 0 {
                // Marker with no digits fails the entire conversion, even
                // though a valid mantissa was read.
                restore_sign(cur, exp_sign);
                cur.pushback(marker);
                return Scan::Mismatch;
            }
            exp = if exp_sign == Some(b'-') {
                -exp_value
            } else {
                exp_value
            };
        }
    }

    let mut result = value * 10f64.powi(exp);
    if sign == Some(b'-') {
        result = -result;
    }
    Scan::Value(result)
}
