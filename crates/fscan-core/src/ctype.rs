//! Byte classification for the scanners. C locale only: the input model is
//! a single-byte alphabet with ASCII whitespace and digit/letter rules.

/// Returns `true` if `c` is a whitespace byte.
///
/// Whitespace: space, tab, newline, vertical tab, form feed, carriage return.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Returns `true` if `c` is a decimal digit (`[0-9]`).
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` if `c` is a hexadecimal digit (`[0-9A-Fa-f]`).
#[inline]
pub fn is_xdigit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Converts `c` to lowercase if it is an uppercase letter.
#[inline]
pub fn to_lower(c: u8) -> u8 {
    if c.is_ascii_uppercase() { c + 32 } else { c }
}

/// Digit value of `c` in the given base, if `c` is valid for that base.
///
/// Letters map case-insensitively: `a`/`A` is 10, up through `f`/`F` = 15.
#[inline]
pub fn digit_value(c: u8, base: u8) -> Option<u8> {
    let d = match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => return None,
    };
    if d < base { Some(d) } else { None }
}
