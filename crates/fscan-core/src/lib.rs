//! # fscan-core
//!
//! A formatted-input scanning engine: a format template of literal text and
//! typed conversion directives consumes bytes from an input stream and
//! assigns parsed values to caller-supplied output slots.
//!
//! The conversion set mirrors the classic `scanf` family (`%d`, `%i`, `%x`,
//! `%f`, `%c`, `%s`, `%%`) and extends it with binary integers (`%b`),
//! delimiter-terminated strings (`%D`), quoted strings (`%q`), and boolean
//! tokens (`%B`). Variadic output pointers are replaced by an explicit
//! ordered list of typed [`Slot`] references, and the process-global stdin
//! stream is replaced by an explicit [`InputCursor`] that works over any
//! `std::io::Read`, including in-memory byte slices.
//!
//! Input that fails to match is never an `Err`: the assignment count and
//! the end-of-input sentinel carry all input-side outcomes, exactly like
//! the reference function's return value. `Err(ScanError)` is reserved for
//! malformed format strings and slot-list mistakes.
//!
//! ```
//! use fscan_core::{scan_bytes, ScanOutcome, Slot};
//!
//! let mut n = 0i32;
//! let mut word = Vec::new();
//! let out = scan_bytes(
//!     b"42 hello",
//!     b"%d %s",
//!     &mut [Slot::Int32(&mut n), Slot::Bytes(&mut word)],
//! )
//! .unwrap();
//! assert_eq!(out, ScanOutcome::Matched(2));
//! assert_eq!(n, 42);
//! assert_eq!(word, b"hello");
//! ```

#![deny(unsafe_code)]

pub mod ctype;
pub mod cursor;
pub mod engine;
pub mod float;
pub mod format;
pub mod numeric;
pub mod slot;
pub mod text;

pub use cursor::InputCursor;
pub use engine::{scan, scan_bytes, ScanOutcome};
pub use format::{parse_format, ConversionKind, ConversionSpec, FormatInstruction, SizeQualifier};
pub use slot::{ScanError, Slot, SlotKind};

/// Three-way outcome of a single conversion scanner.
///
/// `Mismatch` means the leading input did not fit the requested type; any
/// examined-but-unconsumed bytes have been pushed back. `Exhausted` means
/// the stream ended before any significant byte was available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<T> {
    /// A value was committed; the cursor sits past the consumed input.
    Value(T),
    /// Malformed leading input for this type; restorable bytes pushed back.
    Mismatch,
    /// End of stream before anything could be read.
    Exhausted,
}

impl<T> Scan<T> {
    /// Map the committed value, preserving the failure variants.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scan<U> {
        match self {
            Scan::Value(v) => Scan::Value(f(v)),
            Scan::Mismatch => Scan::Mismatch,
            Scan::Exhausted => Scan::Exhausted,
        }
    }
}
