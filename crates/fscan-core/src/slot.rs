//! Output slots: tagged-variant destinations for converted values.
//!
//! The reference function writes through variadic raw pointers sized by a
//! length modifier; here the caller builds an explicit ordered list of
//! typed mutable references instead, so narrowing is type-checked. A slot
//! is written exactly once on success and never on failure; the engine
//! never reads a slot's prior contents.

use thiserror::Error;

/// A caller-supplied destination for one non-suppressed conversion.
#[derive(Debug)]
pub enum Slot<'a> {
    Int8(&'a mut i8),
    Int16(&'a mut i16),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    /// Raw byte capture for `%c`, `%s`, `%D`, and `%q`. Replaced, not
    /// appended to.
    Bytes(&'a mut Vec<u8>),
    Bool(&'a mut bool),
}

/// The shape of a slot, for error reporting and qualifier checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bytes,
    Bool,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SlotKind::Int8 => "i8",
            SlotKind::Int16 => "i16",
            SlotKind::Int32 => "i32",
            SlotKind::Int64 => "i64",
            SlotKind::Float32 => "f32",
            SlotKind::Float64 => "f64",
            SlotKind::Bytes => "bytes",
            SlotKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

impl Slot<'_> {
    /// The kind tag for this slot.
    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Int8(_) => SlotKind::Int8,
            Slot::Int16(_) => SlotKind::Int16,
            Slot::Int32(_) => SlotKind::Int32,
            Slot::Int64(_) => SlotKind::Int64,
            Slot::Float32(_) => SlotKind::Float32,
            Slot::Float64(_) => SlotKind::Float64,
            Slot::Bytes(_) => SlotKind::Bytes,
            Slot::Bool(_) => SlotKind::Bool,
        }
    }

    /// Store a parsed integer, truncating two's-complement to the slot
    /// width. Not bounds-checked: `%hhd` against `300` stores `44`, the
    /// standard narrowing-cast result.
    pub(crate) fn put_int(&mut self, value: i64) -> bool {
        match self {
            Slot::Int8(dst) => **dst = value as i8,
            Slot::Int16(dst) => **dst = value as i16,
            Slot::Int32(dst) => **dst = value as i32,
            Slot::Int64(dst) => **dst = value,
            _ => return false,
        }
        true
    }

    /// Store an unsigned magnitude (hex conversions) by two's-complement
    /// reinterpretation.
    pub(crate) fn put_uint(&mut self, value: u64) -> bool {
        self.put_int(value as i64)
    }

    pub(crate) fn put_float(&mut self, value: f64) -> bool {
        match self {
            Slot::Float32(dst) => **dst = value as f32,
            Slot::Float64(dst) => **dst = value,
            _ => return false,
        }
        true
    }

    pub(crate) fn put_bytes(&mut self, value: Vec<u8>) -> bool {
        match self {
            Slot::Bytes(dst) => **dst = value,
            _ => return false,
        }
        true
    }

    pub(crate) fn put_bool(&mut self, value: bool) -> bool {
        match self {
            Slot::Bool(dst) => **dst = value,
            _ => return false,
        }
        true
    }
}

/// Caller-side errors: a malformed format template or a slot list that
/// does not line up with it. Input that fails to match is never an error;
/// it is carried in the scan outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("unknown conversion `%{0}`")]
    UnknownConversion(char),
    #[error("format string ends inside a conversion")]
    TruncatedFormat,
    #[error("size qualifier `{qualifier}` is not valid for `%{conversion}`")]
    InvalidQualifier {
        qualifier: &'static str,
        conversion: char,
    },
    #[error("`%D` conversion has no delimiter")]
    MissingDelimiter,
    #[error("unclosed `{{` in `%D` delimiter")]
    UnclosedDelimiter,
    #[error("conversion #{index} has no output slot")]
    MissingSlot { index: usize },
    #[error("slot #{index} is {found}, conversion expects {expected}")]
    SlotMismatch {
        index: usize,
        expected: SlotKind,
        found: SlotKind,
    },
}
