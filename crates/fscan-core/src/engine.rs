//! The scan loop: executes a parsed format template against an input
//! cursor, dispatching to the conversion scanners and writing output slots.
//!
//! The loop makes exactly one attempt per instruction and stops the whole
//! call on the first failure, with no retry or skip-and-continue. Previously
//! assigned slots keep their committed values. All input-side outcomes are
//! carried in [`ScanOutcome`]; `Err(ScanError)` is reserved for malformed
//! templates and slot-list mistakes.

use std::io::Read;

use crate::cursor::InputCursor;
use crate::float::scan_float;
use crate::format::{parse_format, ConversionKind, ConversionSpec, FormatInstruction};
use crate::numeric::{scan_binary, scan_hex, scan_signed};
use crate::slot::{ScanError, Slot};
use crate::text::{scan_bool, scan_chars, scan_delimited, scan_quoted, scan_word};
use crate::Scan;

/// Result of a scan call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Number of successful assignments (0 when matching failed before the
    /// first assignment with input still available).
    Matched(usize),
    /// The stream was already exhausted before anything could be assigned.
    EndOfInput,
}

impl ScanOutcome {
    /// The reference function's integer convention: the assignment count,
    /// or -1 for end of input. Handy for conformance comparisons.
    pub fn as_count(self) -> i64 {
        match self {
            ScanOutcome::Matched(n) => n as i64,
            ScanOutcome::EndOfInput => -1,
        }
    }
}

/// Scan formatted input from a cursor.
///
/// `slots` supplies one destination per non-suppressed conversion, in
/// format order. Each slot is written exactly once on its conversion's
/// success and never on failure. Surplus slots are ignored; a missing
/// slot is `Err(ScanError::MissingSlot)`.
pub fn scan<R: Read>(
    cur: &mut InputCursor<R>,
    format: &[u8],
    slots: &mut [Slot<'_>],
) -> Result<ScanOutcome, ScanError> {
    let instructions = parse_format(format)?;
    let mut assigned = 0usize;
    let mut next_slot = 0usize;

    for instr in &instructions {
        match instr {
            FormatInstruction::SkipWhitespace => cur.skip_whitespace(),
            FormatInstruction::Literal(expected) => match cur.next() {
                Some(c) if c == *expected => {}
                Some(c) => {
                    cur.pushback(c);
                    return Ok(halt(assigned, false));
                }
                None => return Ok(halt(assigned, true)),
            },
            FormatInstruction::MatchPercent => {
                cur.skip_whitespace();
                match cur.next() {
                    Some(b'%') => {}
                    Some(c) => {
                        cur.pushback(c);
                        return Ok(halt(assigned, false));
                    }
                    None => return Ok(halt(assigned, true)),
                }
            }
            FormatInstruction::Convert(spec) => {
                match run_conversion(cur, spec, slots, &mut next_slot)? {
                    Step::Assigned => assigned += 1,
                    Step::Suppressed => {}
                    Step::Mismatch => return Ok(halt(assigned, false)),
                    Step::Exhausted => return Ok(halt(assigned, true)),
                }
            }
        }
    }
    Ok(ScanOutcome::Matched(assigned))
}

/// Scan formatted input from an in-memory byte slice.
pub fn scan_bytes(
    input: &[u8],
    format: &[u8],
    slots: &mut [Slot<'_>],
) -> Result<ScanOutcome, ScanError> {
    let mut cur = InputCursor::from_bytes(input);
    scan(&mut cur, format, slots)
}

/// How one conversion advanced the loop.
enum Step {
    Assigned,
    Suppressed,
    Mismatch,
    Exhausted,
}

fn run_conversion<R: Read>(
    cur: &mut InputCursor<R>,
    spec: &ConversionSpec,
    slots: &mut [Slot<'_>],
    next_slot: &mut usize,
) -> Result<Step, ScanError> {
    // Validate the destination before touching the input, so a slot-list
    // bug cannot leave the stream half-consumed.
    let slot_index = if spec.suppressed {
        None
    } else {
        let index = *next_slot;
        let Some(slot) = slots.get(index) else {
            return Err(ScanError::MissingSlot { index });
        };
        let expected = spec.expected_slot();
        let found = slot.kind();
        if found != expected {
            return Err(ScanError::SlotMismatch {
                index,
                expected,
                found,
            });
        }
        Some(index)
    };

    let width = spec.width;
    let committed = match spec.kind {
        ConversionKind::SignedInt => match scan_signed(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_int(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Hex => match scan_hex(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_uint(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Binary => match scan_binary(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_int(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Float => match scan_float(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_float(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Char => match scan_chars(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_bytes(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Word => match scan_word(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_bytes(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::DelimitedString => match scan_delimited(cur, width, &spec.delimiter) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_bytes(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Quoted => match scan_quoted(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_bytes(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
        ConversionKind::Bool => match scan_bool(cur, width) {
            Scan::Value(v) => commit(slots, slot_index, |s| s.put_bool(v)),
            Scan::Mismatch => return Ok(Step::Mismatch),
            Scan::Exhausted => return Ok(Step::Exhausted),
        },
    };

    if committed {
        *next_slot += 1;
        Ok(Step::Assigned)
    } else {
        Ok(Step::Suppressed)
    }
}

/// Write a committed value into its slot. Returns `true` when an
/// assignment was made (i.e. the conversion was not suppressed). The slot
/// kind was validated up front, so the write itself cannot fail.
fn commit(
    slots: &mut [Slot<'_>],
    slot_index: Option<usize>,
    put: impl FnOnce(&mut Slot<'_>) -> bool,
) -> bool {
    match slot_index {
        Some(i) => {
            let stored = put(&mut slots[i]);
            debug_assert!(stored, "slot kind validated before scanning");
            stored
        }
        None => false,
    }
}

/// Failure disposition: end-of-stream with nothing assigned is the
/// sentinel; everything else reports the count so far.
fn halt(assigned: usize, exhausted: bool) -> ScanOutcome {
    if exhausted && assigned == 0 {
        ScanOutcome::EndOfInput
    } else {
        ScanOutcome::Matched(assigned)
    }
}
