//! Integration test: the full scan loop against reference-style inputs.
//!
//! Cases are drawn from the conformance battery the engine is measured
//! against: every conversion letter, width limiting, qualifier narrowing,
//! literal matching, suppression, and the end-of-input sentinel.
//!
//! Run: cargo test -p fscan-core --test scan_engine_test

use fscan_core::{scan_bytes, ScanError, ScanOutcome, Slot, SlotKind};

fn scan_i32(input: &[u8], format: &[u8]) -> (ScanOutcome, i32) {
    let mut n = -999i32;
    let out = scan_bytes(input, format, &mut [Slot::Int32(&mut n)]).expect("valid format");
    (out, n)
}

fn scan_string(input: &[u8], format: &[u8]) -> (ScanOutcome, Vec<u8>) {
    let mut s = Vec::new();
    let out = scan_bytes(input, format, &mut [Slot::Bytes(&mut s)]).expect("valid format");
    (out, s)
}

// ---------------------------------------------------------------------------
// Integers (%d)
// ---------------------------------------------------------------------------

#[test]
fn int_basic_forms() {
    assert_eq!(scan_i32(b"42\n", b"%d"), (ScanOutcome::Matched(1), 42));
    assert_eq!(scan_i32(b"-17\n", b"%d"), (ScanOutcome::Matched(1), -17));
    assert_eq!(scan_i32(b"0\n", b"%d"), (ScanOutcome::Matched(1), 0));
    assert_eq!(scan_i32(b"+99\n", b"%d"), (ScanOutcome::Matched(1), 99));
    assert_eq!(scan_i32(b"   123\n", b"%d"), (ScanOutcome::Matched(1), 123));
    assert_eq!(scan_i32(b"\t77\n", b"%d"), (ScanOutcome::Matched(1), 77));
    assert_eq!(scan_i32(b"00042\n", b"%d"), (ScanOutcome::Matched(1), 42));
    assert_eq!(scan_i32(b"  -0012\n", b"%d"), (ScanOutcome::Matched(1), -12));
    assert_eq!(scan_i32(b"456abc\n", b"%d"), (ScanOutcome::Matched(1), 456));
}

#[test]
fn int_failures_leave_slot_untouched() {
    // Slot keeps its sentinel value on every failing input.
    assert_eq!(scan_i32(b"-\n", b"%d"), (ScanOutcome::Matched(0), -999));
    assert_eq!(scan_i32(b"abc\n", b"%d"), (ScanOutcome::Matched(0), -999));
    assert_eq!(scan_i32(b"", b"%d"), (ScanOutcome::EndOfInput, -999));
    assert_eq!(scan_i32(b"   \n", b"%d"), (ScanOutcome::EndOfInput, -999));
}

#[test]
fn int_width_limits_consumption() {
    let mut a = 0i32;
    let mut b = 0i32;
    let out = scan_bytes(
        b"12345",
        b"%3d%d",
        &mut [Slot::Int32(&mut a), Slot::Int32(&mut b)],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(2));
    assert_eq!((a, b), (123, 45));
}

#[test]
fn int_qualifiers_narrow_by_truncation() {
    let mut small = 0i8;
    scan_bytes(b"300", b"%hhd", &mut [Slot::Int8(&mut small)]).unwrap();
    assert_eq!(small, 44); // 300 mod 256, two's complement

    let mut short = 0i16;
    scan_bytes(b"70000", b"%hd", &mut [Slot::Int16(&mut short)]).unwrap();
    assert_eq!(short, 70000u32 as i16);

    let mut long = 0i64;
    scan_bytes(b"9999999999", b"%lld", &mut [Slot::Int64(&mut long)]).unwrap();
    assert_eq!(long, 9_999_999_999);
}

#[test]
fn int_overflow_saturates() {
    let mut big = 0i64;
    scan_bytes(
        b"999999999999999999999999",
        b"%ld",
        &mut [Slot::Int64(&mut big)],
    )
    .unwrap();
    assert_eq!(big, i64::MAX);
}

// ---------------------------------------------------------------------------
// Hex (%x)
// ---------------------------------------------------------------------------

#[test]
fn hex_prefix_idempotence() {
    // "0x1a", "0X1A", and bare "1a" all scan as 26.
    for input in [&b"0x1a"[..], b"0X1A", b"1a"] {
        let (out, v) = scan_i32(input, b"%x");
        assert_eq!(out, ScanOutcome::Matched(1), "{input:?}");
        assert_eq!(v, 26, "{input:?}");
    }
}

#[test]
fn hex_edge_forms() {
    assert_eq!(scan_i32(b"ff\n", b"%x"), (ScanOutcome::Matched(1), 255));
    assert_eq!(scan_i32(b"ABCD\n", b"%x"), (ScanOutcome::Matched(1), 0xABCD));
    assert_eq!(scan_i32(b"0\n", b"%x"), (ScanOutcome::Matched(1), 0));
    // "0x" with no digit: the zero stands alone.
    assert_eq!(scan_i32(b"0x\n", b"%x"), (ScanOutcome::Matched(1), 0));
    assert_eq!(scan_i32(b"0xG\n", b"%x"), (ScanOutcome::Matched(1), 0));
    assert_eq!(scan_i32(b"   1f\n", b"%x"), (ScanOutcome::Matched(1), 0x1f));
    assert_eq!(scan_i32(b"2Azzz\n", b"%x"), (ScanOutcome::Matched(1), 0x2A));
    assert_eq!(scan_i32(b"\n", b"%x"), (ScanOutcome::EndOfInput, -999));
}

// ---------------------------------------------------------------------------
// Binary (%b)
// ---------------------------------------------------------------------------

#[test]
fn binary_accepted_forms() {
    for (input, expected) in [
        (&b"101\n"[..], 5),
        (b"0b101\n", 5),
        (b"0B101\n", 5),
        (b"0B111\n", 7),
        (b"0\n", 0),
        (b"0000\n", 0),
        (b"1\n", 1),
        (b"   110\n", 6),
        (b"101 \n", 5),
        (b"-101\n", -5),
    ] {
        assert_eq!(
            scan_i32(input, b"%b"),
            (ScanOutcome::Matched(1), expected),
            "{input:?}"
        );
    }
}

#[test]
fn binary_stops_at_first_invalid_bit() {
    // "102": one valid run "10", trailing "2" left unconsumed.
    let mut v = 0i32;
    let mut tail = Vec::new();
    let out = scan_bytes(
        b"102",
        b"%b%s",
        &mut [Slot::Int32(&mut v), Slot::Bytes(&mut tail)],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(2));
    assert_eq!(v, 2);
    assert_eq!(tail, b"2");
}

#[test]
fn binary_distinguishes_malformed_from_exhausted() {
    assert_eq!(scan_i32(b"abc\n", b"%b"), (ScanOutcome::Matched(0), -999));
    assert_eq!(scan_i32(b"456\n", b"%b"), (ScanOutcome::Matched(0), -999));
    assert_eq!(scan_i32(b"\n", b"%b"), (ScanOutcome::EndOfInput, -999));
    assert_eq!(scan_i32(b"   \n", b"%b"), (ScanOutcome::EndOfInput, -999));
}

// ---------------------------------------------------------------------------
// Floats (%f)
// ---------------------------------------------------------------------------

fn scan_f64(input: &[u8]) -> (ScanOutcome, f64) {
    let mut v = 0.0f64;
    let out = scan_bytes(input, b"%lf", &mut [Slot::Float64(&mut v)]).unwrap();
    (out, v)
}

#[test]
fn float_forms() {
    let (_, v) = scan_f64(b"3.14\n");
    assert!((v - 3.14).abs() < 1e-9);
    let (_, v) = scan_f64(b"-2.718\n");
    assert!((v + 2.718).abs() < 1e-9);
    let (_, v) = scan_f64(b"1e3\n");
    assert_eq!(v, 1000.0);
    let (_, v) = scan_f64(b"-2.5E-2\n");
    assert!((v + 0.025).abs() < 1e-12);
    let (out, _) = scan_f64(b"4.56abc\n");
    assert_eq!(out, ScanOutcome::Matched(1));
}

#[test]
fn float_failures() {
    assert_eq!(scan_f64(b".\n").0, ScanOutcome::Matched(0));
    assert_eq!(scan_f64(b"\n").0, ScanOutcome::EndOfInput);
    assert_eq!(scan_f64(b"   \n").0, ScanOutcome::EndOfInput);
    // Dangling exponent marker fails the whole conversion.
    assert_eq!(scan_f64(b"1e\n").0, ScanOutcome::Matched(0));
}

#[test]
fn float_qualifier_selects_precision() {
    let mut f = 0.0f32;
    let out = scan_bytes(b"2.5", b"%f", &mut [Slot::Float32(&mut f)]).unwrap();
    assert_eq!(out, ScanOutcome::Matched(1));
    assert_eq!(f, 2.5);
}

#[test]
fn numeric_round_trip_reproduces_value() {
    // Scanning then re-serializing reproduces the numeric value, though
    // not the original text (leading zeros are not preserved).
    let (_, n) = scan_i32(b"00042", b"%d");
    assert_eq!(format!("{n}"), "42");

    let (_, v) = scan_f64(b"2.5e2");
    assert_eq!(format!("{v}"), "250");
}

// ---------------------------------------------------------------------------
// Words and chars (%s, %c)
// ---------------------------------------------------------------------------

#[test]
fn word_forms() {
    assert_eq!(
        scan_string(b"hello\n", b"%s"),
        (ScanOutcome::Matched(1), b"hello".to_vec())
    );
    assert_eq!(
        scan_string(b"   world\n", b"%s"),
        (ScanOutcome::Matched(1), b"world".to_vec())
    );
    assert_eq!(
        scan_string(b"hi there\n", b"%s"),
        (ScanOutcome::Matched(1), b"hi".to_vec())
    );
    assert_eq!(
        scan_string(b"123abc\n", b"%s"),
        (ScanOutcome::Matched(1), b"123abc".to_vec())
    );
    assert_eq!(
        scan_string(b"!@#\n", b"%s"),
        (ScanOutcome::Matched(1), b"!@#".to_vec())
    );
    assert_eq!(
        scan_string(b"\n", b"%s"),
        (ScanOutcome::EndOfInput, Vec::new())
    );
    assert_eq!(
        scan_string(b"      ", b"%s"),
        (ScanOutcome::EndOfInput, Vec::new())
    );
}

#[test]
fn char_sequences() {
    let mut a = Vec::new();
    let mut b = Vec::new();
    let mut c = Vec::new();
    let out = scan_bytes(
        b"A1b\n",
        b"%c%c%c",
        &mut [
            Slot::Bytes(&mut a),
            Slot::Bytes(&mut b),
            Slot::Bytes(&mut c),
        ],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(3));
    assert_eq!((a, b, c), (b"A".to_vec(), b"1".to_vec(), b"b".to_vec()));
}

#[test]
fn char_reads_whitespace_raw() {
    assert_eq!(
        scan_string(b" \n", b"%c"),
        (ScanOutcome::Matched(1), b" ".to_vec())
    );
    assert_eq!(
        scan_string(b"\n\n\n", b"%c"),
        (ScanOutcome::Matched(1), b"\n".to_vec())
    );
    assert_eq!(scan_string(b"", b"%c"), (ScanOutcome::EndOfInput, Vec::new()));
}

#[test]
fn char_fixed_width_run() {
    assert_eq!(
        scan_string(b"ABCDE", b"%3c"),
        (ScanOutcome::Matched(1), b"ABC".to_vec())
    );
    // Short read at end of stream still succeeds.
    assert_eq!(
        scan_string(b"AB", b"%3c"),
        (ScanOutcome::Matched(1), b"AB".to_vec())
    );
}

// ---------------------------------------------------------------------------
// Delimited strings (%D) and quoted strings (%q)
// ---------------------------------------------------------------------------

#[test]
fn delimited_comma_splits() {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let out = scan_bytes(
        b"hello,world\n",
        b"%D,%s",
        &mut [Slot::Bytes(&mut head), Slot::Bytes(&mut tail)],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(2));
    assert_eq!(head, b"hello");
    // The comma is consumed silently: absent from both captures.
    assert_eq!(tail, b"world");
}

#[test]
fn delimited_reference_cases() {
    for (input, expected) in [
        (&b"foo bar\n"[..], &b"foo"[..]),
        (b"a\tb\n", b"a"),
        (b"x\ny\n", b"x"),
        (b"abc,\n", b"abc"),
        (b"a,b,c\n", b"a"),
        (b"abc\n", b"abc"),
    ] {
        let (out, s) = scan_string(input, b"%D,");
        assert_eq!(out, ScanOutcome::Matched(1), "{input:?}");
        assert_eq!(s, expected, "{input:?}");
    }
    // Empty line and delimiter-first both fail without writing.
    assert_eq!(scan_string(b"\n", b"%D,").0, ScanOutcome::Matched(0));
    assert_eq!(scan_string(b",abc\n", b"%D,").0, ScanOutcome::Matched(0));
    assert_eq!(scan_string(b"", b"%D,").0, ScanOutcome::EndOfInput);
}

#[test]
fn delimited_multibyte_sequence() {
    let (out, s) = scan_string(b"key::value", b"%D{::}");
    assert_eq!(out, ScanOutcome::Matched(1));
    assert_eq!(s, b"key");
}

#[test]
fn quoted_string_captures_spaces() {
    let (out, s) = scan_string(b"  \"hi there\" rest", b"%q");
    assert_eq!(out, ScanOutcome::Matched(1));
    assert_eq!(s, b"hi there");

    assert_eq!(scan_string(b"plain", b"%q").0, ScanOutcome::Matched(0));
    assert_eq!(scan_string(b"\"open", b"%q").0, ScanOutcome::Matched(0));
}

// ---------------------------------------------------------------------------
// Booleans (%B)
// ---------------------------------------------------------------------------

#[test]
fn bool_token_mapping() {
    let cases: &[(&[u8], bool)] = &[
        (b"true\n", true),
        (b"TrUe\n", true),
        (b"TRUE\n", true),
        (b"yes\n", true),
        (b"ON\n", true),
        (b"1\n", true),
        (b"false\n", false),
        (b"FaLsE\n", false),
        (b"no\n", false),
        (b"off\n", false),
        (b"0\n", false),
        (b"   true\n", true),
    ];
    for &(input, expected) in cases {
        let mut v = !expected;
        let out = scan_bytes(input, b"%B", &mut [Slot::Bool(&mut v)]).unwrap();
        assert_eq!(out, ScanOutcome::Matched(1), "{input:?}");
        assert_eq!(v, expected, "{input:?}");
    }
}

#[test]
fn bool_failures() {
    let mut v = false;
    let out = scan_bytes(b"abc\n", b"%B", &mut [Slot::Bool(&mut v)]).unwrap();
    assert_eq!(out, ScanOutcome::Matched(0));
    let out = scan_bytes(b"\n", b"%B", &mut [Slot::Bool(&mut v)]).unwrap();
    assert_eq!(out, ScanOutcome::EndOfInput);
}

// ---------------------------------------------------------------------------
// Literals, %%, multi-field formats
// ---------------------------------------------------------------------------

#[test]
fn percent_literal_matching() {
    assert_eq!(scan_bytes(b"%\n", b"%%", &mut []).unwrap(), ScanOutcome::Matched(0));
    assert_eq!(scan_bytes(b"%%\n", b"%%%%", &mut []).unwrap(), ScanOutcome::Matched(0));
    assert_eq!(scan_bytes(b"abc\n", b"%%", &mut []).unwrap(), ScanOutcome::Matched(0));
    assert_eq!(scan_bytes(b"", b"%%", &mut []).unwrap(), ScanOutcome::EndOfInput);
}

#[test]
fn literal_mismatch_halts_with_count() {
    // "%d-%d" vs "5+3": first int assigned, halt at '-' vs '+'.
    let mut a = 0i32;
    let mut b = 0i32;
    let out = scan_bytes(
        b"5+3",
        b"%d-%d",
        &mut [Slot::Int32(&mut a), Slot::Int32(&mut b)],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(1));
    assert_eq!(a, 5);
}

#[test]
fn multi_field_mixed_conversions() {
    let mut d = 0i32;
    let mut x = 0i32;
    let mut f = 0.0f32;
    let mut s = Vec::new();
    let mut c1 = Vec::new();
    let mut c2 = Vec::new();
    let out = scan_bytes(
        b"42 ff 3.14 hello A B\n",
        b"%d %x %f %s %c %c",
        &mut [
            Slot::Int32(&mut d),
            Slot::Int32(&mut x),
            Slot::Float32(&mut f),
            Slot::Bytes(&mut s),
            Slot::Bytes(&mut c1),
            Slot::Bytes(&mut c2),
        ],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(6));
    assert_eq!(d, 42);
    assert_eq!(x, 255);
    assert!((f - 3.14).abs() < 1e-6);
    assert_eq!(s, b"hello");
    assert_eq!(c1, b"A");
    assert_eq!(c2, b"B");
}

#[test]
fn multi_field_stops_at_first_bad_field() {
    // "abc 1 0.1 str" against "%d %x %f %s": nothing assigned.
    let mut d = 0i32;
    let mut x = 0i32;
    let out = scan_bytes(
        b"abc 1 0.1 str\n",
        b"%d %x",
        &mut [Slot::Int32(&mut d), Slot::Int32(&mut x)],
    )
    .unwrap();
    assert_eq!(out, ScanOutcome::Matched(0));
}

#[test]
fn format_errors_are_a_separate_channel() {
    assert_eq!(
        scan_bytes(b"x", b"%z", &mut []).unwrap_err(),
        ScanError::UnknownConversion('z')
    );
    assert_eq!(
        scan_bytes(b"x", b"%D", &mut []).unwrap_err(),
        ScanError::MissingDelimiter
    );
    let mut n = 0i32;
    assert_eq!(
        scan_bytes(b"1 2", b"%d %d", &mut [Slot::Int32(&mut n)]).unwrap_err(),
        ScanError::MissingSlot { index: 1 }
    );
    let mut b = false;
    assert!(matches!(
        scan_bytes(b"1", b"%d", &mut [Slot::Bool(&mut b)]).unwrap_err(),
        ScanError::SlotMismatch {
            expected: SlotKind::Int32,
            found: SlotKind::Bool,
            ..
        }
    ));
}
