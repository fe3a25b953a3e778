//! Format template parser.
//!
//! Parses a scan format string left-to-right into a flat instruction
//! sequence: literal-byte match, whitespace skip, percent match, or typed
//! conversion. The interpreter in [`crate::engine`] executes the sequence;
//! this module is the only place aware of the template grammar.
//!
//! Grammar after `%`: optional `*` (suppress assignment), optional decimal
//! width (0 means unlimited), optional size qualifier `hh|h|l|ll`, then a
//! conversion letter from `d i x b f c s D q B %`. `%D` additionally takes
//! its delimiter from the format: the single next byte, or a brace-wrapped
//! sequence `%D{seq}` for multi-byte delimiters.

use crate::slot::{ScanError, SlotKind};

/// Size qualifier: selects the destination width for numeric conversions.
/// Irrelevant to the parsing state machines themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeQualifier {
    #[default]
    None,
    /// `hh`
    Byte,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
}

impl SizeQualifier {
    fn label(self) -> &'static str {
        match self {
            SizeQualifier::None => "",
            SizeQualifier::Byte => "hh",
            SizeQualifier::Short => "h",
            SizeQualifier::Long => "l",
            SizeQualifier::LongLong => "ll",
        }
    }
}

/// Which scanner state machine a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `%d` / `%i`: signed decimal integer.
    SignedInt,
    /// `%x`: unsigned hexadecimal integer, optional `0x` prefix.
    Hex,
    /// `%b`: signed binary integer, optional `0b` prefix.
    Binary,
    /// `%f`: floating point; qualifier selects f32 vs f64 destination.
    Float,
    /// `%c`: raw character run of `max(width, 1)` bytes.
    Char,
    /// `%s`: whitespace-delimited word.
    Word,
    /// `%D`: capture until a configured delimiter sequence.
    DelimitedString,
    /// `%q`: double-quoted string.
    Quoted,
    /// `%B`: boolean token.
    Bool,
}

impl ConversionKind {
    fn letter(self) -> char {
        match self {
            ConversionKind::SignedInt => 'd',
            ConversionKind::Hex => 'x',
            ConversionKind::Binary => 'b',
            ConversionKind::Float => 'f',
            ConversionKind::Char => 'c',
            ConversionKind::Word => 's',
            ConversionKind::DelimitedString => 'D',
            ConversionKind::Quoted => 'q',
            ConversionKind::Bool => 'B',
        }
    }
}

/// One parsed `%`-directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSpec {
    pub kind: ConversionKind,
    /// Maximum bytes this conversion may consume (sign and prefix bytes
    /// included). `None` = unlimited.
    pub width: Option<usize>,
    pub qualifier: SizeQualifier,
    /// `%*…`: run the scanner but discard the value and assign nothing.
    pub suppressed: bool,
    /// Terminator sequence for [`ConversionKind::DelimitedString`]; empty
    /// for every other kind.
    pub delimiter: Vec<u8>,
}

impl ConversionSpec {
    /// The slot variant this conversion writes, given its qualifier.
    pub fn expected_slot(&self) -> SlotKind {
        match self.kind {
            ConversionKind::SignedInt | ConversionKind::Hex | ConversionKind::Binary => {
                match self.qualifier {
                    SizeQualifier::Byte => SlotKind::Int8,
                    SizeQualifier::Short => SlotKind::Int16,
                    SizeQualifier::None => SlotKind::Int32,
                    SizeQualifier::Long | SizeQualifier::LongLong => SlotKind::Int64,
                }
            }
            ConversionKind::Float => match self.qualifier {
                SizeQualifier::Long | SizeQualifier::LongLong => SlotKind::Float64,
                _ => SlotKind::Float32,
            },
            ConversionKind::Char
            | ConversionKind::Word
            | ConversionKind::DelimitedString
            | ConversionKind::Quoted => SlotKind::Bytes,
            ConversionKind::Bool => SlotKind::Bool,
        }
    }
}

/// One executable instruction of a parsed format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatInstruction {
    /// The next input byte must equal this byte exactly.
    Literal(u8),
    /// Match any amount of input whitespace, including none.
    SkipWhitespace,
    /// `%%`: match one literal `%` (leading input whitespace skipped),
    /// assigning nothing.
    MatchPercent,
    /// Run a conversion scanner.
    Convert(ConversionSpec),
}

/// Parse a format template into its instruction sequence.
///
/// Consecutive whitespace bytes in the template collapse into a single
/// [`FormatInstruction::SkipWhitespace`].
pub fn parse_format(fmt: &[u8]) -> Result<Vec<FormatInstruction>, ScanError> {
    let mut out = Vec::new();
    let mut pos = 0;
    let len = fmt.len();

    while pos < len {
        let b = fmt[pos];
        if crate::ctype::is_space(b) {
            while pos < len && crate::ctype::is_space(fmt[pos]) {
                pos += 1;
            }
            out.push(FormatInstruction::SkipWhitespace);
            continue;
        }
        if b != b'%' {
            out.push(FormatInstruction::Literal(b));
            pos += 1;
            continue;
        }
        // Directive. `pos` advances past the '%'.
        pos += 1;
        if pos >= len {
            return Err(ScanError::TruncatedFormat);
        }
        if fmt[pos] == b'%' {
            out.push(FormatInstruction::MatchPercent);
            pos += 1;
            continue;
        }
        let (spec, consumed) = parse_conversion(&fmt[pos..])?;
        out.push(FormatInstruction::Convert(spec));
        pos += consumed;
    }
    Ok(out)
}

/// Parse one conversion starting just after `%`. Returns the spec and the
/// number of format bytes consumed.
fn parse_conversion(fmt: &[u8]) -> Result<(ConversionSpec, usize), ScanError> {
    let mut pos = 0;
    let len = fmt.len();

    // --- suppression ---
    let suppressed = pos < len && fmt[pos] == b'*';
    if suppressed {
        pos += 1;
    }

    // --- width ---
    let start = pos;
    while pos < len && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    let width = if pos > start {
        let w = parse_decimal(&fmt[start..pos]);
        if w == 0 { None } else { Some(w) }
    } else {
        None
    };

    // --- size qualifier ---
    let qualifier = if pos < len {
        match fmt[pos] {
            b'h' => {
                pos += 1;
                if pos < len && fmt[pos] == b'h' {
                    pos += 1;
                    SizeQualifier::Byte
                } else {
                    SizeQualifier::Short
                }
            }
            b'l' => {
                pos += 1;
                if pos < len && fmt[pos] == b'l' {
                    pos += 1;
                    SizeQualifier::LongLong
                } else {
                    SizeQualifier::Long
                }
            }
            _ => SizeQualifier::None,
        }
    } else {
        SizeQualifier::None
    };

    // --- conversion letter ---
    if pos >= len {
        return Err(ScanError::TruncatedFormat);
    }
    let letter = fmt[pos];
    pos += 1;

    let kind = match letter {
        b'd' | b'i' => ConversionKind::SignedInt,
        b'x' => ConversionKind::Hex,
        b'b' => ConversionKind::Binary,
        b'f' => ConversionKind::Float,
        b'c' => ConversionKind::Char,
        b's' => ConversionKind::Word,
        b'D' => ConversionKind::DelimitedString,
        b'q' => ConversionKind::Quoted,
        b'B' => ConversionKind::Bool,
        other => return Err(ScanError::UnknownConversion(other as char)),
    };

    check_qualifier(kind, qualifier)?;

    // --- delimiter argument (`%D` only) ---
    let delimiter = if kind == ConversionKind::DelimitedString {
        if pos >= len {
            return Err(ScanError::MissingDelimiter);
        }
        if fmt[pos] == b'{' {
            pos += 1;
            let seq_start = pos;
            while pos < len && fmt[pos] != b'}' {
                pos += 1;
            }
            if pos >= len {
                return Err(ScanError::UnclosedDelimiter);
            }
            let seq = fmt[seq_start..pos].to_vec();
            pos += 1; // '}'
            if seq.is_empty() {
                return Err(ScanError::MissingDelimiter);
            }
            seq
        } else {
            let d = fmt[pos];
            pos += 1;
            vec![d]
        }
    } else {
        Vec::new()
    };

    Ok((
        ConversionSpec {
            kind,
            width,
            qualifier,
            suppressed,
            delimiter,
        },
        pos,
    ))
}

fn check_qualifier(kind: ConversionKind, qualifier: SizeQualifier) -> Result<(), ScanError> {
    let valid = match kind {
        ConversionKind::SignedInt | ConversionKind::Hex | ConversionKind::Binary => true,
        ConversionKind::Float => !matches!(qualifier, SizeQualifier::Byte | SizeQualifier::Short),
        _ => qualifier == SizeQualifier::None,
    };
    if valid {
        Ok(())
    } else {
        Err(ScanError::InvalidQualifier {
            qualifier: qualifier.label(),
            conversion: kind.letter(),
        })
    }
}

fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add((d - b'0') as usize);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_conversion(fmt: &[u8]) -> ConversionSpec {
        let instrs = parse_format(fmt).unwrap();
        assert_eq!(instrs.len(), 1, "expected one instruction from {fmt:?}");
        match &instrs[0] {
            FormatInstruction::Convert(spec) => spec.clone(),
            other => panic!("expected a conversion, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_int() {
        let spec = one_conversion(b"%d");
        assert_eq!(spec.kind, ConversionKind::SignedInt);
        assert_eq!(spec.width, None);
        assert_eq!(spec.qualifier, SizeQualifier::None);
        assert!(!spec.suppressed);
    }

    #[test]
    fn test_parse_width_and_qualifier() {
        let spec = one_conversion(b"%3lld");
        assert_eq!(spec.width, Some(3));
        assert_eq!(spec.qualifier, SizeQualifier::LongLong);
        assert_eq!(spec.expected_slot(), crate::SlotKind::Int64);
    }

    #[test]
    fn test_parse_suppression() {
        let spec = one_conversion(b"%*x");
        assert!(spec.suppressed);
        assert_eq!(spec.kind, ConversionKind::Hex);
    }

    #[test]
    fn test_zero_width_means_unlimited() {
        let spec = one_conversion(b"%0d");
        assert_eq!(spec.width, None);
    }

    #[test]
    fn test_float_qualifier_selects_double() {
        assert_eq!(one_conversion(b"%f").expected_slot(), crate::SlotKind::Float32);
        assert_eq!(one_conversion(b"%lf").expected_slot(), crate::SlotKind::Float64);
    }

    #[test]
    fn test_short_qualifier_on_float_rejected() {
        assert_eq!(
            parse_format(b"%hf"),
            Err(ScanError::InvalidQualifier {
                qualifier: "h",
                conversion: 'f',
            })
        );
    }

    #[test]
    fn test_delimiter_single_byte() {
        let spec = one_conversion(b"%D,");
        assert_eq!(spec.kind, ConversionKind::DelimitedString);
        assert_eq!(spec.delimiter, b",");
    }

    #[test]
    fn test_delimiter_braced_sequence() {
        let spec = one_conversion(b"%D{::}");
        assert_eq!(spec.delimiter, b"::");
    }

    #[test]
    fn test_delimiter_errors() {
        assert_eq!(parse_format(b"%D"), Err(ScanError::MissingDelimiter));
        assert_eq!(parse_format(b"%D{}"), Err(ScanError::MissingDelimiter));
        assert_eq!(parse_format(b"%D{ab"), Err(ScanError::UnclosedDelimiter));
    }

    #[test]
    fn test_percent_literal_and_trailing_percent() {
        let instrs = parse_format(b"%%").unwrap();
        assert_eq!(instrs, vec![FormatInstruction::MatchPercent]);
        assert_eq!(parse_format(b"100%"), Err(ScanError::TruncatedFormat));
    }

    #[test]
    fn test_unknown_conversion() {
        assert_eq!(parse_format(b"%z"), Err(ScanError::UnknownConversion('z')));
    }

    #[test]
    fn test_whitespace_collapses() {
        let instrs = parse_format(b"a \t\nb").unwrap();
        assert_eq!(
            instrs,
            vec![
                FormatInstruction::Literal(b'a'),
                FormatInstruction::SkipWhitespace,
                FormatInstruction::Literal(b'b'),
            ]
        );
    }

    #[test]
    fn test_mixed_template() {
        let instrs = parse_format(b"%d-%2x").unwrap();
        assert_eq!(instrs.len(), 3);
        assert!(matches!(instrs[1], FormatInstruction::Literal(b'-')));
        assert!(
            matches!(&instrs[2], FormatInstruction::Convert(s) if s.kind == ConversionKind::Hex && s.width == Some(2))
        );
    }
}
