//! Fixture execution engine.
//!
//! Each fixture case carries a format template and raw input text. The
//! runner parses the template, allocates one backing value per assigning
//! conversion, runs the scan, and renders the outcome for comparison
//! against the captured expectation.

use fscan_core::{
    parse_format, scan_bytes, FormatInstruction, ScanError, ScanOutcome, Slot, SlotKind,
};

use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::{render_diff, VerificationResult};

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| {
                let expected = render_line(case.expected_count, &case.expected_values);
                let actual = match execute_case(case) {
                    Ok(run) => render_line(run.count, &run.values),
                    Err(err) => format!("format error: {err}"),
                };
                let passed = actual == expected;
                let diff = if passed {
                    None
                } else {
                    Some(render_diff(&expected, &actual))
                };
                VerificationResult {
                    case_name: case.name.clone(),
                    passed,
                    expected,
                    actual,
                    diff,
                }
            })
            .collect()
    }
}

/// Outcome of one executed fixture case.
pub struct CaseRun {
    /// scanf-convention count (`-1` for end of input).
    pub count: i64,
    /// Rendered assigned values, in assignment order.
    pub values: Vec<String>,
}

/// Execute one fixture case against the scan engine.
pub fn execute_case(case: &FixtureCase) -> Result<CaseRun, ScanError> {
    let format = case.format.as_bytes();
    let instructions = parse_format(format)?;

    // One backing value per assigning conversion, typed per the template.
    let mut values: Vec<SlotValue> = instructions
        .iter()
        .filter_map(|instruction| match instruction {
            FormatInstruction::Convert(spec) if !spec.suppressed => {
                Some(SlotValue::for_kind(spec.expected_slot()))
            }
            _ => None,
        })
        .collect();

    let outcome = {
        let mut slots: Vec<Slot<'_>> = values.iter_mut().map(SlotValue::as_slot).collect();
        scan_bytes(case.input.as_bytes(), format, &mut slots)?
    };

    let assigned = match outcome {
        ScanOutcome::Matched(n) => n,
        ScanOutcome::EndOfInput => 0,
    };
    // Assignment is strictly left to right, so the first `assigned`
    // backing values are exactly the ones the engine wrote.
    let rendered = values[..assigned].iter().map(SlotValue::render).collect();

    Ok(CaseRun {
        count: outcome.as_count(),
        values: rendered,
    })
}

fn render_line(count: i64, values: &[String]) -> String {
    format!("count={count} values=[{}]", values.join(", "))
}

/// Typed backing storage for one output slot.
enum SlotValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
    Bool(bool),
}

impl SlotValue {
    fn for_kind(kind: SlotKind) -> Self {
        match kind {
            SlotKind::Int8 => SlotValue::Int8(0),
            SlotKind::Int16 => SlotValue::Int16(0),
            SlotKind::Int32 => SlotValue::Int32(0),
            SlotKind::Int64 => SlotValue::Int64(0),
            SlotKind::Float32 => SlotValue::Float32(0.0),
            SlotKind::Float64 => SlotValue::Float64(0.0),
            SlotKind::Bytes => SlotValue::Bytes(Vec::new()),
            SlotKind::Bool => SlotValue::Bool(false),
        }
    }

    fn as_slot(&mut self) -> Slot<'_> {
        match self {
            SlotValue::Int8(v) => Slot::Int8(v),
            SlotValue::Int16(v) => Slot::Int16(v),
            SlotValue::Int32(v) => Slot::Int32(v),
            SlotValue::Int64(v) => Slot::Int64(v),
            SlotValue::Float32(v) => Slot::Float32(v),
            SlotValue::Float64(v) => Slot::Float64(v),
            SlotValue::Bytes(v) => Slot::Bytes(v),
            SlotValue::Bool(v) => Slot::Bool(v),
        }
    }

    fn render(&self) -> String {
        match self {
            SlotValue::Int8(v) => v.to_string(),
            SlotValue::Int16(v) => v.to_string(),
            SlotValue::Int32(v) => v.to_string(),
            SlotValue::Int64(v) => v.to_string(),
            SlotValue::Float32(v) => v.to_string(),
            SlotValue::Float64(v) => v.to_string(),
            SlotValue::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
            SlotValue::Bool(v) => v.to_string(),
        }
    }
}
