//! Fixture loading and management.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixture I/O failures.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single scan fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Format template handed to the engine.
    pub format: String,
    /// Raw input text to scan.
    pub input: String,
    /// Expected scanf-convention count (`-1` for end of input).
    pub expected_count: i64,
    /// Rendered values of the assigned slots, in assignment order.
    #[serde(default)]
    pub expected_values: Vec<String>,
    /// Free-form note about what the case exercises.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A collection of fixture cases for one behavioral area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Behavioral area covered (e.g. "integers", "delimited").
    pub suite: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        Ok(set)
    }
}

/// Built-in smoke suite mirroring the reference battery. Used by the
/// `seed` subcommand so a checkout can produce its own fixture files.
#[must_use]
pub fn builtin_suite() -> FixtureSet {
    let case = |name: &str, format: &str, input: &str, count: i64, values: &[&str]| FixtureCase {
        name: name.to_string(),
        format: format.to_string(),
        input: input.to_string(),
        expected_count: count,
        expected_values: values.iter().map(|v| (*v).to_string()).collect(),
        note: None,
    };

    FixtureSet {
        version: "v1".to_string(),
        suite: "smoke".to_string(),
        cases: vec![
            case("int_positive", "%d", "42\n", 1, &["42"]),
            case("int_negative", "%d", "-17\n", 1, &["-17"]),
            case("int_width", "%3d%d", "12345", 2, &["123", "45"]),
            case("int_garbage", "%d", "abc\n", 0, &[]),
            case("int_empty", "%d", "", -1, &[]),
            case("hex_prefixed", "%x", "0x1a\n", 1, &["26"]),
            case("hex_bare", "%x", "1a\n", 1, &["26"]),
            case("binary_prefixed", "%b", "0b101\n", 1, &["5"]),
            case("binary_partial", "%b%s", "102", 2, &["2", "2"]),
            case("float_basic", "%lf", "3.5\n", 1, &["3.5"]),
            case("float_exponent", "%lf", "1e3\n", 1, &["1000"]),
            case("float_dangling_exp", "%lf", "1e\n", 0, &[]),
            case("word", "%s", "hello world\n", 1, &["hello"]),
            case("char_pair", "%c%c", "AB", 2, &["A", "B"]),
            case("delimited_comma", "%D,%s", "hello,world\n", 2, &["hello", "world"]),
            case("bool_mixed_case", "%B", "TrUe\n", 1, &["true"]),
            case("bool_off", "%B", "off\n", 1, &["false"]),
            case("percent_literal", "%%", "%\n", 0, &[]),
            case("literal_mismatch", "%d-%d", "5+3", 1, &["5"]),
            case(
                "multi_field",
                "%d %x %lf %s",
                "42 ff 3.14 hi\n",
                4,
                &["42", "255", "3.14", "hi"],
            ),
        ],
    }
}
