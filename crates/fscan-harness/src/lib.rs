//! Conformance testing harness for fscan.
//!
//! This crate provides:
//! - Fixture loading: scan cases captured as JSON reference data
//! - Fixture verify: run each case through the scan engine and compare
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logging: JSONL records for test and CI workflows

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use fixtures::{FixtureCase, FixtureSet, HarnessError};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
