//! Integration test: built-in fixture suite, runner, and report pipeline.

use fscan_harness::fixtures::{builtin_suite, FixtureCase, FixtureSet};
use fscan_harness::report::ConformanceReport;
use fscan_harness::runner::TestRunner;
use fscan_harness::verify::VerificationSummary;

#[test]
fn builtin_suite_all_green() {
    let suite = builtin_suite();
    let results = TestRunner::new("ci").run(&suite);
    let summary = VerificationSummary::from_results(results);
    assert!(
        summary.all_passed(),
        "failures: {:?}",
        summary
            .results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| (&r.case_name, &r.actual))
            .collect::<Vec<_>>()
    );
    assert_eq!(summary.total, suite.cases.len());
}

#[test]
fn report_renders_failures_section() {
    let set = FixtureSet {
        version: "v1".to_string(),
        suite: "regress".to_string(),
        cases: vec![FixtureCase {
            name: "wrong_expectation".to_string(),
            format: "%d".to_string(),
            input: "7".to_string(),
            expected_count: 1,
            expected_values: vec!["8".to_string()],
            note: Some("deliberately wrong".to_string()),
        }],
    };
    let summary = VerificationSummary::from_results(TestRunner::new("ci").run(&set));
    assert_eq!(summary.failed, 1);

    let report = ConformanceReport {
        title: "fscan conformance".to_string(),
        suite: set.suite.clone(),
        timestamp: "2026-08-01T00:00:00Z".to_string(),
        summary,
    };
    let md = report.to_markdown();
    assert!(md.contains("| wrong_expectation | FAIL |"));
    assert!(md.contains("## Failures"));
    assert!(md.contains("count=1 values=[7]"));
}

#[test]
fn fixture_file_round_trip() {
    let dir = std::env::temp_dir().join("fscan_fixture_rt");
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("smoke.json");

    let suite = builtin_suite();
    std::fs::write(&path, suite.to_json().expect("serialize")).expect("write fixture");

    let loaded = FixtureSet::from_file(&path).expect("load fixture");
    assert_eq!(loaded.cases.len(), suite.cases.len());

    let summary = VerificationSummary::from_results(TestRunner::new("ci").run(&loaded));
    assert!(summary.all_passed());
}
