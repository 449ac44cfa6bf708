//! Integration tests: full report pipeline against test-repos/sample-results/

use junit_report::model::TestResults;
use junit_report::{ReportError, ReportGenerator};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_RESULTS: &str = "test-repos/sample-results";
const BAD_DURATION: &str = "test-repos/bad-duration";

fn generate(results_dir: &str, out: &Path) -> junit_report::AllResults {
    ReportGenerator::new(results_dir, out)
        .generate()
        .unwrap_or_else(|e| panic!("generate({}) failed: {}", results_dir, e))
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

// --- Output layout ---

#[test]
fn writes_exactly_one_page_per_node_plus_assets() {
    let out = TempDir::new().unwrap();
    generate(SAMPLE_RESULTS, out.path());

    let expected: BTreeSet<String> = [
        "index.html",
        "a.html",
        "b.html",
        "a.Foo.html",
        "b.Bar.html",
        "style.css",
        "report.js",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(file_names(out.path()), expected);
}

#[test]
fn creates_missing_output_directories() {
    let out = TempDir::new().unwrap();
    let nested = out.path().join("build/reports/tests");
    generate(SAMPLE_RESULTS, &nested);
    assert!(nested.join("index.html").is_file());
}

#[test]
fn rendering_is_idempotent() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    generate(SAMPLE_RESULTS, first.path());
    generate(SAMPLE_RESULTS, second.path());

    for name in file_names(first.path()) {
        let a = fs::read(first.path().join(&name)).unwrap();
        let b = fs::read(second.path().join(&name)).unwrap();
        assert_eq!(a, b, "{} differs between runs", name);
    }
}

#[test]
fn second_run_into_same_directory_is_identical() {
    let out = TempDir::new().unwrap();
    generate(SAMPLE_RESULTS, out.path());
    let before = fs::read(out.path().join("index.html")).unwrap();
    generate(SAMPLE_RESULTS, out.path());
    assert_eq!(fs::read(out.path().join("index.html")).unwrap(), before);
}

// --- Model contents ---

#[test]
fn totals_roll_up_from_result_files() {
    let out = TempDir::new().unwrap();
    let results = generate(SAMPLE_RESULTS, out.path());

    assert_eq!(results.test_count(), 4);
    assert_eq!(results.failure_count(), 1);
    assert_eq!(results.duration_ms(), 1234 + 100 + 42 + 8);
    assert_eq!(results.success_rate(), Some(75));

    let foo = results.class("a.Foo").unwrap();
    assert_eq!(foo.standard_output(), ["starting a.Foo\n"]);
    assert_eq!(foo.standard_error(), [""]);

    let bar = results.class("b.Bar").unwrap();
    let failed: Vec<_> = bar.failed_tests().map(|t| t.name()).collect();
    assert_eq!(failed, ["rejectsNegative"]);
    let failure = &bar.tests()[0].failures()[0];
    assert_eq!(failure.message, "expected: <1> but was: <2>");
    assert!(failure.detail.contains("at b.Bar.rejectsNegative(Bar.java:17)"));
}

#[test]
fn pages_show_failures_and_output() {
    let out = TempDir::new().unwrap();
    generate(SAMPLE_RESULTS, out.path());

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("<a href=\"b.Bar.html\">b.Bar</a>\n.rejectsNegative\n"));
    assert!(index.contains("<div class=\"percent\">75%</div>"));

    let bar = fs::read_to_string(out.path().join("b.Bar.html")).unwrap();
    assert!(bar.contains("<p class=\"message\">expected: &lt;1&gt; but was: &lt;2&gt;</p>"));
    assert!(bar.contains("<a href=\"#tab2\">Standard error</a>"));
    assert!(bar.contains("<pre>warning: deprecated API\n</pre>"));
    assert!(!bar.contains("Standard output"));
}

#[test]
fn merges_files_for_the_same_class() {
    let dir = TempDir::new().unwrap();
    let results_dir = dir.path().join("results");
    fs::create_dir(&results_dir).unwrap();
    fs::write(
        results_dir.join("TEST-a.Foo-1.xml"),
        r#"<testsuite name="a.Foo"><testcase classname="a.Foo" name="one" time="0.1"/><system-out>first</system-out></testsuite>"#,
    )
    .unwrap();
    fs::write(
        results_dir.join("TEST-a.Foo-2.xml"),
        r#"<testsuite name="a.Foo"><testcase classname="a.Foo" name="one" time="0.2"/><system-out>second</system-out></testsuite>"#,
    )
    .unwrap();

    let results = ReportGenerator::new(&results_dir, dir.path().join("out"))
        .generate()
        .unwrap();
    let foo = results.class("a.Foo").unwrap();
    assert_eq!(foo.test_count(), 2);
    assert_eq!(foo.duration_ms(), 300);
    assert_eq!(foo.standard_output(), ["first", "second"]);
}

// --- Failures ---

#[test]
fn bad_duration_names_the_file() {
    let out = TempDir::new().unwrap();
    let report_dir = out.path().join("report");
    let err = ReportGenerator::new(BAD_DURATION, &report_dir)
        .generate()
        .unwrap_err();

    assert!(matches!(err, ReportError::Load { .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "Could not load test results from '{}'.",
            Path::new(BAD_DURATION).join("TEST-c.Baz.xml").display()
        )
    );
    assert!(!report_dir.exists(), "no partial report");
}

#[test]
fn unwritable_output_names_the_directory() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("report");
    fs::write(&blocker, "not a directory").unwrap();

    let err = ReportGenerator::new(SAMPLE_RESULTS, &blocker)
        .generate()
        .unwrap_err();
    assert!(matches!(err, ReportError::Generate { .. }));
    assert!(err.to_string().starts_with("Could not generate test report to '"));
}
