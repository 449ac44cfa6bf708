//! Aggregation engine: fold parsed result files into one result tree

use crate::error::LoadError;
use crate::model::{AllResults, TestResults};
use crate::parser::ParsedResultFile;
use tracing::debug;

/// Accumulates the records of many result files into an [`AllResults`] tree.
///
/// Files are merged in the order they are handed over. Nothing is
/// deduplicated: a class reported by two files keeps the test cases and
/// output of both, in merge order.
///
/// The run's total duration must fit in a `u64` of milliseconds. A file that
/// would push it past that is rejected before any of its records are added.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: AllResults,
    files_merged: usize,
    duration_ms: u64,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the records of one parsed file
    pub fn merge(&mut self, parsed: ParsedResultFile) -> Result<(), LoadError> {
        let ParsedResultFile { test_cases, suites } = parsed;
        let test_count = test_cases.len();
        let suite_count = suites.len();

        self.duration_ms = test_cases
            .iter()
            .try_fold(self.duration_ms, |total, test| {
                total.checked_add(test.duration_ms())
            })
            .ok_or(LoadError::DurationOverflow)?;

        for test in test_cases {
            self.results.add_test(test);
        }

        // The suite's class exists even when it produced no output.
        for suite in suites {
            let class = self.results.add_test_class(&suite.class_name);
            for text in suite.standard_output {
                class.add_standard_output(text);
            }
            for text in suite.standard_error {
                class.add_standard_error(text);
            }
        }

        self.files_merged += 1;
        debug!(
            tests = test_count,
            suites = suite_count,
            "merged result file #{}", self.files_merged
        );
        Ok(())
    }

    pub fn files_merged(&self) -> usize {
        self.files_merged
    }

    /// Read-only view of the tree built so far
    pub fn results(&self) -> &AllResults {
        &self.results
    }

    pub fn into_results(self) -> AllResults {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TestCaseResult, TestResults};
    use crate::parser::{parse_result_file, SuiteOutput};

    fn file(class: &str, tests: &[(&str, u64, bool)], out: &[&str]) -> ParsedResultFile {
        let test_cases = tests
            .iter()
            .map(|(name, ms, failed)| {
                let mut t = TestCaseResult::new(class, *name, *ms);
                if *failed {
                    t.add_failure("failed", "trace");
                }
                t
            })
            .collect();
        ParsedResultFile {
            test_cases,
            suites: vec![SuiteOutput {
                class_name: class.to_string(),
                standard_output: out.iter().map(|s| s.to_string()).collect(),
                standard_error: vec![],
            }],
        }
    }

    #[test]
    fn test_same_class_from_two_files_is_merged() {
        let mut agg = ResultAggregator::new();
        agg.merge(file("a.Foo", &[("one", 10, false), ("two", 20, true)], &["first"]))
            .unwrap();
        agg.merge(file("a.Foo", &[("one", 30, false)], &["second"]))
            .unwrap();
        let results = agg.into_results();

        assert_eq!(results.classes().count(), 1);
        let class = results.class("a.Foo").unwrap();
        let names: Vec<_> = class.tests().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["one", "two", "one"]);
        assert_eq!(class.standard_output(), ["first", "second"]);
        assert_eq!(class.test_count(), 3);
        assert_eq!(class.failure_count(), 1);
        assert_eq!(class.duration_ms(), 60);
    }

    #[test]
    fn test_merge_order_does_not_change_content() {
        let a = file("a.Foo", &[("x", 1, false)], &["a"]);
        let b = file("b.Bar", &[("y", 2, true)], &["b"]);

        let mut forward = ResultAggregator::new();
        forward.merge(a.clone()).unwrap();
        forward.merge(b.clone()).unwrap();

        let mut backward = ResultAggregator::new();
        backward.merge(b).unwrap();
        backward.merge(a).unwrap();

        assert_eq!(forward.into_results(), backward.into_results());
    }

    #[test]
    fn test_suite_and_test_class_may_differ() {
        let xml = r#"<testsuite name="a.Suite">
  <testcase classname="b.Member" name="t" time="0.1"/>
  <system-out>suite output</system-out>
</testsuite>"#;
        let mut agg = ResultAggregator::new();
        agg.merge(parse_result_file(xml).unwrap()).unwrap();
        let results = agg.into_results();

        let suite = results.class("a.Suite").unwrap();
        assert_eq!(suite.test_count(), 0);
        assert_eq!(suite.standard_output(), ["suite output"]);
        assert_eq!(results.class("b.Member").unwrap().test_count(), 1);
        assert_eq!(results.packages().count(), 2);
    }

    #[test]
    fn test_duration_overflow_rejects_whole_file() {
        let mut agg = ResultAggregator::new();
        agg.merge(file("a.Foo", &[("big", u64::MAX - 5, false)], &[]))
            .unwrap();

        let err = agg
            .merge(file("b.Bar", &[("small", 1, false), ("tips", 10, true)], &["out"]))
            .unwrap_err();
        assert!(matches!(err, LoadError::DurationOverflow));
        assert_eq!(agg.files_merged(), 1);
        assert!(agg.results().class("b.Bar").is_none());
        assert_eq!(agg.results().duration_ms(), u64::MAX - 5);
    }

    #[test]
    fn test_duration_overflow_within_one_file() {
        let mut agg = ResultAggregator::new();
        let half = u64::MAX / 2 + 1;
        let err = agg
            .merge(file("a.Foo", &[("one", half, false), ("two", half, false)], &[]))
            .unwrap_err();
        assert!(matches!(err, LoadError::DurationOverflow));
        assert!(agg.results().is_empty());
    }

    #[test]
    fn test_empty_aggregator() {
        let agg = ResultAggregator::new();
        assert_eq!(agg.files_merged(), 0);
        assert!(agg.results().is_empty());
        assert_eq!(agg.results().test_count(), 0);
    }
}
