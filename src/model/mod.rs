//! Result record model: test cases, failures and the class/package/run aggregates.
//!
//! Aggregates never store their own counts. Every rollup is summed from the
//! direct children when it is read, so a class, a package and the whole run
//! all answer through the same [`TestResults`] contract.

use std::collections::btree_map::{self, BTreeMap};

/// Display and file name used for classes that live in no package.
pub const DEFAULT_PACKAGE_NAME: &str = "default-package";

/// Counts and timing shared by every level of the result tree
pub trait TestResults {
    /// Number of test cases at or below this node
    fn test_count(&self) -> usize;

    /// Number of test cases with at least one failure
    fn failure_count(&self) -> usize;

    /// Sum of test case durations in milliseconds
    fn duration_ms(&self) -> u64;

    fn success_count(&self) -> usize {
        self.test_count() - self.failure_count()
    }

    fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Successful tests as a whole percentage, truncated. `None` when there are no tests.
    fn success_rate(&self) -> Option<u8> {
        let tests = self.test_count();
        if tests == 0 {
            return None;
        }
        Some(((self.success_count() * 100) / tests) as u8)
    }
}

fn sum_results<'a, T, I>(children: I) -> (usize, usize, u64)
where
    T: TestResults + 'a,
    I: IntoIterator<Item = &'a T>,
{
    // Durations saturate; loading rejects runs whose total does not fit.
    children
        .into_iter()
        .fold((0, 0, 0), |(tests, failures, duration), child| {
            (
                tests + child.test_count(),
                failures + child.failure_count(),
                duration.saturating_add(child.duration_ms()),
            )
        })
}

/// Returns the package portion of a fully-qualified class name (empty for the default package)
pub fn package_name_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(idx) => &class_name[..idx],
        None => "",
    }
}

/// Returns a class name without its package
pub fn simple_name_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(idx) => &class_name[idx + 1..],
        None => class_name,
    }
}

/// A single failure attached to a test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    /// Short message (the `message` attribute)
    pub message: String,
    /// Full body, usually a stack trace
    pub detail: String,
}

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseResult {
    class_name: String,
    name: String,
    duration_ms: u64,
    failures: Vec<FailureDetail>,
}

impl TestCaseResult {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            duration_ms,
            failures: Vec::new(),
        }
    }

    pub fn add_failure(&mut self, message: impl Into<String>, detail: impl Into<String>) {
        self.failures.push(FailureDetail {
            message: message.into(),
            detail: detail.into(),
        });
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Failures in document order
    pub fn failures(&self) -> &[FailureDetail] {
        &self.failures
    }

    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }
}

impl TestResults for TestCaseResult {
    fn test_count(&self) -> usize {
        1
    }

    fn failure_count(&self) -> usize {
        usize::from(!self.is_successful())
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// All results recorded for one test class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassResults {
    name: String,
    tests: Vec<TestCaseResult>,
    standard_output: Vec<String>,
    standard_error: Vec<String>,
}

impl ClassResults {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            standard_output: Vec::new(),
            standard_error: Vec::new(),
        }
    }

    /// Fully-qualified class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name without its package
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn package_name(&self) -> &str {
        package_name_of(&self.name)
    }

    pub fn add_test(&mut self, test: TestCaseResult) {
        self.tests.push(test);
    }

    pub fn add_standard_output(&mut self, text: impl Into<String>) {
        self.standard_output.push(text.into());
    }

    pub fn add_standard_error(&mut self, text: impl Into<String>) {
        self.standard_error.push(text.into());
    }

    /// Test cases in append order
    pub fn tests(&self) -> &[TestCaseResult] {
        &self.tests
    }

    pub fn standard_output(&self) -> &[String] {
        &self.standard_output
    }

    pub fn standard_error(&self) -> &[String] {
        &self.standard_error
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.tests.iter().filter(|t| !t.is_successful())
    }
}

impl TestResults for ClassResults {
    fn test_count(&self) -> usize {
        self.tests.len()
    }

    fn failure_count(&self) -> usize {
        sum_results(&self.tests).1
    }

    fn duration_ms(&self) -> u64 {
        sum_results(&self.tests).2
    }
}

/// All classes sharing a package prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResults {
    name: String,
    classes: BTreeMap<String, ClassResults>,
}

impl PackageResults {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: BTreeMap::new(),
        }
    }

    /// Package name; empty for the default package
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_PACKAGE_NAME
        } else {
            &self.name
        }
    }

    /// Classes in name order
    pub fn classes(&self) -> btree_map::Values<'_, String, ClassResults> {
        self.classes.values()
    }

    pub fn class(&self, name: &str) -> Option<&ClassResults> {
        self.classes.get(name)
    }

    /// Locates the class, creating an empty entry on first sight
    pub fn add_class(&mut self, name: &str) -> &mut ClassResults {
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassResults::new(name))
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.classes().flat_map(ClassResults::failed_tests)
    }
}

impl TestResults for PackageResults {
    fn test_count(&self) -> usize {
        sum_results(self.classes.values()).0
    }

    fn failure_count(&self) -> usize {
        sum_results(self.classes.values()).1
    }

    fn duration_ms(&self) -> u64 {
        sum_results(self.classes.values()).2
    }
}

/// Root of the result tree for one report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllResults {
    packages: BTreeMap<String, PackageResults>,
}

impl AllResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages in name order (the default package sorts first)
    pub fn packages(&self) -> btree_map::Values<'_, String, PackageResults> {
        self.packages.values()
    }

    pub fn package(&self, name: &str) -> Option<&PackageResults> {
        self.packages.get(name)
    }

    /// Looks a class up by its fully-qualified name
    pub fn class(&self, name: &str) -> Option<&ClassResults> {
        self.package(package_name_of(name))?.class(name)
    }

    /// Every class, ordered by package then class name
    pub fn classes(&self) -> impl Iterator<Item = &ClassResults> {
        self.packages().flat_map(PackageResults::classes)
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = &TestCaseResult> {
        self.packages().flat_map(PackageResults::failed_tests)
    }

    /// Locates or creates the class (and its package) by fully-qualified name
    pub fn add_test_class(&mut self, class_name: &str) -> &mut ClassResults {
        let package = package_name_of(class_name);
        self.packages
            .entry(package.to_string())
            .or_insert_with(|| PackageResults::new(package))
            .add_class(class_name)
    }

    /// Appends a test case to the class named by the test itself
    pub fn add_test(&mut self, test: TestCaseResult) {
        let class_name = test.class_name().to_string();
        self.add_test_class(&class_name).add_test(test);
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl TestResults for AllResults {
    fn test_count(&self) -> usize {
        sum_results(self.packages.values()).0
    }

    fn failure_count(&self) -> usize {
        sum_results(self.packages.values()).1
    }

    fn duration_ms(&self) -> u64 {
        sum_results(self.packages.values()).2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(class: &str, name: &str, ms: u64) -> TestCaseResult {
        let mut t = TestCaseResult::new(class, name, ms);
        t.add_failure("boom", "at Foo.java:12");
        t
    }

    #[test]
    fn test_package_name_of() {
        assert_eq!(package_name_of("org.acme.FooTest"), "org.acme");
        assert_eq!(package_name_of("FooTest"), "");
        assert_eq!(package_name_of(""), "");
    }

    #[test]
    fn test_simple_name_of() {
        assert_eq!(simple_name_of("org.acme.FooTest"), "FooTest");
        assert_eq!(simple_name_of("FooTest"), "FooTest");
        assert_eq!(simple_name_of("a.b."), "");
    }

    #[test]
    fn test_case_without_failures_is_successful() {
        let t = TestCaseResult::new("a.Foo", "ok", 5);
        assert!(t.is_successful());
        assert_eq!(t.failure_count(), 0);
        assert_eq!(t.test_count(), 1);
    }

    #[test]
    fn test_case_keeps_failures_in_order() {
        let mut t = TestCaseResult::new("a.Foo", "bad", 5);
        t.add_failure("first", "trace 1");
        t.add_failure("second", "trace 2");
        assert!(!t.is_successful());
        assert_eq!(t.failure_count(), 1);
        let messages: Vec<_> = t.failures().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn test_class_rollups() {
        let mut class = ClassResults::new("a.Foo");
        class.add_test(TestCaseResult::new("a.Foo", "one", 100));
        class.add_test(failed("a.Foo", "two", 250));
        assert_eq!(class.test_count(), 2);
        assert_eq!(class.failure_count(), 1);
        assert_eq!(class.duration_ms(), 350);
        assert_eq!(class.success_rate(), Some(50));
        assert_eq!(class.simple_name(), "Foo");
        assert_eq!(class.package_name(), "a");
    }

    #[test]
    fn test_empty_class_has_no_success_rate() {
        let class = ClassResults::new("Foo");
        assert_eq!(class.success_rate(), None);
        assert!(!class.has_failures());
    }

    #[test]
    fn test_success_rate_truncates() {
        let mut class = ClassResults::new("a.Foo");
        class.add_test(TestCaseResult::new("a.Foo", "one", 0));
        class.add_test(TestCaseResult::new("a.Foo", "two", 0));
        class.add_test(failed("a.Foo", "three", 0));
        assert_eq!(class.success_rate(), Some(66));
    }

    #[test]
    fn test_all_results_tree() {
        let mut all = AllResults::new();
        all.add_test(TestCaseResult::new("a.Foo", "one", 10));
        all.add_test(failed("a.Foo", "two", 20));
        all.add_test(TestCaseResult::new("b.Bar", "three", 30));
        all.add_test(TestCaseResult::new("Plain", "four", 40));

        let names: Vec<_> = all.packages().map(PackageResults::display_name).collect();
        assert_eq!(names, ["default-package", "a", "b"]);

        assert_eq!(all.test_count(), 4);
        assert_eq!(all.failure_count(), 1);
        assert_eq!(all.duration_ms(), 100);
        assert_eq!(all.package("a").map(|p| p.test_count()), Some(2));
        assert_eq!(all.class("b.Bar").map(|c| c.duration_ms()), Some(30));
        assert_eq!(all.failed_tests().count(), 1);
    }

    #[test]
    fn test_add_test_class_reuses_existing_entry() {
        let mut all = AllResults::new();
        all.add_test(TestCaseResult::new("a.Foo", "one", 10));
        all.add_test_class("a.Foo").add_standard_output("hello");
        all.add_test_class("a.Foo").add_standard_error("oops");

        assert_eq!(all.classes().count(), 1);
        let class = all.class("a.Foo").unwrap();
        assert_eq!(class.tests().len(), 1);
        assert_eq!(class.standard_output(), ["hello"]);
        assert_eq!(class.standard_error(), ["oops"]);
    }

    #[test]
    fn test_duration_rollups_saturate() {
        let mut all = AllResults::new();
        all.add_test(TestCaseResult::new("a.Foo", "one", u64::MAX - 1));
        all.add_test(TestCaseResult::new("a.Foo", "two", 10));
        all.add_test(TestCaseResult::new("b.Bar", "three", 10));
        assert_eq!(all.class("a.Foo").map(|c| c.duration_ms()), Some(u64::MAX));
        assert_eq!(all.duration_ms(), u64::MAX);
    }

    #[test]
    fn test_classes_sorted_by_name() {
        let mut all = AllResults::new();
        all.add_test_class("a.Zed");
        all.add_test_class("a.Alpha");
        all.add_test_class("a.Mid");
        let names: Vec<_> = all.classes().map(ClassResults::simple_name).collect();
        assert_eq!(names, ["Alpha", "Mid", "Zed"]);
    }
}
