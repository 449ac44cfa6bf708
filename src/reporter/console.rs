//! Console reporter with colored output

use super::format::{format_duration, format_success_rate};
use crate::model::{AllResults, TestResults};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use std::path::Path;

/// Failed tests listed before the rest are collapsed, unless verbose
const MAX_FAILURES_SHOWN: usize = 10;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// List every failed test and every package
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print the summary of a generated report
    pub fn report(&self, results: &AllResults, index: &Path) {
        print!("{}", self.render(results, index));
    }

    pub fn render(&self, results: &AllResults, index: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.bold("Test Report"));
        let _ = writeln!(
            out,
            "   Tests: {} | Failures: {} | Duration: {}",
            results.test_count(),
            results.failure_count(),
            format_duration(results.duration_ms())
        );
        let _ = writeln!(out, "   Success rate: {} {}", self.rate_bar(results), self.paint_rate(results));
        let _ = writeln!(out);

        if self.verbose {
            self.write_packages(&mut out, results);
        }
        if results.has_failures() {
            self.write_failures(&mut out, results);
        }

        let _ = writeln!(out, "   Report: {}", index.display());
        out
    }

    fn write_packages(&self, out: &mut String, results: &AllResults) {
        let _ = writeln!(out, "   {}", self.bold("Packages:"));
        for package in results.packages() {
            let _ = writeln!(
                out,
                "   {} {:>4} tests {:>4} failed  {}",
                self.paint_rate(package),
                package.test_count(),
                package.failure_count(),
                package.display_name()
            );
        }
        let _ = writeln!(out);
    }

    fn write_failures(&self, out: &mut String, results: &AllResults) {
        let _ = writeln!(out, "   {}", self.bold("Failed tests:"));
        let failed: Vec<_> = results.failed_tests().collect();
        let limit = if self.verbose {
            failed.len()
        } else {
            MAX_FAILURES_SHOWN
        };

        for test in failed.iter().take(limit) {
            let mark = self.paint("x".into(), |s| s.red());
            let _ = writeln!(out, "   {} {}.{}", mark, test.class_name(), test.name());
            if self.verbose {
                for failure in test.failures() {
                    if !failure.message.is_empty() {
                        let _ = writeln!(out, "       -> {}", failure.message);
                    }
                }
            }
        }
        if failed.len() > limit {
            let _ = writeln!(
                out,
                "   ... {} more (use --verbose to show)",
                failed.len() - limit
            );
        }
        let _ = writeln!(out);
    }

    fn paint(&self, s: String, style: impl Fn(String) -> ColoredString) -> String {
        if self.use_colors {
            style(s).to_string()
        } else {
            s
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(s.to_string(), |s| s.bold())
    }

    fn paint_rate(&self, node: &dyn TestResults) -> String {
        let text = format_success_rate(node.success_rate());
        match node.success_rate() {
            Some(100) => self.paint(text, |s| s.green()),
            Some(rate) if rate >= 80 => self.paint(text, |s| s.yellow()),
            Some(_) => self.paint(text, |s| s.red()),
            None => self.paint(text, |s| s.dimmed()),
        }
    }

    fn rate_bar(&self, node: &dyn TestResults) -> String {
        let filled = node.success_rate().map_or(0, |rate| rate as usize * 20 / 100);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
