//! junit-report: static HTML reports from JUnit XML test results
//!
//! A run scans a directory for result files, parses each one into plain
//! records, folds the records into a package/class/test tree, and renders one
//! page per node plus an overview.
//!
//! ```no_run
//! use junit_report::ReportGenerator;
//!
//! let results = ReportGenerator::new("build/test-results", "build/report").generate()?;
//! println!("{} tests", junit_report::model::TestResults::test_count(&results));
//! # Ok::<(), junit_report::ReportError>(())
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod reporter;

pub use aggregator::ResultAggregator;
pub use error::{LoadError, ReportError};
pub use model::{AllResults, ClassResults, FailureDetail, PackageResults, TestCaseResult, TestResults};
pub use report::{ReportGenerator, ResultFilter, DEFAULT_RESULT_PATTERN};
pub use reporter::{Page, RenderOptions};
