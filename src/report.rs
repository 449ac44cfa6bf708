//! Report driver: scan result files, build the model, write the HTML report

use crate::aggregator::ResultAggregator;
use crate::error::ReportError;
use crate::model::AllResults;
use crate::parser::parse_result_path;
use crate::reporter::html::{SCRIPT, STYLESHEET};
use crate::reporter::{Page, RenderOptions, INDEX_FILE_NAME};
use globset::GlobSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_RESULT_PATTERN: &str = "TEST-*.xml";

const STYLESHEET_CONTENT: &str = include_str!("../assets/style.css");
const SCRIPT_CONTENT: &str = include_str!("../assets/report.js");

/// Selects which files of the results directory are read
#[derive(Debug, Clone)]
pub struct ResultFilter {
    pattern: String,
    ignore: GlobSet,
}

impl ResultFilter {
    /// Files whose name matches `pattern` (glob syntax)
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ignore: GlobSet::empty(),
        }
    }

    /// Skip files matching any of these globs, by file name or full path
    pub fn with_ignore(mut self, ignore: GlobSet) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        self.ignore.is_match(path)
            || path
                .file_name()
                .is_some_and(|name| self.ignore.is_match(Path::new(name)))
    }
}

impl Default for ResultFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_PATTERN)
    }
}

/// Turns a directory of JUnit XML files into a static HTML report
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    results_dir: PathBuf,
    report_dir: PathBuf,
    filter: ResultFilter,
    options: RenderOptions,
}

impl ReportGenerator {
    pub fn new(results_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            report_dir: report_dir.into(),
            filter: ResultFilter::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_filter(mut self, filter: ResultFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Path of the overview page once the report is written
    pub fn index_path(&self) -> PathBuf {
        self.report_dir.join(INDEX_FILE_NAME)
    }

    /// Load every result file, then write the report.
    ///
    /// Nothing is written when loading fails. On success the returned tree is
    /// the one the pages were rendered from.
    pub fn generate(&self) -> Result<AllResults, ReportError> {
        let results = self.load_results()?;
        self.write_report(&results)?;
        Ok(results)
    }

    /// Result files to read, in file-name order
    pub fn result_files(&self) -> Result<Vec<PathBuf>, ReportError> {
        if !self.results_dir.is_dir() {
            warn!(
                "results directory {} does not exist, writing an empty report",
                self.results_dir.display()
            );
            return Ok(Vec::new());
        }

        let dir = glob::Pattern::escape(&self.results_dir.to_string_lossy());
        let pattern = format!("{}/{}", dir, self.filter.pattern());
        let entries = glob::glob(&pattern).map_err(|e| ReportError::load(&self.results_dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                ReportError::load(path, e)
            })?;
            if !path.is_file() {
                continue;
            }
            if self.filter.is_ignored(&path) {
                debug!("ignoring {}", path.display());
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }

    fn load_results(&self) -> Result<AllResults, ReportError> {
        let files = self.result_files()?;
        info!(
            files = files.len(),
            "scanned {}",
            self.results_dir.display()
        );

        let mut aggregator = ResultAggregator::new();
        for path in files {
            debug!("loading {}", path.display());
            let parsed = parse_result_path(&path).map_err(|e| ReportError::load(&path, e))?;
            aggregator
                .merge(parsed)
                .map_err(|e| ReportError::load(&path, e))?;
        }
        Ok(aggregator.into_results())
    }

    fn write_report(&self, results: &AllResults) -> Result<(), ReportError> {
        let generate = |e| ReportError::generate(&self.report_dir, e);
        fs::create_dir_all(&self.report_dir).map_err(generate)?;

        let mut pages = vec![Page::Overview(results)];
        for package in results.packages() {
            pages.push(Page::Package(package));
            pages.extend(package.classes().map(Page::Class));
        }

        for page in &pages {
            let path = self.report_dir.join(page.file_name());
            debug!("writing {}", path.display());
            fs::write(&path, page.render(&self.options)).map_err(generate)?;
        }

        fs::write(self.report_dir.join(STYLESHEET), STYLESHEET_CONTENT).map_err(generate)?;
        fs::write(self.report_dir.join(SCRIPT), SCRIPT_CONTENT).map_err(generate)?;

        info!(
            pages = pages.len(),
            "report written to {}",
            self.report_dir.display()
        );
        Ok(())
    }
}
