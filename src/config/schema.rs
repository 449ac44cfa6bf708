//! Config schema and deserialization

use crate::report::DEFAULT_RESULT_PATTERN;
use crate::reporter::RenderOptions;
use serde::Deserialize;

/// Root config structure for .junitreportrc.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Glob selecting result files in the results directory. Default: TEST-*.xml
    #[serde(default)]
    pub result_pattern: Option<String>,

    /// Glob patterns for result files to skip
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Title prefix of every page. Default: "Test results"
    #[serde(default)]
    pub title: Option<String>,

    /// Exit 1 when the report contains failed tests
    #[serde(default)]
    pub fail_on_failure: Option<bool>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_pattern: Option<String>,
        cli_title: Option<String>,
        cli_fail_on_failure: bool,
    ) -> Self {
        if cli_pattern.is_some() {
            self.result_pattern = cli_pattern;
        }
        if cli_title.is_some() {
            self.title = cli_title;
        }
        if cli_fail_on_failure {
            self.fail_on_failure = Some(true);
        }
        self
    }

    /// Merge another config into this one (for extends). The base must be
    /// fully resolved already; `extends` itself is never inherited.
    pub fn merge_from(&mut self, base: Config) {
        if self.result_pattern.is_none() {
            self.result_pattern = base.result_pattern;
        }
        if self.title.is_none() {
            self.title = base.title;
        }
        if self.fail_on_failure.is_none() {
            self.fail_on_failure = base.fail_on_failure;
        }

        // Base ignores first
        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;
    }

    pub fn result_pattern(&self) -> &str {
        self.result_pattern.as_deref().unwrap_or(DEFAULT_RESULT_PATTERN)
    }

    pub fn fail_on_failure(&self) -> bool {
        self.fail_on_failure.unwrap_or(false)
    }

    pub fn render_options(&self) -> RenderOptions {
        match &self.title {
            Some(title) => RenderOptions {
                title: title.clone(),
            },
            None => RenderOptions::default(),
        }
    }
}
