//! Error types for report generation
//!
//! A run fails in exactly one of two ways: loading the results, or writing
//! the report. Both carry the path the user needs to look at.

use crate::parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one input into part of the model
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid result file pattern")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list result files")]
    Scan(#[from] glob::GlobError),

    #[error("total test duration exceeds {} milliseconds", u64::MAX)]
    DurationOverflow,
}

/// Fatal error for a whole report run
#[derive(Error, Debug)]
pub enum ReportError {
    /// A result file could not be opened, was malformed, or had a bad duration
    #[error("Could not load test results from '{}'.", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// Creating the report directory, writing a page, or copying an asset failed
    #[error("Could not generate test report to '{}'.", dir.display())]
    Generate {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn load(path: impl Into<PathBuf>, source: impl Into<LoadError>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn generate(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Generate {
            dir: dir.into(),
            source,
        }
    }
}
