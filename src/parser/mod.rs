//! Result file parsing - decode JUnit XML files into plain records

pub mod duration;
mod junit;

pub use duration::{parse_duration_millis, DurationError};
pub use junit::{parse_result_file, ParseError, ParsedResultFile, SuiteOutput};

use crate::error::LoadError;
use std::path::Path;

/// Read and decode one result file
pub fn parse_result_path(path: &Path) -> Result<ParsedResultFile, LoadError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_result_file(&content)?)
}
