//! JUnit XML result file parser
//!
//! Streams a result file with quick-xml and produces plain records: one
//! [`TestCaseResult`] per `<testcase>` and one [`SuiteOutput`] per named
//! suite element. Nothing here knows about packages or other files; folding
//! the records into the result tree is the aggregator's job.
//!
//! The document element is always treated as a suite, whatever its tag. A
//! `<testsuites>` wrapper works too: output blocks attach to the innermost
//! enclosing suite that has a name.

use super::duration::{parse_duration_millis, DurationError};
use crate::model::TestCaseResult;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

const TAG_TEST_SUITE: &[u8] = b"testsuite";
const TAG_TEST_CASE: &[u8] = b"testcase";
const TAG_FAILURE: &[u8] = b"failure";
const TAG_SYSTEM_OUT: &[u8] = b"system-out";
const TAG_SYSTEM_ERR: &[u8] = b"system-err";

const ATTR_NAME: &str = "name";
const ATTR_CLASS_NAME: &str = "classname";
const ATTR_TIME: &str = "time";
const ATTR_MESSAGE: &str = "message";

/// Why a result file could not be decoded
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("test case '{0}' is nested inside another test case")]
    NestedTestCase(String),

    #[error("test case '{0}' has no class name")]
    MissingClassName(String),

    #[error("invalid time for test case '{test}': {source}")]
    InvalidDuration {
        test: String,
        #[source]
        source: DurationError,
    },

    #[error("<{0}> is not inside a named test suite")]
    OrphanOutput(String),
}

/// Output captured at suite level, keyed by the suite's class name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteOutput {
    pub class_name: String,
    pub standard_output: Vec<String>,
    pub standard_error: Vec<String>,
}

/// Everything one result file contributes to the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResultFile {
    /// Test cases in document order
    pub test_cases: Vec<TestCaseResult>,
    /// Suites in document order
    pub suites: Vec<SuiteOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextSink {
    Failure,
    StandardOutput,
    StandardError,
}

/// Text being collected for the element opened at `depth`
#[derive(Debug)]
struct Capture {
    sink: TextSink,
    depth: usize,
    message: String,
    suite: Option<usize>,
    text: String,
}

#[derive(Debug)]
struct SuiteScope {
    depth: usize,
    /// Index into `ParsedResultFile::suites`; `None` for unnamed suites
    index: Option<usize>,
}

#[derive(Debug, Default)]
struct ResultFileParser {
    open_tags: Vec<String>,
    seen_root: bool,
    scopes: Vec<SuiteScope>,
    current_test: Option<(usize, TestCaseResult)>,
    capture: Option<Capture>,
    parsed: ParsedResultFile,
}

impl ResultFileParser {
    fn parse(mut self, content: &str) -> Result<ParsedResultFile, ParseError> {
        let mut reader = Reader::from_str(content);

        loop {
            match reader.read_event()? {
                Event::Start(e) => self.open(&e)?,
                Event::Empty(e) => {
                    self.open(&e)?;
                    self.close()?;
                }
                Event::End(_) => self.close()?,
                Event::Text(e) => {
                    if let Some(capture) = self.capture.as_mut() {
                        capture.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(capture) = self.capture.as_mut() {
                        capture.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(tag) = self.open_tags.last() {
            return Err(ParseError::Unclosed(tag.clone()));
        }
        if !self.seen_root {
            return Err(ParseError::MissingRoot);
        }
        Ok(self.parsed)
    }

    fn open(&mut self, e: &BytesStart) -> Result<(), ParseError> {
        let depth = self.open_tags.len();
        let tag = e.name();
        let tag = tag.as_ref();

        if depth == 0 {
            if self.seen_root {
                return Err(ParseError::MultipleRoots);
            }
            self.seen_root = true;
            self.open_suite(e, depth)?;
        } else if self.capture.is_none() {
            match tag {
                TAG_TEST_SUITE => self.open_suite(e, depth)?,
                TAG_TEST_CASE => self.open_test_case(e, depth)?,
                TAG_FAILURE if self.current_test.is_some() => {
                    let message = attribute(e, ATTR_MESSAGE)?.unwrap_or_default();
                    self.start_capture(TextSink::Failure, depth, message, None);
                }
                TAG_SYSTEM_OUT | TAG_SYSTEM_ERR => {
                    let sink = if tag == TAG_SYSTEM_OUT {
                        TextSink::StandardOutput
                    } else {
                        TextSink::StandardError
                    };
                    let suite = self.innermost_named_suite().ok_or_else(|| {
                        ParseError::OrphanOutput(String::from_utf8_lossy(tag).into_owned())
                    })?;
                    self.start_capture(sink, depth, String::new(), Some(suite));
                }
                _ => {}
            }
        }

        self.open_tags
            .push(String::from_utf8_lossy(tag).into_owned());
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParseError> {
        if self.open_tags.pop().is_none() {
            return Ok(());
        }
        let depth = self.open_tags.len();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.finish_capture(capture);
            }
        } else if self.current_test.as_ref().is_some_and(|(d, _)| *d == depth) {
            if let Some((_, test)) = self.current_test.take() {
                self.parsed.test_cases.push(test);
            }
        } else if self.scopes.last().is_some_and(|s| s.depth == depth) {
            self.scopes.pop();
        }
        Ok(())
    }

    fn open_suite(&mut self, e: &BytesStart, depth: usize) -> Result<(), ParseError> {
        let index = match attribute(e, ATTR_NAME)?.filter(|n| !n.is_empty()) {
            Some(name) => {
                self.parsed.suites.push(SuiteOutput {
                    class_name: name,
                    ..SuiteOutput::default()
                });
                Some(self.parsed.suites.len() - 1)
            }
            None => None,
        };
        self.scopes.push(SuiteScope { depth, index });
        Ok(())
    }

    fn open_test_case(&mut self, e: &BytesStart, depth: usize) -> Result<(), ParseError> {
        let name = attribute(e, ATTR_NAME)?.unwrap_or_default();
        if self.current_test.is_some() {
            return Err(ParseError::NestedTestCase(name));
        }

        let class_name = match attribute(e, ATTR_CLASS_NAME)?.filter(|c| !c.is_empty()) {
            Some(class_name) => class_name,
            None => self
                .innermost_named_suite()
                .map(|idx| self.parsed.suites[idx].class_name.clone())
                .ok_or_else(|| ParseError::MissingClassName(name.clone()))?,
        };

        let time = attribute(e, ATTR_TIME)?.unwrap_or_default();
        let duration_ms = parse_duration_millis(&time).map_err(|source| {
            ParseError::InvalidDuration {
                test: name.clone(),
                source,
            }
        })?;

        self.current_test = Some((depth, TestCaseResult::new(class_name, name, duration_ms)));
        Ok(())
    }

    fn start_capture(
        &mut self,
        sink: TextSink,
        depth: usize,
        message: String,
        suite: Option<usize>,
    ) {
        self.capture = Some(Capture {
            sink,
            depth,
            message,
            suite,
            text: String::new(),
        });
    }

    fn finish_capture(&mut self, capture: Capture) {
        let Capture {
            sink,
            message,
            suite,
            text,
            ..
        } = capture;
        let text = normalize_line_endings(text);

        match sink {
            TextSink::Failure => {
                if let Some((_, test)) = self.current_test.as_mut() {
                    test.add_failure(message, text);
                }
            }
            TextSink::StandardOutput | TextSink::StandardError => {
                let Some(suite) = suite.and_then(|idx| self.parsed.suites.get_mut(idx)) else {
                    return;
                };
                if sink == TextSink::StandardOutput {
                    suite.standard_output.push(text);
                } else {
                    suite.standard_error.push(text);
                }
            }
        }
    }

    fn innermost_named_suite(&self) -> Option<usize> {
        self.scopes.iter().rev().find_map(|scope| scope.index)
    }
}

/// `\r\n` and lone `\r` become `\n`, as in any conforming XML parser
fn normalize_line_endings(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, ParseError> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Decodes the content of one result file
pub fn parse_result_file(content: &str) -> Result<ParsedResultFile, ParseError> {
    ResultFileParser::default().parse(content)
}
