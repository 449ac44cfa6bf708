//! Reporter module: HTML pages for each node of the result tree, plus the console summary

pub mod class;
pub mod console;
pub mod format;
pub mod html;
pub mod overview;
pub mod package;

pub use console::ConsoleReporter;
pub use html::{HtmlWriter, DOCTYPE};

use crate::model::{AllResults, ClassResults, PackageResults};

pub const INDEX_FILE_NAME: &str = "index.html";

/// Settings shared by every rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix of every page title
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Test results".to_string(),
        }
    }
}

/// File name of a package page
pub fn package_file_name(package: &PackageResults) -> String {
    page_file_name(package.display_name())
}

/// File name of a class page, from the fully-qualified class name
pub fn class_file_name(class_name: &str) -> String {
    page_file_name(class_name)
}

/// Flat `<name>.html` file name. Path separators, `%`, characters that are
/// reserved in Windows file names, and control characters are percent-encoded,
/// so every page lands directly inside the report directory.
pub fn page_file_name(name: &str) -> String {
    let mut file_name = String::with_capacity(name.len() + 5);
    for c in name.chars() {
        match c {
            '/' | '\\' | '%' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => {
                file_name.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_ascii_control() => file_name.push_str(&format!("%{:02X}", c as u32)),
            c => file_name.push(c),
        }
    }
    file_name.push_str(".html");
    file_name
}

/// One page of the report, tagged by the kind of node it shows
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Overview(&'a AllResults),
    Package(&'a PackageResults),
    Class(&'a ClassResults),
}

impl Page<'_> {
    /// Output file name, relative to the report directory
    pub fn file_name(&self) -> String {
        match self {
            Page::Overview(_) => INDEX_FILE_NAME.to_string(),
            Page::Package(package) => package_file_name(package),
            Page::Class(class) => class_file_name(class.name()),
        }
    }

    /// Renders the complete HTML document for this page
    pub fn render(&self, options: &RenderOptions) -> String {
        match self {
            Page::Overview(results) => overview::render(results, options),
            Page::Package(package) => package::render(package, options),
            Page::Class(class) => class::render(class, options),
        }
    }
}
