//! Class page: test cases, failure details and captured output

use super::format::format_duration;
use super::html::{self, Crumb, HtmlWriter};
use super::{page_file_name, RenderOptions, INDEX_FILE_NAME};
use crate::model::{ClassResults, TestResults, DEFAULT_PACKAGE_NAME};

enum Tab {
    Failed,
    Tests,
    StandardOutput,
    StandardError,
}

impl Tab {
    fn title(&self) -> &'static str {
        match self {
            Tab::Failed => "Failed tests",
            Tab::Tests => "Tests",
            Tab::StandardOutput => "Standard output",
            Tab::StandardError => "Standard error",
        }
    }
}

pub fn render(class: &ClassResults, options: &RenderOptions) -> String {
    let mut out = HtmlWriter::new();
    let package = match class.package_name() {
        "" => DEFAULT_PACKAGE_NAME,
        name => name,
    };
    let heading = format!("Class {}", class.name());
    let crumbs = [
        Crumb {
            label: "all",
            href: Some(INDEX_FILE_NAME.to_string()),
        },
        Crumb {
            label: package,
            href: Some(page_file_name(package)),
        },
        Crumb {
            label: class.simple_name(),
            href: None,
        },
    ];
    html::begin_page(&mut out, options, &heading, &crumbs, class);

    let mut tabs = Vec::new();
    if class.has_failures() {
        tabs.push(Tab::Failed);
    }
    tabs.push(Tab::Tests);
    if has_text(class.standard_output()) {
        tabs.push(Tab::StandardOutput);
    }
    if has_text(class.standard_error()) {
        tabs.push(Tab::StandardError);
    }

    let titles: Vec<&str> = tabs.iter().map(Tab::title).collect();
    html::begin_tabs(&mut out, &titles);
    for (index, tab) in tabs.iter().enumerate() {
        html::begin_tab(&mut out, index, tab.title());
        match tab {
            Tab::Failed => write_failures(&mut out, class),
            Tab::Tests => write_tests(&mut out, class),
            Tab::StandardOutput => write_output(&mut out, class.standard_output()),
            Tab::StandardError => write_output(&mut out, class.standard_error()),
        }
        html::end_tab(&mut out);
    }
    html::end_tabs(&mut out);

    html::end_page(&mut out);
    out.finish()
}

fn has_text(blocks: &[String]) -> bool {
    blocks.iter().any(|block| !block.is_empty())
}

fn write_failures(out: &mut HtmlWriter, class: &ClassResults) {
    for test in class.failed_tests() {
        out.open("div", &[("class", "test")]);
        out.element("h3", &[("class", "failures")], test.name());
        for failure in test.failures() {
            if !failure.message.is_empty() {
                out.element("p", &[("class", "message")], &failure.message);
            }
            out.element("pre", &[], &failure.detail);
        }
        out.close("div");
    }
}

fn write_tests(out: &mut HtmlWriter, class: &ClassResults) {
    out.open("table", &[]);
    out.open("thead", &[]);
    out.open("tr", &[]);
    for column in ["Test", "Duration", "Result"] {
        out.element("th", &[], column);
    }
    out.close("tr");
    out.close("thead");
    out.open("tbody", &[]);
    for test in class.tests() {
        let status = html::result_class(test);
        out.open("tr", &[]);
        out.element("td", &[("class", status)], test.name());
        out.element("td", &[], &format_duration(test.duration_ms()));
        let result = if test.is_successful() { "passed" } else { "failed" };
        out.element("td", &[("class", status)], result);
        out.close("tr");
    }
    out.close("tbody");
    out.close("table");
}

fn write_output(out: &mut HtmlWriter, blocks: &[String]) {
    out.open("span", &[("class", "code")]);
    for block in blocks {
        out.element("pre", &[], block);
    }
    out.close("span");
}
