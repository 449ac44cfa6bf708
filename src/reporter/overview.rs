//! Overview page: every package with its summary counts

use super::html::{self, HtmlWriter};
use super::{class_file_name, package_file_name, RenderOptions};
use crate::model::{AllResults, TestResults};

const TAB_FAILED: &str = "Failed tests";
const TAB_PACKAGES: &str = "Packages";

pub fn render(results: &AllResults, options: &RenderOptions) -> String {
    let mut out = HtmlWriter::new();
    html::begin_page(&mut out, options, "Test Summary", &[], results);

    let mut tabs = Vec::new();
    if results.has_failures() {
        tabs.push(TAB_FAILED);
    }
    tabs.push(TAB_PACKAGES);
    html::begin_tabs(&mut out, &tabs);

    for (index, tab) in tabs.iter().enumerate() {
        html::begin_tab(&mut out, index, tab);
        match *tab {
            TAB_FAILED => write_failed_tests(&mut out, results),
            _ => write_packages(&mut out, results),
        }
        html::end_tab(&mut out);
    }

    html::end_tabs(&mut out);
    html::end_page(&mut out);
    out.finish()
}

fn write_failed_tests(out: &mut HtmlWriter, results: &AllResults) {
    out.open("ul", &[("class", "linkList")]);
    for test in results.failed_tests() {
        out.open("li", &[]);
        out.link(&class_file_name(test.class_name()), test.class_name());
        out.text(&format!(".{}", test.name()));
        out.close("li");
    }
    out.close("ul");
}

fn write_packages(out: &mut HtmlWriter, results: &AllResults) {
    out.open("table", &[]);
    html::table_header(out, "Package");
    out.open("tbody", &[]);
    for package in results.packages() {
        html::summary_row(out, &package_file_name(package), package.display_name(), package);
    }
    out.close("tbody");
    out.close("table");
}
