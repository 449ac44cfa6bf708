//! Package page: the classes of one package

use super::html::{self, Crumb, HtmlWriter};
use super::{class_file_name, RenderOptions, INDEX_FILE_NAME};
use crate::model::{simple_name_of, PackageResults, TestResults};

pub fn render(package: &PackageResults, options: &RenderOptions) -> String {
    let mut out = HtmlWriter::new();
    let heading = format!("Package {}", package.display_name());
    let crumbs = [
        Crumb {
            label: "all",
            href: Some(INDEX_FILE_NAME.to_string()),
        },
        Crumb {
            label: package.display_name(),
            href: None,
        },
    ];
    html::begin_page(&mut out, options, &heading, &crumbs, package);

    let has_failures = package.has_failures();
    let tabs: &[&str] = if has_failures {
        &["Failed tests", "Classes"]
    } else {
        &["Classes"]
    };
    html::begin_tabs(&mut out, tabs);

    let mut index = 0;
    if has_failures {
        html::begin_tab(&mut out, index, tabs[index]);
        out.open("ul", &[("class", "linkList")]);
        for test in package.failed_tests() {
            out.open("li", &[]);
            out.link(&class_file_name(test.class_name()), simple_name_of(test.class_name()));
            out.text(&format!(".{}", test.name()));
            out.close("li");
        }
        out.close("ul");
        html::end_tab(&mut out);
        index += 1;
    }

    html::begin_tab(&mut out, index, tabs[index]);
    out.open("table", &[]);
    html::table_header(&mut out, "Class");
    out.open("tbody", &[]);
    for class in package.classes() {
        html::summary_row(&mut out, &class_file_name(class.name()), class.simple_name(), class);
    }
    out.close("tbody");
    out.close("table");
    html::end_tab(&mut out);

    html::end_tabs(&mut out);
    html::end_page(&mut out);
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AllResults, TestCaseResult};

    #[test]
    fn test_lists_classes_by_simple_name() {
        let mut all = AllResults::new();
        all.add_test(TestCaseResult::new("org.acme.Zeta", "z", 5));
        let mut failed = TestCaseResult::new("org.acme.Alpha", "a", 5);
        failed.add_failure("boom", "");
        all.add_test(failed);

        let package = all.package("org.acme").unwrap();
        let out = render(package, &RenderOptions::default());

        assert!(out.contains("<h1>Package org.acme</h1>"));
        assert!(out.contains("<a href=\"index.html\">all</a>\n&gt;\norg.acme\n"));
        assert!(out.contains("<a href=\"org.acme.Alpha.html\">Alpha</a>\n.a\n"));
        assert!(out.contains("<td class=\"failures\">\n<a href=\"org.acme.Alpha.html\">Alpha</a>"));
        assert!(out.contains("<td class=\"success\">\n<a href=\"org.acme.Zeta.html\">Zeta</a>"));
        assert!(out.find(">Alpha</a>\n</td>").unwrap() < out.find(">Zeta</a>\n</td>").unwrap());
    }

    #[test]
    fn test_default_package_heading() {
        let mut all = AllResults::new();
        all.add_test(TestCaseResult::new("Plain", "t", 0));
        let out = render(all.package("").unwrap(), &RenderOptions::default());
        assert!(out.contains("<h1>Package default-package</h1>"));
        assert!(!out.contains("Failed tests"));
    }
}
