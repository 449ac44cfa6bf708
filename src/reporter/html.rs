//! HTML markup writer and the frame shared by every report page
//!
//! Output is one tag per line with no indentation and no timestamps, so the
//! same model always renders to the same bytes.

use super::format::{format_duration, format_success_rate};
use super::RenderOptions;
use crate::model::TestResults;

/// Legacy doctype written as the first line of every page
pub const DOCTYPE: &str =
    r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;

pub const STYLESHEET: &str = "style.css";
pub const SCRIPT: &str = "report.js";

/// Escapes text for element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes the characters that would break a relative link
pub fn escape_href(file_name: &str) -> String {
    let mut out = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        match c {
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

/// Minimal streaming markup builder
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Starts a document with the doctype line already written
    pub fn new() -> Self {
        let mut out = String::with_capacity(8_192);
        out.push_str(DOCTYPE);
        out.push('\n');
        Self { out }
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_html(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    /// `<tag attrs>` on its own line
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self.out.push('\n');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self
    }

    /// Element with escaped text content
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.start_tag(tag, attrs);
        self.out.push_str(&escape_html(text));
        self.close(tag)
    }

    /// Element without an end tag (`<link>`, `<meta>`)
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.open(tag, attrs)
    }

    /// Escaped text on its own line
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.out.push_str(&escape_html(text));
        self.out.push('\n');
        self
    }

    /// Markup written verbatim; callers must pass trusted content only
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.out.push_str(markup);
        self.out.push('\n');
        self
    }

    pub fn link(&mut self, file_name: &str, text: &str) -> &mut Self {
        let href = escape_href(file_name);
        self.element("a", &[("href", href.as_str())], text)
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the breadcrumb trail; the last step is usually unlinked
pub struct Crumb<'a> {
    pub label: &'a str,
    pub href: Option<String>,
}

/// Writes everything up to and including the summary box
pub fn begin_page(
    html: &mut HtmlWriter,
    options: &RenderOptions,
    heading: &str,
    breadcrumbs: &[Crumb<'_>],
    summary: &dyn TestResults,
) {
    let title = format!("{} - {}", options.title, heading);
    html.open("html", &[]);
    html.open("head", &[]);
    html.void(
        "meta",
        &[
            ("http-equiv", "Content-Type"),
            ("content", "text/html; charset=utf-8"),
        ],
    );
    html.element("title", &[], &title);
    html.void(
        "link",
        &[("href", STYLESHEET), ("rel", "stylesheet"), ("type", "text/css")],
    );
    html.element("script", &[("src", SCRIPT), ("type", "text/javascript")], "");
    html.close("head");
    html.open("body", &[]);
    html.open("div", &[("id", "content")]);
    html.element("h1", &[], heading);

    if !breadcrumbs.is_empty() {
        html.open("div", &[("class", "breadcrumbs")]);
        for (i, crumb) in breadcrumbs.iter().enumerate() {
            if i > 0 {
                html.raw("&gt;");
            }
            match &crumb.href {
                Some(href) => html.link(href, crumb.label),
                None => html.text(crumb.label),
            };
        }
        html.close("div");
    }

    write_summary(html, summary);
}

fn write_summary(html: &mut HtmlWriter, node: &dyn TestResults) {
    html.open("div", &[("id", "summary")]);
    info_box(html, "tests", &node.test_count().to_string(), "tests");
    info_box(html, "failures", &node.failure_count().to_string(), "failures");
    info_box(html, "duration", &format_duration(node.duration_ms()), "duration");

    let status = result_class(node);
    let class = format!("infoBox {}", status);
    html.open("div", &[("class", class.as_str()), ("id", "successRate")]);
    html.element("div", &[("class", "percent")], &format_success_rate(node.success_rate()));
    html.element("p", &[], "successful");
    html.close("div");
    html.close("div");
}

fn info_box(html: &mut HtmlWriter, id: &str, value: &str, label: &str) {
    html.open("div", &[("class", "infoBox"), ("id", id)]);
    html.element("div", &[("class", "counter")], value);
    html.element("p", &[], label);
    html.close("div");
}

/// CSS class for a node's status
pub fn result_class(node: &dyn TestResults) -> &'static str {
    if node.has_failures() {
        "failures"
    } else {
        "success"
    }
}

/// Writes the tab bar; each tab body then goes between `begin_tab`/`end_tab`
pub fn begin_tabs(html: &mut HtmlWriter, titles: &[&str]) {
    html.open("div", &[("id", "tabs")]);
    html.open("ul", &[("class", "tabLinks")]);
    for (i, title) in titles.iter().enumerate() {
        html.open("li", &[]);
        let href = format!("#tab{}", i);
        html.element("a", &[("href", href.as_str())], title);
        html.close("li");
    }
    html.close("ul");
}

pub fn begin_tab(html: &mut HtmlWriter, index: usize, title: &str) {
    let id = format!("tab{}", index);
    html.open("div", &[("id", id.as_str()), ("class", "tab")]);
    html.element("h2", &[], title);
}

pub fn end_tab(html: &mut HtmlWriter) {
    html.close("div");
}

pub fn end_tabs(html: &mut HtmlWriter) {
    html.close("div");
}

/// Writes the footer and closes the document
pub fn end_page(html: &mut HtmlWriter) {
    html.open("div", &[("id", "footer")]);
    html.element("p", &[], concat!("Generated by junit-report ", env!("CARGO_PKG_VERSION")));
    html.close("div");
    html.close("div");
    html.close("body");
    html.close("html");
}

/// Header row of a summary table
pub fn table_header(html: &mut HtmlWriter, first_column: &str) {
    html.open("thead", &[]);
    html.open("tr", &[]);
    for column in [first_column, "Tests", "Failures", "Duration", "Success rate"] {
        html.element("th", &[], column);
    }
    html.close("tr");
    html.close("thead");
}

/// One linked row of a summary table
pub fn summary_row(html: &mut HtmlWriter, file_name: &str, label: &str, node: &dyn TestResults) {
    let status = result_class(node);
    html.open("tr", &[]);
    html.open("td", &[("class", status)]);
    html.link(file_name, label);
    html.close("td");
    html.element("td", &[], &node.test_count().to_string());
    html.element("td", &[], &node.failure_count().to_string());
    html.element("td", &[], &format_duration(node.duration_ms()));
    html.element("td", &[("class", status)], &format_success_rate(node.success_rate()));
    html.close("tr");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassResults;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain\ntext"), "plain\ntext");
    }

    #[test]
    fn test_escape_href() {
        assert_eq!(escape_href("a.Foo$Inner.html"), "a.Foo$Inner.html");
        assert_eq!(escape_href("a b#c%.html"), "a%20b%23c%25.html");
    }

    #[test]
    fn test_writer_starts_with_doctype() {
        let mut html = HtmlWriter::new();
        html.element("p", &[("class", "x\"y")], "1 < 2");
        let out = html.finish();
        assert!(out.starts_with(DOCTYPE));
        assert!(out.ends_with("<p class=\"x&quot;y\">1 &lt; 2</p>\n"));
    }

    #[test]
    fn test_page_frame() {
        let mut html = HtmlWriter::new();
        let class = ClassResults::new("a.Foo");
        let crumbs = [
            Crumb {
                label: "all",
                href: Some("index.html".into()),
            },
            Crumb {
                label: "Foo",
                href: None,
            },
        ];
        begin_page(&mut html, &RenderOptions::default(), "Class a.Foo", &crumbs, &class);
        end_page(&mut html);
        let out = html.finish();

        assert!(out.contains("<title>Test results - Class a.Foo</title>"));
        assert!(out.contains("<link href=\"style.css\" rel=\"stylesheet\" type=\"text/css\">"));
        assert!(out.contains("<a href=\"index.html\">all</a>\n&gt;\nFoo\n"));
        assert!(out.contains("<div class=\"percent\">-</div>"));
        assert!(out.ends_with("</html>\n"));
    }
}
