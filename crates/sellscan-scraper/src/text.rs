//! Rendered-text reconstruction from parsed HTML.
//!
//! The business-information block's internal markup varies across locales
//! and over time, but its rendered text consistently degrades to
//! "label: value" lines. These helpers rebuild that rendered view: text is
//! accumulated across inline elements and broken into lines at block-element
//! boundaries, which is what a browser's visible-text rendering does.

use scraper::node::Node;
use scraper::ElementRef;

/// Elements that start a new rendered line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "section", "table", "tbody",
    "td", "th", "tr", "ul",
];

/// Elements whose text is never rendered.
const SKIP_TAGS: &[&str] = &["head", "noscript", "script", "style", "template"];

/// The element's visible text as ordered, whitespace-normalized, non-empty
/// lines.
pub(crate) fn rendered_lines(root: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    collect(root, &mut lines, &mut current);
    flush(&mut lines, &mut current);
    lines
}

/// The element's visible text as one newline-joined string, for whole-page
/// pattern scans.
pub(crate) fn rendered_text(root: ElementRef<'_>) -> String {
    rendered_lines(root).join("\n")
}

fn collect(el: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    let name = el.value().name();
    if SKIP_TAGS.contains(&name) {
        return;
    }
    let is_block = BLOCK_TAGS.contains(&name);
    if is_block {
        flush(lines, current);
    }
    for child in el.children() {
        match child.value() {
            Node::Text(text) => current.push_str(&text.text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect(child_el, lines, current);
                }
            }
            _ => {}
        }
    }
    if is_block {
        flush(lines, current);
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let normalized = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        lines.push(normalized);
    }
    current.clear();
}
