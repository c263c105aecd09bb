//! Markup cleaning - boilerplate-stripped plain text extraction.
//!
//! The structural pass walks the parsed document and skips regions
//! that never carry body text. When that pass yields nothing (binary
//! junk, tag soup with no text nodes), a regex fallback strips tags
//! wholesale so `clean` always produces a result.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{Html, Node};

/// Lines shorter than this are treated as markup noise.
const MIN_LINE_LEN: usize = 10;

/// Elements whose entire subtree is skipped.
const SKIP_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside",
];

/// Class-name markers for navigation and infobox regions.
const SKIP_CLASS_MARKERS: &[&str] = &["infobox", "sidebar", "navigation", "navbox", "menu"];

/// Elements that terminate the current text line. Inline elements
/// (`b`, `a`, `span`, ...) are everything not listed here, and their
/// text joins the surrounding sentence.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "body",
    "br",
    "caption",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "html",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Convert raw markup into normalized plain text. Never fails.
pub fn clean(raw_markup: &str) -> String {
    match structural_text(raw_markup) {
        Some(text) if !text.is_empty() => text,
        _ => fallback_strip(raw_markup),
    }
}

/// Structural pass: parse, skip non-content subtrees, assemble text
/// into block-level lines, keep lines of at least [`MIN_LINE_LEN`]
/// characters.
fn structural_text(raw_markup: &str) -> Option<String> {
    let document = Html::parse_document(raw_markup);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    collect_lines(document.tree.root(), &mut lines, &mut current);
    flush_line(&mut lines, &mut current);

    let text = lines
        .iter()
        .filter(|line| line.chars().count() >= MIN_LINE_LEN)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Walk the tree accumulating text into `current`, skipping
/// non-content subtrees. Block-level boundaries flush the line, so
/// inline markup never splits a sentence and the length filter sees
/// whole lines.
fn collect_lines(node: NodeRef<'_, Node>, lines: &mut Vec<String>, current: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Element(element) => {
                if SKIP_ELEMENTS.contains(&element.name()) {
                    flush_line(lines, current);
                    continue;
                }
                if let Some(class) = element.attr("class") {
                    let class = class.to_lowercase();
                    if SKIP_CLASS_MARKERS.iter().any(|m| class.contains(m)) {
                        flush_line(lines, current);
                        continue;
                    }
                }
                let block = BLOCK_ELEMENTS.contains(&element.name());
                if block {
                    flush_line(lines, current);
                }
                collect_lines(child, lines, current);
                if block {
                    flush_line(lines, current);
                }
            }
            Node::Text(text) => current.push_str(text),
            _ => {}
        }
    }
}

/// Normalize the accumulated line and emit it when non-empty.
fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = normalize_whitespace(current);
    current.clear();
    if !line.is_empty() {
        lines.push(line);
    }
}

/// Fallback pass: strip every tag by pattern, collapse whitespace,
/// no line-length filtering.
fn fallback_strip(raw_markup: &str) -> String {
    let script_pattern = Regex::new(r"(?si)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?si)<style[^>]*>.*?</style>").unwrap();
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();

    let text = script_pattern.replace_all(raw_markup, " ");
    let text = style_pattern.replace_all(&text, " ");
    let text = tag_pattern.replace_all(&text, " ");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    normalize_whitespace(&text)
}

/// Collapse runs of whitespace into single spaces and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
