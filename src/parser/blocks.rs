use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};
use serde::Serialize;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lists nested inside a list item; their items are emitted on their own.
const NESTED_LISTS: &[&str] = &["ul", "ol"];

/// One body element of a release, reduced to its inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum MarkupNode {
    Paragraph(String),
    Heading(String),
    ListItem(String),
}

/// Map a body element to its node kind by tag name.
///
/// Returns `None` for tags outside `p`/`h2`/`li`, and for elements that
/// flatten to empty text.
pub fn classify(element: ElementRef<'_>) -> Option<MarkupNode> {
    let build: fn(String) -> MarkupNode = match element.value().name() {
        "p" => MarkupNode::Paragraph,
        "h2" => MarkupNode::Heading,
        "li" => MarkupNode::ListItem,
        _ => return None,
    };

    let text = flatten_inline(element);
    if text.is_empty() {
        return None;
    }
    Some(build(text))
}

/// Inline text of an element with hyperlinks replaced by their visible text.
///
/// Surrounding text keeps its order, `<code>` becomes a backtick span and
/// whitespace runs collapse to a single space.
pub fn flatten_inline(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_inline(element, &mut out);
    WHITESPACE_RE.replace_all(&out, " ").trim().to_string()
}

fn push_inline(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                match el.name() {
                    "a" => out.extend(child_el.text()),
                    "code" => {
                        out.push('`');
                        out.extend(child_el.text());
                        out.push('`');
                    }
                    "br" => out.push(' '),
                    name if NESTED_LISTS.contains(&name) => {}
                    _ => push_inline(child_el, out),
                }
            }
            _ => {}
        }
    }
}
