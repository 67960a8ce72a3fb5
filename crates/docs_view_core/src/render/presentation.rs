//! Declarative mapping from tree nodes to HTML elements.
//!
//! Styling lives entirely in [`PRESENTATION_RULES`]: each node type maps to
//! an element, a class and an optional wrapper element. The writer only adds
//! the attributes that carry node data (ids, link targets, alignment).

use super::tree::{heading_text, CellAlign, CodeForm, NodeKind, NodeType, PresentationNode};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashMap;

/// Characters encoded in user supplied link and image targets.
const URL_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Link schemes kept as-is, any other scheme is dropped.
const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Element placed around a node's own element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrapper {
    pub element: &'static str,
    pub class: &'static str,
}

/// Presentation of one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationRule {
    pub node: NodeType,
    /// `None` renders the children without an element of their own.
    pub element: Option<&'static str>,
    pub class: Option<&'static str>,
    pub wrapper: Option<Wrapper>,
    /// Void elements carry no children and no closing tag.
    pub void: bool,
    /// Block elements are followed by a line break.
    pub block: bool,
}

impl PresentationRule {
    const fn transparent(node: NodeType) -> Self {
        Self {
            node,
            element: None,
            class: None,
            wrapper: None,
            void: false,
            block: false,
        }
    }

    const fn inline(node: NodeType, element: &'static str) -> Self {
        Self {
            element: Some(element),
            ..Self::transparent(node)
        }
    }

    const fn block(node: NodeType, element: &'static str) -> Self {
        Self {
            block: true,
            ..Self::inline(node, element)
        }
    }

    const fn class(self, class: &'static str) -> Self {
        Self {
            class: Some(class),
            ..self
        }
    }

    const fn wrapped(self, element: &'static str, class: &'static str) -> Self {
        Self {
            wrapper: Some(Wrapper { element, class }),
            ..self
        }
    }

    const fn void(self) -> Self {
        Self { void: true, ..self }
    }
}

pub static PRESENTATION_RULES: &[PresentationRule] = &[
    PresentationRule::transparent(NodeType::Document),
    PresentationRule::block(NodeType::Heading(1), "h1").class("heading heading-1"),
    PresentationRule::block(NodeType::Heading(2), "h2").class("heading heading-2"),
    PresentationRule::block(NodeType::Heading(3), "h3").class("heading heading-3"),
    PresentationRule::block(NodeType::Heading(4), "h4").class("heading heading-4"),
    PresentationRule::block(NodeType::Heading(5), "h5").class("heading heading-5"),
    PresentationRule::block(NodeType::Heading(6), "h6").class("heading heading-6"),
    PresentationRule::inline(NodeType::HeadingAnchor, "a").class("anchor"),
    PresentationRule::block(NodeType::Paragraph, "p").class("paragraph"),
    PresentationRule::block(NodeType::BulletList, "ul").class("list list-bullet"),
    PresentationRule::block(NodeType::OrderedList, "ol").class("list list-ordered"),
    PresentationRule::block(NodeType::ListItem, "li").class("list-item"),
    PresentationRule::inline(NodeType::TaskMarker, "input")
        .class("task-marker")
        .void(),
    PresentationRule::inline(NodeType::Link, "a").class("link"),
    PresentationRule::inline(NodeType::Image, "img")
        .class("image")
        .void(),
    PresentationRule::inline(NodeType::CodeInline, "code").class("code-inline"),
    PresentationRule::block(NodeType::CodeBlock, "code").wrapped("pre", "code-block"),
    PresentationRule::block(NodeType::Table, "table")
        .class("table")
        .wrapped("div", "table-wrapper"),
    PresentationRule::block(NodeType::TableHead, "thead"),
    PresentationRule::block(NodeType::TableBody, "tbody"),
    PresentationRule::block(NodeType::TableRow, "tr"),
    PresentationRule::inline(NodeType::TableHeaderCell, "th").class("table-header-cell"),
    PresentationRule::inline(NodeType::TableCell, "td").class("table-cell"),
    PresentationRule::block(NodeType::BlockQuote, "blockquote").class("blockquote"),
    PresentationRule::inline(NodeType::Emphasis, "em"),
    PresentationRule::inline(NodeType::Strong, "strong"),
    PresentationRule::inline(NodeType::Strikethrough, "del"),
    PresentationRule::transparent(NodeType::Text),
    PresentationRule::transparent(NodeType::Html),
    PresentationRule::transparent(NodeType::SoftBreak),
    PresentationRule::inline(NodeType::HardBreak, "br").void(),
    PresentationRule::block(NodeType::Rule, "hr").class("rule").void(),
    PresentationRule::transparent(NodeType::Fragment),
];

static RULES_BY_TYPE: Lazy<HashMap<NodeType, &'static PresentationRule>> = Lazy::new(|| {
    PRESENTATION_RULES
        .iter()
        .map(|rule| (rule.node, rule))
        .collect()
});

static FALLBACK_RULE: PresentationRule = PresentationRule::transparent(NodeType::Fragment);

/// Returns the presentation rule of `node_type`.
pub fn rule_for(node_type: NodeType) -> &'static PresentationRule {
    RULES_BY_TYPE
        .get(&node_type)
        .copied()
        .unwrap_or(&FALLBACK_RULE)
}

/// Writes the tree as an HTML fragment.
pub fn render_html(root: &PresentationNode) -> String {
    let mut html = String::new();
    write_node(root, &mut html);
    html
}

fn write_node(node: &PresentationNode, html: &mut String) {
    match &node.kind {
        // Raw HTML is never passed through.
        NodeKind::Text(text) | NodeKind::Html(text) => {
            html.push_str(&escape_html(text));
            return;
        }
        NodeKind::SoftBreak => {
            html.push('\n');
            return;
        }
        _ => {}
    }

    let rule = rule_for(node.node_type());

    if let Some(wrapper) = rule.wrapper {
        write_start_tag(html, wrapper.element, Some(wrapper.class), &[]);
        html.push('>');
    }

    if let Some(element) = rule.element {
        let class = match (rule.class, extra_class(&node.kind)) {
            (Some(class), Some(extra)) => Some(format!("{class} {extra}")),
            (Some(class), None) => Some(class.to_string()),
            (None, extra) => extra,
        };
        write_start_tag(html, element, class.as_deref(), &attributes(node));
        html.push_str(if rule.void { " />" } else { ">" });
    }

    if !rule.void {
        for child in &node.children {
            write_node(child, html);
        }
        if let Some(element) = rule.element {
            html.push_str("</");
            html.push_str(element);
            html.push('>');
        }
    }

    if let Some(wrapper) = rule.wrapper {
        html.push_str("</");
        html.push_str(wrapper.element);
        html.push('>');
    }

    if rule.block {
        html.push('\n');
    }
}

fn write_start_tag(
    html: &mut String,
    element: &str,
    class: Option<&str>,
    attributes: &[(&str, String)],
) {
    html.push('<');
    html.push_str(element);
    if let Some(class) = class {
        html.push_str(" class=\"");
        html.push_str(&escape_html(class));
        html.push('"');
    }
    for (name, value) in attributes {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&escape_html(value));
        html.push('"');
    }
}

/// Class derived from node data, appended to the rule's class.
fn extra_class(kind: &NodeKind) -> Option<String> {
    match kind {
        NodeKind::Code(CodeForm::Block {
            language: Some(language),
        }) => Some(format!("language-{language}")),
        _ => None,
    }
}

fn attributes(node: &PresentationNode) -> Vec<(&'static str, String)> {
    let mut attributes = Vec::new();

    match &node.kind {
        NodeKind::Heading { id, .. } if !id.is_empty() => {
            attributes.push(("id", id.clone()));
        }
        NodeKind::HeadingAnchor { id } => {
            attributes.push(("href", format!("#{id}")));
            attributes.push(("aria-hidden", "true".to_string()));
            attributes.push(("tabindex", "-1".to_string()));
        }
        NodeKind::Link { href, title } => {
            attributes.push(("href", encode_url(href)));
            if !title.is_empty() {
                attributes.push(("title", title.clone()));
            }
        }
        NodeKind::Image { src, title } => {
            let alt = heading_text(node);
            attributes.push(("src", encode_url(src)));
            attributes.push((
                "alt",
                if alt.is_empty() { "image".to_string() } else { alt },
            ));
            if !title.is_empty() {
                attributes.push(("title", title.clone()));
            }
            attributes.push(("loading", "lazy".to_string()));
        }
        NodeKind::List {
            start: Some(start),
        } if *start != 1 => {
            attributes.push(("start", start.to_string()));
        }
        NodeKind::TaskMarker { checked } => {
            attributes.push(("type", "checkbox".to_string()));
            attributes.push(("disabled", String::new()));
            if *checked {
                attributes.push(("checked", String::new()));
            }
        }
        NodeKind::TableCell { align, .. } => {
            let align = match align {
                CellAlign::None => None,
                CellAlign::Left => Some("left"),
                CellAlign::Center => Some("center"),
                CellAlign::Right => Some("right"),
            };
            if let Some(align) = align {
                attributes.push(("style", format!("text-align: {align}")));
            }
        }
        _ => {}
    }

    attributes
}

fn encode_url(url: &str) -> String {
    utf8_percent_encode(safe_url(url), URL_ENCODE_SET).to_string()
}

/// Drops URLs with a scheme outside [`SAFE_SCHEMES`], relative URLs are kept.
fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let path_start = url.find(|c| matches!(c, '/' | '?' | '#'));
    if path_start.is_some_and(|start| start < colon) {
        return url;
    }
    let scheme = &url[..colon];
    if SAFE_SCHEMES
        .iter()
        .any(|safe| scheme.eq_ignore_ascii_case(safe))
    {
        url
    } else {
        ""
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{build_tree, RenderOptions};
    use std::collections::HashSet;

    fn render(markdown: &str) -> String {
        render_html(&build_tree(markdown, &RenderOptions::gfm()))
    }

    #[test]
    fn test_rule_table_has_one_rule_per_type() {
        let mut seen = HashSet::new();
        for rule in PRESENTATION_RULES {
            assert!(seen.insert(rule.node), "duplicate rule for {:?}", rule.node);
        }
        assert_eq!(RULES_BY_TYPE.len(), PRESENTATION_RULES.len());
        for level in 1..=6 {
            assert_eq!(rule_for(NodeType::Heading(level)).element.map(|e| e.len()), Some(2));
        }
    }

    #[test]
    fn test_code_presentation_depends_on_form() {
        let html = render("Run `cargo build` now.\n\n```rust\nfn main() {}\n```\n");
        assert!(html.contains(r#"<code class="code-inline">cargo build</code>"#));
        assert!(html.contains(
            "<pre class=\"code-block\"><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        ));

        let indented = render("    plain\n");
        assert_eq!(indented, "<pre class=\"code-block\"><code>plain\n</code></pre>\n");
    }

    #[test]
    fn test_table_is_wrapped() {
        let html = render("| a | b |\n|:-:|---|\n| 1 | 2 |\n");
        assert!(html.starts_with("<div class=\"table-wrapper\"><table class=\"table\">"));
        assert!(html.contains(
            r#"<th class="table-header-cell" style="text-align: center">a</th>"#
        ));
        assert!(html.contains(r#"<td class="table-cell">2</td>"#));
        assert!(html.ends_with("</tbody>\n</table></div>\n"));
    }

    #[test]
    fn test_image_attributes() {
        let html = render("![](pic.png) ![Logo](<my logo.png> \"The logo\")");
        assert!(html.contains(r#"<img class="image" src="pic.png" alt="image" loading="lazy" />"#));
        assert!(html.contains(
            r#"<img class="image" src="my%20logo.png" alt="Logo" title="The logo" loading="lazy" />"#
        ));
    }

    #[test]
    fn test_links() {
        let html = render("[docs](https://example.com/a?b=1&c=2 \"Docs\") [local](#setup)");
        assert!(html.contains(
            r#"<a class="link" href="https://example.com/a?b=1&amp;c=2" title="Docs">docs</a>"#
        ));
        assert!(html.contains(r##"<a class="link" href="#setup">local</a>"##));
    }

    #[test]
    fn test_unsafe_scheme_is_dropped() {
        let html = render("[click](javascript:alert(1))");
        assert!(html.contains(r#"<a class="link" href="">click</a>"#));
        assert_eq!(safe_url("./page:1"), "./page:1");
        assert_eq!(safe_url("MAILTO:me@example.com"), "MAILTO:me@example.com");
        assert_eq!(safe_url("data:text/html,x"), "");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>\n\nText with <b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Text with &lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_lists() {
        let html = render("3. three\n4. four\n\n- [x] done\n- [ ] todo\n");
        assert!(html.contains(r#"<ol class="list list-ordered" start="3">"#));
        assert!(html.contains(
            r#"<li class="list-item"><input class="task-marker" type="checkbox" disabled="" checked="" />"#
        ));
        assert!(html.contains(r#"<input class="task-marker" type="checkbox" disabled="" />"#));

        let from_one = render("1. one\n");
        assert!(from_one.contains("<ol class=\"list list-ordered\"><li"));
    }

    #[test]
    fn test_inline_and_void_elements() {
        let html = render("> *a* **b** ~~c~~  \nnext\n\n---\n");
        assert!(html.starts_with("<blockquote class=\"blockquote\">"));
        assert!(html.contains("<em>a</em> <strong>b</strong> <del>c</del><br />"));
        assert!(html.contains("<hr class=\"rule\" />\n"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
