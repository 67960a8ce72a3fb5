//! Standalone HTML page composed of the navigation sidebar and the rendered document.

use crate::navigation::{level_stylesheet, AnchorIndex, NavigationView};
use crate::outline::extract_outline;
use crate::render::presentation::{escape_html, render_html};
use crate::render::{build_tree, RenderOptions};

/// HTML template with placeholders for the title, sidebar, content, CSS and JS.
pub const HTML_TEMPLATE: &str = include_str!("../assets/index.html");

pub const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Browser-side scroll coordinator for the sidebar entries.
pub const NAV_JS: &str = include_str!("../assets/nav.js");

#[derive(Debug, Clone, Copy)]
pub struct PageParts<'a> {
    /// Plain text, escaped when inserted.
    pub title: &'a str,
    /// Navigation HTML.
    pub sidebar: &'a str,
    /// Document body HTML.
    pub content: &'a str,
}

/// Build the complete HTML page with inlined CSS and JS.
///
/// Replaces the placeholders of [`HTML_TEMPLATE`], in this order:
/// - `/*__STYLES_CSS__*/` -> styles.css plus the navigation level styles
/// - `/*__NAV_JS__*/` -> nav.js
/// - `<!--__SIDEBAR__-->` and `<!--__CONTENT__-->` -> the given fragments
/// - `<!--__TITLE__-->` -> escaped title
///
/// Document-derived text is substituted after the assets so placeholder
/// text inside it stays literal.
pub fn build_page(parts: &PageParts<'_>) -> String {
    let styles = format!("{STYLES_CSS}\n{}", level_stylesheet());

    HTML_TEMPLATE
        .replace("/*__STYLES_CSS__*/", &styles)
        .replace("/*__NAV_JS__*/", NAV_JS)
        .replace("<!--__SIDEBAR__-->", parts.sidebar)
        .replace("<!--__CONTENT__-->", parts.content)
        .replace("<!--__TITLE__-->", &escape_html(parts.title))
}

/// Renders `markdown_content` into a complete page with a navigation sidebar.
pub fn render_page(markdown_content: &str, options: &RenderOptions, title: &str) -> String {
    let outline = extract_outline(markdown_content, options);
    let tree = build_tree(markdown_content, options);

    let anchors = AnchorIndex::from_tree(&tree);
    for heading in &outline {
        if !heading.id().is_empty() && !anchors.contains(heading.id()) {
            tracing::warn!(id = heading.id(), "Navigation entry has no matching anchor");
        }
    }

    let sidebar = NavigationView::new(&outline).to_html();
    let content = render_html(&tree);

    build_page(&PageParts {
        title,
        sidebar: &sidebar,
        content: &content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::FALLBACK_DOCUMENT;
    use crate::navigation::EMPTY_OUTLINE_NOTICE;

    #[test]
    fn test_assets_exist() {
        assert!(HTML_TEMPLATE.contains("<!DOCTYPE html>"));
        for placeholder in [
            "<!--__TITLE__-->",
            "<!--__SIDEBAR__-->",
            "<!--__CONTENT__-->",
            "/*__STYLES_CSS__*/",
            "/*__NAV_JS__*/",
        ] {
            assert!(HTML_TEMPLATE.contains(placeholder), "missing {placeholder}");
        }
        assert!(!STYLES_CSS.is_empty());
    }

    #[test]
    fn test_nav_js_scrolls_smoothly() {
        assert!(NAV_JS.contains("preventDefault"));
        assert!(NAV_JS.contains("getElementById"));
        assert!(NAV_JS.contains("behavior: 'smooth'"));
    }

    #[test]
    fn test_build_page_fills_placeholders() {
        let html = build_page(&PageParts {
            title: "Docs & more",
            sidebar: "<nav>side</nav>",
            content: "<p>body</p>",
        });
        assert!(html.contains("<title>Docs &amp; more</title>"));
        assert!(html.contains("<nav>side</nav>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(".nav-entry.level-3"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_placeholder_text_in_title_stays_literal() {
        let html = build_page(&PageParts {
            title: "/*__NAV_JS__*/ and /*__STYLES_CSS__*/",
            sidebar: "",
            content: "<pre><code>/*__NAV_JS__*/</code></pre>",
        });
        assert!(html.contains("<title>/*__NAV_JS__*/ and /*__STYLES_CSS__*/</title>"));
        assert!(html.contains("<pre><code>/*__NAV_JS__*/</code></pre>"));
        assert_eq!(
            html.matches("preventDefault").count(),
            NAV_JS.matches("preventDefault").count()
        );
    }

    #[test]
    fn test_render_page() {
        let html = render_page(
            "# Title\n## Sub Heading\ntext",
            &RenderOptions::gfm(),
            "Documentation",
        );
        assert!(html.contains(r##"<a href="#sub-heading" data-anchor="sub-heading""##));
        assert!(html.contains(r#"id="sub-heading""#));
    }

    #[test]
    fn test_render_empty_document() {
        let html = render_page("", &RenderOptions::gfm(), "Documentation");
        assert!(html.contains(EMPTY_OUTLINE_NOTICE));
    }

    #[test]
    fn test_render_fallback_document() {
        let html = render_page(FALLBACK_DOCUMENT, &RenderOptions::gfm(), "Documentation");
        assert!(html.contains(r#"id="error-loading-documentation""#));
        assert!(html.contains(r##"data-anchor="common-issues""##));
    }
}
