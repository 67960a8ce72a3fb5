//! Markdown to HTML rendering pipeline.
//!
//! The pipeline is a fixed sequence of augmentation stages:
//! - pre-parse: GitHub Flavored Markdown recognition (tables, strikethrough,
//!   task lists), then table-of-contents synthesis
//! - tree-level: anchor id assignment for every heading, then self-linking
//!   of the heading content
//!
//! The resulting [`PresentationNode`] tree is mapped to HTML through the
//! declarative table in [`presentation`].

mod anchors;
pub mod presentation;
pub mod toc;
pub mod tree;

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use presentation::{render_html, PresentationRule};
pub use tree::{heading_text, CellAlign, CodeForm, NodeKind, NodeType, PresentationNode};

/// Options for rendering markdown to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown tables
    pub enable_tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub enable_strikethrough: bool,
    /// Enable task list items ([x] and [ ])
    pub enable_tasklists: bool,
    /// Expand a "Table of Contents" heading into a list of links to the headings after it
    pub enable_toc: bool,
    /// Deepest heading level listed in the synthesized table of contents
    pub toc_max_depth: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::gfm()
    }
}

impl RenderOptions {
    /// GitHub Flavored Markdown with table-of-contents synthesis.
    pub fn gfm() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_tasklists: true,
            enable_toc: true,
            toc_max_depth: crate::outline::MAX_OUTLINE_LEVEL,
        }
    }

    /// Plain CommonMark, no extensions and no table of contents.
    pub fn commonmark() -> Self {
        Self {
            enable_tables: false,
            enable_strikethrough: false,
            enable_tasklists: false,
            enable_toc: false,
            toc_max_depth: crate::outline::MAX_OUTLINE_LEVEL,
        }
    }

    pub(crate) fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        options
    }
}

/// Stages applied to the source text before it is parsed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreParseStage {
    /// Tables, strikethrough and task lists.
    Gfm,
    /// Table-of-contents block synthesis.
    TableOfContents,
}

/// Stages applied to the parsed tree, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStage {
    /// Every heading node receives its anchor id.
    AnchorIds,
    /// Heading content is wrapped in a link to the heading itself.
    AnchorLinks,
}

pub const PRE_PARSE_STAGES: [PreParseStage; 2] =
    [PreParseStage::Gfm, PreParseStage::TableOfContents];

pub const TREE_STAGES: [TreeStage; 2] = [TreeStage::AnchorIds, TreeStage::AnchorLinks];

/// Result of rendering markdown to HTML.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// The rendered HTML content
    pub html: String,
    /// Anchor ids of every rendered heading, in document order
    pub anchors: Vec<String>,
}

/// Runs the pre-parse and tree-level stages and returns the finished tree.
pub fn build_tree(markdown_content: &str, options: &RenderOptions) -> PresentationNode {
    let mut source = Cow::Borrowed(markdown_content);
    let mut parser_options = Options::empty();

    for stage in PRE_PARSE_STAGES {
        match stage {
            PreParseStage::Gfm => parser_options = options.parser_options(),
            PreParseStage::TableOfContents => {
                if !options.enable_toc {
                    continue;
                }
                if let Some(expanded) = toc::insert_toc(&source, options) {
                    source = Cow::Owned(expanded);
                }
            }
        }
        tracing::trace!(?stage, "Applied pre-parse stage");
    }

    let mut tree = tree::TreeBuilder::default().build(Parser::new_ext(&source, parser_options));

    for stage in TREE_STAGES {
        match stage {
            TreeStage::AnchorIds => anchors::assign_anchor_ids(&mut tree),
            TreeStage::AnchorLinks => anchors::wrap_heading_anchors(&mut tree),
        }
        tracing::trace!(?stage, "Applied tree stage");
    }

    tree
}

/// Render markdown content to HTML.
///
/// Rendering never fails: malformed constructs degrade to literal text.
///
/// # Example
///
/// ```
/// use docs_view_core::render::{to_html, RenderOptions};
///
/// let result = to_html("# Hello\n\nWorld", &RenderOptions::gfm());
/// assert!(result.html.contains(r#"<h1 class="heading heading-1" id="hello">"#));
/// assert_eq!(result.anchors, ["hello"]);
/// ```
pub fn to_html(markdown_content: &str, options: &RenderOptions) -> RenderResult {
    let tree = build_tree(markdown_content, options);

    let anchors: Vec<String> = tree
        .headings()
        .into_iter()
        .map(|(_, id)| id.to_string())
        .collect();
    let html = render_html(&tree);

    tracing::debug!(
        html_bytes = html.len(),
        headings = anchors.len(),
        "Rendered markdown document"
    );

    RenderResult { html, anchors }
}
