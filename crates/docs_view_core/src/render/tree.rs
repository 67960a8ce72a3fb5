//! Presentation tree built from the pulldown-cmark event stream.
//!
//! The tree is produced once per render, transformed in place by the
//! tree-level stages and discarded after the HTML has been written.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

/// Block or inline form of a code node.
///
/// The presentation of code is chosen from this tag alone, never from the
/// content of the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeForm {
    /// A code span inside running text.
    Inline,
    /// A fenced or indented code block.
    Block { language: Option<String> },
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<Alignment> for CellAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => Self::None,
            Alignment::Left => Self::Left,
            Alignment::Center => Self::Center,
            Alignment::Right => Self::Right,
        }
    }
}

/// Kind of a [`PresentationNode`] together with the data that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// Heading of `level` 1-6, `id` is filled in by the anchor stage.
    Heading { level: u8, id: String },
    /// Self link wrapped around a heading's content.
    HeadingAnchor { id: String },
    Paragraph,
    /// Ordered when `start` is set.
    List { start: Option<u64> },
    ListItem,
    TaskMarker { checked: bool },
    Link { href: String, title: String },
    /// Children hold the alternative text.
    Image { src: String, title: String },
    Code(CodeForm),
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell { header: bool, align: CellAlign },
    BlockQuote,
    Emphasis,
    Strong,
    Strikethrough,
    Text(String),
    /// Raw HTML from the source, presented as literal text.
    Html(String),
    SoftBreak,
    HardBreak,
    Rule,
    /// Transparent container for constructs without a presentation of their own.
    Fragment,
}

/// Key of the presentation mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Heading(u8),
    HeadingAnchor,
    Paragraph,
    BulletList,
    OrderedList,
    ListItem,
    TaskMarker,
    Link,
    Image,
    CodeInline,
    CodeBlock,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    BlockQuote,
    Emphasis,
    Strong,
    Strikethrough,
    Text,
    Html,
    SoftBreak,
    HardBreak,
    Rule,
    Fragment,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Heading { level, .. } => NodeType::Heading(*level),
            Self::HeadingAnchor { .. } => NodeType::HeadingAnchor,
            Self::Paragraph => NodeType::Paragraph,
            Self::List { start: None } => NodeType::BulletList,
            Self::List { start: Some(_) } => NodeType::OrderedList,
            Self::ListItem => NodeType::ListItem,
            Self::TaskMarker { .. } => NodeType::TaskMarker,
            Self::Link { .. } => NodeType::Link,
            Self::Image { .. } => NodeType::Image,
            Self::Code(CodeForm::Inline) => NodeType::CodeInline,
            Self::Code(CodeForm::Block { .. }) => NodeType::CodeBlock,
            Self::Table => NodeType::Table,
            Self::TableHead => NodeType::TableHead,
            Self::TableBody => NodeType::TableBody,
            Self::TableRow => NodeType::TableRow,
            Self::TableCell { header: true, .. } => NodeType::TableHeaderCell,
            Self::TableCell { header: false, .. } => NodeType::TableCell,
            Self::BlockQuote => NodeType::BlockQuote,
            Self::Emphasis => NodeType::Emphasis,
            Self::Strong => NodeType::Strong,
            Self::Strikethrough => NodeType::Strikethrough,
            Self::Text(_) => NodeType::Text,
            Self::Html(_) => NodeType::Html,
            Self::SoftBreak => NodeType::SoftBreak,
            Self::HardBreak => NodeType::HardBreak,
            Self::Rule => NodeType::Rule,
            Self::Fragment => NodeType::Fragment,
        }
    }
}

/// One node of the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationNode {
    pub kind: NodeKind,
    pub children: Vec<PresentationNode>,
}

impl PresentationNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<PresentationNode>) -> Self {
        Self { kind, children }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Appends a child, merging adjacent text runs.
    pub fn push(&mut self, child: PresentationNode) {
        if let NodeKind::Text(text) = &child.kind {
            if let Some(PresentationNode {
                kind: NodeKind::Text(last),
                ..
            }) = self.children.last_mut()
            {
                last.push_str(text);
                return;
            }
        }
        self.children.push(child);
    }

    /// Returns `(level, id)` of every heading in document order, nested ones included.
    pub fn headings(&self) -> Vec<(u8, &str)> {
        let mut headings = Vec::new();
        self.collect_headings(&mut headings);
        headings
    }

    fn collect_headings<'a>(&'a self, headings: &mut Vec<(u8, &'a str)>) {
        if let NodeKind::Heading { level, id } = &self.kind {
            headings.push((*level, id.as_str()));
        }
        for child in &self.children {
            child.collect_headings(headings);
        }
    }
}

/// Plain text of a heading: text runs and inline code, concatenated and trimmed.
///
/// Both the outline extractor and the anchor stage derive the anchor id from
/// this text.
pub fn heading_text(node: &PresentationNode) -> String {
    fn collect(node: &PresentationNode, out: &mut String) {
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Html(_) => {}
            _ => {
                for child in &node.children {
                    collect(child, out);
                }
            }
        }
    }

    let mut text = String::new();
    collect(node, &mut text);
    text.trim().to_string()
}

/// Folds a pulldown-cmark event stream into a [`PresentationNode`] tree.
///
/// Unbalanced streams never fail: a stray end event is ignored and nodes
/// still open at the end of input are closed into their parents.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    stack: Vec<PresentationNode>,
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            stack: vec![PresentationNode::new(NodeKind::Document)],
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
        }
    }
}

impl TreeBuilder {
    pub(crate) fn build<'a>(
        mut self,
        events: impl IntoIterator<Item = Event<'a>>,
    ) -> PresentationNode {
        for event in events {
            self.handle(event);
        }
        self.finish()
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(TagEnd::TableHead) => {
                // Row synthesized in `start`.
                self.close();
                self.close();
                self.in_table_head = false;
            }
            Event::End(TagEnd::Table) => self.close_table(),
            Event::End(_) => self.close(),
            Event::Text(text) => self.leaf(NodeKind::Text(text.into_string())),
            Event::Code(code) => {
                let text = PresentationNode::new(NodeKind::Text(code.into_string()));
                self.attach(PresentationNode::with_children(
                    NodeKind::Code(CodeForm::Inline),
                    vec![text],
                ));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.leaf(NodeKind::Html(html.into_string()))
            }
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.leaf(NodeKind::HardBreak),
            Event::Rule => self.leaf(NodeKind::Rule),
            Event::TaskListMarker(checked) => self.leaf(NodeKind::TaskMarker { checked }),
            Event::FootnoteReference(label) => {
                self.leaf(NodeKind::Text(format!("[^{}]", label.as_ref())))
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level(level),
                id: String::new(),
            },
            Tag::BlockQuote => NodeKind::BlockQuote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::Code(CodeForm::Block {
                language: info
                    .split_whitespace()
                    .next()
                    .map(|language| language.to_string()),
            }),
            Tag::CodeBlock(CodeBlockKind::Indented) => {
                NodeKind::Code(CodeForm::Block { language: None })
            }
            Tag::List(start) => NodeKind::List { start },
            Tag::Item => NodeKind::ListItem,
            Tag::Table(alignments) => {
                self.alignments = alignments;
                NodeKind::Table
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.stack.push(PresentationNode::new(NodeKind::TableHead));
                NodeKind::TableRow
            }
            Tag::TableRow => {
                self.cell_index = 0;
                NodeKind::TableRow
            }
            Tag::TableCell => {
                let align = self
                    .alignments
                    .get(self.cell_index)
                    .copied()
                    .map(CellAlign::from)
                    .unwrap_or_default();
                self.cell_index += 1;
                NodeKind::TableCell {
                    header: self.in_table_head,
                    align,
                }
            }
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                href: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            },
            _ => NodeKind::Fragment,
        };
        self.stack.push(PresentationNode::new(kind));
    }

    fn leaf(&mut self, kind: NodeKind) {
        self.attach(PresentationNode::new(kind));
    }

    fn attach(&mut self, node: PresentationNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.push(node);
        }
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            tracing::trace!("Ignoring unbalanced end event");
            return;
        }
        if let Some(node) = self.stack.pop() {
            self.attach(node);
        }
    }

    /// Closes a table, moving the rows that follow the head into a body.
    fn close_table(&mut self) {
        if !matches!(
            self.stack.last().map(|node| &node.kind),
            Some(NodeKind::Table)
        ) {
            self.close();
            return;
        }

        if let Some(mut table) = self.stack.pop() {
            let (head, rows): (Vec<_>, Vec<_>) = table
                .children
                .drain(..)
                .partition(|child| child.kind == NodeKind::TableHead);
            table.children = head;
            if !rows.is_empty() {
                table
                    .children
                    .push(PresentationNode::with_children(NodeKind::TableBody, rows));
            }
            self.attach(table);
        }
        self.alignments.clear();
    }

    fn finish(mut self) -> PresentationNode {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| PresentationNode::new(NodeKind::Document))
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    level as u8
}
