//! Outline extraction for markdown documents.
//!
//! The outline is the ordered list of level 1-4 headings of a document. It
//! drives the navigation sidebar and is computed independently of the
//! rendering pipeline, from the same parser events the pipeline consumes,
//! so a heading is listed exactly when the body renders it.

use crate::anchor::slugify;
use crate::render::tree::{heading_text, TreeBuilder};
use crate::render::RenderOptions;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Serialize;
use std::ops::Range;

/// Deepest heading level that is part of the outline.
pub const MAX_OUTLINE_LEVEL: u8 = 4;

/// A heading discovered in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRecord {
    level: u8,
    text: String,
    id: String,
}

impl HeadingRecord {
    /// Creates a record, deriving the anchor id from `text`.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let id = slugify(&text);
        Self { level, text, id }
    }

    /// Heading level, 1 to 4.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Trimmed display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Anchor id, possibly shared with other headings of the same text.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered headings of one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    headings: Vec<HeadingRecord>,
}

impl Outline {
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HeadingRecord> {
        self.headings.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeadingRecord> {
        self.headings.iter()
    }

    pub fn as_slice(&self) -> &[HeadingRecord] {
        &self.headings
    }

    /// Anchor ids in document order, duplicates included.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.headings.iter().map(HeadingRecord::id)
    }
}

impl From<Vec<HeadingRecord>> for Outline {
    fn from(headings: Vec<HeadingRecord>) -> Self {
        Self { headings }
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a HeadingRecord;
    type IntoIter = std::slice::Iter<'a, HeadingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.headings.iter()
    }
}

/// Extracts the outline of `text`.
///
/// # Example
///
/// ```
/// use docs_view_core::outline::extract_outline;
/// use docs_view_core::RenderOptions;
///
/// let outline = extract_outline("# Title\n## Sub Heading\ntext", &RenderOptions::gfm());
/// let ids: Vec<_> = outline.ids().collect();
/// assert_eq!(ids, ["title", "sub-heading"]);
/// ```
pub fn extract_outline(text: &str, options: &RenderOptions) -> Outline {
    let headings: Vec<HeadingRecord> = scan_document(text, options)
        .headings
        .into_iter()
        .map(|heading| heading.record)
        .filter(|record| record.level <= MAX_OUTLINE_LEVEL)
        .collect();

    tracing::debug!(headings = headings.len(), "Extracted outline");

    headings.into()
}

/// A heading of any level together with its position in the source.
#[derive(Debug, Clone)]
pub(crate) struct LocatedHeading {
    pub(crate) record: HeadingRecord,
    /// Byte range of the heading, setext underline included.
    pub(crate) range: Range<usize>,
    /// Start of the top-level block the heading belongs to.
    pub(crate) block_start: usize,
    /// Not nested in a list item or block quote.
    pub(crate) top_level: bool,
}

/// Headings and top-level block ranges of one document.
///
/// Text outside every block carries no events, which leaves blank lines and
/// link reference definitions.
#[derive(Debug, Default)]
pub(crate) struct DocumentScan {
    pub(crate) headings: Vec<LocatedHeading>,
    pub(crate) blocks: Vec<Range<usize>>,
}

impl DocumentScan {
    /// Every heading, levels 5 and 6 included.
    pub(crate) fn records(&self) -> impl Iterator<Item = &HeadingRecord> + '_ {
        self.headings.iter().map(|heading| &heading.record)
    }
}

#[derive(Debug)]
struct PendingHeading<'a> {
    level: u8,
    range: Range<usize>,
    block_start: usize,
    top_level: bool,
    events: Vec<Event<'a>>,
}

/// Walks the parser events of `text` once, collecting every heading and
/// the byte range of every top-level block.
///
/// Heading text is reduced by [`heading_text`] over the heading's own
/// inline events, the same collector the anchor stage applies to the
/// rendered tree.
pub(crate) fn scan_document(text: &str, options: &RenderOptions) -> DocumentScan {
    let mut scan = DocumentScan::default();
    let mut depth = 0usize;
    let mut block_start = 0;
    let mut pending: Option<PendingHeading<'_>> = None;

    for (event, range) in Parser::new_ext(text, options.parser_options()).into_offset_iter() {
        let closes = match &event {
            Event::Start(_) => {
                if depth == 0 {
                    block_start = range.start;
                }
                depth += 1;
                false
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                true
            }
            _ => false,
        };

        if depth == 0 && !matches!(event, Event::Start(_)) {
            // Leaf events such as thematic breaks are blocks of their own.
            let start = if closes { block_start } else { range.start };
            scan.blocks.push(start..range.end);
        }

        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                pending.replace(PendingHeading {
                    level: level as u8,
                    range,
                    block_start,
                    top_level: depth == 1,
                    events: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = pending.take() {
                    let display = heading_text(&TreeBuilder::default().build(heading.events));
                    scan.headings.push(LocatedHeading {
                        record: HeadingRecord::new(heading.level, display),
                        range: heading.range,
                        block_start: heading.block_start,
                        top_level: heading.top_level,
                    });
                }
            }
            event => {
                if let Some(heading) = pending.as_mut() {
                    heading.events.push(event);
                }
            }
        }
    }

    tracing::trace!(
        headings = scan.headings.len(),
        blocks = scan.blocks.len(),
        "Scanned document"
    );

    scan
}
