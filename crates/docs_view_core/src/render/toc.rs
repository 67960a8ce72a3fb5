//! Table-of-contents synthesis.
//!
//! A heading whose text reads like "Table of Contents" marks the place where
//! a nested list of links to the headings after it is inserted. The list is
//! written as markdown before the document is parsed, so its links go
//! through the same pipeline as the rest of the content.

use super::RenderOptions;
use crate::outline::{scan_document, DocumentScan, HeadingRecord, MAX_OUTLINE_LEVEL};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TOC_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:(?:table[ -]of[ -])?contents?|toc)$").unwrap());

/// Returns `true` if a heading with this text marks the table of contents.
pub fn is_toc_heading(text: &str) -> bool {
    TOC_HEADING.is_match(text)
}

/// Inserts the table of contents below the first marker heading.
///
/// The blocks between the marker and the next heading are replaced, link
/// reference definitions among them are kept. Returns `None` when the
/// document has no top-level marker or nothing to list, and when the
/// expanded document would not have the same headings as `text`.
pub(super) fn insert_toc(text: &str, options: &RenderOptions) -> Option<String> {
    let scan = scan_document(text, options);
    let marker = scan.headings.iter().position(|heading| {
        heading.top_level
            && heading.record.level() <= MAX_OUTLINE_LEVEL
            && is_toc_heading(heading.record.text())
    })?;

    let following = &scan.headings[marker + 1..];
    let list = toc_list(
        following
            .iter()
            .map(|heading| &heading.record)
            .filter(|record| record.level() <= MAX_OUTLINE_LEVEL),
        options.toc_max_depth,
    );
    let next = following.first()?;
    if list.is_empty() {
        return None;
    }

    let marker_range = &scan.headings[marker].range;
    let section_start = next_line_start(
        text,
        marker_range.end.saturating_sub(1).max(marker_range.start),
    );
    let section_end = line_start(text, next.block_start).max(section_start);
    let definitions = kept_definitions(text, &scan, section_start..section_end);

    let mut expanded = String::with_capacity(text.len() + list.len() + 2);
    expanded.push_str(&text[..section_start]);
    if !expanded.ends_with('\n') {
        expanded.push('\n');
    }
    expanded.push('\n');
    expanded.push_str(&list);
    expanded.push('\n');
    if !definitions.is_empty() {
        expanded.push_str(&definitions);
        expanded.push_str("\n\n");
    }
    expanded.push_str(&text[section_end..]);

    let rescanned = scan_document(&expanded, options);
    if !scan.records().eq(rescanned.records()) {
        tracing::warn!(
            marker = scan.headings[marker].record.text(),
            "Table of contents would change the document headings, skipped"
        );
        return None;
    }

    tracing::debug!(section_start, section_end, "Inserted table of contents");

    Some(expanded)
}

/// Non-blank lines of `section` that lie outside every block.
fn kept_definitions(text: &str, scan: &DocumentScan, section: Range<usize>) -> String {
    let mut gaps = Vec::new();
    let mut cursor = section.start;
    for block in scan
        .blocks
        .iter()
        .filter(|block| section.contains(&block.start))
    {
        if block.start > cursor {
            gaps.push(&text[cursor..block.start]);
        }
        cursor = cursor.max(block.end.min(section.end));
    }
    gaps.push(&text[cursor..section.end]);

    gaps.into_iter()
        .flat_map(str::lines)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Offset just past the line break that ends the line containing `offset`.
fn next_line_start(text: &str, offset: usize) -> usize {
    text.as_bytes()[offset..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(text.len(), |i| offset + i + 1)
}

fn line_start(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset]
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Tight nested list of links, one item per heading up to `max_depth`.
///
/// Nesting follows the level relative to the shallowest listed heading,
/// never more than one step deeper than the previous item.
fn toc_list<'a>(headings: impl Iterator<Item = &'a HeadingRecord>, max_depth: u8) -> String {
    let entries: Vec<&HeadingRecord> = headings
        .filter(|heading| heading.level() <= max_depth)
        .collect();

    let Some(base_level) = entries.iter().map(|heading| heading.level()).min() else {
        return String::new();
    };

    let mut list = String::new();
    let mut previous_depth: Option<usize> = None;

    for heading in entries {
        let wanted = usize::from(heading.level() - base_level);
        let depth = match previous_depth {
            Some(previous) => wanted.min(previous + 1),
            None => 0,
        };
        previous_depth.replace(depth);

        list.push_str(&"  ".repeat(depth));
        list.push_str("- [");
        list.push_str(&escape_link_text(heading.text()));
        list.push_str("](#");
        list.push_str(heading.id());
        list.push_str(")\n");
    }

    list
}

/// Backslash-escapes ASCII punctuation so the text renders literally.
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_punctuation() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
