//! Tree-level stages for heading anchors.

use super::tree::{heading_text, NodeKind, PresentationNode};
use crate::anchor::slugify;

/// Sets the id of every heading, at any depth, from its text.
pub(super) fn assign_anchor_ids(node: &mut PresentationNode) {
    if matches!(node.kind, NodeKind::Heading { .. }) {
        let anchor = slugify(&heading_text(node));
        if let NodeKind::Heading { id, .. } = &mut node.kind {
            *id = anchor;
        }
    }

    for child in &mut node.children {
        assign_anchor_ids(child);
    }
}

/// Wraps the content of every heading in a link to the heading itself.
///
/// Headings with an empty id are left alone, there is nothing to link to.
pub(super) fn wrap_heading_anchors(node: &mut PresentationNode) {
    if let NodeKind::Heading { id, .. } = &node.kind {
        if !id.is_empty() && !node.children.is_empty() {
            let anchor = NodeKind::HeadingAnchor { id: id.clone() };
            let content = std::mem::take(&mut node.children);
            node.children
                .push(PresentationNode::with_children(anchor, content));
        }
        return;
    }

    for child in &mut node.children {
        wrap_heading_anchors(child);
    }
}
