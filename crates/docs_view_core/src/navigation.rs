//! Sidebar navigation built from the outline.
//!
//! The view renders one entry per heading and turns a selection into a
//! [`NavIntent`]. Resolving the intent to an element and scrolling to it is
//! the job of a [`ScrollCoordinator`], which keeps the view free of any
//! platform scrolling mechanics.

use crate::outline::{HeadingRecord, Outline, MAX_OUTLINE_LEVEL};
use crate::render::presentation::escape_html;
use crate::render::tree::PresentationNode;
use std::collections::HashMap;

pub const NAV_TITLE: &str = "Documentation";

pub const EMPTY_OUTLINE_NOTICE: &str = "No headings found in the documentation";

/// Visual treatment of one outline level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub class: &'static str,
    /// Left padding in rem.
    pub indent: u8,
    pub font_weight: u16,
}

/// One style per outline level, level 1 first.
pub const LEVEL_STYLES: [LevelStyle; MAX_OUTLINE_LEVEL as usize] = [
    LevelStyle {
        class: "level-1",
        indent: 0,
        font_weight: 700,
    },
    LevelStyle {
        class: "level-2",
        indent: 0,
        font_weight: 500,
    },
    LevelStyle {
        class: "level-3",
        indent: 1,
        font_weight: 400,
    },
    LevelStyle {
        class: "level-4",
        indent: 2,
        font_weight: 400,
    },
];

impl LevelStyle {
    pub fn for_level(level: u8) -> &'static Self {
        let index = level.clamp(1, MAX_OUTLINE_LEVEL) - 1;
        &LEVEL_STYLES[usize::from(index)]
    }
}

/// CSS rules for the entry classes of [`LEVEL_STYLES`].
pub fn level_stylesheet() -> String {
    LEVEL_STYLES
        .iter()
        .map(|style| {
            format!(
                ".nav-entry.{} {{ padding-left: {}rem; font-weight: {}; }}\n",
                style.class, style.indent, style.font_weight
            )
        })
        .collect()
}

/// A selection made in the navigation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    /// Bring the element with this id into view, instead of following the link.
    Activate { id: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Resolves anchor ids in the displayed document and scrolls to them.
pub trait ScrollCoordinator {
    type Target;

    /// Finds the element whose identifier equals `id`.
    fn locate(&self, id: &str) -> Option<Self::Target>;

    fn scroll_into_view(&mut self, target: Self::Target, behavior: ScrollBehavior);
}

/// Performs `intent` with `coordinator`.
///
/// Returns `false` without scrolling if the id does not resolve.
pub fn dispatch<C: ScrollCoordinator>(intent: &NavIntent, coordinator: &mut C) -> bool {
    let NavIntent::Activate { id } = intent;

    match coordinator.locate(id) {
        Some(target) => {
            coordinator.scroll_into_view(target, ScrollBehavior::Smooth);
            true
        }
        None => {
            tracing::debug!(%id, "Anchor not found, ignoring activation");
            false
        }
    }
}

/// Heading ids of a presentation tree mapped to their position in document order.
///
/// For a duplicated id the first heading wins, like a browser resolving a
/// fragment. Empty ids never resolve.
#[derive(Debug, Clone, Default)]
pub struct AnchorIndex {
    positions: HashMap<String, usize>,
}

impl AnchorIndex {
    pub fn from_tree(tree: &PresentationNode) -> Self {
        let mut positions = HashMap::new();
        for (position, (_, id)) in tree.headings().into_iter().enumerate() {
            if !id.is_empty() {
                positions.entry(id.to_string()).or_insert(position);
            }
        }
        Self { positions }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }
}

/// One entry of the navigation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry<'a> {
    pub heading: &'a HeadingRecord,
    pub style: &'static LevelStyle,
}

#[derive(Debug, Clone)]
pub struct NavigationView<'a> {
    entries: Vec<NavEntry<'a>>,
}

impl<'a> NavigationView<'a> {
    pub fn new(outline: &'a Outline) -> Self {
        let entries = outline
            .iter()
            .map(|heading| NavEntry {
                heading,
                style: LevelStyle::for_level(heading.level()),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[NavEntry<'a>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intent for selecting the entry at `index`.
    pub fn activate(&self, index: usize) -> Option<NavIntent> {
        self.entries.get(index).map(|entry| NavIntent::Activate {
            id: entry.heading.id().to_string(),
        })
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<nav class=\"docs-nav\" aria-label=\"{NAV_TITLE}\">\n\
             <h2 class=\"docs-nav-title\">{NAV_TITLE}</h2>\n"
        ));

        if self.entries.is_empty() {
            html.push_str(&format!(
                "<p class=\"docs-nav-empty\">{EMPTY_OUTLINE_NOTICE}</p>\n"
            ));
        } else {
            html.push_str("<ul class=\"docs-nav-list\">\n");
            for entry in &self.entries {
                let id = escape_html(entry.heading.id());
                html.push_str(&format!(
                    "<li><a href=\"#{id}\" data-anchor=\"{id}\" class=\"nav-entry {}\">{}</a></li>\n",
                    entry.style.class,
                    escape_html(entry.heading.text()),
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</nav>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::extract_outline;
    use crate::render::{build_tree, RenderOptions};

    /// Scrolls within a rendered tree, remembering where it went.
    struct TreeScroller {
        index: AnchorIndex,
        scrolled_to: Vec<(usize, ScrollBehavior)>,
    }

    impl ScrollCoordinator for TreeScroller {
        type Target = usize;

        fn locate(&self, id: &str) -> Option<usize> {
            self.index.position(id)
        }

        fn scroll_into_view(&mut self, target: usize, behavior: ScrollBehavior) {
            self.scrolled_to.push((target, behavior));
        }
    }

    fn scroller(markdown: &str) -> TreeScroller {
        TreeScroller {
            index: AnchorIndex::from_tree(&build_tree(markdown, &RenderOptions::gfm())),
            scrolled_to: Vec::new(),
        }
    }

    #[test]
    fn test_empty_outline_shows_notice() {
        let outline = extract_outline("", &RenderOptions::gfm());
        let view = NavigationView::new(&outline);
        assert!(view.is_empty());
        let html = view.to_html();
        assert!(html.contains(EMPTY_OUTLINE_NOTICE));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_entries_per_level() {
        let outline = extract_outline(
            "# One\n## Two\n### Three\n#### Four & More",
            &RenderOptions::gfm(),
        );
        let view = NavigationView::new(&outline);
        let classes: Vec<_> = view.entries().iter().map(|e| e.style.class).collect();
        assert_eq!(classes, ["level-1", "level-2", "level-3", "level-4"]);

        let html = view.to_html();
        assert!(html.contains(
            r##"<li><a href="#one" data-anchor="one" class="nav-entry level-1">One</a></li>"##
        ));
        assert!(html.contains(
            r##"<a href="#four-more" data-anchor="four-more" class="nav-entry level-4">Four &amp; More</a>"##
        ));
        assert!(!html.contains(EMPTY_OUTLINE_NOTICE));
    }

    #[test]
    fn test_level_styles_are_distinct() {
        let stylesheet = level_stylesheet();
        assert_eq!(stylesheet.lines().count(), 4);
        for (i, a) in LEVEL_STYLES.iter().enumerate() {
            for b in &LEVEL_STYLES[i + 1..] {
                assert_ne!((a.indent, a.font_weight), (b.indent, b.font_weight));
            }
        }
        assert_eq!(LevelStyle::for_level(9).class, "level-4");
    }

    #[test]
    fn test_activate() {
        let outline = extract_outline("# Title\n## Sub Heading", &RenderOptions::gfm());
        let view = NavigationView::new(&outline);
        assert_eq!(
            view.activate(1),
            Some(NavIntent::Activate {
                id: "sub-heading".into()
            })
        );
        assert_eq!(view.activate(2), None);
    }

    #[test]
    fn test_dispatch_scrolls_to_first_duplicate() {
        let markdown = "# Guide\n## Setup\ntext\n## Setup\n";
        let outline = extract_outline(markdown, &RenderOptions::gfm());
        let view = NavigationView::new(&outline);
        let mut scroller = scroller(markdown);

        for index in [1, 2] {
            let intent = view.activate(index).unwrap();
            assert!(dispatch(&intent, &mut scroller));
        }
        assert_eq!(
            scroller.scrolled_to,
            [(1, ScrollBehavior::Smooth), (1, ScrollBehavior::Smooth)]
        );
    }

    #[test]
    fn test_dispatch_miss_is_silent() {
        let mut scroller = scroller("# Title");
        let stale = NavIntent::Activate {
            id: "removed".into(),
        };
        assert!(!dispatch(&stale, &mut scroller));
        assert!(scroller.scrolled_to.is_empty());
    }

    #[test]
    fn test_empty_id_never_resolves() {
        let outline = extract_outline("#\n# Real", &RenderOptions::gfm());
        let view = NavigationView::new(&outline);
        let mut scroller = scroller("#\n# Real");

        assert!(!scroller.index.contains(""));
        assert!(!dispatch(&view.activate(0).unwrap(), &mut scroller));
        assert!(dispatch(&view.activate(1).unwrap(), &mut scroller));
        assert_eq!(scroller.scrolled_to, [(1, ScrollBehavior::Smooth)]);
    }
}
