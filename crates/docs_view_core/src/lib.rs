//! Core library for the docs view.
//!
//! Renders a single markdown document into a body with anchored headings
//! and a sidebar whose entries point at exactly those anchors. The outline
//! and the rendered body are computed independently from the same text, and
//! both derive anchor ids through [`anchor::slugify`].
//!
//! # Modules
//!
//! - [`anchor`] - Heading text to anchor id
//! - [`outline`] - Line based heading extraction
//! - [`render`] - Markdown to HTML pipeline with table of contents and heading anchors
//! - [`navigation`] - Sidebar view, activation intents and scroll coordination
//! - [`loader`] - Document retrieval with a fallback document
//! - [`page`] - Embedded page template
//! - [`config`] - TOML configuration

pub mod anchor;
pub mod config;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod outline;
pub mod page;
pub mod render;

// Re-export commonly used types at crate root
pub use anchor::slugify;
pub use error::{Error, Result};
pub use loader::{DocumentLoader, LoadedDocument};
pub use navigation::{dispatch, AnchorIndex, NavIntent, NavigationView, ScrollCoordinator};
pub use outline::{extract_outline, HeadingRecord, Outline};
pub use page::render_page;
pub use render::{build_tree, to_html, RenderOptions, RenderResult};
