//! Document retrieval with a degraded fallback.
//!
//! Loading never fails. When none of the candidate locations can be read,
//! [`FALLBACK_DOCUMENT`] is returned instead so the rest of the view still
//! has a well-formed document to work on.

use std::path::{Path, PathBuf};

/// Locations tried when none are configured.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["./README.md", "README.md"];

/// Shown in place of the document when it cannot be read.
pub const FALLBACK_DOCUMENT: &str = "# Error loading documentation

Sorry, there was an error loading the documentation. The README.md file could not be found.

## Common Issues

- Ensure the README.md file exists in the project
- Check file permissions
- Make sure the path is correct
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub text: String,
    /// `None` when the text is [`FALLBACK_DOCUMENT`].
    pub source: Option<PathBuf>,
}

impl LoadedDocument {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_DOCUMENT.to_string(),
            source: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    candidates: Vec<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES.iter().map(PathBuf::from))
    }
}

impl DocumentLoader {
    pub fn new(candidates: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            base_dir: None,
        }
    }

    /// Resolves relative candidates against `base_dir` instead of the working directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir.replace(base_dir.into());
        self
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    fn resolve(&self, candidate: &Path) -> PathBuf {
        if candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        let base_dir = self.base_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });
        base_dir.join(candidate)
    }

    /// Reads the first candidate that can be read.
    pub async fn load(&self) -> LoadedDocument {
        for candidate in &self.candidates {
            let path = self.resolve(candidate);
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    tracing::info!(path = %path.display(), bytes = text.len(), "Loaded document");
                    return LoadedDocument {
                        text,
                        source: Some(path),
                    };
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), ?err, "Document candidate unavailable");
                }
            }
        }

        tracing::error!(
            candidates = ?self.candidates,
            "Failed to load documentation, using the fallback document"
        );

        LoadedDocument::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{NavigationView, EMPTY_OUTLINE_NOTICE};
    use crate::outline::extract_outline;
    use crate::render::RenderOptions;

    #[tokio::test]
    async fn test_first_readable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/guide.md"), "# Guide").unwrap();
        std::fs::write(dir.path().join("README.md"), "# Readme").unwrap();

        let loader = DocumentLoader::new(["missing.md", "docs/guide.md", "README.md"])
            .with_base_dir(dir.path());
        let document = loader.load().await;

        assert_eq!(document.text, "# Guide");
        assert_eq!(document.source, Some(dir.path().join("docs/guide.md")));
        assert!(!document.is_fallback());
    }

    #[tokio::test]
    async fn test_absolute_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NOTES.md");
        std::fs::write(&path, "## Notes").unwrap();

        let document = DocumentLoader::new([path.clone()])
            .with_base_dir("/nonexistent")
            .load()
            .await;
        assert_eq!(document.source, Some(path));
    }

    #[tokio::test]
    async fn test_total_failure_gives_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let document = DocumentLoader::default()
            .with_base_dir(dir.path())
            .load()
            .await;

        assert!(document.is_fallback());
        assert_eq!(document.text, FALLBACK_DOCUMENT);
    }

    #[tokio::test]
    async fn test_no_candidates_gives_fallback() {
        let document = DocumentLoader::new(Vec::<PathBuf>::new()).load().await;
        assert!(document.is_fallback());
    }

    #[test]
    fn test_fallback_document_is_navigable() {
        let outline = extract_outline(FALLBACK_DOCUMENT, &RenderOptions::gfm());
        let ids: Vec<_> = outline.ids().collect();
        assert_eq!(ids, ["error-loading-documentation", "common-issues"]);

        let html = NavigationView::new(&outline).to_html();
        assert!(html.contains(r##"href="#common-issues""##));
        assert!(!html.contains(EMPTY_OUTLINE_NOTICE));
    }

    #[test]
    fn test_default_candidates() {
        assert_eq!(
            DocumentLoader::default().candidates(),
            [PathBuf::from("./README.md"), PathBuf::from("README.md")]
        );
    }
}
