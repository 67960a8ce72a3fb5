//! Anchor identifiers for headings.
//!
//! [`slugify`] is the only place where heading text turns into a fragment id.
//! The outline extractor and the rendering pipeline both call it, so the
//! sidebar targets and the `id` attributes in the rendered body can never
//! drift apart.

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything that is not a word character, whitespace or a hyphen.
static NON_ANCHOR_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Converts heading text to a URL-fragment-safe anchor id.
///
/// The algorithm:
/// 1. Convert to lowercase
/// 2. Remove every character that is not a word character, whitespace or `-`
/// 3. Replace each run of whitespace with a single hyphen
///
/// Word characters are Unicode-aware, letters of any script survive while
/// symbols and emoji are dropped.
///
/// # Example
///
/// ```
/// use docs_view_core::anchor::slugify;
///
/// assert_eq!(slugify("Sub Heading"), "sub-heading");
/// assert_eq!(slugify("API & Design!"), "api-design");
/// ```
pub fn slugify(text: &str) -> String {
    let lowercased = text.to_lowercase();
    let stripped = NON_ANCHOR_CHARS.replace_all(&lowercased, "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Title"), "title");
        assert_eq!(slugify("Sub Heading"), "sub-heading");
        assert_eq!(slugify("Test-123"), "test-123");
        assert_eq!(slugify("foo_bar"), "foo_bar");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
    }

    #[test]
    fn test_punctuation_adjacent_to_whitespace() {
        // `&` leaves two spaces behind, which collapse into one hyphen.
        assert_eq!(slugify("API & Design!"), "api-design");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("API Reference (v2)"), "api-reference-v2");
    }

    #[test]
    fn test_existing_hyphens_are_kept() {
        assert_eq!(slugify("a -- b"), "a----b");
        assert_eq!(slugify("-leading"), "-leading");
    }

    #[test]
    fn test_empty_text_gives_empty_id() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(slugify("Über uns"), "über-uns");
        assert_eq!(slugify("日本語 ドキュメント"), "日本語-ドキュメント");
        assert_eq!(slugify("🚀 Launch"), "-launch");
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "Title",
            "Sub Heading",
            "API & Design!",
            "Über uns",
            "run-`subcoin import-blocks`",
            "🚀 Launch",
        ] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once, "slugify is not idempotent for {text:?}");
        }
    }
}
