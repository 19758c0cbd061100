//! HTML-to-text extraction.
//!
//! Callers only see the [`TextExtractor`] trait. [`RegexExtractor`] is the
//! default: a best-effort, order-sensitive sequence of regular expressions
//! where the first matching body pattern wins. It does no entity decoding and
//! has no notion of nesting, so unbalanced markup simply yields shorter or
//! empty fields. [`DomExtractor`] produces the same document shape from a
//! real HTML parse.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::fmt;
use tracing::{debug, instrument};

/// Maximum number of characters kept from the body.
pub const BODY_CHAR_LIMIT: usize = 5000;

/// Plain-text rendering of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: String,
    pub description: String,
    pub body: String,
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}\n\nDescription: {}\n\nContent Extract:\n\n{}",
            self.title, self.description, self.body
        )
    }
}

/// Derives an [`ExtractedText`] from raw HTML. Must never fail.
pub trait TextExtractor {
    fn extract(&self, html: &str, url: &str) -> ExtractedText;
}

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<script[^>]*>.*?</script>").expect("script regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<style[^>]*>.*?</style>").expect("style regex"));
static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title[^>]*>(.*?)</title>").expect("title regex"));
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#)
        .expect("meta description regex")
});
/// Tried in order; the first one matching anywhere in the document wins.
static BODY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<article[^>]*>(.*?)</article>",
        r"(?is)<main[^>]*>(.*?)</main>",
        r#"(?is)<div[^>]*class=["'][^"']*content[^"']*["'][^>]*>(.*?)</div>"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("body regex"))
    .collect()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Collapse whitespace runs to single spaces and keep the first
/// [`BODY_CHAR_LIMIT`] characters.
pub fn collapse_and_truncate(text: &str) -> String {
    WHITESPACE
        .replace_all(text, " ")
        .chars()
        .take(BODY_CHAR_LIMIT)
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl TextExtractor for RegexExtractor {
    #[instrument(level = "debug", skip_all, fields(%url))]
    fn extract(&self, html: &str, url: &str) -> ExtractedText {
        let html = SCRIPT_BLOCK.replace_all(html, "");
        let html = STYLE_BLOCK.replace_all(&html, "");

        let title = TITLE
            .captures(&*html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let description = META_DESCRIPTION
            .captures(&*html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let candidate = BODY_PATTERNS
            .iter()
            .find_map(|re| re.captures(&*html))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&*html);

        let stripped = TAG.replace_all(candidate, " ");
        let body = collapse_and_truncate(&stripped);
        debug!(title_len = title.len(), body_chars = body.chars().count(), "Extracted text");

        ExtractedText {
            title,
            description,
            body,
        }
    }
}

static SEL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("title selector"));
static SEL_META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("meta selector"));
static SEL_BODY_CANDIDATES: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", r#"div[class*="content"]"#, "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("body selector"))
        .collect()
});

/// Same document shape as [`RegexExtractor`], built from a parsed DOM.
///
/// Text under `script`, `style` and `noscript` is skipped, and entities come
/// out decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomExtractor;

impl DomExtractor {
    fn visible_text(root: scraper::ElementRef<'_>) -> String {
        let mut parts = Vec::new();
        for node in root.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
            });
            if !hidden {
                parts.push(&**text);
            }
        }
        parts.join(" ")
    }
}

impl TextExtractor for DomExtractor {
    #[instrument(level = "debug", skip_all, fields(%url))]
    fn extract(&self, html: &str, url: &str) -> ExtractedText {
        let document = Html::parse_document(html);

        let title = document
            .select(&SEL_TITLE)
            .next()
            .map(|t| WHITESPACE.replace_all(&t.text().collect::<String>(), " ").trim().to_string())
            .unwrap_or_default();

        let description = document
            .select(&SEL_META_DESCRIPTION)
            .find_map(|m| m.value().attr("content"))
            .unwrap_or_default()
            .to_string();

        // An empty candidate falls through to the next, then to the whole document.
        let text = SEL_BODY_CANDIDATES
            .iter()
            .filter_map(|sel| document.select(sel).next())
            .map(Self::visible_text)
            .find(|t| !t.trim().is_empty())
            .unwrap_or_else(|| Self::visible_text(document.root_element()));
        let body = collapse_and_truncate(text.trim());

        ExtractedText {
            title,
            description,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/article";

    #[test]
    fn test_render_layout() {
        let doc = ExtractedText {
            title: "Foo".into(),
            description: "Bar".into(),
            body: "Baz".into(),
        };
        assert_eq!(
            doc.to_string(),
            "Title: Foo\n\nDescription: Bar\n\nContent Extract:\n\nBaz"
        );
    }

    #[test]
    fn test_title_description_and_whole_document_fallback() {
        let html = r#"<html><head><title>Foo</title>
            <meta name="description" content="Bar"></head>
            <body><p>Hello   world</p></body></html>"#;
        let doc = RegexExtractor.extract(html, URL);
        assert_eq!(doc.title, "Foo");
        assert_eq!(doc.description, "Bar");
        // Whole document is used, so the title text shows up in the body too.
        assert!(doc.body.contains("Foo"));
        assert!(doc.body.contains("Hello world"));
        assert!(!doc.body.contains('<'));
    }

    #[test]
    fn test_article_wins_over_main() {
        let html = "<main>main text</main><article>article text</article>";
        let doc = RegexExtractor.extract(html, URL);
        assert_eq!(doc.body.trim(), "article text");
    }

    #[test]
    fn test_main_then_content_div() {
        let html = r#"<div class="page-content">div text</div><main>main text</main>"#;
        assert_eq!(RegexExtractor.extract(html, URL).body.trim(), "main text");

        let html = r#"<div class="post-content-wrapper"><p>div text</p></div>"#;
        assert_eq!(RegexExtractor.extract(html, URL).body.trim(), "div text");
    }

    #[test]
    fn test_patterns_are_case_insensitive_and_multiline() {
        let html = "<ARTICLE class=\"x\">\nline one\n\nline two\n</ARTICLE>";
        let doc = RegexExtractor.extract(html, URL);
        assert_eq!(doc.body.trim(), "line one line two");
    }

    #[test]
    fn test_scripts_and_styles_removed() {
        let html = "<title>T</title><script type=\"text/javascript\">\nvar x = '<article>no</article>';\n</script>\
                    <style>\nbody { color: red }\n</style><article>yes</article>";
        let doc = RegexExtractor.extract(html, URL);
        assert_eq!(doc.body.trim(), "yes");
    }

    #[test]
    fn test_meta_description_single_quotes_and_case() {
        let html = "<META NAME='description' CONTENT='Single quoted'>";
        assert_eq!(RegexExtractor.extract(html, URL).description, "Single quoted");
    }

    #[test]
    fn test_empty_article_falls_back_to_document() {
        let html = "<p>outside</p><article></article>";
        let doc = RegexExtractor.extract(html, URL);
        assert!(doc.body.contains("outside"));
    }

    #[test]
    fn test_dom_empty_article_falls_back_like_regex() {
        let html = "<p>outside</p><article></article>";
        let doc = DomExtractor.extract(html, URL);
        assert_eq!(doc.body, "outside");
        assert!(RegexExtractor.extract(html, URL).body.contains("outside"));
    }

    #[test]
    fn test_never_fails_on_odd_input() {
        for html in ["", "<", "<<>>", "<title>unterminated", "<article><div>", "</main>", "\u{0}\u{fffd}"] {
            let doc = RegexExtractor.extract(html, URL);
            assert!(doc.body.chars().count() <= BODY_CHAR_LIMIT);
            let _ = DomExtractor.extract(html, URL);
        }
        let doc = RegexExtractor.extract("", URL);
        assert_eq!(doc, ExtractedText::default());
    }

    #[test]
    fn test_body_truncated_to_limit() {
        let words = "lorem ipsum ".repeat(1000);
        let html = format!("<article>{}</article>", words.replace(' ', " \n\t "));
        let doc = RegexExtractor.extract(&html, URL);
        assert_eq!(doc.body.chars().count(), BODY_CHAR_LIMIT);
        assert!(!doc.body.contains("  "));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let html = format!("<article>{}</article>", "é".repeat(6000));
        let doc = RegexExtractor.extract(&html, URL);
        assert_eq!(doc.body.chars().count(), BODY_CHAR_LIMIT);
    }

    #[test]
    fn test_no_entity_decoding() {
        let doc = RegexExtractor.extract("<article>AT&amp;T</article>", URL);
        assert_eq!(doc.body, "AT&amp;T");
    }

    #[test]
    fn test_dom_extractor_matches_shape() {
        let html = r#"<html><head><title> Foo </title>
            <meta name="description" content="Bar">
            <script>var hidden = 1;</script></head>
            <body><nav>menu</nav><article><p>AT&amp;T   rocks</p></article></body></html>"#;
        let doc = DomExtractor.extract(html, URL);
        assert_eq!(doc.title, "Foo");
        assert_eq!(doc.description, "Bar");
        assert_eq!(doc.body, "AT&T rocks");
    }

    #[test]
    fn test_dom_extractor_skips_script_text_in_body() {
        let html = "<body><p>visible</p><script>hidden()</script></body>";
        let doc = DomExtractor.extract(html, URL);
        assert_eq!(doc.body, "visible");
    }
}
