//! Post records and their normalized, analyzable form.

use crate::text;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("valid regex"));
static SHORTCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[/?[A-Za-z][\w-]*(?:\s[^\]]*)?/?\]").expect("valid regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").expect("valid regex"));
static IMG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid regex"));
static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("valid regex"));
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid regex")
});
static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</?(?:p|div|h[1-6]|li|ul|ol|br|blockquote|section|article|table|tr|td|th|figure|figcaption|pre)\b[^>]*>",
    )
    .expect("valid regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(?:ul|ol)\b").expect("valid regex"));
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:strong|b|em|i)\b").expect("valid regex"));

/// A post as returned by a content provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    pub focus_keyword: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub noindex: bool,
    pub schema_type: Option<String>,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub slug: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub noindex: bool,
    pub schema_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
}

impl Image {
    pub fn has_alt(&self) -> bool {
        self.alt
            .as_deref()
            .map(|alt| !alt.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub anchor: String,
    pub rel: Option<String>,
    pub kind: LinkKind,
}

impl Link {
    pub fn is_nofollow(&self) -> bool {
        self.rel
            .as_deref()
            .map(|rel| rel.split_whitespace().any(|part| part.eq_ignore_ascii_case("nofollow")))
            .unwrap_or(false)
    }
}

/// A post reduced to plain text plus the structure the metrics need.
/// Built once per analysis pass and never mutated.
#[derive(Debug, Clone)]
pub struct AnalyzableContent {
    pub id: String,
    pub raw_html: String,
    pub plain_text: String,
    pub title: String,
    pub focus_keyword: Option<String>,
    pub meta: PostMeta,
    pub headings: Vec<Heading>,
    pub images: Vec<Image>,
    pub links: Vec<Link>,
    pub paragraphs: Vec<String>,
    pub sentences: Vec<String>,
    pub words: Vec<String>,
    pub list_count: usize,
    pub emphasis_count: usize,
}

impl AnalyzableContent {
    pub fn new(title: &str, raw_html: &str) -> Self {
        Self::from_record(&ContentRecord {
            title: title.to_string(),
            content: raw_html.to_string(),
            ..ContentRecord::default()
        })
    }

    pub fn from_record(record: &ContentRecord) -> Self {
        let cleaned = strip_noise(&record.content);
        let plain_text = to_plain_text(&cleaned);
        let site_host = record.site_url.as_deref().and_then(host_of);

        let headings = HEADING_RE
            .captures_iter(&cleaned)
            .map(|caps| Heading {
                level: caps[1].parse().unwrap_or(2),
                text: inline_text(&caps[2]),
            })
            .collect();

        let images = IMG_RE
            .find_iter(&cleaned)
            .map(|tag| Image {
                src: attribute(tag.as_str(), "src").unwrap_or_default(),
                alt: attribute(tag.as_str(), "alt"),
            })
            .collect();

        let links = LINK_RE
            .captures_iter(&cleaned)
            .filter_map(|caps| {
                let href = attribute(&caps[1], "href")?;
                Some(Link {
                    kind: classify_link(&href, site_host.as_deref()),
                    anchor: inline_text(&caps[2]),
                    rel: attribute(&caps[1], "rel"),
                    href,
                })
            })
            .collect();

        let focus_keyword = record
            .focus_keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string);

        Self {
            id: record.id.clone(),
            raw_html: record.content.clone(),
            sentences: text::split_sentences(&plain_text),
            words: text::tokenize(&plain_text),
            paragraphs: extract_paragraphs(&cleaned),
            title: record.title.trim().to_string(),
            focus_keyword,
            meta: PostMeta {
                slug: record.slug.clone(),
                meta_title: non_empty(record.meta_title.as_deref()),
                meta_description: non_empty(record.meta_description.as_deref()),
                canonical_url: non_empty(record.canonical_url.as_deref()),
                noindex: record.noindex,
                schema_type: non_empty(record.schema_type.as_deref()),
            },
            headings,
            images,
            links,
            list_count: LIST_RE.find_iter(&cleaned).count(),
            emphasis_count: EMPHASIS_RE.find_iter(&cleaned).count(),
            plain_text,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Meta title when set, the post title otherwise.
    pub fn effective_title(&self) -> &str {
        self.meta.meta_title.as_deref().unwrap_or(&self.title)
    }

    pub fn first_paragraph(&self) -> Option<&str> {
        self.paragraphs.first().map(String::as_str)
    }

    pub fn last_paragraph(&self) -> Option<&str> {
        self.paragraphs.last().map(String::as_str)
    }

    pub fn subheadings(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|heading| heading.level >= 2)
    }

    pub fn links_of(&self, kind: LinkKind) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.kind == kind)
    }

    pub fn images_with_alt(&self) -> usize {
        self.images.iter().filter(|image| image.has_alt()).count()
    }
}

fn strip_noise(html: &str) -> String {
    let html = COMMENT_RE.replace_all(html, "");
    let html = SCRIPT_RE.replace_all(&html, "");
    let html = STYLE_RE.replace_all(&html, "");
    SHORTCODE_RE.replace_all(&html, "").into_owned()
}

fn to_plain_text(html: &str) -> String {
    let broken = BLOCK_RE.replace_all(html, "\n");
    let stripped = TAG_RE.replace_all(&broken, " ");
    decode_entities(&stripped)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn inline_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<p>` blocks when present, blank-line separated chunks otherwise.
fn extract_paragraphs(html: &str) -> Vec<String> {
    let tagged = PARAGRAPH_RE
        .captures_iter(html)
        .map(|caps| inline_text(&caps[1]))
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>();
    if !tagged.is_empty() {
        return tagged;
    }

    BLANK_LINE_RE
        .split(html)
        .map(|chunk| inline_text(&HEADING_RE.replace_all(chunk, "")))
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(tag).find_map(|caps| {
        if !caps[1].eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|value| decode_entities(value.as_str()))
    })
}

fn host_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.trim_start_matches("www.").to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

fn classify_link(href: &str, site_host: Option<&str>) -> LinkKind {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return LinkKind::Other;
    }
    match host_of(href) {
        Some(host) => match site_host {
            Some(site) if host == site => LinkKind::Internal,
            _ => LinkKind::External,
        },
        None if href.starts_with("//") => LinkKind::External,
        None => LinkKind::Internal,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ContentRecord {
        ContentRecord {
            id: "hello-world".to_string(),
            title: " Hello World ".to_string(),
            slug: "hello-world".to_string(),
            content: r#"<!-- intro -->
<h2>Getting <em>started</em></h2>
<p>First paragraph with a <a href="/about">local link</a> and an
<a href="https://example.org/x" rel="nofollow noopener">outside one</a>.</p>
[gallery ids="1,2"]
<script>var x = "<p>hidden</p>";</script>
<p>Second &amp; final paragraph. It has <strong>two</strong> sentences!</p>
<img src="a.png" alt="A chart"><img src='b.png' alt=""><img src=c.png>
<ul><li>one</li></ul>"#
                .to_string(),
            focus_keyword: Some("  ".to_string()),
            meta_description: Some("Desc".to_string()),
            site_url: Some("https://www.mysite.test".to_string()),
            ..ContentRecord::default()
        }
    }

    #[test]
    fn from_record_strips_noise_and_extracts_structure() {
        let content = AnalyzableContent::from_record(&sample_record());

        assert_eq!(content.title, "Hello World");
        assert_eq!(content.focus_keyword, None);
        assert!(!content.plain_text.contains("hidden"));
        assert!(!content.plain_text.contains("gallery"));
        assert!(!content.plain_text.contains("intro"));
        assert!(content.plain_text.contains("Second & final paragraph."));

        assert_eq!(
            content.headings,
            vec![Heading {
                level: 2,
                text: "Getting started".to_string()
            }]
        );
        assert_eq!(content.paragraphs.len(), 2);
        assert_eq!(content.images.len(), 3);
        assert_eq!(content.images_with_alt(), 1);
        assert_eq!(content.images[2].src, "c.png");
        assert_eq!(content.list_count, 1);
        assert_eq!(content.emphasis_count, 2);
    }

    #[test]
    fn links_are_classified() {
        let content = AnalyzableContent::from_record(&sample_record());
        assert_eq!(content.links.len(), 2);
        assert_eq!(content.links[0].kind, LinkKind::Internal);
        assert_eq!(content.links[0].anchor, "local link");
        assert_eq!(content.links[1].kind, LinkKind::External);
        assert!(content.links[1].is_nofollow());
    }

    #[test]
    fn absolute_links_to_site_host_are_internal() {
        assert_eq!(
            classify_link("https://mysite.test/post", Some("mysite.test")),
            LinkKind::Internal
        );
        assert_eq!(classify_link("https://other.test", Some("mysite.test")), LinkKind::External);
        assert_eq!(classify_link("#top", None), LinkKind::Other);
        assert_eq!(classify_link("mailto:a@b.c", None), LinkKind::Other);
    }

    #[test]
    fn plain_text_without_paragraph_tags_splits_on_blank_lines() {
        let content = AnalyzableContent::new(
            "Title",
            "<h2>Intro</h2>\n\nFirst block of text.\n\nSecond block here.",
        );
        assert_eq!(
            content.paragraphs,
            vec!["First block of text.", "Second block here."]
        );
        assert_eq!(content.word_count(), 8);
    }

    #[test]
    fn empty_content_is_analyzable() {
        let content = AnalyzableContent::new("", "");
        assert_eq!(content.word_count(), 0);
        assert!(content.sentences.is_empty());
        assert!(content.paragraphs.is_empty());
    }
}
