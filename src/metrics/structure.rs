use super::{
    ALT_COVERAGE_OK_RATIO, ALT_COVERAGE_POOR_FACTOR, CONTENT_LENGTH_EXCELLENT, CONTENT_LENGTH_GOOD,
    CONTENT_LENGTH_OK, INTERNAL_LINKS_TARGET, NO_CONTENT,
};
use crate::content::{AnalyzableContent, LinkKind};
use crate::text::{self, round1};
use crate::types::scoring::{MetricResult, Scale, Status};
use std::collections::HashSet;

const GENERIC_ANCHORS: &[&str] = &[
    "click here",
    "here",
    "link",
    "more",
    "read more",
    "this",
    "this link",
    "learn more",
];

pub fn content_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let words = content.word_count();
    let result = if words == 0 {
        MetricResult::poor(0, NO_CONTENT)
    } else if words < CONTENT_LENGTH_OK {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("The content is {words} words; write at least {CONTENT_LENGTH_OK}."),
        )
    } else if words < CONTENT_LENGTH_GOOD {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("The content is {words} words; {CONTENT_LENGTH_GOOD}+ ranks better."),
        )
    } else if words < CONTENT_LENGTH_EXCELLENT {
        MetricResult::fraction(0.8, Status::Good, format!("The content is {words} words."))
    } else {
        MetricResult::good(format!("The content is {words} words; excellent length."))
    };
    result.with_detail("word_count", words)
}

/// Alt text coverage: full marks at 100%, linear credit from 50%, and a
/// reduced `ratio * 0.7` below that. Posts without images are neutral.
pub fn image_alt_coverage<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let total = content.images.len();
    let with_alt = content.images_with_alt();
    if total == 0 {
        return MetricResult::neutral("No images found.")
            .with_detail("total", 0)
            .with_detail("with_alt", 0);
    }

    let ratio = with_alt as f64 / total as f64;
    let coverage = round1(ratio * 100.0);
    let result = if with_alt == total {
        MetricResult::good(format!("All {total} images have alt text."))
    } else if ratio >= ALT_COVERAGE_OK_RATIO {
        MetricResult::fraction(
            ratio,
            Status::Ok,
            format!("{with_alt} of {total} images have alt text ({coverage}%)."),
        )
    } else {
        MetricResult::fraction(
            ratio * ALT_COVERAGE_POOR_FACTOR,
            Status::Poor,
            format!("Only {with_alt} of {total} images have alt text ({coverage}%)."),
        )
    };
    result
        .with_detail("total", total)
        .with_detail("with_alt", with_alt)
        .with_detail("coverage", coverage)
}

pub fn internal_links<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.word_count() == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let count = content.links_of(LinkKind::Internal).count();
    let result = if count == 0 {
        MetricResult::poor(0, "No internal links; link to related posts on this site.")
    } else if count < INTERNAL_LINKS_TARGET {
        MetricResult::fraction(
            0.6,
            Status::Ok,
            format!("{count} internal link; add at least {INTERNAL_LINKS_TARGET}."),
        )
    } else {
        MetricResult::good(format!("{count} internal links."))
    };
    result.with_detail("count", count)
}

pub fn external_links<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.word_count() == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let external = content.links_of(LinkKind::External).collect::<Vec<_>>();
    let nofollow = external.iter().filter(|link| link.is_nofollow()).count();
    let result = if external.is_empty() {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            "No outbound links; cite at least one authoritative source.",
        )
    } else {
        MetricResult::good(format!("{} outbound links.", external.len()))
    };
    result
        .with_detail("count", external.len())
        .with_detail("nofollow", nofollow)
}

pub fn heading_structure<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let h1_count = content
        .headings
        .iter()
        .filter(|heading| heading.level == 1)
        .count();
    let levels = content
        .subheadings()
        .map(|heading| heading.level)
        .collect::<Vec<_>>();
    let skips_level = levels
        .windows(2)
        .any(|pair| pair[1] > pair[0] && pair[1] - pair[0] > 1);

    if h1_count > 0 {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            "The content contains an H1; the title already is the page's H1.",
        )
    } else if levels.is_empty() {
        MetricResult::fraction(0.3, Status::Poor, "Use H2 subheadings to structure the content.")
    } else if levels.first() != Some(&2) || skips_level {
        MetricResult::fraction(0.7, Status::Ok, "Subheading levels skip a level; keep H2 > H3 > H4 nesting.")
    } else {
        MetricResult::good("Heading hierarchy is well formed.")
    }
}

pub fn heading_uniqueness<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let headings = content
        .subheadings()
        .map(|heading| heading.text.to_lowercase())
        .collect::<Vec<_>>();
    if headings.is_empty() {
        return MetricResult::neutral("No subheadings found.");
    }
    let unique = headings.iter().collect::<HashSet<_>>().len();
    let duplicates = headings.len() - unique;
    if duplicates == 0 {
        MetricResult::good("All subheadings are unique.")
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!("{duplicates} subheading(s) repeat an earlier one."),
        )
        .with_detail("duplicates", duplicates)
    }
}

pub fn list_usage<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.word_count() == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    if content.list_count > 0 {
        MetricResult::good(format!("{} list(s) break up the text.", content.list_count))
    } else {
        MetricResult::fraction(0.5, Status::Ok, "Consider a bulleted or numbered list for scannability.")
    }
}

pub fn emphasis_usage<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.word_count() == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    if content.emphasis_count > 0 {
        MetricResult::good("Key phrases are emphasized.")
    } else {
        MetricResult::fraction(0.5, Status::Ok, "Emphasize key phrases with bold or italics.")
    }
}

pub fn intro_length<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let Some(intro) = content.first_paragraph() else {
        return MetricResult::poor(0, NO_CONTENT);
    };
    let words = text::word_count(intro);
    let result = if words <= 100 {
        MetricResult::good("The introduction is concise.")
    } else if words <= 150 {
        MetricResult::fraction(0.6, Status::Ok, format!("The introduction is {words} words; tighten it."))
    } else {
        MetricResult::fraction(
            0.3,
            Status::Poor,
            format!("The introduction is {words} words; get to the point sooner."),
        )
    };
    result.with_detail("word_count", words)
}

pub fn media_richness<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    if content.word_count() == 0 {
        return MetricResult::poor(0, NO_CONTENT);
    }
    let images = content.images.len();
    if images == 0 {
        MetricResult::fraction(0.4, Status::Ok, "Add at least one image to the content.")
    } else {
        MetricResult::good(format!("{images} image(s) in the content.")).with_detail("count", images)
    }
}

pub fn anchor_text<S: Scale>(content: &AnalyzableContent) -> MetricResult<S> {
    let anchors = content
        .links
        .iter()
        .filter(|link| link.kind != LinkKind::Other)
        .map(|link| link.anchor.trim().to_lowercase())
        .collect::<Vec<_>>();
    if anchors.is_empty() {
        return MetricResult::neutral("No links found.");
    }
    let generic = anchors
        .iter()
        .filter(|anchor| anchor.is_empty() || GENERIC_ANCHORS.contains(&anchor.as_str()))
        .count();
    if generic == 0 {
        MetricResult::good("Link anchors are descriptive.")
    } else {
        MetricResult::fraction(
            0.5,
            Status::Ok,
            format!("{generic} link(s) use generic anchor text such as \"click here\"."),
        )
        .with_detail("generic", generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{Advanced, Basic};

    fn words(count: usize) -> String {
        format!("<p>{}</p>", vec!["word"; count].join(" "))
    }

    #[test]
    fn content_length_tiers() {
        let cases = [
            (0, 0, Status::Poor),
            (250, 30, Status::Poor),
            (300, 60, Status::Ok),
            (599, 60, Status::Ok),
            (600, 80, Status::Good),
            (1000, 100, Status::Good),
        ];
        for (count, score, status) in cases {
            let content = AnalyzableContent::new("t", &words(count));
            let result = content_length::<Basic>(&content);
            assert_eq!((result.score, result.status), (score, status), "{count} words");
        }
    }

    #[test]
    fn alt_coverage_two_of_three_is_ok() {
        let html = r#"<p>Text.</p><img src="a.png" alt="one"><img src="b.png" alt="two"><img src="c.png">"#;
        let content = AnalyzableContent::new("t", html);
        let result = image_alt_coverage::<Basic>(&content);
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.score, 67);
        assert_eq!(result.detail("total"), Some(&serde_json::json!(3)));
        assert_eq!(result.detail("with_alt"), Some(&serde_json::json!(2)));
        assert_eq!(result.detail("coverage"), Some(&serde_json::json!(66.7)));
    }

    #[test]
    fn alt_coverage_edges() {
        let none = AnalyzableContent::new("t", "<p>No pictures.</p>");
        let result = image_alt_coverage::<Basic>(&none);
        assert_eq!((result.score, result.status), (50, Status::Ok));

        let third = AnalyzableContent::new(
            "t",
            r#"<img src="a" alt="x"><img src="b"><img src="c">"#,
        );
        let result = image_alt_coverage::<Basic>(&third);
        assert_eq!((result.score, result.status), (23, Status::Poor));

        let zero = AnalyzableContent::new("t", r#"<img src="a"><img src="b" alt=" ">"#);
        assert_eq!(image_alt_coverage::<Advanced>(&zero).score, 0);

        let all = AnalyzableContent::new("t", r#"<img src="a" alt="x">"#);
        assert_eq!(image_alt_coverage::<Advanced>(&all).score, 10);
    }

    #[test]
    fn link_counts() {
        let html = r#"<p>See <a href="/a">first post</a>, <a href="https://docs.rs">docs</a>
            and <a href="/b">click here</a>.</p>"#;
        let content = AnalyzableContent::new("t", html);
        assert_eq!(internal_links::<Basic>(&content).status, Status::Good);
        assert_eq!(external_links::<Basic>(&content).status, Status::Good);
        assert_eq!(anchor_text::<Basic>(&content).status, Status::Ok);

        let bare = AnalyzableContent::new("t", "<p>No links at all.</p>");
        assert_eq!(internal_links::<Basic>(&bare).score, 0);
        assert_eq!(external_links::<Basic>(&bare).score, 50);
    }

    #[test]
    fn heading_structure_flags_h1_and_skips() {
        let with_h1 = AnalyzableContent::new("t", "<h1>Again</h1><p>x</p>");
        assert_eq!(heading_structure::<Basic>(&with_h1).status, Status::Ok);

        let skipping = AnalyzableContent::new("t", "<h2>A</h2><h4>B</h4>");
        assert_eq!(heading_structure::<Basic>(&skipping).score, 70);

        let nested = AnalyzableContent::new("t", "<h2>A</h2><h3>B</h3><h2>C</h2>");
        assert_eq!(heading_structure::<Basic>(&nested).status, Status::Good);
    }
}
