use crate::content::{AnalyzableContent, LinkKind};
use crate::metrics::{INTERNAL_LINKS_TARGET, NO_CONTENT};
use crate::recommend;
use crate::types::report::Recommendation;
use crate::types::scoring::{BasicMetricResult, Status};
use serde::Serialize;

/// One additional internal link is expected per this many words.
pub const WORDS_PER_INTERNAL_LINK: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReport {
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
    /// Internal links expected for the content length.
    pub target: usize,
    pub result: BasicMetricResult,
}

impl LinkReport {
    pub fn score(&self) -> u32 {
        self.result.score
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend::for_result("internal_links", &self.result)
            .into_iter()
            .collect()
    }
}

/// Internal link count measured against a target that grows with length.
pub fn analyze_internal_links(content: &AnalyzableContent) -> LinkReport {
    let words = content.word_count();
    let internal = content.links_of(LinkKind::Internal).count();
    let external = content.links_of(LinkKind::External).count();
    let nofollow = content.links.iter().filter(|link| link.is_nofollow()).count();
    let target = INTERNAL_LINKS_TARGET.max(words.div_ceil(WORDS_PER_INTERNAL_LINK));

    let result = if words == 0 {
        BasicMetricResult::poor(0, NO_CONTENT)
    } else if internal == 0 {
        BasicMetricResult::poor(0, "No internal links; link to related posts on this site.")
    } else if internal >= target {
        BasicMetricResult::good(format!("{internal} internal links for {words} words."))
    } else {
        let ratio = internal as f64 / target as f64;
        let status = if ratio >= 0.5 { Status::Ok } else { Status::Poor };
        BasicMetricResult::fraction(
            ratio,
            status,
            format!("{internal} internal link(s) for {words} words; aim for {target}."),
        )
    };

    LinkReport {
        internal,
        external,
        nofollow,
        target,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(words: usize, links: &str) -> AnalyzableContent {
        let body = vec!["word"; words].join(" ");
        AnalyzableContent::new("Links", &format!("<p>{body} {links}</p>"))
    }

    #[test]
    fn target_grows_with_length() {
        let short = analyze_internal_links(&post(300, r#"<a href="/a">a</a><a href="/b">b</a>"#));
        assert_eq!(short.target, 2);
        assert_eq!(short.score(), 100);

        let long = analyze_internal_links(&post(2000, r#"<a href="/a">a</a><a href="/b">b</a>"#));
        assert_eq!(long.target, 5);
        assert_eq!((long.score(), long.result.status), (40, Status::Poor));
    }

    #[test]
    fn counts_external_and_nofollow() {
        let report = analyze_internal_links(&post(
            100,
            r#"<a href="/a">a</a><a href="https://other.test/" rel="nofollow noopener">x</a>"#,
        ));
        assert_eq!((report.internal, report.external, report.nofollow), (1, 1, 1));
        assert_eq!((report.score(), report.result.status), (50, Status::Ok));
        assert_eq!(report.recommendations().len(), 1);
    }

    #[test]
    fn empty_post_has_no_link_credit() {
        let report = analyze_internal_links(&AnalyzableContent::new("", ""));
        assert_eq!(report.score(), 0);
    }
}
