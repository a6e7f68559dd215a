use super::Check;
use crate::metrics::{keyword, meta};
use crate::types::scoring::Basic;

pub const CHECKS: &[(&str, Check<Basic>)] = &[
    ("slug_length", Check::Content(meta::slug_length)),
    ("slug_format", Check::Content(meta::slug_format)),
    ("slug_stop_words", Check::Content(meta::slug_stop_words)),
    ("keyword_in_slug", Check::Keyword(keyword::keyword_in_slug)),
];

#[cfg(test)]
mod tests {
    use crate::analyze::analyze_permalink;
    use crate::content::{AnalyzableContent, ContentRecord};
    use crate::types::scoring::Status;

    fn with_slug(slug: &str) -> AnalyzableContent {
        AnalyzableContent::from_record(&ContentRecord {
            slug: slug.to_string(),
            ..ContentRecord::default()
        })
    }

    #[test]
    fn clean_slug_with_keyword_is_good() {
        let report = analyze_permalink(&with_slug("rust-build-speed"), Some("rust build"));
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.status, Status::Good);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn missing_slug_is_poor() {
        let report = analyze_permalink(&with_slug(""), Some("rust"));
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.recommendations.len(), 4);
    }
}
