pub mod advanced;
pub mod basic;
pub mod images;
pub mod links;
pub mod permalink;
pub mod readability;
pub mod technical;

use crate::aggregate::{self, Composite};
use crate::content::AnalyzableContent;
use crate::recommend;
use crate::types::config::WeightTable;
use crate::types::report::AnalysisReport;
use crate::types::scoring::{Advanced, Basic, MetricMap, MetricOutcome, MetricResult, Scale};

/// One entry of an engine's check table.
pub enum Check<S: Scale> {
    Content(fn(&AnalyzableContent) -> MetricResult<S>),
    Keyword(fn(&AnalyzableContent, Option<&str>) -> MetricResult<S>),
    /// Known factor without an implementation; reported as `NotImplemented`.
    Pending(&'static str),
}

pub fn run_checks<S: Scale>(
    checks: &[(&str, Check<S>)],
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> MetricMap<S> {
    let mut metrics = MetricMap::new();
    for (name, check) in checks {
        let outcome = match check {
            Check::Content(check) => MetricOutcome::Evaluated(check(content)),
            Check::Keyword(check) => MetricOutcome::Evaluated(check(content, keyword)),
            Check::Pending(reason) => MetricOutcome::not_implemented(*reason),
        };
        metrics.insert(name, outcome);
    }
    metrics
}

fn build_report<S: Scale>(analyses: MetricMap<S>, composite: Composite) -> AnalysisReport<S> {
    let recommendations = recommend::recommendations(&analyses);
    AnalysisReport {
        engine: S::NAME.to_string(),
        analyses,
        overall_score: composite.score,
        status: composite.status,
        recommendations,
    }
}

/// Per-post analysis on the 100-point scale, weighted by `weights`.
#[tracing::instrument(skip_all, fields(post = %content.id))]
pub fn analyze(
    content: &AnalyzableContent,
    keyword: Option<&str>,
    weights: &WeightTable,
) -> AnalysisReport<Basic> {
    let analyses = run_checks(basic::CHECKS, content, keyword);
    let composite = aggregate::weighted(&analyses, weights);
    tracing::debug!(
        metrics = analyses.len(),
        score = composite.score,
        "basic analysis complete"
    );
    build_report(analyses, composite)
}

/// The 40+ factor analysis on the 10-point scale, unweighted.
#[tracing::instrument(skip_all, fields(post = %content.id))]
pub fn analyze_comprehensive(
    content: &AnalyzableContent,
    keyword: Option<&str>,
) -> AnalysisReport<Advanced> {
    let analyses = run_checks(advanced::CHECKS, content, keyword);
    let composite = aggregate::unweighted(&analyses);
    tracing::debug!(
        metrics = analyses.len(),
        score = composite.score,
        "comprehensive analysis complete"
    );
    build_report(analyses, composite)
}

/// Readability checks on the 100-point scale, unweighted.
pub fn analyze_readability(content: &AnalyzableContent) -> AnalysisReport<Basic> {
    let analyses = run_checks(readability::CHECKS, content, None);
    let composite = aggregate::unweighted(&analyses);
    build_report(analyses, composite)
}

/// Slug checks on the 100-point scale, unweighted.
pub fn analyze_permalink(content: &AnalyzableContent, keyword: Option<&str>) -> AnalysisReport<Basic> {
    let analyses = run_checks(permalink::CHECKS, content, keyword);
    let composite = aggregate::unweighted(&analyses);
    build_report(analyses, composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;
    use crate::types::scoring::Status;

    fn filler_post(words: usize) -> AnalyzableContent {
        let sentence = "Short clear sentences help readers follow along.";
        let per_sentence = 7;
        let body = (0..words / per_sentence)
            .map(|_| sentence)
            .collect::<Vec<_>>()
            .join(" ");
        AnalyzableContent::from_record(&ContentRecord {
            title: "A plain post".to_string(),
            slug: "plain-post".to_string(),
            content: format!("<p>{body}</p>"),
            ..ContentRecord::default()
        })
    }

    #[test]
    fn short_post_without_keyword_is_poor_length_and_neutral_keyword_checks() {
        let content = filler_post(250);
        assert!(content.word_count() <= 250 && content.word_count() > 240);
        let report = analyze(&content, None, &WeightTable::default());

        let length = report
            .analyses
            .result("content_length")
            .expect("content length should be evaluated");
        assert_eq!(length.status, Status::Poor);

        for name in basic::KEYWORD_METRICS {
            let result = report
                .analyses
                .result(name)
                .expect("keyword metric should be evaluated");
            assert_eq!(result.status, Status::Ok, "{name}");
            assert_eq!(result.score, result.max_score / 2, "{name}");
        }
    }

    #[test]
    fn comprehensive_keyword_checks_are_neutral_without_keyword() {
        let content = filler_post(250);
        let report = analyze_comprehensive(&content, None);

        let length = report
            .analyses
            .result("content_length")
            .expect("content length should be evaluated");
        assert_eq!(length.status, Status::Poor);

        let keyword_checks = advanced::CHECKS
            .iter()
            .filter(|(_, check)| matches!(check, Check::Keyword(_)))
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();
        assert_eq!(keyword_checks.len(), 9);
        for name in keyword_checks {
            let result = report
                .analyses
                .result(name)
                .expect("keyword metric should be evaluated");
            assert_eq!(result.status, Status::Ok, "{name}");
            assert_eq!(result.score, 5, "{name}");
        }
    }

    #[test]
    fn recommendation_count_matches_non_good_metrics() {
        let content = filler_post(250);
        let report = analyze(&content, Some("readers"), &WeightTable::default());
        let non_good = report
            .analyses
            .evaluated()
            .filter(|(_, result)| result.status != Status::Good)
            .count();
        assert_eq!(report.recommendations.len(), non_good);

        let names = report
            .recommendations
            .iter()
            .map(|rec| rec.factor.as_str())
            .collect::<Vec<_>>();
        let expected = report
            .analyses
            .evaluated()
            .filter(|(_, result)| result.status != Status::Good)
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, expected);
    }

    #[test]
    fn every_metric_stays_within_bounds() {
        let posts = [
            AnalyzableContent::new("", ""),
            filler_post(250),
            filler_post(1200),
            AnalyzableContent::new(
                "Title",
                r#"<h1>x</h1><p>The code was written. <a href="/a">here</a></p><img src="a">"#,
            ),
        ];
        for post in &posts {
            for keyword in [None, Some("readers"), Some("missing phrase")] {
                let basic = analyze(post, keyword, &WeightTable::default());
                for (name, result) in basic.analyses.evaluated() {
                    assert!(result.score <= result.max_score, "{name}");
                    assert_eq!(result.max_score, 100, "{name}");
                }
                assert!(basic.overall_score <= 100);

                let advanced = analyze_comprehensive(post, keyword);
                for (name, result) in advanced.analyses.evaluated() {
                    assert!(result.score <= result.max_score, "{name}");
                    assert_eq!(result.max_score, 10, "{name}");
                }
                assert!(advanced.overall_score <= 100);
            }
        }
    }

    #[test]
    fn empty_post_scores_zero_length_without_panicking() {
        let content = AnalyzableContent::new("", "");
        let report = analyze(&content, Some("rust"), &WeightTable::default());
        let length = report
            .analyses
            .result("content_length")
            .expect("content length should be evaluated");
        assert_eq!((length.score, length.status), (0, Status::Poor));
        assert_eq!(report.status, Status::Poor);
    }

    #[test]
    fn alternate_weight_table_changes_only_the_composite() {
        let content = filler_post(700);
        let default = analyze(&content, None, &WeightTable::default());
        let only_length = analyze(&content, None, &WeightTable::new([("content_length", 1.0)]));
        assert_eq!(default.analyses, only_length.analyses);
        assert_eq!(only_length.overall_score, 80);
    }

    #[test]
    fn comprehensive_engine_tags_placeholders() {
        let content = filler_post(700);
        let report = analyze_comprehensive(&content, Some("readers"));
        assert!(report.analyses.len() >= 40);
        let pending = report
            .analyses
            .iter()
            .filter(|(_, outcome)| !outcome.is_implemented())
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(pending, vec!["page_speed", "mobile_friendly"]);
        assert!(report
            .recommendations
            .iter()
            .all(|rec| rec.factor != "page_speed" && rec.factor != "mobile_friendly"));
        assert_eq!(report.engine, "advanced");
    }
}
