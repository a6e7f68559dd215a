//! The section analyzers a unified report is composed from.

use crate::analyze::{self, images, links, technical};
use crate::content::AnalyzableContent;
use crate::types::config::WeightTable;
use crate::types::report::{AnalysisReport, Recommendation, SectionKind};
use crate::types::scoring::Scale;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// What one section contributes to a unified report.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutcome {
    /// 0-100.
    pub score: u32,
    pub metrics: BTreeMap<String, Value>,
    pub recommendations: Vec<Recommendation>,
}

impl SectionOutcome {
    fn from_analysis<S: Scale>(report: AnalysisReport<S>) -> Self {
        let metrics = report
            .analyses
            .iter()
            .filter_map(|(name, outcome)| {
                serde_json::to_value(outcome)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self {
            score: report.overall_score,
            metrics,
            recommendations: report.recommendations,
        }
    }

    fn from_fields(score: u32, fields: &impl Serialize, recommendations: Vec<Recommendation>) -> Self {
        let metrics = match serde_json::to_value(fields) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        };
        Self {
            score: score.min(100),
            metrics,
            recommendations,
        }
    }
}

pub trait SectionAnalyzer: Send + Sync {
    fn kind(&self) -> SectionKind;

    /// `None` when the section cannot be evaluated; the composer then leaves
    /// it out of the report and out of the weighted average.
    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome>;
}

/// Weighted 100-point content analysis.
pub struct ContentSection {
    weights: WeightTable,
}

impl ContentSection {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }
}

impl SectionAnalyzer for ContentSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Content
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        let report = analyze::analyze(content, content.focus_keyword.as_deref(), &self.weights);
        Some(SectionOutcome::from_analysis(report))
    }
}

pub struct ReadabilitySection;

impl SectionAnalyzer for ReadabilitySection {
    fn kind(&self) -> SectionKind {
        SectionKind::Readability
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        Some(SectionOutcome::from_analysis(analyze::analyze_readability(content)))
    }
}

pub struct TechnicalSection;

impl SectionAnalyzer for TechnicalSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Technical
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        let report = technical::technical_checks(content);
        let checks = report
            .checks
            .iter()
            .map(|check| (check.name, check.passed))
            .collect::<BTreeMap<_, _>>();
        Some(SectionOutcome::from_fields(
            report.score,
            &checks,
            report.recommendations(),
        ))
    }
}

pub struct InternalLinksSection;

impl SectionAnalyzer for InternalLinksSection {
    fn kind(&self) -> SectionKind {
        SectionKind::InternalLinks
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        let report = links::analyze_internal_links(content);
        Some(SectionOutcome::from_fields(
            report.score(),
            &report,
            report.recommendations(),
        ))
    }
}

pub struct ImagesSection;

impl SectionAnalyzer for ImagesSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Images
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        let report = images::analyze_images(content);
        Some(SectionOutcome::from_fields(
            report.score(),
            &report,
            report.recommendations(),
        ))
    }
}

pub struct PermalinkSection;

impl SectionAnalyzer for PermalinkSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Permalink
    }

    fn evaluate(&self, content: &AnalyzableContent) -> Option<SectionOutcome> {
        let report = analyze::analyze_permalink(content, content.focus_keyword.as_deref());
        Some(SectionOutcome::from_analysis(report))
    }
}

/// All six sections in display order.
pub fn default_analyzers(weights: WeightTable) -> Vec<Box<dyn SectionAnalyzer>> {
    vec![
        Box::new(ContentSection::new(weights)),
        Box::new(ReadabilitySection),
        Box::new(TechnicalSection),
        Box::new(InternalLinksSection),
        Box::new(ImagesSection),
        Box::new(PermalinkSection),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_analyzers_cover_every_section_once() {
        let kinds = default_analyzers(WeightTable::default())
            .iter()
            .map(|analyzer| analyzer.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn image_section_exposes_coverage_fields() {
        let content = AnalyzableContent::new(
            "Gallery",
            r#"<p>Photos.</p><img src="a.png" alt="A"><img src="b.png" alt="B"><img src="c.png">"#,
        );
        let outcome = ImagesSection
            .evaluate(&content)
            .expect("images section should evaluate");
        assert_eq!(outcome.score, 67);
        assert_eq!(outcome.metrics.get("total"), Some(&Value::from(3)));
        assert_eq!(outcome.metrics.get("with_alt"), Some(&Value::from(2)));
        assert_eq!(outcome.metrics.get("coverage"), Some(&Value::from(66.7)));
    }

    #[test]
    fn technical_section_lists_each_check() {
        let outcome = TechnicalSection
            .evaluate(&AnalyzableContent::new("Bare", "<p>x</p>"))
            .expect("technical section should evaluate");
        assert_eq!(outcome.score, 20);
        assert_eq!(outcome.metrics.len(), 5);
        assert_eq!(outcome.metrics.get("indexable"), Some(&Value::Bool(true)));
        assert_eq!(outcome.recommendations.len(), 4);
    }
}
