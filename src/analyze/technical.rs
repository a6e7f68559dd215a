use crate::content::AnalyzableContent;
use crate::types::report::{Priority, Recommendation};
use serde::Serialize;

pub const POINTS_PER_CHECK: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicalCheck {
    pub name: &'static str,
    pub passed: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicalReport {
    pub score: u32,
    pub checks: Vec<TechnicalCheck>,
}

impl TechnicalReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|check| check.passed).count()
    }

    /// Failed checks only; a noindexed post is the one high-priority fix.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| {
                let priority = if check.name == "indexable" {
                    Priority::High
                } else {
                    Priority::Medium
                };
                Recommendation::new(check.name, priority, check.message)
            })
            .collect()
    }
}

/// Five presence checks worth `POINTS_PER_CHECK` each.
pub fn technical_checks(content: &AnalyzableContent) -> TechnicalReport {
    let meta = &content.meta;
    let checks = vec![
        TechnicalCheck {
            name: "meta_title",
            passed: meta.meta_title.is_some(),
            message: "Set a meta title for search results.",
        },
        TechnicalCheck {
            name: "meta_description",
            passed: meta.meta_description.is_some(),
            message: "Set a meta description for search results.",
        },
        TechnicalCheck {
            name: "schema_markup",
            passed: meta.schema_type.is_some(),
            message: "Add structured data such as Article schema.",
        },
        TechnicalCheck {
            name: "canonical_url",
            passed: meta.canonical_url.is_some(),
            message: "Set a canonical URL.",
        },
        TechnicalCheck {
            name: "indexable",
            passed: !meta.noindex,
            message: "Remove noindex so the post can appear in search results.",
        },
    ];
    let passed = checks.iter().filter(|check| check.passed).count() as u32;
    TechnicalReport {
        score: passed * POINTS_PER_CHECK,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;

    #[test]
    fn bare_post_only_passes_indexable() {
        let report = technical_checks(&AnalyzableContent::new("Bare", "<p>x</p>"));
        assert_eq!(report.score, 20);
        assert_eq!(report.passed(), 1);
        let recs = report.recommendations();
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|rec| rec.priority == Priority::Medium));
    }

    #[test]
    fn complete_post_scores_full_marks() {
        let content = AnalyzableContent::from_record(&ContentRecord {
            meta_title: Some("Title".to_string()),
            meta_description: Some("Description".to_string()),
            schema_type: Some("Article".to_string()),
            canonical_url: Some("https://example.test/post".to_string()),
            ..ContentRecord::default()
        });
        let report = technical_checks(&content);
        assert_eq!(report.score, 100);
        assert!(report.recommendations().is_empty());
    }

    #[test]
    fn noindex_is_high_priority() {
        let content = AnalyzableContent::from_record(&ContentRecord {
            noindex: true,
            ..ContentRecord::default()
        });
        let report = technical_checks(&content);
        assert_eq!(report.score, 0);
        assert!(report
            .recommendations()
            .iter()
            .any(|rec| rec.factor == "indexable" && rec.priority == Priority::High));
    }
}
