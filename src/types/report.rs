use crate::types::scoring::{MetricMap, Scale, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub factor: String,
    pub priority: Priority,
    pub message: String,
}

impl Recommendation {
    pub fn new(factor: &str, priority: Priority, message: &str) -> Self {
        Self {
            factor: factor.to_string(),
            priority,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AnalysisReport<S: Scale> {
    pub engine: String,
    pub analyses: MetricMap<S>,
    pub overall_score: u32,
    pub status: Status,
    pub recommendations: Vec<Recommendation>,
}

/// Sections of the unified report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Content,
    Readability,
    Technical,
    InternalLinks,
    Images,
    Permalink,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Content,
        SectionKind::Readability,
        SectionKind::Technical,
        SectionKind::InternalLinks,
        SectionKind::Images,
        SectionKind::Permalink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Content => "content",
            SectionKind::Readability => "readability",
            SectionKind::Technical => "technical",
            SectionKind::InternalLinks => "internal_links",
            SectionKind::Images => "images",
            SectionKind::Permalink => "permalink",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Content => "Content",
            SectionKind::Readability => "Readability",
            SectionKind::Technical => "Technical SEO",
            SectionKind::InternalLinks => "Internal linking",
            SectionKind::Images => "Images",
            SectionKind::Permalink => "Permalink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedReportSection {
    pub name: String,
    pub score: u32,
    pub status: Status,
    pub weight: u32,
    pub metrics: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub quick_wins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedReport {
    pub post_id: String,
    pub overall_score: u32,
    pub status: Status,
    pub sections: BTreeMap<SectionKind, UnifiedReportSection>,
    pub summary: ReportSummary,
    pub recommendations: Vec<Recommendation>,
}

impl UnifiedReport {
    pub fn section(&self, kind: SectionKind) -> Option<&UnifiedReportSection> {
        self.sections.get(&kind)
    }
}

/// A unified report as kept by the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub recorded_at: String,
    pub report: UnifiedReport,
}
