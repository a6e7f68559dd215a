use crate::types::report::{AnalysisReport, UnifiedReport};
use crate::types::scoring::{Scale, Status};
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[derive(Serialize)]
#[serde(bound = "")]
struct AnalysisOutput<'a, S: Scale> {
    post_id: &'a str,
    #[serde(flatten)]
    report: &'a AnalysisReport<S>,
}

pub fn analysis_to_json<S: Scale>(
    post_id: &str,
    report: &AnalysisReport<S>,
) -> Result<String, serde_json::Error> {
    to_json(&AnalysisOutput { post_id, report })
}

#[derive(Serialize)]
struct AuditRow<'a> {
    post_id: &'a str,
    overall_score: u32,
    status: Status,
    recommendations: usize,
}

pub fn audit_to_json(reports: &[UnifiedReport]) -> Result<String, serde_json::Error> {
    let rows = reports
        .iter()
        .map(|report| AuditRow {
            post_id: &report.post_id,
            overall_score: report.overall_score,
            status: report.status,
            recommendations: report.recommendations.len(),
        })
        .collect::<Vec<_>>();
    to_json(&rows)
}
