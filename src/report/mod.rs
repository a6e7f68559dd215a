pub mod json;
pub mod md;

use crate::error::{Result, SeoError};
use crate::types::report::{AnalysisReport, ReportSnapshot, UnifiedReport};
use crate::types::scoring::Scale;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_analysis<S: Scale>(
    post_id: &str,
    report: &AnalysisReport<S>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::analysis_to_json(post_id, report).map_err(SeoError::Json),
        OutputFormat::Md => Ok(md::analysis_to_markdown(post_id, report)),
    }
}

pub fn render_unified(report: &UnifiedReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SeoError::Json),
        OutputFormat::Md => Ok(md::unified_to_markdown(report)),
    }
}

pub fn render_history(
    post_id: &str,
    snapshots: &[ReportSnapshot],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(&snapshots).map_err(SeoError::Json),
        OutputFormat::Md => Ok(md::history_to_markdown(post_id, snapshots)),
    }
}

pub fn render_audit(reports: &[UnifiedReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::audit_to_json(reports).map_err(SeoError::Json),
        OutputFormat::Md => Ok(md::audit_to_markdown(reports)),
    }
}
