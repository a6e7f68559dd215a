//! Unified report composition: run the section analyzers over one post,
//! weight their scores, summarize, cache and keep history.

pub mod sections;

use crate::aggregate;
use crate::content::AnalyzableContent;
use crate::error::Result;
use crate::store::fs::sha256_hex;
use crate::store::{ContentProvider, HistoryStore, ReportCache};
use crate::types::config::{ReportSettings, SectionWeights, WeightTable};
use crate::types::report::{
    ReportSnapshot, ReportSummary, SectionKind, UnifiedReport, UnifiedReportSection,
};
use crate::types::scoring::{Status, GOOD_THRESHOLD, OK_THRESHOLD};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub use sections::{default_analyzers, SectionAnalyzer, SectionOutcome};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportOptions {
    /// Bypass the cache read. Not part of the cache key.
    #[serde(skip)]
    pub force_refresh: bool,
    /// Overrides the post's own focus keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Restrict the report to these sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionKind>>,
}

impl ReportOptions {
    pub fn cache_key(&self, post_id: &str) -> Result<String> {
        let options = serde_json::to_string(self)?;
        Ok(format!(
            "seoscore:report:{post_id}:{}",
            sha256_hex(options.as_bytes())
        ))
    }

    fn includes(&self, kind: SectionKind) -> bool {
        self.sections
            .as_ref()
            .map_or(true, |sections| sections.contains(&kind))
    }
}

pub struct ReportComposer<P, C, H> {
    provider: P,
    cache: C,
    history: H,
    settings: ReportSettings,
    analyzers: Vec<Box<dyn SectionAnalyzer>>,
}

impl<P, C, H> ReportComposer<P, C, H>
where
    P: ContentProvider,
    C: ReportCache,
    H: HistoryStore,
{
    pub fn new(provider: P, cache: C, history: H, settings: ReportSettings, weights: WeightTable) -> Self {
        Self::with_analyzers(provider, cache, history, settings, default_analyzers(weights))
    }

    /// Sections listed in `settings.disabled_sections` are dropped here.
    pub fn with_analyzers(
        provider: P,
        cache: C,
        history: H,
        settings: ReportSettings,
        mut analyzers: Vec<Box<dyn SectionAnalyzer>>,
    ) -> Self {
        analyzers.retain(|analyzer| !settings.disabled_sections.contains(&analyzer.kind()));
        Self {
            provider,
            cache,
            history,
            settings,
            analyzers,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// The post must resolve through the provider even when a cached report
    /// exists, so a deleted post fails with `ContentNotFound`. A cached report
    /// for the same options is served unless `force_refresh` is set. A freshly computed report is cached and
    /// appended to the post's history; failing to record history does not
    /// fail the report.
    #[tracing::instrument(skip(self, options))]
    pub fn generate_unified_report(
        &mut self,
        post_id: &str,
        options: &ReportOptions,
    ) -> Result<UnifiedReport> {
        let key = options.cache_key(post_id)?;
        let mut record = self.provider.fetch(post_id)?;
        if !options.force_refresh {
            if let Some(cached) = self.cache.get(&key) {
                match serde_json::from_str::<UnifiedReport>(&cached) {
                    Ok(report) => {
                        tracing::info!("serving cached report");
                        return Ok(report);
                    }
                    Err(error) => tracing::warn!(%error, "discarding unreadable cached report"),
                }
            }
        }

        if let Some(keyword) = &options.keyword {
            record.focus_keyword = Some(keyword.clone());
        }
        let content = AnalyzableContent::from_record(&record);
        let report = compose_report(
            post_id,
            &content,
            &self.analyzers,
            &self.settings.section_weights,
            options,
        );

        let serialized = serde_json::to_string(&report)?;
        self.cache
            .set(&key, &serialized, Duration::from_secs(self.settings.cache_ttl_secs));

        let snapshot = ReportSnapshot {
            recorded_at: Utc::now().to_rfc3339(),
            report: report.clone(),
        };
        if let Err(error) = self.history.append(post_id, &snapshot) {
            tracing::warn!(%error, "failed to record report history");
        }

        tracing::info!(
            score = report.overall_score,
            sections = report.sections.len(),
            "generated unified report"
        );
        Ok(report)
    }

    /// Newest first; `limit` falls back to the configured default.
    pub fn get_report_history(
        &self,
        post_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ReportSnapshot>> {
        let limit = limit.unwrap_or(self.settings.default_history_limit);
        self.history.list(post_id, limit)
    }
}

/// Pure composition step: no cache, no history, no clock.
pub fn compose_report(
    post_id: &str,
    content: &AnalyzableContent,
    analyzers: &[Box<dyn SectionAnalyzer>],
    weights: &SectionWeights,
    options: &ReportOptions,
) -> UnifiedReport {
    let mut sections = BTreeMap::new();
    let mut recommendations = Vec::new();

    for analyzer in analyzers {
        let kind = analyzer.kind();
        if !options.includes(kind) {
            continue;
        }
        let Some(outcome) = analyzer.evaluate(content) else {
            tracing::debug!(section = kind.as_str(), "section unavailable; skipped");
            continue;
        };
        recommendations.extend(outcome.recommendations);
        sections.insert(
            kind,
            UnifiedReportSection {
                name: kind.label().to_string(),
                score: outcome.score,
                status: Status::from_score(outcome.score),
                weight: weights.get(kind),
                metrics: outcome.metrics,
            },
        );
    }

    let composite = aggregate::weighted_average(
        sections
            .values()
            .map(|section| (section.score, section.weight)),
    );

    UnifiedReport {
        post_id: post_id.to_string(),
        overall_score: composite.score,
        status: composite.status,
        summary: summarize(&sections, content),
        sections,
        recommendations,
    }
}

fn summarize(
    sections: &BTreeMap<SectionKind, UnifiedReportSection>,
    content: &AnalyzableContent,
) -> ReportSummary {
    let describe = |section: &UnifiedReportSection| format!("{} ({}/100)", section.name, section.score);
    let strengths = sections
        .values()
        .filter(|section| section.score >= GOOD_THRESHOLD)
        .map(describe)
        .collect();
    let weaknesses = sections
        .values()
        .filter(|section| section.score < OK_THRESHOLD)
        .map(describe)
        .collect();
    ReportSummary {
        strengths,
        weaknesses,
        quick_wins: quick_wins(content),
    }
}

/// Fixed checks listed regardless of section weights.
fn quick_wins(content: &AnalyzableContent) -> Vec<String> {
    let mut wins = Vec::new();
    match (
        content.meta.meta_title.is_some(),
        content.meta.meta_description.is_some(),
    ) {
        (false, false) => wins.push("Add a meta title and meta description.".to_string()),
        (false, true) => wins.push("Add a meta title.".to_string()),
        (true, false) => wins.push("Add a meta description.".to_string()),
        (true, true) => {}
    }

    let missing_alt = content.images.len() - content.images_with_alt();
    if missing_alt > 0 {
        wins.push(format!("Add alt text to {missing_alt} image(s)."));
    }
    wins
}
