use crate::types::report::{AnalysisReport, Recommendation, ReportSnapshot, UnifiedReport};
use crate::types::scoring::{MetricOutcome, Scale};

fn push_recommendations(output: &mut String, recommendations: &[Recommendation]) {
    output.push_str("## Recommendations\n\n");
    if recommendations.is_empty() {
        output.push_str("- none\n");
        return;
    }
    for recommendation in recommendations {
        output.push_str(&format!(
            "- [{:?}] {}: {}\n",
            recommendation.priority, recommendation.factor, recommendation.message
        ));
    }
}

fn push_list(output: &mut String, heading: &str, items: &[String]) {
    output.push_str(&format!("### {heading}\n\n"));
    if items.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}

pub fn analysis_to_markdown<S: Scale>(post_id: &str, report: &AnalysisReport<S>) -> String {
    let mut output = String::new();
    output.push_str(&format!("# SEO Analysis: {post_id}\n\n"));
    output.push_str(&format!(
        "Engine: {} (max {} per metric)\n\nOverall score: {}/100 ({})\n\n",
        report.engine,
        S::MAX_SCORE,
        report.overall_score,
        report.status.as_str()
    ));

    output.push_str("## Metrics\n\n");
    output.push_str("| Metric | Score | Status | Message |\n");
    output.push_str("|---|---|---|---|\n");
    for (name, outcome) in report.analyses.iter() {
        match outcome {
            MetricOutcome::Evaluated(result) => output.push_str(&format!(
                "| {name} | {}/{} | {} | {} |\n",
                result.score,
                result.max_score,
                result.status.as_str(),
                result.message
            )),
            MetricOutcome::NotImplemented { message, .. } => {
                output.push_str(&format!("| {name} | - | not implemented | {message} |\n"))
            }
        }
    }
    output.push('\n');

    push_recommendations(&mut output, &report.recommendations);
    output
}

pub fn unified_to_markdown(report: &UnifiedReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# SEO Report: {}\n\n", report.post_id));
    output.push_str(&format!(
        "Overall score: {}/100 ({})\n\n",
        report.overall_score,
        report.status.as_str()
    ));

    output.push_str("## Sections\n\n");
    if report.sections.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for section in report.sections.values() {
            output.push_str(&format!(
                "- {}: {}/100 ({}, weight {})\n",
                section.name,
                section.score,
                section.status.as_str(),
                section.weight
            ));
        }
        output.push('\n');
    }

    output.push_str("## Summary\n\n");
    push_list(&mut output, "Strengths", &report.summary.strengths);
    push_list(&mut output, "Weaknesses", &report.summary.weaknesses);
    push_list(&mut output, "Quick wins", &report.summary.quick_wins);

    push_recommendations(&mut output, &report.recommendations);
    output
}

pub fn history_to_markdown(post_id: &str, snapshots: &[ReportSnapshot]) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Report History: {post_id}\n\n"));
    if snapshots.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for snapshot in snapshots {
        output.push_str(&format!(
            "- {}: {}/100 ({})\n",
            snapshot.recorded_at,
            snapshot.report.overall_score,
            snapshot.report.status.as_str()
        ));
    }
    output
}

pub fn audit_to_markdown(reports: &[UnifiedReport]) -> String {
    let mut output = String::new();
    output.push_str("# SEO Audit\n\n");
    if reports.is_empty() {
        output.push_str("- no posts found\n");
        return output;
    }
    output.push_str("| Post | Score | Status | Recommendations |\n");
    output.push_str("|---|---|---|---|\n");
    for report in reports {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            report.post_id,
            report.overall_score,
            report.status.as_str(),
            report.recommendations.len()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{Priority, ReportSummary, SectionKind, UnifiedReportSection};
    use crate::types::scoring::{Advanced, AdvancedMetricResult, MetricMap, Status};
    use std::collections::BTreeMap;

    fn unified() -> UnifiedReport {
        let mut sections = BTreeMap::new();
        sections.insert(
            SectionKind::Images,
            UnifiedReportSection {
                name: "Images".to_string(),
                score: 67,
                status: Status::Ok,
                weight: 10,
                metrics: BTreeMap::new(),
            },
        );
        UnifiedReport {
            post_id: "hello".to_string(),
            overall_score: 67,
            status: Status::Ok,
            sections,
            summary: ReportSummary {
                quick_wins: vec!["Add alt text to 1 image(s).".to_string()],
                ..ReportSummary::default()
            },
            recommendations: vec![Recommendation::new(
                "image_alt",
                Priority::Medium,
                "2 of 3 images have alt text (66.7%).",
            )],
        }
    }

    #[test]
    fn unified_markdown_contains_sections() {
        let rendered = unified_to_markdown(&unified());
        assert!(rendered.contains("# SEO Report: hello"));
        assert!(rendered.contains("- Images: 67/100 (ok, weight 10)"));
        assert!(rendered.contains("### Quick wins\n\n- Add alt text"));
        assert!(rendered.contains("[Medium] image_alt"));
    }

    #[test]
    fn analysis_markdown_marks_placeholders() {
        let mut analyses = MetricMap::<Advanced>::new();
        analyses.insert("title_length", AdvancedMetricResult::good("Fine."));
        analyses.insert("page_speed", MetricOutcome::not_implemented("Not measured."));
        let report = AnalysisReport {
            engine: "advanced".to_string(),
            analyses,
            overall_score: 100,
            status: Status::Good,
            recommendations: Vec::new(),
        };
        let rendered = analysis_to_markdown("hello", &report);
        assert!(rendered.contains("| title_length | 10/10 | good | Fine. |"));
        assert!(rendered.contains("| page_speed | - | not implemented |"));
        assert!(rendered.contains("## Recommendations\n\n- none"));
    }

    #[test]
    fn history_and_audit_render_rows() {
        let snapshot = ReportSnapshot {
            recorded_at: "2026-01-01T00:00:00+00:00".to_string(),
            report: unified(),
        };
        let history = history_to_markdown("hello", &[snapshot]);
        assert!(history.contains("- 2026-01-01T00:00:00+00:00: 67/100 (ok)"));

        let audit = audit_to_markdown(&[unified()]);
        assert!(audit.contains("| hello | 67 | ok | 1 |"));
        assert!(audit_to_markdown(&[]).contains("no posts found"));
    }
}
