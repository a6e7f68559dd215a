use crate::content::AnalyzableContent;
use crate::metrics::structure;
use crate::recommend;
use crate::text::round1;
use crate::types::report::Recommendation;
use crate::types::scoring::BasicMetricResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub total: usize,
    pub with_alt: usize,
    /// Percent with one decimal; `None` when the post has no images.
    pub coverage: Option<f64>,
    pub missing_alt: Vec<String>,
    pub result: BasicMetricResult,
}

impl ImageReport {
    pub fn score(&self) -> u32 {
        self.result.score
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommend::for_result("image_alt", &self.result)
            .into_iter()
            .collect()
    }
}

pub fn analyze_images(content: &AnalyzableContent) -> ImageReport {
    let total = content.images.len();
    let with_alt = content.images_with_alt();
    let coverage = (total > 0).then(|| round1(with_alt as f64 / total as f64 * 100.0));
    let missing_alt = content
        .images
        .iter()
        .filter(|image| !image.has_alt())
        .map(|image| image.src.clone())
        .collect();
    ImageReport {
        total,
        with_alt,
        coverage,
        missing_alt,
        result: structure::image_alt_coverage(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::Status;

    #[test]
    fn two_of_three_images_with_alt() {
        let content = AnalyzableContent::new(
            "Gallery",
            r#"<p>Photos.</p><img src="a.png" alt="A"><img src="b.png" alt="B"><img src="c.png">"#,
        );
        let report = analyze_images(&content);
        assert_eq!((report.total, report.with_alt), (3, 2));
        assert_eq!(report.coverage, Some(66.7));
        assert_eq!(report.score(), 67);
        assert_eq!(report.result.status, Status::Ok);
        assert_eq!(report.missing_alt, vec!["c.png".to_string()]);
        assert_eq!(report.recommendations().len(), 1);
    }

    #[test]
    fn no_images_is_neutral() {
        let report = analyze_images(&AnalyzableContent::new("Plain", "<p>Text only.</p>"));
        assert_eq!(report.coverage, None);
        assert_eq!(report.score(), 50);
    }
}
