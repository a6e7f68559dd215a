//! Check table for the weighted 100-point engine.
//!
//! Names line up with the keys of `DEFAULT_METRIC_WEIGHTS`.

use super::Check;
use crate::metrics::{keyword, meta, readability, structure};
use crate::types::scoring::Basic;

pub const CHECKS: &[(&str, Check<Basic>)] = &[
    ("keyword_density", Check::Keyword(keyword::keyword_density)),
    ("readability", Check::Content(readability::flesch_reading_ease)),
    ("content_length", Check::Content(structure::content_length)),
    ("keyword_in_title", Check::Keyword(keyword::keyword_in_title)),
    ("keyword_in_headings", Check::Keyword(keyword::keyword_in_headings)),
    ("keyword_in_intro", Check::Keyword(keyword::keyword_in_intro)),
    ("meta_description", Check::Keyword(meta::meta_description)),
    ("internal_links", Check::Content(structure::internal_links)),
    ("external_links", Check::Content(structure::external_links)),
    ("image_alt", Check::Content(structure::image_alt_coverage)),
];

/// Checks that fall back to the neutral result without a focus keyword.
pub const KEYWORD_METRICS: [&str; 4] = [
    "keyword_density",
    "keyword_in_title",
    "keyword_in_headings",
    "keyword_in_intro",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::DEFAULT_METRIC_WEIGHTS;

    #[test]
    fn every_weighted_metric_has_a_check() {
        let names = CHECKS.iter().map(|(name, _)| *name).collect::<Vec<_>>();
        for (metric, _) in DEFAULT_METRIC_WEIGHTS {
            assert!(names.contains(&metric), "{metric} has no check");
        }
        assert_eq!(names.len(), DEFAULT_METRIC_WEIGHTS.len());
    }
}
