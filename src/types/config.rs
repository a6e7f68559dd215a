use crate::error::SeoError;
use crate::types::report::SectionKind;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Basic-engine metrics that carry a weight, with their default share.
pub const DEFAULT_METRIC_WEIGHTS: [(&str, f64); 10] = [
    ("keyword_density", 0.15),
    ("readability", 0.15),
    ("content_length", 0.15),
    ("keyword_in_title", 0.10),
    ("keyword_in_headings", 0.10),
    ("keyword_in_intro", 0.10),
    ("meta_description", 0.10),
    ("internal_links", 0.05),
    ("external_links", 0.05),
    ("image_alt", 0.05),
];

pub const DEFAULT_SECTION_WEIGHTS: [(SectionKind, u32); 6] = [
    (SectionKind::Content, 30),
    (SectionKind::Readability, 20),
    (SectionKind::Technical, 20),
    (SectionKind::InternalLinks, 10),
    (SectionKind::Images, 10),
    (SectionKind::Permalink, 10),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    pub cache_ttl_secs: Option<u64>,
    pub history_retention: Option<usize>,
    pub default_history_limit: Option<usize>,
    #[serde(default)]
    pub disabled_sections: Vec<String>,
    pub section_weights: Option<HashMap<String, u32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    pub content_dir: Option<String>,
    pub state_dir: Option<String>,
}

/// Immutable metric weight table for the weighted aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::new(DEFAULT_METRIC_WEIGHTS)
    }
}

impl WeightTable {
    pub fn new<'a>(weights: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect(),
        }
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.weights.get(metric).copied()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(name, weight)| (name.as_str(), *weight))
    }
}

/// Integer weights of the unified report sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionWeights {
    weights: BTreeMap<SectionKind, u32>,
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            weights: DEFAULT_SECTION_WEIGHTS.into_iter().collect(),
        }
    }
}

impl SectionWeights {
    pub fn new(weights: impl IntoIterator<Item = (SectionKind, u32)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: SectionKind) -> u32 {
        self.weights.get(&kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub cache_ttl_secs: u64,
    pub history_retention: usize,
    pub default_history_limit: usize,
    pub section_weights: SectionWeights,
    pub disabled_sections: Vec<SectionKind>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 12 * 60 * 60,
            history_retention: 50,
            default_history_limit: 10,
            section_weights: SectionWeights::default(),
            disabled_sections: Vec::new(),
        }
    }
}

impl SeoConfig {
    pub fn weight_table(&self) -> WeightTable {
        match &self.analysis.weights {
            Some(overrides) => WeightTable::new(DEFAULT_METRIC_WEIGHTS.map(|(name, default)| {
                (name, *overrides.get(name).unwrap_or(&default))
            })),
            None => WeightTable::default(),
        }
    }

    pub fn report_settings(&self) -> ReportSettings {
        let defaults = ReportSettings::default();
        let report = &self.report;
        let section_weights = match &report.section_weights {
            Some(overrides) => SectionWeights::new(DEFAULT_SECTION_WEIGHTS.map(|(kind, default)| {
                (kind, *overrides.get(kind.as_str()).unwrap_or(&default))
            })),
            None => defaults.section_weights,
        };
        ReportSettings {
            cache_ttl_secs: report.cache_ttl_secs.unwrap_or(defaults.cache_ttl_secs),
            history_retention: report
                .history_retention
                .unwrap_or(defaults.history_retention),
            default_history_limit: report
                .default_history_limit
                .unwrap_or(defaults.default_history_limit),
            section_weights,
            disabled_sections: report
                .disabled_sections
                .iter()
                .filter_map(|name| SectionKind::parse(name))
                .collect(),
        }
    }

    pub fn content_dir(&self) -> &str {
        self.store.content_dir.as_deref().unwrap_or("content")
    }

    pub fn state_dir(&self) -> &str {
        self.store.state_dir.as_deref().unwrap_or(".seoscore")
    }

    pub fn validate(&self) -> Result<(), SeoError> {
        if let Some(weights) = &self.analysis.weights {
            let unknown = weights
                .keys()
                .filter(|key| {
                    !DEFAULT_METRIC_WEIGHTS
                        .iter()
                        .any(|(name, _)| name == &key.as_str())
                })
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(SeoError::ConfigParse(format!(
                    "analysis.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let table = self.weight_table();
        if table.iter().any(|(_, weight)| !(0.0..=1.0).contains(&weight)) {
            return Err(SeoError::ConfigParse(
                "analysis.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = table.total();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(SeoError::ConfigParse(format!(
                "analysis.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(section_weights) = &self.report.section_weights {
            if let Some(unknown) = section_weights
                .keys()
                .find(|key| SectionKind::parse(key).is_none())
            {
                return Err(SeoError::ConfigParse(format!(
                    "report.section_weights contains unknown section: {unknown}"
                )));
            }
        }
        if let Some(unknown) = self
            .report
            .disabled_sections
            .iter()
            .find(|name| SectionKind::parse(name).is_none())
        {
            return Err(SeoError::ConfigParse(format!(
                "report.disabled_sections contains unknown section: {unknown}"
            )));
        }
        if self.report.history_retention == Some(0) {
            return Err(SeoError::ConfigParse(
                "report.history_retention must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: SeoConfig = toml::from_str("").expect("empty config should parse");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.weight_table(), WeightTable::default());
        assert_eq!(cfg.report_settings(), ReportSettings::default());
        assert_eq!(cfg.content_dir(), "content");
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((WeightTable::default().total() - 1.0).abs() < 0.001);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[analysis.weights]
keyword_density = 0.20
readability = 0.10

[report]
cache_ttl_secs = 60
history_retention = 5
disabled_sections = ["permalink"]

[report.section_weights]
content = 40

[store]
content_dir = "posts"
state_dir = "state"
"#;
        let cfg: SeoConfig = toml::from_str(toml_str).expect("full config should parse");
        assert!(cfg.validate().is_ok());
        let table = cfg.weight_table();
        assert_eq!(table.get("keyword_density"), Some(0.20));
        assert_eq!(table.get("readability"), Some(0.10));
        assert_eq!(table.get("content_length"), Some(0.15));

        let settings = cfg.report_settings();
        assert_eq!(settings.cache_ttl_secs, 60);
        assert_eq!(settings.history_retention, 5);
        assert_eq!(settings.disabled_sections, vec![SectionKind::Permalink]);
        assert_eq!(settings.section_weights.get(SectionKind::Content), 40);
        assert_eq!(settings.section_weights.get(SectionKind::Readability), 20);
        assert_eq!(cfg.content_dir(), "posts");
        assert_eq!(cfg.state_dir(), "state");
    }

    #[test]
    fn validate_rejects_invalid_weight_sum() {
        let toml_str = r#"
[analysis.weights]
keyword_density = 0.9
readability = 0.9
"#;
        let cfg: SeoConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn validate_rejects_unknown_weight_keys() {
        let toml_str = r#"
[analysis.weights]
keyword_density = 0.15
word_art = 0.01
"#;
        let cfg: SeoConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown key"));
        assert!(err.to_string().contains("word_art"));
    }

    #[test]
    fn validate_rejects_unknown_sections() {
        let toml_str = r#"
[report]
disabled_sections = ["social"]
"#;
        let cfg: SeoConfig = toml::from_str(toml_str).expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("unknown section: social"));
    }

    #[test]
    fn validate_rejects_zero_retention() {
        let toml_str = r#"
[report]
history_retention = 0
"#;
        let cfg: SeoConfig = toml::from_str(toml_str).expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
