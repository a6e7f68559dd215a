//! Metric results on two incompatible scales.
//!
//! The basic engine and its sibling analyzers score every metric out of 100,
//! the comprehensive engine out of 10. [`MetricResult`] carries its scale as a
//! type parameter, so a `BasicMetricResult` and an `AdvancedMetricResult` can
//! never land in the same [`MetricMap`] or be summed together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Composite scores at or above this are `good`.
pub const GOOD_THRESHOLD: u32 = 80;
/// Composite scores at or above this (and below [`GOOD_THRESHOLD`]) are `ok`.
pub const OK_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Ok,
    Poor,
}

impl Status {
    /// Tier for a 0-100 composite.
    pub fn from_score(score: u32) -> Self {
        if score >= GOOD_THRESHOLD {
            Status::Good
        } else if score >= OK_THRESHOLD {
            Status::Ok
        } else {
            Status::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Ok => "ok",
            Status::Poor => "poor",
        }
    }
}

pub trait Scale: Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static {
    const MAX_SCORE: u32;
    const NAME: &'static str;
}

/// 100-point metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basic {}

/// 10-point metrics of the comprehensive engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {}

impl Scale for Basic {
    const MAX_SCORE: u32 = 100;
    const NAME: &'static str = "basic";
}

impl Scale for Advanced {
    const MAX_SCORE: u32 = 10;
    const NAME: &'static str = "advanced";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MetricResult<S: Scale> {
    pub score: u32,
    pub max_score: u32,
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
    #[serde(skip)]
    scale: PhantomData<S>,
}

pub type BasicMetricResult = MetricResult<Basic>;
pub type AdvancedMetricResult = MetricResult<Advanced>;

impl<S: Scale> MetricResult<S> {
    /// Scores above the scale maximum are clamped.
    pub fn new(score: u32, status: Status, message: impl Into<String>) -> Self {
        Self {
            score: score.min(S::MAX_SCORE),
            max_score: S::MAX_SCORE,
            status,
            message: message.into(),
            details: BTreeMap::new(),
            scale: PhantomData,
        }
    }

    pub fn good(message: impl Into<String>) -> Self {
        Self::new(S::MAX_SCORE, Status::Good, message)
    }

    /// `ok` at half credit: the metric could not be evaluated.
    pub fn neutral(message: impl Into<String>) -> Self {
        Self::new(S::MAX_SCORE / 2, Status::Ok, message)
    }

    pub fn poor(score: u32, message: impl Into<String>) -> Self {
        Self::new(score, Status::Poor, message)
    }

    /// Fraction of the scale, e.g. 0.8 for 80/100.
    pub fn fraction(fraction: f64, status: Status, message: impl Into<String>) -> Self {
        let score = (fraction.clamp(0.0, 1.0) * f64::from(S::MAX_SCORE)).round() as u32;
        Self::new(score, status, message)
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.get(key)
    }
}

/// Either a real evaluation or a check that has no implementation yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", bound = "")]
pub enum MetricOutcome<S: Scale> {
    Evaluated(MetricResult<S>),
    NotImplemented {
        neutral_score: u32,
        max_score: u32,
        message: String,
    },
}

impl<S: Scale> MetricOutcome<S> {
    pub fn not_implemented(message: impl Into<String>) -> Self {
        MetricOutcome::NotImplemented {
            neutral_score: S::MAX_SCORE / 2,
            max_score: S::MAX_SCORE,
            message: message.into(),
        }
    }

    pub fn result(&self) -> Option<&MetricResult<S>> {
        match self {
            MetricOutcome::Evaluated(result) => Some(result),
            MetricOutcome::NotImplemented { .. } => None,
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, MetricOutcome::Evaluated(_))
    }
}

impl<S: Scale> From<MetricResult<S>> for MetricOutcome<S> {
    fn from(result: MetricResult<S>) -> Self {
        MetricOutcome::Evaluated(result)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct NamedMetric<S: Scale> {
    pub name: String,
    pub outcome: MetricOutcome<S>,
}

/// Metric outcomes in the order the checks ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct MetricMap<S: Scale> {
    entries: Vec<NamedMetric<S>>,
}

impl<S: Scale> Default for MetricMap<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: Scale> MetricMap<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-inserting an existing name replaces the outcome in place.
    pub fn insert(&mut self, name: &str, outcome: impl Into<MetricOutcome<S>>) {
        let outcome = outcome.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.outcome = outcome,
            None => self.entries.push(NamedMetric {
                name: name.to_string(),
                outcome,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricOutcome<S>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.outcome)
    }

    pub fn result(&self, name: &str) -> Option<&MetricResult<S>> {
        self.get(name).and_then(MetricOutcome::result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricOutcome<S>)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.outcome))
    }

    pub fn evaluated(&self) -> impl Iterator<Item = (&str, &MetricResult<S>)> {
        self.iter()
            .filter_map(|(name, outcome)| outcome.result().map(|result| (name, result)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Scale, N: Into<String>> FromIterator<(N, MetricOutcome<S>)> for MetricMap<S> {
    fn from_iter<I: IntoIterator<Item = (N, MetricOutcome<S>)>>(iter: I) -> Self {
        let mut map = MetricMap::new();
        for (name, outcome) in iter {
            let name = name.into();
            map.insert(&name, outcome);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tiers_follow_thresholds() {
        assert_eq!(Status::from_score(100), Status::Good);
        assert_eq!(Status::from_score(80), Status::Good);
        assert_eq!(Status::from_score(79), Status::Ok);
        assert_eq!(Status::from_score(50), Status::Ok);
        assert_eq!(Status::from_score(49), Status::Poor);
        assert_eq!(Status::from_score(0), Status::Poor);
    }

    #[test]
    fn scores_are_clamped_to_scale() {
        let basic = BasicMetricResult::new(140, Status::Good, "over");
        assert_eq!(basic.score, 100);
        assert_eq!(basic.max_score, 100);

        let advanced = AdvancedMetricResult::new(40, Status::Good, "over");
        assert_eq!(advanced.score, 10);
        assert_eq!(advanced.max_score, 10);
    }

    #[test]
    fn neutral_is_half_credit_ok() {
        let basic = BasicMetricResult::neutral("no keyword");
        assert_eq!((basic.score, basic.status), (50, Status::Ok));
        let advanced = AdvancedMetricResult::neutral("no keyword");
        assert_eq!((advanced.score, advanced.status), (5, Status::Ok));
    }

    #[test]
    fn metric_map_keeps_insertion_order_and_replaces_in_place() {
        let mut map = MetricMap::<Basic>::new();
        map.insert("b", BasicMetricResult::good("b"));
        map.insert("a", BasicMetricResult::poor(0, "a"));
        map.insert("b", BasicMetricResult::poor(10, "b again"));

        let names = map.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(map.result("b").map(|result| result.score), Some(10));
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let outcome: MetricOutcome<Advanced> = MetricOutcome::not_implemented("pending");
        let json = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(json["kind"], "not_implemented");
        assert_eq!(json["neutral_score"], 5);

        let evaluated: MetricOutcome<Advanced> = AdvancedMetricResult::good("fine").into();
        let json = serde_json::to_string(&evaluated).expect("outcome should serialize");
        let back: MetricOutcome<Advanced> =
            serde_json::from_str(&json).expect("outcome should deserialize");
        assert_eq!(back, evaluated);
    }
}
