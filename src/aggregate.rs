//! Composite scores over a metric map.
//!
//! `NotImplemented` outcomes never contribute: a check that was not evaluated
//! neither helps nor hurts the composite.

use crate::types::config::WeightTable;
use crate::types::scoring::{Basic, MetricMap, Scale, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composite {
    pub score: u32,
    pub status: Status,
}

impl Composite {
    fn from_score(score: u32) -> Self {
        Self {
            score,
            status: Status::from_score(score),
        }
    }
}

/// `round(Σscore / Σmax * 100)`; 0 when nothing was evaluated.
pub fn unweighted<S: Scale>(metrics: &MetricMap<S>) -> Composite {
    let (earned, possible) = metrics
        .evaluated()
        .fold((0u64, 0u64), |(earned, possible), (_, result)| {
            (
                earned + u64::from(result.score),
                possible + u64::from(result.max_score),
            )
        });
    if possible == 0 {
        return Composite::from_score(0);
    }
    let score = (earned as f64 / possible as f64 * 100.0).round() as u32;
    Composite::from_score(score.min(100))
}

/// `round(Σ(score * weight))` over the metrics named in `weights`. Metrics
/// missing from the map are skipped, not counted as zero.
pub fn weighted(metrics: &MetricMap<Basic>, weights: &WeightTable) -> Composite {
    let total = weights
        .iter()
        .filter_map(|(name, weight)| metrics.result(name).map(|result| f64::from(result.score) * weight))
        .sum::<f64>();
    Composite::from_score((total.round().max(0.0) as u32).min(100))
}

/// Integer-weighted average of `(score, weight)` pairs; 0 when the weights sum to 0.
pub fn weighted_average(parts: impl IntoIterator<Item = (u32, u32)>) -> Composite {
    let (numerator, denominator) = parts
        .into_iter()
        .fold((0u64, 0u64), |(numerator, denominator), (score, weight)| {
            (
                numerator + u64::from(score) * u64::from(weight),
                denominator + u64::from(weight),
            )
        });
    if denominator == 0 {
        return Composite::from_score(0);
    }
    Composite::from_score((numerator as f64 / denominator as f64).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{Advanced, AdvancedMetricResult, BasicMetricResult, MetricOutcome};

    #[test]
    fn unweighted_sums_scores_over_max() {
        let mut map = MetricMap::<Advanced>::new();
        map.insert("a", AdvancedMetricResult::good("a"));
        map.insert("b", AdvancedMetricResult::neutral("b"));
        map.insert("c", AdvancedMetricResult::poor(0, "c"));
        let composite = unweighted(&map);
        assert_eq!(composite.score, 50);
        assert_eq!(composite.status, Status::Ok);
    }

    #[test]
    fn unweighted_ignores_not_implemented() {
        let mut map = MetricMap::<Advanced>::new();
        map.insert("a", AdvancedMetricResult::good("a"));
        map.insert("pending", MetricOutcome::not_implemented("later"));
        assert_eq!(unweighted(&map).score, 100);
    }

    #[test]
    fn unweighted_empty_map_is_zero() {
        let composite = unweighted(&MetricMap::<Basic>::new());
        assert_eq!(composite.score, 0);
        assert_eq!(composite.status, Status::Poor);
    }

    #[test]
    fn weighted_skips_missing_metrics() {
        let weights = WeightTable::new([("x", 0.5), ("y", 0.5)]);
        let mut map = MetricMap::<Basic>::new();
        map.insert("x", BasicMetricResult::good("x"));
        map.insert("unweighted", BasicMetricResult::poor(0, "ignored"));
        assert_eq!(weighted(&map, &weights).score, 50);
    }

    #[test]
    fn weighted_is_order_independent() {
        let weights = WeightTable::default();
        let entries = [
            ("keyword_density", 50),
            ("readability", 90),
            ("content_length", 30),
            ("keyword_in_title", 100),
            ("meta_description", 70),
            ("image_alt", 67),
        ];
        let forward = entries
            .iter()
            .map(|(name, score)| {
                (*name, MetricOutcome::from(BasicMetricResult::new(*score, Status::Ok, "")))
            })
            .collect::<MetricMap<Basic>>();
        let reversed = entries
            .iter()
            .rev()
            .map(|(name, score)| {
                (*name, MetricOutcome::from(BasicMetricResult::new(*score, Status::Ok, "")))
            })
            .collect::<MetricMap<Basic>>();
        assert_eq!(weighted(&forward, &weights), weighted(&reversed, &weights));
    }

    #[test]
    fn weighted_average_guards_zero_weight() {
        assert_eq!(weighted_average(std::iter::empty()).score, 0);
        assert_eq!(weighted_average([(90, 0), (10, 0)]).score, 0);
        assert_eq!(weighted_average([(90, 30), (40, 20)]).score, 70);
    }
}
