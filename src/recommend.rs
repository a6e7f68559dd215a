use crate::types::report::{Priority, Recommendation};
use crate::types::scoring::{MetricMap, MetricResult, Scale, Status};

/// One recommendation per `poor` (high) or `ok` (medium) metric, in the
/// metric map's order, carrying the metric message verbatim. `good` metrics
/// and unevaluated checks produce nothing.
pub fn recommendations<S: Scale>(metrics: &MetricMap<S>) -> Vec<Recommendation> {
    metrics
        .evaluated()
        .filter_map(|(name, result)| for_result(name, result))
        .collect()
}

pub fn for_result<S: Scale>(factor: &str, result: &MetricResult<S>) -> Option<Recommendation> {
    priority_for(result.status).map(|priority| Recommendation::new(factor, priority, &result.message))
}

pub fn priority_for(status: Status) -> Option<Priority> {
    match status {
        Status::Poor => Some(Priority::High),
        Status::Ok => Some(Priority::Medium),
        Status::Good => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{Basic, BasicMetricResult, MetricOutcome};

    #[test]
    fn recommendations_follow_insertion_order_not_severity() {
        let mut map = MetricMap::<Basic>::new();
        map.insert("first", BasicMetricResult::neutral("medium first"));
        map.insert("fine", BasicMetricResult::good("fine"));
        map.insert("second", BasicMetricResult::poor(0, "high second"));
        map.insert("pending", MetricOutcome::not_implemented("later"));

        let recs = recommendations(&map);
        assert_eq!(
            recs,
            vec![
                Recommendation::new("first", Priority::Medium, "medium first"),
                Recommendation::new("second", Priority::High, "high second"),
            ]
        );
    }

    #[test]
    fn all_good_metrics_yield_no_recommendations() {
        let mut map = MetricMap::<Basic>::new();
        map.insert("a", BasicMetricResult::good("a"));
        assert!(recommendations(&map).is_empty());
    }
}
