use super::{expiry_from_now, ContentProvider, HistoryStore, ReportCache};
use crate::content::ContentRecord;
use crate::error::{Result, SeoError};
use crate::types::report::ReportSnapshot;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct MemoryContentProvider {
    posts: BTreeMap<String, ContentRecord>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its own id.
    pub fn insert(&mut self, record: ContentRecord) {
        self.posts.insert(record.id.clone(), record);
    }

    pub fn with(mut self, record: ContentRecord) -> Self {
        self.insert(record);
        self
    }
}

impl ContentProvider for MemoryContentProvider {
    fn fetch(&self, post_id: &str) -> Result<ContentRecord> {
        self.posts
            .get(post_id)
            .cloned()
            .ok_or_else(|| SeoError::ContentNotFound(post_id.to_string()))
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self.posts.keys().cloned().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, (String, i64)>,
    writes: usize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ReportCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let (value, expires_at) = self.entries.get(key)?;
        (chrono::Utc::now().timestamp() < *expires_at).then(|| value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.writes += 1;
        self.entries
            .insert(key.to_string(), (value.to_string(), expiry_from_now(ttl)));
    }
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    retention: usize,
    snapshots: HashMap<String, Vec<ReportSnapshot>>,
}

impl MemoryHistory {
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            snapshots: HashMap::new(),
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(50)
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, post_id: &str, snapshot: &ReportSnapshot) -> Result<()> {
        let entries = self.snapshots.entry(post_id.to_string()).or_default();
        entries.push(snapshot.clone());
        if entries.len() > self.retention {
            let excess = entries.len() - self.retention;
            entries.drain(..excess);
        }
        Ok(())
    }

    fn list(&self, post_id: &str, limit: usize) -> Result<Vec<ReportSnapshot>> {
        Ok(self
            .snapshots
            .get(post_id)
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{ReportSummary, UnifiedReport};
    use crate::types::scoring::Status;

    fn snapshot(score: u32) -> ReportSnapshot {
        ReportSnapshot {
            recorded_at: format!("2026-01-01T00:00:{score:02}Z"),
            report: UnifiedReport {
                post_id: "post".to_string(),
                overall_score: score,
                status: Status::from_score(score),
                sections: BTreeMap::new(),
                summary: ReportSummary::default(),
                recommendations: Vec::new(),
            },
        }
    }

    #[test]
    fn provider_reports_missing_posts() {
        let provider = MemoryContentProvider::new().with(ContentRecord {
            id: "a".to_string(),
            ..ContentRecord::default()
        });
        assert!(provider.fetch("a").is_ok());
        assert!(matches!(
            provider.fetch("b"),
            Err(SeoError::ContentNotFound(id)) if id == "b"
        ));
        assert_eq!(provider.list_ids().expect("ids should list"), vec!["a"]);
    }

    #[test]
    fn cache_expires_entries() {
        let mut cache = MemoryCache::new();
        cache.set("live", "1", Duration::from_secs(60));
        cache.set("dead", "2", Duration::ZERO);
        assert_eq!(cache.get("live").as_deref(), Some("1"));
        assert_eq!(cache.get("dead"), None);
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.writes(), 2);
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let mut history = MemoryHistory::new(3);
        for score in 1..=5 {
            history
                .append("post", &snapshot(score))
                .expect("append should succeed");
        }
        let listed = history.list("post", 10).expect("list should succeed");
        let scores = listed
            .iter()
            .map(|entry| entry.report.overall_score)
            .collect::<Vec<_>>();
        assert_eq!(scores, vec![5, 4, 3]);
        assert_eq!(history.list("post", 1).expect("list").len(), 1);
        assert!(history.list("other", 5).expect("list").is_empty());
    }
}
