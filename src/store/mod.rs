//! Collaborator seams for the report composer: where posts come from, where
//! rendered reports are cached, and where report snapshots are kept.
//!
//! The in-memory implementations back the tests; the filesystem ones back
//! the CLI.

pub mod fs;
pub mod memory;

use crate::content::ContentRecord;
use crate::error::{Result, SeoError};
use crate::types::report::ReportSnapshot;
use std::time::Duration;

pub use fs::{DirectoryContentProvider, FileCache, FileHistory};
pub use memory::{MemoryCache, MemoryContentProvider, MemoryHistory};

pub trait ContentProvider {
    /// `SeoError::ContentNotFound` when no post has this id.
    fn fetch(&self, post_id: &str) -> Result<ContentRecord>;

    /// Known post ids in a stable order.
    fn list_ids(&self) -> Result<Vec<String>>;
}

/// Best-effort string cache. A failed write is logged by the implementation,
/// never surfaced; a miss and an expired entry look the same.
pub trait ReportCache {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str, ttl: Duration);
}

pub trait HistoryStore {
    fn append(&mut self, post_id: &str, snapshot: &ReportSnapshot) -> Result<()>;

    /// Most recent first, at most `limit` entries.
    fn list(&self, post_id: &str, limit: usize) -> Result<Vec<ReportSnapshot>>;
}

/// Ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_post_id(post_id: &str) -> Result<()> {
    let valid = !post_id.is_empty()
        && post_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SeoError::InvalidContentId(post_id.to_string()))
    }
}

/// Unix timestamp `ttl` from now, saturating instead of overflowing.
pub(crate) fn expiry_from_now(ttl: Duration) -> i64 {
    let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    chrono::Utc::now().timestamp().saturating_add(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_ids_reject_path_characters() {
        assert!(validate_post_id("hello-world_2").is_ok());
        for bad in ["", "../etc/passwd", "a/b", "a.json", "with space"] {
            assert!(
                matches!(validate_post_id(bad), Err(SeoError::InvalidContentId(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        assert_eq!(expiry_from_now(Duration::from_secs(u64::MAX)), i64::MAX);
    }
}
