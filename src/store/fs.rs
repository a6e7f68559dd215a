use super::{expiry_from_now, validate_post_id, ContentProvider, HistoryStore, ReportCache};
use crate::content::ContentRecord;
use crate::error::{Result, SeoError};
use crate::types::report::ReportSnapshot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Reads posts from `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryContentProvider {
    root: PathBuf,
}

impl DirectoryContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentProvider for DirectoryContentProvider {
    fn fetch(&self, post_id: &str) -> Result<ContentRecord> {
        validate_post_id(post_id)?;
        let path = self.root.join(format!("{post_id}.json"));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(SeoError::ContentNotFound(post_id.to_string()));
            }
            Err(error) => return Err(SeoError::Io(error)),
        };
        let mut record: ContentRecord = serde_json::from_str(&raw)?;
        if record.id.is_empty() {
            record.id = post_id.to_string();
        }
        tracing::debug!(path = %path.display(), "loaded post");
        Ok(record)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(SeoError::PathNotFound(self.root.display().to_string()));
        }
        let mut ids = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .filter(|id| validate_post_id(id).is_ok())
            .collect::<Vec<_>>();
        ids.sort();
        Ok(ids)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    key: String,
    expires_at: i64,
    value: String,
}

/// One JSON file per cache key under `dir`, named by the key's sha256.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sha256_hex(key.as_bytes())))
    }

    fn write_entry(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let envelope = CacheEnvelope {
            key: key.to_string(),
            expires_at: expiry_from_now(ttl),
            value: value.to_string(),
        };
        fs::write(self.entry_path(key), serde_json::to_string(&envelope)?)?;
        Ok(())
    }
}

impl ReportCache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let raw = fs::read_to_string(self.entry_path(key)).ok()?;
        let envelope = match serde_json::from_str::<CacheEnvelope>(&raw) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::debug!(%error, "ignoring unreadable cache entry");
                return None;
            }
        };
        if envelope.key != key || envelope.expires_at <= chrono::Utc::now().timestamp() {
            return None;
        }
        Some(envelope.value)
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        if let Err(error) = self.write_entry(key, value, ttl) {
            tracing::warn!(%error, "failed to write cache entry");
        }
    }
}

/// Append-only JSON Lines file per post, pruned to the newest `retention`
/// snapshots after each append.
#[derive(Debug, Clone)]
pub struct FileHistory {
    dir: PathBuf,
    retention: usize,
}

impl FileHistory {
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention: retention.max(1),
        }
    }

    fn history_path(&self, post_id: &str) -> Result<PathBuf> {
        validate_post_id(post_id)?;
        Ok(self.dir.join(format!("{post_id}.jsonl")))
    }

    fn prune(&self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)?;
        let lines = raw.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<_>>();
        if lines.len() <= self.retention {
            return Ok(());
        }
        let kept = &lines[lines.len() - self.retention..];
        let mut rewritten = kept.join("\n");
        rewritten.push('\n');
        fs::write(path, rewritten)?;
        tracing::debug!(
            path = %path.display(),
            dropped = lines.len() - kept.len(),
            "pruned report history"
        );
        Ok(())
    }
}

impl HistoryStore for FileHistory {
    fn append(&mut self, post_id: &str, snapshot: &ReportSnapshot) -> Result<()> {
        let path = self.history_path(post_id)?;
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", serde_json::to_string(snapshot)?)?;
        file.flush()?;
        self.prune(&path)
    }

    fn list(&self, post_id: &str, limit: usize) -> Result<Vec<ReportSnapshot>> {
        let path = self.history_path(post_id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(SeoError::Io(error)),
        };
        let snapshots = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<ReportSnapshot>(line) {
                Ok(snapshot) => Some(snapshot),
                Err(error) => {
                    tracing::warn!(%error, path = %path.display(), "skipping malformed history line");
                    None
                }
            })
            .collect::<Vec<_>>();
        Ok(snapshots.into_iter().rev().take(limit).collect())
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
