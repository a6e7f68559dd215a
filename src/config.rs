use crate::error::{Result, SeoError};
use crate::types::config::SeoConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "seoscore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".seoscore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/seoscore/config.toml";

/// Tables an overlay replaces whole instead of merging key by key. A weight
/// scheme must sum to 1.0, so mixing keys from two layers rarely does.
const REPLACED_TABLES: [&[&str]; 1] = [&["analysis", "weights"]];

/// One config file in the layering order, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Global,
    Repo,
    Local,
}

impl Layer {
    fn label(self) -> &'static str {
        match self {
            Layer::Global => "global",
            Layer::Repo => "repo",
            Layer::Local => "local",
        }
    }
}

/// Loads `seoscore.toml` from `root`, layered over the user's global config
/// and under `.seoscore/local.toml`. Returns `None` when the repo file is absent.
pub fn load_config(root: &Path) -> Result<Option<SeoConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<SeoConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let local_path = root.join(DEFAULT_LOCAL_FILE);
    let layers = global_path
        .map(|path| (Layer::Global, path))
        .into_iter()
        .chain([
            (Layer::Repo, repo_path.as_path()),
            (Layer::Local, local_path.as_path()),
        ]);

    let mut merged = Value::Table(Map::new());
    let mut applied = Vec::new();
    for (layer, path) in layers {
        if !path.exists() {
            continue;
        }
        let overlay = read_layer(layer, path)?;
        overlay_layer(&mut merged, overlay, &mut Vec::new());
        applied.push(layer.label());
    }

    let cfg: SeoConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| SeoError::ConfigParse(e.to_string()))?;
    cfg.validate().map_err(|err| match err {
        SeoError::ConfigParse(msg) => {
            SeoError::ConfigParse(format!("{msg} (layers: {})", applied.join(" < ")))
        }
        other => other,
    })?;
    tracing::debug!(layers = ?applied, path = %repo_path.display(), "loaded config");
    Ok(Some(cfg))
}

fn read_layer(layer: Layer, path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        SeoError::ConfigParse(format!("{} config {}: {}", layer.label(), path.display(), e))
    })
}

/// Merges `overlay` into `base`; `at` is the table path of `base`.
fn overlay_layer(base: &mut Value, overlay: Value, at: &mut Vec<String>) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                at.push(key.clone());
                let replaced = REPLACED_TABLES
                    .iter()
                    .any(|table| table.iter().copied().eq(at.iter().map(String::as_str)));
                match base_table.get_mut(&key) {
                    Some(existing) if !replaced => overlay_layer(existing, value, at),
                    Some(existing) => *existing = value,
                    None => {
                        base_table.insert(key, value);
                    }
                }
                at.pop();
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
