use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::FramesConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["frames.toml", "frames.yaml", "frames.yml", "frames.json"];

/// Env vars overriding `hub.http_url`, highest precedence first.
const HUB_URL_ENV_VARS: &[&str] = &["FRAME_HUB_URL", "HUB_URL"];

const HUB_API_KEY_ENV_VAR: &str = "FRAME_HUB_API_KEY";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<FramesConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./frames.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/frames/frames.{toml,yaml,yml,json}` (user-global)
///
/// Returns `FramesConfig::default()` if no config file is found or the file
/// fails to load.
pub fn discover_and_load() -> FramesConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    FramesConfig::default()
}

/// Apply process-environment overrides on top of a loaded config.
///
/// `FRAME_HUB_URL` wins over `HUB_URL`; `FRAME_HUB_API_KEY` sets the hub key.
pub fn apply_env_overrides(config: FramesConfig) -> FramesConfig {
    apply_env_overrides_with(config, |name| std::env::var(name).ok())
}

pub(crate) fn apply_env_overrides_with(
    mut config: FramesConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> FramesConfig {
    let hub_url = HUB_URL_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()));
    if let Some(url) = hub_url {
        debug!(url = %url, "hub url overridden from environment");
        config.hub.http_url = url;
    }
    if let Some(key) = lookup(HUB_API_KEY_ENV_VAR).filter(|v| !v.is_empty()) {
        config.hub.api_key = Some(Secret::new(key));
    }
    config
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/frames/
    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/frames/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "frames").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<FramesConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse(path, e)),
        _ => Err(Error::UnsupportedFormat(ext.to_string())),
    }
}
