//! Configuration loading and env substitution for the frames toolkit.
//!
//! Config files: `frames.toml`, `frames.yaml`, or `frames.json`
//! Searched in `./` then `~/.config/frames/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-fallback}` substitution in all
//! string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{FetchConfig, FramesConfig, HubConfig},
};
