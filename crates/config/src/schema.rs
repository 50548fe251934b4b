/// Config schema types (hub verification, page fetching).
use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Default hub HTTP endpoint used when nothing is configured.
pub const DEFAULT_HUB_HTTP_URL: &str = "https://nemes.farcaster.xyz:2281";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FramesConfig {
    pub hub: HubConfig,
    pub fetch: FetchConfig,
}

/// Hub used to verify signed frame actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Base URL of the hub HTTP API (e.g. "https://nemes.farcaster.xyz:2281").
    pub http_url: String,
    /// Per-request timeout for verification calls.
    pub timeout_seconds: u64,
    /// API key for hosted hubs that require one (sent as the `api_key` header).
    #[serde(
        default,
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_key: Option<Secret<String>>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            http_url: DEFAULT_HUB_HTTP_URL.into(),
            timeout_seconds: 10,
            api_key: None,
        }
    }
}

/// Fetching frame pages over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    /// Responses larger than this are rejected before parsing.
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            max_body_bytes: 2_000_000,
            user_agent: concat!("frames/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

// ── Serde helpers for Secret<String> ────────────────────────────────────────

fn serialize_option_secret<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}
