//! Fetch a page over HTTP and parse its frame.

use std::time::Duration;

use {
    frames_config::FetchConfig,
    reqwest::Client,
    tracing::{debug, info},
    url::Url,
};

use crate::{Error, Result, parse::parse_frame, types::FrameMetadata};

/// Fetches pages and extracts their frame metadata.
pub struct FrameFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl FrameFetcher {
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch `url` and parse it, using `url` as the fallback post URL.
    ///
    /// `Ok(None)` means the page loaded but does not describe a frame.
    pub async fn fetch_frame(&self, url: &str) -> Result<Option<FrameMetadata>> {
        let html = self.fetch_html(url).await?;
        let frame = parse_frame(&html, Some(url));
        info!(url, is_frame = frame.is_some(), "fetched frame page");
        Ok(frame)
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "http" | "https" => {},
            s => return Err(Error::UnsupportedScheme(s.to_string())),
        }

        debug!(url, "fetching frame page");

        let request_error = |source: reqwest::Error| Error::Request {
            url: url.to_string(),
            source,
        };

        let mut resp = self
            .client
            .get(parsed)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let too_large = || Error::BodyTooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        };

        if resp
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(request_error)? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
