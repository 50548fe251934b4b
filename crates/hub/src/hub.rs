//! Hub verification: the [`VerificationService`] seam and its HTTP backing.

use std::time::Duration;

use {
    async_trait::async_trait,
    frames_config::HubConfig,
    prost::Message as _,
    reqwest::Client,
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    tracing::{debug, info},
    url::Url,
};

use crate::{
    error::{Error, HubError, HubResult, Result},
    proto::Message,
};

/// A hub's verdict on a message.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResponse {
    pub valid: bool,
    /// The message the hub validated, when it returned one.
    pub message: Option<Message>,
}

/// Something that can check a message's signature and hash.
///
/// `Err` means no verdict could be obtained; `Ok` carries the verdict.
#[async_trait]
pub trait VerificationService: Send + Sync {
    async fn validate_message(&self, message: &Message) -> HubResult<ValidationResponse>;

    /// Like [`validate_message`](Self::validate_message), with the bytes
    /// `message` was decoded from. Services that forward the message should
    /// send `encoded` as is: it may carry fields [`Message`] does not
    /// declare, and the signature covers them.
    async fn validate_encoded(
        &self,
        message: &Message,
        encoded: &[u8],
    ) -> HubResult<ValidationResponse> {
        let _ = encoded;
        self.validate_message(message).await
    }
}

/// Verifies messages through a hub's HTTP API (`POST /v1/validateMessage`).
pub struct HttpHubClient {
    client: Client,
    endpoint: Url,
    api_key: Option<Secret<String>>,
}

impl HttpHubClient {
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        let base = Url::parse(&config.http_url).map_err(|source| Error::InvalidHubUrl {
            url: config.http_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            endpoint: validate_message_url(&base),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `{base}/v1/validateMessage`, keeping any path prefix of `base`.
fn validate_message_url(base: &Url) -> Url {
    let mut url = base.clone();
    let path = format!("{}/v1/validateMessage", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

#[derive(Debug, Deserialize)]
struct ValidateMessageResponse {
    valid: bool,
    #[serde(default)]
    message: Option<EchoedMessage>,
}

/// The JSON rendering of the validated message; only the hash is checked.
#[derive(Debug, Deserialize)]
struct EchoedMessage {
    #[serde(default)]
    hash: Option<String>,
}

#[async_trait]
impl VerificationService for HttpHubClient {
    async fn validate_message(&self, message: &Message) -> HubResult<ValidationResponse> {
        self.post_message(message, message.encode_to_vec()).await
    }

    async fn validate_encoded(
        &self,
        message: &Message,
        encoded: &[u8],
    ) -> HubResult<ValidationResponse> {
        self.post_message(message, encoded.to_vec()).await
    }
}

impl HttpHubClient {
    async fn post_message(
        &self,
        message: &Message,
        body: Vec<u8>,
    ) -> HubResult<ValidationResponse> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "validating message with hub");

        let mut req = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/octet-stream")
            .header("Accept", "application/json")
            .body(body);
        if let Some(key) = &self.api_key {
            req = req.header("api_key", key.expose_secret().as_str());
        }

        let resp = req.send().await.map_err(HubError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HubError::Status { status, body });
        }

        let parsed: ValidateMessageResponse = resp
            .json()
            .await
            .map_err(|e| HubError::InvalidResponse(e.to_string()))?;

        let echoed = match parsed.message {
            Some(echoed) => {
                check_echoed_hash(&echoed, message)?;
                Some(message.clone())
            },
            None => None,
        };

        info!(valid = parsed.valid, "hub validated message");

        Ok(ValidationResponse {
            valid: parsed.valid,
            message: echoed,
        })
    }
}

/// The hub echoes the message it validated; make sure it is ours.
fn check_echoed_hash(echoed: &EchoedMessage, submitted: &Message) -> HubResult<()> {
    let Some(hash) = echoed.hash.as_deref() else {
        return Ok(());
    };
    let digits = hash.strip_prefix("0x").unwrap_or(hash);
    let decoded = hex::decode(digits)
        .map_err(|e| HubError::InvalidResponse(format!("echoed hash is not hex: {e}")))?;
    if decoded != submitted.hash {
        return Err(HubError::InvalidResponse(
            "hub echoed a different message".into(),
        ));
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::proto::{FrameActionBody, MessageData, MessageType, message_data},
    };

    fn sample_message() -> Message {
        Message {
            data: Some(MessageData {
                r#type: MessageType::FrameAction as i32,
                fid: 2,
                timestamp: 1,
                network: 1,
                body: Some(message_data::Body::FrameActionBody(FrameActionBody {
                    button_index: 1,
                    ..Default::default()
                })),
            }),
            hash: vec![0xd2, 0xb1, 0xdd],
            ..Default::default()
        }
    }

    fn client_for(url: &str, api_key: Option<&str>) -> HttpHubClient {
        HttpHubClient::from_config(&HubConfig {
            http_url: url.to_string(),
            timeout_seconds: 5,
            api_key: api_key.map(|k| Secret::new(k.to_string())),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_api_path() {
        let client = client_for("https://hub.example:2281", None);
        assert_eq!(
            client.endpoint().as_str(),
            "https://hub.example:2281/v1/validateMessage"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = client_for("https://api.example.com/hub/", None);
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.example.com/hub/v1/validateMessage"
        );
    }

    #[test]
    fn invalid_hub_url_is_rejected() {
        let result = HttpHubClient::from_config(&HubConfig {
            http_url: "not a url".into(),
            ..HubConfig::default()
        });
        assert!(matches!(result, Err(Error::InvalidHubUrl { .. })));
    }

    #[tokio::test]
    async fn posts_protobuf_and_reads_verdict() {
        let message = sample_message();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/validateMessage")
            .match_header("content-type", "application/octet-stream")
            .match_header("api_key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "valid": true,
                    "message": {
                        "data": { "type": "MESSAGE_TYPE_FRAME_ACTION", "fid": 2 },
                        "hash": "0xd2b1dd"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("test-key"));
        let response = client.validate_message(&message).await.unwrap();

        assert!(response.valid);
        assert_eq!(response.message, Some(message));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_verdict_without_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/validateMessage")
            .with_status(200)
            .with_body(r#"{"valid": false}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let response = client.validate_message(&sample_message()).await.unwrap();
        assert!(!response.valid);
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn error_status_is_hub_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/validateMessage")
            .with_status(400)
            .with_body(r#"{"errCode":"bad_request.validation_failure"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .validate_message(&sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Status { status, .. } if status.as_u16() == 400));
        assert!(err.to_string().contains("validation_failure"));
    }

    #[tokio::test]
    async fn garbage_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/validateMessage")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .validate_message(&sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn mismatched_echo_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/validateMessage")
            .with_status(200)
            .with_body(r#"{"valid": true, "message": {"hash": "0xffff"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .validate_message(&sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::InvalidResponse(ref m) if m.contains("different")));
    }

    #[tokio::test]
    async fn unreachable_hub_is_request_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = client_for("http://127.0.0.1:9", None);
        let err = client
            .validate_message(&sample_message())
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Request(_)));
    }
}
