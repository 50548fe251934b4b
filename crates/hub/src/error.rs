/// Errors a caller can act on: the request itself is unusable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("messageBytes is not valid hex: {0}")]
    InvalidMessageBytes(#[from] hex::FromHexError),

    #[error("failed to decode action message: {0}")]
    MessageDecode(#[from] prost::DecodeError),

    #[error("invalid hub URL {url}: {source}")]
    InvalidHubUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to obtain a verdict from the hub, as opposed to a negative verdict.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("hub request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("hub returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected hub response: {0}")]
    InvalidResponse(String),
}

pub type HubResult<T> = std::result::Result<T, HubError>;
