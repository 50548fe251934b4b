#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("response from {url} exceeds {limit} bytes")]
    BodyTooLarge { url: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
