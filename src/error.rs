use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid api key")]
    InvalidApiKey,

    #[error("unauthorized ip address")]
    UnauthorizedIpAddress,

    /// The service rejected the call with HTTP 429. `limit` and `remaining`
    /// come from the `X-HackCheck-Limit` / `X-HackCheck-Remaining` headers,
    /// 0 when a header is missing.
    #[error("rate limit reached ({remaining} of {limit} requests remaining)")]
    RateLimited { limit: u32, remaining: u32 },

    #[error("endpoint not found")]
    EndpointNotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("server returned an error")]
    Server,

    /// The v3 lookup envelope came back with `success: false`; carries the
    /// server's message verbatim.
    #[error("lookup failed: {0}")]
    Api(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
