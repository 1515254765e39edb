use thiserror::Error;

/// Errors from the AniList API client.
#[derive(Debug, Error)]
pub enum AniListError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited for {retry_after_secs}s, longer than the {ceiling_secs}s ceiling")]
    RateLimited {
        retry_after_secs: u64,
        ceiling_secs: u64,
    },

    #[error("parse error: {0}")]
    Parse(String),
}
