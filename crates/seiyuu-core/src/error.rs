use seiyuu_api::AniListError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeiyuuError {
    #[error("API error: {0}")]
    Api(#[from] AniListError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
