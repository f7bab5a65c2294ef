use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("completion service error: {0}")]
    Provider(anyhow::Error),

    #[error("conversation store error: {0}")]
    Store(anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
