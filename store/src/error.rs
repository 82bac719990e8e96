use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("storage backend error: {0}")]
    Backend(String),
}
