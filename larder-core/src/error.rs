use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid seed data: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to persist recipes: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize recipes: {0}")]
    Serialize(#[from] serde_json::Error),
}
