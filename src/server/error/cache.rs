use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache backend failure: {0}")]
    Backend(String),
    #[error("Failed to (de)serialize cached value for key {key}: {message}")]
    Serialization { key: String, message: String },
}

impl From<fred::error::Error> for CacheError {
    fn from(err: fred::error::Error) -> Self {
        Self::Backend(err.to_string())
    }
}
