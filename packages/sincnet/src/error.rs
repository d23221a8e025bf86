//! Error types for the sinc filter-bank crate.

/// Everything that can go wrong while building, loading or exporting a layer.
///
/// The forward pass itself only ever fails with [`SincError::Candle`]; numeric
/// degeneracies (NaN/Inf) are propagated through the tensors, not reported.
#[derive(Debug, thiserror::Error)]
pub enum SincError {
    #[error("candle: {0}")]
    Candle(#[from] candle_core::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the public API.
pub type Result<T> = std::result::Result<T, SincError>;

impl From<SincError> for candle_core::Error {
    fn from(error: SincError) -> Self {
        match error {
            SincError::Candle(e) => e,
            other => candle_core::Error::Msg(other.to_string()),
        }
    }
}
