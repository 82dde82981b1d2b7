use thiserror::Error;

use super::{DecodeError, EncodeError, TransportError};

/// Ошибки производящей стороны чанк-протокола.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Background computation failed: {0}")]
    Background(String),
}

/// Ошибки принимающей стороны (регидратация).
#[derive(Debug, Error)]
pub enum RehydrateError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
