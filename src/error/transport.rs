use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stream ended mid-frame ({buffered} bytes buffered)")]
    Truncated { buffered: usize },

    #[error("Frame too large ({len} > {max})")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Stream ended before the initial chunk")]
    EmptyStream,
}
