use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Unknown tag 0x{0:02X}")]
    UnknownTag(u8),

    #[error("Maximum nesting depth exceeded ({0})")]
    DepthExceeded(usize),

    #[error("Blob too large ({len} > {max})")]
    BlobTooLarge { len: usize, max: usize },

    #[error("Collection too large ({len} > {max})")]
    CollectionTooLarge { len: usize, max: usize },

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid date value: {0} ms")]
    InvalidDate(i64),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Duplicate placeholder id {0:?}")]
    DuplicatePlaceholder(String),

    #[error("No registered serializer for custom type {0:?}")]
    UnregisteredType(String),

    #[error("Pending placeholder in a one-shot payload")]
    UnexpectedPlaceholder,

    #[error("Unsupported envelope version (expected {expected}, found {found})")]
    VersionMismatch { expected: u32, found: u32 },
}
