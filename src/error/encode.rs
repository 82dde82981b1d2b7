use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Payload too large ({len} > {max})")]
    TooLarge { len: usize, max: usize },

    #[error("Custom value does not match any registered serializer")]
    UnregisteredType,

    #[error("Value does not downcast to registered type {0:?}")]
    TypeMismatch(String),
}
