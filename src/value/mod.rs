pub mod error;
pub mod tree;

pub use error::{HttpError, RemoteError, TransportFailure};
pub use tree::{AnyValue, BoxError, Value, ValueFuture};
