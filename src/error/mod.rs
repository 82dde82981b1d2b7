pub mod decode;
pub mod encode;
pub mod protocol;
pub mod registry;
pub mod transport;

pub use decode::DecodeError;
pub use encode::EncodeError;
pub use protocol::{RehydrateError, StreamError};
pub use registry::RegistryError;
pub use transport::TransportError;
