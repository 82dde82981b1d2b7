/// Streaming chunk protocol: length-prefixed frames, resolution chunks.
pub mod chunk;
/// Client-side rehydration: live promises, background frame reader.
pub mod client;
/// Binary AQF format: tagged encoder/decoder with base64 helpers.
pub mod codec;
/// Subsystem configuration loading.
pub mod config;
/// One-shot hydration envelope embedded into the initial payload.
pub mod envelope;
/// Common error types: registration, encoding, decoding, transport.
pub mod error;
/// Logging initialization (tracing).
pub mod logging;
/// Content-type discriminators and the redirect payload.
pub mod negotiate;
/// Injected serializer registries for custom types, errors and context.
pub mod registry;
/// Value processor: eager and streaming walks over a value tree.
pub mod serialize;
/// Input value tree and errors carried as data.
pub mod value;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Framing and the producing side of the chunk stream.
pub use chunk::{ChunkWriter, FrameReader, ResolutionChunk, ResolutionOutcome};
/// Rehydration entry points and the restored tree.
pub use client::{hydrate_value, rehydrate, rehydrate_with_settings, Hydrated, Promise};
/// Binary codec and the wire-level value model.
pub use codec::{decode, encode, from_base64, to_base64, ErrorPayload, WireValue};
/// config
pub use config::Settings;
/// One-shot envelope.
pub use envelope::{HydrationEnvelope, ENVELOPE_VERSION};
/// Operation errors and result types.
pub use error::{
    DecodeError, EncodeError, RegistryError, RehydrateError, StreamError, TransportError,
};
/// Content negotiation.
pub use negotiate::{Redirect, ResponseKind, ROUTE_HEADER};
/// Serializer registries.
pub use registry::{ContextSerializer, ErrorSerializer, SerializerRegistry, TypeSerializer};
/// Value processor.
pub use serialize::{PendingComputation, PendingIds, Serializer};
/// Input values and data-borne errors.
pub use value::{BoxError, HttpError, RemoteError, TransportFailure, Value, ValueFuture};
