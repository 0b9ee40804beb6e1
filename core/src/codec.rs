//! Response body decoding.

use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// Decodes response bytes into a caller-chosen type.
///
/// Implementations are shared between concurrent calls and must not keep
/// per-call state.
pub trait Codec: Send + Sync + 'static {
    fn decode<D: DeserializeOwned>(&self, bytes: &[u8]) -> Result<D, DecodeError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode<D: DeserializeOwned>(&self, bytes: &[u8]) -> Result<D, DecodeError> {
        serde_json::from_slice(bytes).map_err(DecodeError::new)
    }
}
