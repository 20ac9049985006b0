//! Memo sequence codec.
//!
//! The whole ordered collection is stored as one JSON array. Order in the
//! array is store order (newest-inserted first).

use crate::model::memo::Memo;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for memo blob encoding/decoding.
#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode memos: {err}"),
            Self::Decode(err) => write!(f, "failed to decode memos: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Serializes the full memo sequence.
pub fn encode_memos(memos: &[Memo]) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(memos).map_err(CodecError::Encode)
}

/// Deserializes a memo sequence written by `encode_memos` or an older build.
pub fn decode_memos(bytes: &[u8]) -> Result<Vec<Memo>, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
