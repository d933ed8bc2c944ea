//! Record Codec: [`MedicalRecord`] to and from its stored JSON form.
//!
//! Stored records are JSON objects with exactly the four string fields, in
//! the order `patient`, `doctor`, `procedure`, `cost`. Decoding is fallible;
//! the store decides what a failed decode means (see [`decode_lenient`]).

extern crate alloc;

use alloc::string::{String as StdString, ToString};
use alloc::vec::Vec as StdVec;
use thiserror::Error;

use crate::types::MedicalRecord;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CodecError {
    #[error("failed to encode record: {0}")]
    Encode(StdString),
    #[error("failed to decode record: {0}")]
    Decode(StdString),
}

pub fn encode(record: &MedicalRecord) -> Result<StdVec<u8>, CodecError> {
    serde_json::to_vec(record).map_err(|err| CodecError::Encode(err.to_string()))
}

/// Missing fields decode as empty strings; unknown fields are ignored.
pub fn decode(bytes: &[u8]) -> Result<MedicalRecord, CodecError> {
    serde_json::from_slice(bytes).map_err(|err| CodecError::Decode(err.to_string()))
}

/// Decode, substituting an all-empty record for empty or malformed bytes.
pub fn decode_lenient(bytes: &[u8]) -> MedicalRecord {
    decode(bytes).unwrap_or_default()
}

/// A ledger key as a JSON string literal, quotes included.
pub fn encode_key(key: &str) -> Result<StdVec<u8>, CodecError> {
    serde_json::to_vec(key).map_err(|err| CodecError::Encode(err.to_string()))
}
