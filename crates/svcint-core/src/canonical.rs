//! # Canonical Serialization — JCS Byte Production
//!
//! `CanonicalBytes` is the only input accepted by fingerprinting. Entries
//! that are structurally equal produce identical bytes whatever their map
//! iteration or field declaration order, because serialization goes through
//! RFC 8785 (sorted keys, compact separators).
//!
//! Config entries carry no floating-point fields, so any float found in the
//! value tree is an error rather than something to render.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// JCS-serialized bytes of a float-free value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// [`CanonicalizationError::FloatRejected`] for the first float found,
    /// [`CanonicalizationError::SerializationFailed`] if the value does not
    /// serialize.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        Ok(Self(serde_jcs::to_vec(&value)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => Err(CanonicalizationError::FloatRejected(
            n.as_f64().unwrap_or(f64::NAN),
        )),
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
